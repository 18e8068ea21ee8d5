//! Fork cache keys and entries.

use chrono::NaiveDateTime;
use sea_orm::DbErr;
use serde_json::Value;

use crate::model::api::CacheEntryDto;

/// Identifies one cached fork: the source repository and the target organization.
///
/// `org` of `None` means the fork targets the authenticated account. Organizations are
/// normalized on construction so an empty or whitespace-only organization is the same key
/// as no organization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    repo_full_name: String,
    org: Option<String>,
}

impl CacheKey {
    /// Creates a key for `repo_full_name` (`owner/name`) forked into `org`.
    pub fn new(repo_full_name: impl Into<String>, org: Option<&str>) -> Self {
        Self {
            repo_full_name: repo_full_name.into(),
            org: normalize_org(org),
        }
    }

    /// Full name of the source repository, `owner/name`.
    pub fn repo_full_name(&self) -> &str {
        &self.repo_full_name
    }

    /// Target organization, `None` for the authenticated account.
    pub fn org(&self) -> Option<&str> {
        self.org.as_deref()
    }
}

/// Trims an organization and treats blank values as absent.
pub fn normalize_org(org: Option<&str>) -> Option<String> {
    org.map(str::trim)
        .filter(|org| !org.is_empty())
        .map(str::to_string)
}

/// Last known fork response for one [`CacheKey`].
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    /// Key the entry is stored under.
    pub key: CacheKey,
    /// GitHub's fork response body.
    pub payload: Value,
    /// When the entry was first stored.
    pub created_at: NaiveDateTime,
    /// When the payload was last replaced.
    pub updated_at: NaiveDateTime,
}

impl TryFrom<entity::repository_cache::Model> for CacheEntry {
    type Error = DbErr;

    fn try_from(model: entity::repository_cache::Model) -> Result<Self, Self::Error> {
        let payload = serde_json::from_str(&model.payload).map_err(|e| {
            DbErr::Json(format!(
                "cached payload for {} is not valid JSON: {}",
                model.repo_full_name, e
            ))
        })?;

        Ok(Self {
            key: CacheKey {
                repo_full_name: model.repo_full_name,
                org: model.org,
            },
            payload,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl From<CacheEntry> for CacheEntryDto {
    fn from(entry: CacheEntry) -> Self {
        Self {
            repo_full_name: entry.key.repo_full_name,
            org: entry.key.org,
            payload: entry.payload,
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}
