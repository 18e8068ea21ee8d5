//! Repository cache database fixtures.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, EntityTrait};
use serde_json::Value;

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn cache<'a>(&'a mut self) -> CacheFixtures<'a> {
        CacheFixtures { setup: self }
    }
}

pub struct CacheFixtures<'a> {
    pub setup: &'a mut TestContext,
}

impl<'a> CacheFixtures<'a> {
    /// Insert a cached fork response directly into the database.
    ///
    /// # Arguments
    /// - `repo_full_name` - Source repository, `owner/name`
    /// - `org` - Target organization, stored as given
    /// - `payload` - Fork response, stored JSON-encoded
    ///
    /// # Returns
    /// - `Ok(Model)` - The inserted row
    /// - `Err(TestError::DbErr)` - Insertion failed, e.g. the table doesn't exist
    pub async fn insert_cached_fork(
        &mut self,
        repo_full_name: &str,
        org: Option<&str>,
        payload: &Value,
    ) -> Result<entity::repository_cache::Model, TestError> {
        let now = Utc::now().naive_utc();

        let model = entity::repository_cache::ActiveModel {
            repo_full_name: ActiveValue::Set(repo_full_name.to_string()),
            org: ActiveValue::Set(org.map(str::to_string)),
            payload: ActiveValue::Set(payload.to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&self.setup.db)
        .await?;

        Ok(model)
    }

    /// Insert a row whose payload column is not valid JSON.
    pub async fn insert_corrupt_entry(
        &mut self,
        repo_full_name: &str,
    ) -> Result<entity::repository_cache::Model, TestError> {
        let now = Utc::now().naive_utc();

        let model = entity::repository_cache::ActiveModel {
            repo_full_name: ActiveValue::Set(repo_full_name.to_string()),
            org: ActiveValue::Set(None),
            payload: ActiveValue::Set("{not json".to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&self.setup.db)
        .await?;

        Ok(model)
    }

    /// All rows of the repository cache table.
    pub async fn all_entries(&mut self) -> Result<Vec<entity::repository_cache::Model>, TestError> {
        Ok(entity::prelude::RepositoryCache::find()
            .all(&self.setup.db)
            .await?)
    }
}
