//! Repository cache table access.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, TransactionTrait,
};
use serde_json::Value;

use crate::server::model::cache::{CacheEntry, CacheKey};

/// Fork cache storage, keyed by [`CacheKey`].
///
/// Each method runs on its own pooled connection and releases it before returning; nothing
/// is held across calls.
pub struct RepositoryCacheRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RepositoryCacheRepository<'a> {
    /// Creates a new instance of [`RepositoryCacheRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the cached fork response for `key`
    pub async fn get(&self, key: &CacheKey) -> Result<Option<Value>, DbErr> {
        Ok(self.get_entry(key).await?.map(|entry| entry.payload))
    }

    /// Gets the full cache entry for `key`, including its timestamps
    ///
    /// Returns `DbErr::Json` if the stored payload is not valid JSON.
    pub async fn get_entry(&self, key: &CacheKey) -> Result<Option<CacheEntry>, DbErr> {
        entity::prelude::RepositoryCache::find()
            .filter(key_condition(key))
            .one(self.db)
            .await?
            .map(CacheEntry::try_from)
            .transpose()
    }

    /// Inserts or replaces the cached fork response for `key`
    ///
    /// The lookup and the write share one transaction. An existing entry has its payload
    /// and `updated_at` replaced while `created_at` is kept; a new entry gets both
    /// timestamps set to now.
    ///
    /// # Notes
    /// - The lookup is what keeps a single row per key when `org` is `None`, as unique
    ///   indexes don't consider `NULL` values equal
    pub async fn upsert(&self, key: &CacheKey, payload: &Value) -> Result<CacheEntry, DbErr> {
        let payload = serde_json::to_string(payload).map_err(|e| DbErr::Json(e.to_string()))?;
        let now = Utc::now().naive_utc();

        let txn = self.db.begin().await?;

        let existing = entity::prelude::RepositoryCache::find()
            .filter(key_condition(key))
            .one(&txn)
            .await?;

        let model = match existing {
            Some(entry) => {
                let mut entry: entity::repository_cache::ActiveModel = entry.into();
                entry.payload = ActiveValue::Set(payload);
                entry.updated_at = ActiveValue::Set(now);

                entry.update(&txn).await?
            }
            None => {
                entity::repository_cache::ActiveModel {
                    repo_full_name: ActiveValue::Set(key.repo_full_name().to_string()),
                    org: ActiveValue::Set(key.org().map(str::to_string)),
                    payload: ActiveValue::Set(payload),
                    created_at: ActiveValue::Set(now),
                    updated_at: ActiveValue::Set(now),
                    ..Default::default()
                }
                .insert(&txn)
                .await?
            }
        };

        txn.commit().await?;

        CacheEntry::try_from(model)
    }

    /// Checks whether a fork response is cached for `key`
    pub async fn exists(&self, key: &CacheKey) -> Result<bool, DbErr> {
        let entry = entity::prelude::RepositoryCache::find()
            .filter(key_condition(key))
            .one(self.db)
            .await?;

        Ok(entry.is_some())
    }

    /// Deletes the cached fork response for `key`
    ///
    /// Returns `true` if an entry was removed, `false` if none existed.
    pub async fn delete(&self, key: &CacheKey) -> Result<bool, DbErr> {
        let result = entity::prelude::RepositoryCache::delete_many()
            .filter(key_condition(key))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

fn key_condition(key: &CacheKey) -> Condition {
    let org = match key.org() {
        Some(org) => entity::repository_cache::Column::Org.eq(org),
        None => entity::repository_cache::Column::Org.is_null(),
    };

    Condition::all()
        .add(entity::repository_cache::Column::RepoFullName.eq(key.repo_full_name()))
        .add(org)
}
