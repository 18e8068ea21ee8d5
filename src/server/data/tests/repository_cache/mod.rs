mod get;

use forkcache_test_utils::prelude::*;
use serde_json::json;

use crate::server::{data::repository_cache::RepositoryCacheRepository, model::cache::CacheKey};
