
use axum::extract::Query;
use forkcache::server::controller::cache::CacheQuery;

use super::*;

fn query(repo_full_name: &str, org: Option<&str>) -> Query<CacheQuery> {
    Query(CacheQuery {
        repo_full_name: repo_full_name.to_string(),
        org: org.map(str::to_string),
    })
}
