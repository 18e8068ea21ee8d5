pub use super::repository_cache::Entity as RepositoryCache;
