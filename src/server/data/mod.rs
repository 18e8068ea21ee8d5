//! Data access layer repositories.
//!
//! Repositories provide an abstraction layer over database operations. The fork cache is
//! the only persisted data: one row per (repository, organization) fork response.

pub mod repository_cache;
