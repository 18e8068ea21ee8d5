//! Test fixture modules for database and HTTP mock creation.
//!
//! - `cache` - Rows of the repository cache table
//! - `github` - GitHub response bodies and mock REST endpoints

pub mod cache;
pub mod github;
