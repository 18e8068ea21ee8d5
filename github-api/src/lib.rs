//! Minimal GitHub REST client for repository fork management.
//!
//! Covers the two calls the fork service needs: creating a fork of a repository and
//! deleting a repository. Every request carries a bearer token, the GitHub JSON media type
//! and a pinned API version header, and is bounded by the client's timeout.
//!
//! ```ignore
//! let client = github_api::Client::builder()
//!     .user_agent("forkcache/0.1")
//!     .token("ghp_...")
//!     .build()?;
//!
//! let fork = client.create_fork("acme", "widget", Some("acme-forks")).await?;
//! ```

mod client;
mod error;
pub mod model;

pub use client::{Client, ClientBuilder, DEFAULT_API_URL, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use error::Error;
