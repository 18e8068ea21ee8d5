//! Service layer for business logic and orchestration.
//!
//! Services coordinate between the fork cache repository and the GitHub API. The fork
//! service owns the cache-first fork policy and remote deletion; the fork guard keeps
//! concurrent requests for one cache key from forking twice.

pub mod fork;
pub mod single_flight;
