//! Cache-first GitHub fork service.
//!
//! Forks a GitHub repository into the authenticated account or an organization and records
//! the fork response, so repeated requests for the same repository and organization are
//! answered from the cache instead of GitHub.

pub mod model;
pub mod server;
