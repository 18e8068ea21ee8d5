//! Server application core modules.
//!
//! This module contains the server side of forkcache: HTTP routing, the fork cache data
//! layer, the fork and delete services that talk to GitHub, configuration and startup.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod util;
