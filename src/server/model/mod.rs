//! Server application models and type definitions.
//!
//! This module contains the application state shared by HTTP handlers and the plain
//! values the fork cache works with, decoupled from the SeaORM entities.

pub mod app;
pub mod cache;
