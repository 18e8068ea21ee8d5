//! Utility helpers for the server.

pub mod repository;
