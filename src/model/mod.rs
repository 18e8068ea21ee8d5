//! Types shared with API consumers.

pub mod api;
