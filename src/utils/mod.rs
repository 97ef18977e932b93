// src/utils/mod.rs

//! Shared utility functions.

pub mod url;

pub use url::{canonical_match_id, resolve, tab_url};
