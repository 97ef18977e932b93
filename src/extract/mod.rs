// src/extract/mod.rs

//! Extraction engine: maps one semi-structured HTML document to one typed
//! record, field by field, with fallback values.
//!
//! Field rules (a selector plus a default) are applied independently and
//! are fault-isolated: a failing or absent selection yields the field's
//! default, commonly [`crate::models::UNAVAILABLE`], instead of aborting
//! the rest of the record. Extraction of a whole document fails only when
//! its expected top-level container is missing.

mod dom;
pub mod fixtures;
pub mod info;
pub mod live;
pub mod scorecard;
pub mod squads;

pub use fixtures::extract_fixtures;
pub use info::extract_match_info;
pub use live::extract_live_state;
pub use scorecard::extract_scorecard;
pub use squads::extract_squads;
