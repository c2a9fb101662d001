//! Domain layer containing the quiz model and its pure engines.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, error codes)
//! - `quiz` - Question bank, sessions, selection, scoring and ranking

pub mod foundation;
pub mod quiz;
