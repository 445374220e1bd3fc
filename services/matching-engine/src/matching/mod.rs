//! Matching logic module
//!
//! Price-cross predicates, per-fill execution guards, and the
//! fill-or-kill dry-run planner. The walk itself lives in the engine.

pub mod crossing;
pub mod executor;
pub mod fok;

pub use crossing::{can_match, crosses};
