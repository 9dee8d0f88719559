//! dialscope-core - Domain model and decision logic for phone intelligence
//!
//! This crate provides the foundational primitives:
//! - Number normalization against ordered region hints
//! - Signal result types produced by lookup providers
//! - The merge policy that folds signals into one intelligence record
//! - The deterministic risk scoring and online-status engines
//! - The stable-shape JSON report
//!
//! Everything here is pure: no I/O, no ambient configuration. Provider
//! integrations live in `dialscope-sources`, orchestration in
//! `dialscope-runtime`.

pub mod merge;
pub mod netinfo;
pub mod number;
pub mod presence;
pub mod report;
pub mod risk;
pub mod signal;

pub use merge::*;
pub use netinfo::*;
pub use number::*;
pub use presence::*;
pub use report::*;
pub use risk::*;
pub use signal::*;

/// Per-source timeout budget in seconds
pub const DEFAULT_SOURCE_TIMEOUT_SECS: u64 = 10;

/// Neutral reputation sub-score assumed when no provider supplied one
pub const NEUTRAL_REPUTATION: i64 = 50;

/// Sentinel for report fields whose source returned no data
pub const UNKNOWN: &str = "Unknown";
