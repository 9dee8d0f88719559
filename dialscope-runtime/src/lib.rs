//! dialscope-runtime - fan-out orchestration and the analysis pipeline
//!
//! [`Orchestrator`] runs every registered source concurrently with a
//! per-source timeout and merges the settled results in static priority
//! order. [`Pipeline`] wraps it into the one public operation: raw input
//! in, [`dialscope_core::IntelligenceReport`] (or a parse error) out.

pub mod orchestrator;
pub mod pipeline;

pub use orchestrator::*;
pub use pipeline::*;
