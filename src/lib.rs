//! stimrand - Stimulus list randomization for experiments
//!
//! stimrand splits a folder of categorized stimuli into balanced subsets and
//! writes prerandomized presentation orders in which items of the same
//! category do not follow each other.
//!
//! # Architecture
//!
//! - **Label sequences**: local-swap (pseudo-constrained) and weighted
//!   sampling with repair (pure-constrained) generators
//! - **Mapping**: within-category position shuffle and a dense file index
//! - **Orchestration**: stimulus scanning, balanced subsets, prerandomizations
//! - **Output**: one identifier per line, plus an optional JSON run summary

pub mod config;
pub mod coordinator;
pub mod error;
pub mod mapping;
pub mod output;
pub mod prerand;
pub mod sequence;
pub mod stimuli;
pub mod subsets;

// Re-export commonly used types
pub use config::{Config, Method};
pub use error::{StimError, StimResult};
pub use prerand::Prerandomizer;
pub use sequence::{LabelGenerator, LabelSequence};
pub use stimuli::StimulusSet;

/// Result type used throughout stimrand
pub type Result<T> = anyhow::Result<T>;
