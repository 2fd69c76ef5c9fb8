//! Block-list detection and redaction.
//!
//! Text is accent-folded, matched against a whole-word alternation of the
//! configured terms, and then either passed, rejected or redacted.

pub mod config;
pub mod decider;
pub mod matcher;
pub mod normalizer;
pub mod pattern;
pub mod store;

pub use config::{FilterConfig, FilterConfigBuilder, FilterConfigError, MaskWidth, RedactionStrategy};
pub use decider::{inspect, InspectionInput, InspectionResult};
pub use matcher::{CompiledMatcher, Detected};
pub use store::{FilterConfigProvider, FilterSnapshot, FilterStore, SharedFilterConfigProvider};
