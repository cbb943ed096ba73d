//! # Input/Output utilities for tandemhunter.
//!
//! This small crate reads the inputs of a run and writes its outputs:
//! chunked, type-checked reading of per-target coverage reports, loading of
//! interval specs (JSON, YAML or TOML), and the comma separated per-sample result
//! artifacts.
//!
pub mod coverage;
pub mod intervals;
pub mod results;

// re-expose core functions
pub use coverage::*;
pub use intervals::*;
pub use results::*;
