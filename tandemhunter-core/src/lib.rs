//! # Core models for tandemhunter
//!
//! Data model, error taxonomy and small shared utilities used by every other
//! tandemhunter crate. Tandemhunter calls partial tandem duplications (e.g. KMT2A/MLL PTDs)
//! by comparing normalized coverage between two target regions of a per-target
//! coverage report.
//!
pub mod consts;
pub mod errors;
pub mod models;
pub mod utils;

pub use errors::{HunterError, Result};
