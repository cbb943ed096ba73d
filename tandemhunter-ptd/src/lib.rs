//! # Partial tandem duplication calling.
//!
//! For every sample, the coverage of two target regions (for example two exons of the
//! same gene) is compared. A coverage ratio above a threshold flags a candidate
//! duplication of the first region.
//!
//! The pipeline for one coverage report is:
//! 1. [matcher]: find the unique row of each region of each interval pair
//! 2. [comparator]: compute the fold change and its log2, and apply the threshold
//! 3. [runner]: write the per-sample result artifact
//!
//! [batch] runs this over a directory of coverage reports in parallel, and
//! [aggregate] merges result artifacts of several samples.
//!
//! ```rust,ignore
//! use std::path::{Path, PathBuf};
//!
//! use tandemhunter_core::models::Metric;
//! use tandemhunter_io::load_intervals;
//! use tandemhunter_ptd::{RunContext, run_batch};
//!
//! let intervals = load_intervals(Path::new("intervals.json"), 1.122995)?;
//! let ctx = RunContext::new(intervals, Metric::NormalizedCoverage, PathBuf::from("results"));
//! let summary = run_batch(Path::new("coverage/"), &ctx, 0)?;
//! ```
pub mod aggregate;
pub mod batch;
pub mod comparator;
pub mod consts;
pub mod matcher;
pub mod runner;

// re-exports
pub use aggregate::*;
pub use batch::*;
pub use comparator::*;
pub use matcher::*;
pub use runner::*;
