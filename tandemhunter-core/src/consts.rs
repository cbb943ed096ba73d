pub const DEFAULT_DUP_THRESHOLD: f64 = 1.122995;
pub const DEFAULT_OUT_FNAME_SUFFIX: &str = ".cvg_comparison.csv";
pub const DEFAULT_COV_FILE_PATTERN: &str = "coverage.tsv";
pub const DEFAULT_METRIC: &str = "normalized_coverage";
pub const DEFAULT_CHUNK_SIZE: usize = 10_000;

/// Sentinel for a missing value in the coverage report.
pub const MISSING_VALUE: &str = "-";
pub const ROUNDING_DECIMALS: i32 = 9;
