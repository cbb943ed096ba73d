pub const HUNT_CMD: &str = "hunt";
pub const AGGREGATE_CMD: &str = "aggregate";

pub const DEFAULT_OUT_DIR: &str = ".";
pub const DEFAULT_AGGREGATE_FNAME: &str = "comparison.csv";
pub const AGGREGATE_FNAME_SUFFIX: &str = "_comparison.csv";

pub use tandemhunter_core::consts::{
    DEFAULT_CHUNK_SIZE, DEFAULT_COV_FILE_PATTERN, DEFAULT_DUP_THRESHOLD, DEFAULT_METRIC,
    DEFAULT_OUT_FNAME_SUFFIX,
};
