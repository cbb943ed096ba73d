use clap::{Arg, ArgGroup, Command, value_parser};

pub use tandemhunter_ptd::consts::*;

fn positive_chunk_size(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("chunk size must be greater than 0".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

/// Creates the hunt CLI Command object
pub fn create_hunt_cli() -> Command {
    Command::new(HUNT_CMD)
        .about("Compare the coverage of interval pairs in per-target coverage reports to call partial tandem duplications.")
        .arg(
            Arg::new("file")
                .long("file")
                .short('F')
                .help("Path to a single coverage report"),
        )
        .arg(
            Arg::new("batch")
                .long("batch")
                .short('B')
                .help("Directory to search recursively for coverage reports"),
        )
        .group(
            ArgGroup::new("input")
                .args(["file", "batch"])
                .required(true)
                .multiple(false),
        )
        .arg(
            Arg::new("intervals")
                .long("intervals")
                .help("JSON, YAML or TOML file listing the interval pairs to compare")
                .required(true),
        )
        .arg(
            Arg::new("dup-threshold")
                .long("dup-threshold")
                .value_parser(value_parser!(f64))
                .default_value(DEFAULT_DUP_THRESHOLD.to_string())
                .help("Fold change above which a duplication is called, for pairs that don't set their own"),
        )
        .arg(
            Arg::new("out-dir")
                .long("out-dir")
                .short('O')
                .default_value(DEFAULT_OUT_DIR)
                .help("Directory to write the result files to"),
        )
        .arg(
            Arg::new("out-fname-suffix")
                .long("out-fname-suffix")
                .default_value(DEFAULT_OUT_FNAME_SUFFIX)
                .help("Suffix appended to the sample id to name its result file"),
        )
        .arg(
            Arg::new("processes")
                .long("processes")
                .value_parser(value_parser!(usize))
                .default_value("0")
                .help("Number of coverage reports processed in parallel (0 = all cores)"),
        )
        .arg(
            Arg::new("cov-file-pattern")
                .long("cov-file-pattern")
                .default_value(DEFAULT_COV_FILE_PATTERN)
                .help("Filename suffix of coverage reports, stripped to derive the sample id"),
        )
        .arg(
            Arg::new("metric")
                .long("metric")
                .default_value(DEFAULT_METRIC)
                .help("Coverage column to compare"),
        )
        .arg(
            Arg::new("chunk-size")
                .long("chunk-size")
                .value_parser(positive_chunk_size)
                .default_value(DEFAULT_CHUNK_SIZE.to_string())
                .help("Number of coverage rows read at a time"),
        )
}
