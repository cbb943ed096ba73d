use clap::{Arg, ArgAction, Command};

pub use tandemhunter_ptd::consts::*;

/// Creates the aggregate CLI Command object
pub fn create_aggregate_cli() -> Command {
    Command::new(AGGREGATE_CMD)
        .about("Merge the result files of several samples into one comparison file.")
        .arg(
            Arg::new("comparison-csv")
                .long("comparison-csv")
                .help("Per-sample result files to merge")
                .action(ArgAction::Append)
                .num_args(1..)
                .required(true),
        )
        .arg(
            Arg::new("run")
                .long("run")
                .help("Run name, used to name the merged file"),
        )
        .arg(
            Arg::new("out-dir")
                .long("out-dir")
                .short('O')
                .default_value(DEFAULT_OUT_DIR)
                .help("Directory to write the merged file to"),
        )
}
