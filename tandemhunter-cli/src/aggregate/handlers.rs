use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ArgMatches;

use tandemhunter_ptd::aggregate_to_file;

pub fn run_aggregate(matches: &ArgMatches) -> Result<()> {
    let files: Vec<PathBuf> = matches
        .get_many::<String>("comparison-csv")
        .expect("At least one comparison file is required.")
        .map(PathBuf::from)
        .collect();

    let run = matches.get_one::<String>("run").map(|r| r.as_str());

    let out_dir = matches
        .get_one::<String>("out-dir")
        .expect("out-dir has a default");

    aggregate_to_file(&files, Path::new(out_dir), run)
        .context("Failed to aggregate comparison files")?;

    Ok(())
}
