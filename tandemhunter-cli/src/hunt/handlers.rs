use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::{error, info, warn};

use tandemhunter_core::models::Metric;
use tandemhunter_io::load_intervals;
use tandemhunter_ptd::{BatchSummary, RunContext, process_file, run_batch};

///
/// Build the run configuration from the parsed arguments. Fails before any coverage
/// report is touched when the metric or the interval spec is invalid.
///
pub fn build_context(matches: &ArgMatches) -> Result<RunContext> {
    let intervals = matches
        .get_one::<String>("intervals")
        .expect("A path to an interval spec is required.");

    let dup_threshold = matches
        .get_one::<f64>("dup-threshold")
        .expect("dup-threshold has a default");

    let metric = matches
        .get_one::<String>("metric")
        .expect("metric has a default");
    let metric = match Metric::from_str(metric) {
        Ok(metric) => metric,
        Err(err) => anyhow::bail!("{}", err),
    };

    let intervals = load_intervals(Path::new(intervals), *dup_threshold)
        .with_context(|| format!("Failed to load interval spec {}", intervals))?;

    let out_dir = matches
        .get_one::<String>("out-dir")
        .expect("out-dir has a default");

    let mut ctx = RunContext::new(intervals, metric, PathBuf::from(out_dir));
    ctx.out_fname_suffix = matches
        .get_one::<String>("out-fname-suffix")
        .expect("out-fname-suffix has a default")
        .clone();
    ctx.cov_file_pattern = matches
        .get_one::<String>("cov-file-pattern")
        .expect("cov-file-pattern has a default")
        .clone();
    ctx.chunk_size = *matches
        .get_one::<usize>("chunk-size")
        .expect("chunk-size has a default");

    Ok(ctx)
}

fn log_summary(summary: &BatchSummary) {
    info!(
        "{} of {} coverage files written",
        summary.written.len(),
        summary.discovered
    );
    if !summary.is_success() {
        warn!("{} coverage files failed:", summary.failures.len());
        for failure in &summary.failures {
            warn!("  {}", failure);
        }
    }
}

pub fn run_hunt(matches: &ArgMatches) -> Result<()> {
    let ctx = build_context(matches)?;

    let processes = matches
        .get_one::<usize>("processes")
        .expect("processes has a default");

    if let Some(file) = matches.get_one::<String>("file") {
        // a failing sample is reported, not propagated
        if let Err(failure) = process_file(Path::new(file), &ctx) {
            error!("{}", failure);
        }
        return Ok(());
    }

    let root = matches
        .get_one::<String>("batch")
        .expect("Either --file or --batch is required.");

    let summary = run_batch(Path::new(root), &ctx, *processes)
        .with_context(|| format!("Failed to search {} for coverage files", root))?;
    log_summary(&summary);

    Ok(())
}
