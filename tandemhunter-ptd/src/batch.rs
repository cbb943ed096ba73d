use std::collections::HashMap;
use std::io;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::thread;

use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use rayon::prelude::*;
use walkdir::WalkDir;

use tandemhunter_core::{HunterError, Result};

use crate::runner::{RunContext, SampleFailure, SampleStage, process_file};

///
/// Outcome of dispatching the sample runner over a set of coverage files.
///
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub discovered: usize,
    pub written: Vec<PathBuf>,
    pub failures: Vec<SampleFailure>,
}

impl BatchSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

///
/// Recursively find every regular file under `root` whose name ends with `pattern`.
///
/// # Arguments
/// - root: directory to search
/// - pattern: filename suffix of coverage files
///
/// # Returns
/// Sorted paths of the matching files; empty when nothing matches.
pub fn find_coverage_files(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(HunterError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} is not a readable directory", root.display()),
        )));
    }

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            // the root itself must be readable, nested directories are skipped
            Err(e) if e.depth() == 0 => return Err(HunterError::Io(e.into())),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if entry.file_type().is_file() && entry.file_name().to_string_lossy().ends_with(pattern) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

///
/// Number of workers for a requested process count, where 0 means all available cores.
///
pub fn resolve_processes(processes: usize) -> usize {
    match processes {
        0 => thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1),
        n => n,
    }
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} files ({eta})")
    {
        pb.set_style(style.progress_chars("##-"));
    }
    pb
}

///
/// Split `files` into those with a sample id of their own and failures for every file
/// whose sample id, and so whose result artifact, is shared with another file.
///
pub fn split_shared_sample_ids<'a>(
    files: &'a [PathBuf],
    ctx: &RunContext,
) -> (Vec<&'a PathBuf>, Vec<SampleFailure>) {
    let mut by_sample: HashMap<String, Vec<&PathBuf>> = HashMap::new();
    for path in files {
        by_sample.entry(ctx.sample_id(path)).or_default().push(path);
    }

    let mut unique = Vec::with_capacity(files.len());
    let mut failures = Vec::new();
    for path in files {
        let sample_id = ctx.sample_id(path);
        match by_sample.get(&sample_id) {
            Some(paths) if paths.len() > 1 => failures.push(SampleFailure {
                path: path.clone(),
                stage: SampleStage::Dispatch,
                error: HunterError::DuplicateSample {
                    sample_id,
                    paths: paths.iter().map(|p| p.to_path_buf()).collect(),
                },
            }),
            _ => unique.push(path),
        }
    }

    (unique, failures)
}

///
/// Run the sample runner over `files` on a pool of `processes` workers.
///
/// Files are independent of each other: a failing file is logged and recorded in the
/// summary, and the remaining files are still processed. Files sharing a sample id
/// are not processed at all, as they would all write the same artifact.
///
pub fn run_files(files: &[PathBuf], ctx: &RunContext, processes: usize) -> Result<BatchSummary> {
    let (unique, shared) = split_shared_sample_ids(files, ctx);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(resolve_processes(processes))
        .build()
        .map_err(|e| HunterError::Io(io::Error::other(e)))?;

    let pb = progress_bar(unique.len());

    let outcomes: Vec<std::result::Result<PathBuf, SampleFailure>> = pool.install(|| {
        unique
            .par_iter()
            .map(|path| {
                let outcome = process_file(path, ctx);
                pb.inc(1);
                outcome
            })
            .collect()
    });

    pb.finish_and_clear();

    let mut summary = BatchSummary {
        discovered: files.len(),
        ..Default::default()
    };
    for failure in shared {
        error!("{}", failure);
        summary.failures.push(failure);
    }
    for outcome in outcomes {
        match outcome {
            Ok(path) => summary.written.push(path),
            Err(failure) => {
                error!("{}", failure);
                summary.failures.push(failure);
            }
        }
    }

    Ok(summary)
}

///
/// Discover coverage files under `root` and process each of them.
///
/// Only the discovery step can fail; per-file failures end up in the summary.
///
pub fn run_batch(root: &Path, ctx: &RunContext, processes: usize) -> Result<BatchSummary> {
    info!("Finding coverage files in {}", root.display());
    let files = find_coverage_files(root, &ctx.cov_file_pattern)?;

    if files.is_empty() {
        warn!(
            "No files ending with '{}' found in {}",
            ctx.cov_file_pattern,
            root.display()
        );
    } else {
        info!("Found {} coverage files", files.len());
    }

    run_files(&files, ctx, processes)
}
