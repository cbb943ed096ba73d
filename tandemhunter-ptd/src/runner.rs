use std::fmt::{self, Display};
use std::path::{Path, PathBuf};

use log::info;

use tandemhunter_core::consts::{DEFAULT_CHUNK_SIZE, DEFAULT_COV_FILE_PATTERN, DEFAULT_OUT_FNAME_SUFFIX};
use tandemhunter_core::models::{ComparisonTable, IntervalPair, Metric};
use tandemhunter_core::utils::sample_id_from_path;
use tandemhunter_core::{HunterError, Result};
use tandemhunter_io::{ComparisonWrite, CoverageReader};

use crate::comparator::compare_regions;
use crate::matcher::{MatchedRegion, PairMatches};

///
/// Immutable configuration of one run, shared by reference with every worker.
///
#[derive(Debug, Clone)]
pub struct RunContext {
    pub intervals: Vec<IntervalPair>,
    pub metric: Metric,
    pub out_dir: PathBuf,
    pub out_fname_suffix: String,
    pub cov_file_pattern: String,
    pub chunk_size: usize,
}

impl RunContext {
    pub fn new(intervals: Vec<IntervalPair>, metric: Metric, out_dir: PathBuf) -> Self {
        RunContext {
            intervals,
            metric,
            out_dir,
            out_fname_suffix: DEFAULT_OUT_FNAME_SUFFIX.to_string(),
            cov_file_pattern: DEFAULT_COV_FILE_PATTERN.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    pub fn sample_id(&self, path: &Path) -> String {
        sample_id_from_path(path, &self.cov_file_pattern)
    }

    /// Where the result artifact of `sample_id` goes.
    pub fn output_path(&self, sample_id: &str) -> PathBuf {
        self.out_dir
            .join(format!("{}{}", sample_id, self.out_fname_suffix))
    }
}

/// Step of the per-sample pipeline during which a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleStage {
    Dispatch,
    LoadCoverage,
    Compare,
    Write,
}

impl Display for SampleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self {
            SampleStage::Dispatch => "dispatching files",
            SampleStage::LoadCoverage => "loading coverage",
            SampleStage::Compare => "comparing intervals",
            SampleStage::Write => "writing results",
        };
        write!(f, "{}", stage)
    }
}

///
/// A coverage file that was skipped, with the reason.
///
#[derive(Debug)]
pub struct SampleFailure {
    pub path: PathBuf,
    pub stage: SampleStage,
    pub error: HunterError,
}

impl Display for SampleFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file_name = self
            .path
            .file_name()
            .map(|f| f.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string());
        write!(
            f,
            "{}: {} while {}: {}",
            file_name,
            self.error.kind(),
            self.stage,
            self.error
        )
    }
}

///
/// Read a coverage file once and resolve both regions of every interval pair.
///
/// Uniqueness is only decided after the last chunk, so a duplicate row late in the
/// file is still caught.
///
pub fn match_intervals(
    path: &Path,
    sample_id: &str,
    ctx: &RunContext,
) -> Result<Vec<(MatchedRegion, MatchedRegion)>> {
    let reader = CoverageReader::from_path(path, ctx.chunk_size)?;

    let mut matches: Vec<PairMatches> = ctx.intervals.iter().map(PairMatches::new).collect();
    for chunk in reader {
        let chunk = chunk?;
        for pair in matches.iter_mut() {
            pair.accumulate(&chunk);
        }
    }

    matches
        .into_iter()
        .map(|pair| pair.resolve(sample_id))
        .collect()
}

///
/// Compare every matched pair, in interval spec order, and sort the rows.
///
pub fn compare_matches(
    matched: &[(MatchedRegion, MatchedRegion)],
    ctx: &RunContext,
) -> Result<ComparisonTable> {
    let mut rows = Vec::with_capacity(matched.len());
    for ((region1, region2), pair) in matched.iter().zip(ctx.intervals.iter()) {
        info!(
            "Comparing {} at {} with {}.",
            ctx.metric, pair.region1, pair.region2
        );
        rows.push(compare_regions(region1, region2, ctx.metric, pair.dup_threshold)?);
    }

    let mut table = ComparisonTable::new(rows);
    table.sort_by_fold_change();
    Ok(table)
}

///
/// Compute the comparison table of one coverage file without writing it.
///
pub fn compare_sample(path: &Path, ctx: &RunContext) -> std::result::Result<ComparisonTable, SampleFailure> {
    let failure = |stage: SampleStage| {
        move |error: HunterError| SampleFailure {
            path: path.to_path_buf(),
            stage,
            error,
        }
    };

    let sample_id = ctx.sample_id(path);
    let matched = match_intervals(path, &sample_id, ctx).map_err(failure(SampleStage::LoadCoverage))?;
    compare_matches(&matched, ctx).map_err(failure(SampleStage::Compare))
}

///
/// Process one coverage file: match, compare and write its result artifact.
///
/// Nothing is written unless every interval pair was compared successfully.
///
/// # Arguments
/// - path: path to the coverage file
/// - ctx: run configuration
///
/// # Returns
/// Path of the written result artifact.
pub fn process_file(path: &Path, ctx: &RunContext) -> std::result::Result<PathBuf, SampleFailure> {
    info!(
        "Processing {}",
        path.file_name()
            .map(|f| f.to_string_lossy().to_string())
            .unwrap_or_default()
    );

    let table = compare_sample(path, ctx)?;

    let fname = ctx.output_path(&ctx.sample_id(path));
    table.write_csv(&fname).map_err(|error| SampleFailure {
        path: path.to_path_buf(),
        stage: SampleStage::Write,
        error,
    })?;

    info!("Results written to {}", fname.display());
    Ok(fname)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use tandemhunter_io::load_intervals;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn get_test_path(dir: &str, file_name: &str) -> PathBuf {
        std::env::current_dir()
            .unwrap()
            .join("../tests/data")
            .join(dir)
            .join(file_name)
    }

    fn context(intervals: &str, out_dir: &Path) -> RunContext {
        let intervals = load_intervals(&get_test_path("intervals", intervals), 1.122995).unwrap();
        let mut ctx = RunContext::new(intervals, Metric::NormalizedCoverage, out_dir.to_path_buf());
        ctx.cov_file_pattern = ".qc.coverage.txt".to_string();
        ctx
    }

    #[rstest]
    fn test_output_path() {
        let ctx = context("intervals.json", Path::new("/results"));
        let path = get_test_path("coverage", "Negative-Sample-2.qc.coverage.txt");
        assert_eq!(ctx.sample_id(&path), "Negative_Sample_2");
        assert_eq!(
            ctx.output_path("Negative_Sample_2"),
            PathBuf::from("/results/Negative_Sample_2.cvg_comparison.csv")
        );
    }

    #[rstest]
    fn test_positive_sample() {
        let tempdir = tempfile::tempdir().unwrap();
        let ctx = context("intervals.json", tempdir.path());

        let out = process_file(&get_test_path("coverage", "PositiveSample.qc.coverage.txt"), &ctx).unwrap();

        assert_eq!(out, tempdir.path().join("PositiveSample.cvg_comparison.csv"));
        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            "sample_id,MLL_EXON3,MLL_EXON27,fold_change,log2_fold_change,above_cut_off\n\
             PositiveSample,2.284132,1.250261,1.826924138,0.869416728,TRUE\n"
        );
    }

    #[rstest]
    fn test_negative_sample() {
        let tempdir = tempfile::tempdir().unwrap();
        let ctx = context("intervals_no_dup_threshold.json", tempdir.path());

        let out = process_file(&get_test_path("coverage", "NegativeSample.qc.coverage.txt"), &ctx).unwrap();

        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            "sample_id,MLL_EXON3,MLL_EXON27,fold_change,log2_fold_change,above_cut_off\n\
             NegativeSample,1.237117,1.187973,1.041367944,0.058479903,FALSE\n"
        );
    }

    #[rstest]
    fn test_small_chunks_give_same_result() {
        let tempdir = tempfile::tempdir().unwrap();
        let mut ctx = context("intervals.json", tempdir.path());
        let path = get_test_path("coverage", "PositiveSample.qc.coverage.txt");

        let whole = compare_sample(&path, &ctx).unwrap();
        ctx.chunk_size = 1;
        let chunked = compare_sample(&path, &ctx).unwrap();

        assert_eq!(whole, chunked);
    }

    #[rstest]
    fn test_two_pairs_sorted_by_fold_change() {
        let tempdir = tempfile::tempdir().unwrap();
        let ctx = context("intervals_two_pairs.json", tempdir.path());

        let out = process_file(&get_test_path("coverage", "PositiveSample.qc.coverage.txt"), &ctx).unwrap();

        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            "sample_id,MLL_EXON3,MLL_EXON27,fold_change,log2_fold_change,above_cut_off,FLT3_EXON20,MLL_EXON36\n\
             PositiveSample,2.284132,1.250261,1.826924138,0.869416728,TRUE,,\n\
             PositiveSample,,,1.076681675,0.106591775,FALSE,1.059795,0.984316\n"
        );
    }

    #[rstest]
    #[case("MissingIntervals.qc.coverage.txt", SampleStage::LoadCoverage, "NotFoundError")]
    #[case("DuplicateIntervals.qc.coverage.txt", SampleStage::LoadCoverage, "AmbiguousMatchError")]
    #[case("BadHeader.qc.coverage.txt", SampleStage::LoadCoverage, "FormatError")]
    #[case("BadValue.qc.coverage.txt", SampleStage::LoadCoverage, "FormatError")]
    #[case("ZeroCoverage.qc.coverage.txt", SampleStage::Compare, "ComputationError")]
    #[case("MissingMetric.qc.coverage.txt", SampleStage::Compare, "ComputationError")]
    #[case("DoesNotExist.qc.coverage.txt", SampleStage::LoadCoverage, "IoError")]
    fn test_failing_file_writes_nothing(
        #[case] file_name: &str,
        #[case] stage: SampleStage,
        #[case] kind: &str,
    ) {
        let tempdir = tempfile::tempdir().unwrap();
        let ctx = context("intervals.json", tempdir.path());

        let failure = process_file(&get_test_path("coverage", file_name), &ctx).unwrap_err();

        assert_eq!(failure.stage, stage);
        assert_eq!(failure.error.kind(), kind);
        assert!(failure.to_string().contains(file_name));
        assert_eq!(fs::read_dir(tempdir.path()).unwrap().count(), 0);
    }

    #[rstest]
    fn test_rerun_is_idempotent() {
        let tempdir = tempfile::tempdir().unwrap();
        let ctx = context("intervals_two_pairs.json", tempdir.path());
        let path = get_test_path("coverage", "NegativeSample.qc.coverage.txt");

        let out = process_file(&path, &ctx).unwrap();
        let first = fs::read(&out).unwrap();

        // rows are sorted, the header keeps the interval spec order
        assert_eq!(
            String::from_utf8(first.clone()).unwrap(),
            "sample_id,MLL_EXON3,MLL_EXON27,fold_change,log2_fold_change,above_cut_off,FLT3_EXON20,MLL_EXON36\n\
             NegativeSample,,,1.076681675,0.106591775,FALSE,1.059795,0.984316\n\
             NegativeSample,1.237117,1.187973,1.041367944,0.058479903,FALSE,,\n"
        );

        process_file(&path, &ctx).unwrap();
        assert_eq!(fs::read(&out).unwrap(), first);
    }
}
