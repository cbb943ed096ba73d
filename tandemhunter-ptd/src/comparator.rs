use log::debug;

use tandemhunter_core::consts::ROUNDING_DECIMALS;
use tandemhunter_core::models::{ComparisonResult, Metric};
use tandemhunter_core::utils::round_half_even;
use tandemhunter_core::{HunterError, Result};

use crate::matcher::MatchedRegion;

///
/// Ratio of two metric values, rounded half-to-even to 9 decimals.
///
pub fn fold_change(value1: f64, value2: f64) -> Result<f64> {
    if value2 == 0.0 {
        return Err(HunterError::Computation(format!(
            "division by zero ({} / {})",
            value1, value2
        )));
    }

    let ratio = value1 / value2;
    if !ratio.is_finite() {
        return Err(HunterError::Computation(format!(
            "non-finite ratio {} / {}",
            value1, value2
        )));
    }

    Ok(round_half_even(ratio, ROUNDING_DECIMALS))
}

///
/// Base-2 logarithm of a fold change, rounded half-to-even to 9 decimals.
/// The fold change must be strictly positive.
///
pub fn log2_fold_change(fold_change: f64) -> Result<f64> {
    if fold_change <= 0.0 || fold_change.is_nan() {
        return Err(HunterError::Computation(format!(
            "log2 is undefined for fold change {}",
            fold_change
        )));
    }

    Ok(round_half_even(fold_change.log2(), ROUNDING_DECIMALS))
}

fn metric_value(region: &MatchedRegion, metric: Metric) -> Result<f64> {
    metric.value(&region.record).ok_or_else(|| {
        HunterError::Computation(format!(
            "missing {} value for {} ({})",
            metric,
            region.label,
            region.record.locus()
        ))
    })
}

///
/// Compare the metric of two matched regions of the same sample.
///
/// The two rows are pivoted into one record keyed by sample id, with one value per
/// region label. A duplication is called when the fold change is strictly greater
/// than `dup_threshold`.
///
/// # Arguments
/// - region1: numerator region
/// - region2: denominator region
/// - metric: coverage column to compare
/// - dup_threshold: fold change above which the pair is flagged
pub fn compare_regions(
    region1: &MatchedRegion,
    region2: &MatchedRegion,
    metric: Metric,
    dup_threshold: f64,
) -> Result<ComparisonResult> {
    if region1.sample_id != region2.sample_id {
        return Err(HunterError::Computation(format!(
            "can't pivot rows of different samples ({} and {})",
            region1.sample_id, region2.sample_id
        )));
    }
    if region1.label == region2.label {
        return Err(HunterError::Computation(format!(
            "can't pivot two rows with the same label {}",
            region1.label
        )));
    }

    let value1 = metric_value(region1, metric)?;
    let value2 = metric_value(region2, metric)?;

    let fold_change = fold_change(value1, value2)?;
    let log2_fold_change = log2_fold_change(fold_change)?;
    let above_cutoff = fold_change > dup_threshold;

    debug!(
        "{}: {}={} {}={} fold_change={} above_cut_off={}",
        region1.sample_id,
        region1.label,
        value1,
        region2.label,
        value2,
        fold_change,
        above_cutoff
    );

    Ok(ComparisonResult {
        sample_id: region1.sample_id.clone(),
        metric,
        region1_label: region1.label.clone(),
        region1_value: value1,
        region2_label: region2.label.clone(),
        region2_value: value2,
        fold_change,
        log2_fold_change,
        above_cutoff,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use tandemhunter_core::models::CoverageRecord;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn matched(label: &str, normalized_coverage: Option<f64>) -> MatchedRegion {
        MatchedRegion {
            sample_id: "Sample".to_string(),
            label: label.to_string(),
            record: CoverageRecord {
                chrom: "chr11".to_string(),
                start: 100,
                end: 200,
                length: 101,
                name: Some(label.to_string()),
                gc: Some(0.5),
                mean_coverage: Some(1000.0),
                normalized_coverage,
                min_normalized_coverage: Some(0.9),
                max_normalized_coverage: Some(1.1),
                min_coverage: 900,
                max_coverage: 1100,
                pct_0x: Some(0.0),
                read_count: 100,
            },
        }
    }

    #[rstest]
    #[case(2.284132, 1.250261, 1.826924138, 0.869416728, true)]
    #[case(1.237117, 1.187973, 1.041367944, 0.058479903, false)]
    fn test_compare_regions(
        #[case] value1: f64,
        #[case] value2: f64,
        #[case] expected_fold: f64,
        #[case] expected_log2: f64,
        #[case] expected_above: bool,
    ) {
        let result = compare_regions(
            &matched("MLL_EXON3", Some(value1)),
            &matched("MLL_EXON27", Some(value2)),
            Metric::NormalizedCoverage,
            1.122995,
        )
        .unwrap();

        assert_eq!(result.sample_id, "Sample");
        assert_eq!(result.region1_value, value1);
        assert_eq!(result.region2_value, value2);
        assert_eq!(result.fold_change, expected_fold);
        assert_eq!(result.log2_fold_change, expected_log2);
        assert_eq!(result.above_cutoff, expected_above);
    }

    #[rstest]
    fn test_threshold_is_strict() {
        let result = compare_regions(
            &matched("A", Some(1.5)),
            &matched("B", Some(1.0)),
            Metric::NormalizedCoverage,
            1.5,
        )
        .unwrap();
        assert_eq!(result.fold_change, 1.5);
        assert!(!result.above_cutoff);
    }

    #[rstest]
    #[case(Some(1.0), Some(0.0))]
    #[case(None, Some(1.0))]
    #[case(Some(1.0), None)]
    #[case(Some(-1.0), Some(1.0))]
    #[case(Some(0.0), Some(1.0))]
    fn test_computation_errors(#[case] value1: Option<f64>, #[case] value2: Option<f64>) {
        let err = compare_regions(
            &matched("A", value1),
            &matched("B", value2),
            Metric::NormalizedCoverage,
            1.0,
        )
        .unwrap_err();
        assert_eq!(err.kind(), "ComputationError");
    }

    #[rstest]
    fn test_negative_operands_share_sign() {
        assert_eq!(fold_change(-2.0, -1.0).unwrap(), 2.0);
        assert_eq!(log2_fold_change(2.0).unwrap(), 1.0);
    }

    #[rstest]
    fn test_integer_metric() {
        let result = compare_regions(
            &matched("A", Some(1.0)),
            &matched("B", Some(1.0)),
            Metric::ReadCount,
            1.0,
        )
        .unwrap();
        assert_eq!(result.region1_value, 100.0);
        assert_eq!(result.fold_change, 1.0);
        assert_eq!(result.log2_fold_change, 0.0);
    }

    #[rstest]
    fn test_rows_of_different_samples() {
        let mut other = matched("B", Some(1.0));
        other.sample_id = "Other".to_string();
        let err = compare_regions(&matched("A", Some(1.0)), &other, Metric::NormalizedCoverage, 1.0)
            .unwrap_err();
        assert_eq!(err.kind(), "ComputationError");
    }
}
