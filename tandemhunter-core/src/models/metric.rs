use std::fmt::{self, Display};
use std::str::FromStr;

use crate::models::CoverageRecord;

///
/// Numeric column of the coverage report that two regions are compared on.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Gc,
    MeanCoverage,
    NormalizedCoverage,
    MinNormalizedCoverage,
    MaxNormalizedCoverage,
    MinCoverage,
    MaxCoverage,
    Pct0x,
    ReadCount,
}

impl Metric {
    pub const ALL: [Metric; 9] = [
        Metric::Gc,
        Metric::MeanCoverage,
        Metric::NormalizedCoverage,
        Metric::MinNormalizedCoverage,
        Metric::MaxNormalizedCoverage,
        Metric::MinCoverage,
        Metric::MaxCoverage,
        Metric::Pct0x,
        Metric::ReadCount,
    ];

    /// Column name of the metric in the coverage report.
    pub fn column(&self) -> &'static str {
        match self {
            Metric::Gc => "%gc",
            Metric::MeanCoverage => "mean_coverage",
            Metric::NormalizedCoverage => "normalized_coverage",
            Metric::MinNormalizedCoverage => "min_normalized_coverage",
            Metric::MaxNormalizedCoverage => "max_normalized_coverage",
            Metric::MinCoverage => "min_coverage",
            Metric::MaxCoverage => "max_coverage",
            Metric::Pct0x => "pct_0x",
            Metric::ReadCount => "read_count",
        }
    }

    /// Whether the underlying column holds integers.
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Metric::MinCoverage | Metric::MaxCoverage | Metric::ReadCount
        )
    }

    ///
    /// Pull the metric out of a record. `None` when the record holds the
    /// missing-value sentinel for this column.
    ///
    pub fn value(&self, record: &CoverageRecord) -> Option<f64> {
        match self {
            Metric::Gc => record.gc,
            Metric::MeanCoverage => record.mean_coverage,
            Metric::NormalizedCoverage => record.normalized_coverage,
            Metric::MinNormalizedCoverage => record.min_normalized_coverage,
            Metric::MaxNormalizedCoverage => record.max_normalized_coverage,
            Metric::MinCoverage => Some(record.min_coverage as f64),
            Metric::MaxCoverage => Some(record.max_coverage as f64),
            Metric::Pct0x => record.pct_0x,
            Metric::ReadCount => Some(record.read_count as f64),
        }
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .iter()
            .find(|m| m.column() == s)
            .copied()
            .ok_or_else(|| {
                let known: Vec<&str> = Metric::ALL.iter().map(|m| m.column()).collect();
                format!("Unknown metric '{}'. Choose one of: {}", s, known.join(", "))
            })
    }
}

impl Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("normalized_coverage", Metric::NormalizedCoverage)]
    #[case("%gc", Metric::Gc)]
    #[case("read_count", Metric::ReadCount)]
    fn test_metric_from_str(#[case] name: &str, #[case] expected: Metric) {
        assert_eq!(Metric::from_str(name).unwrap(), expected);
        assert_eq!(expected.to_string(), name);
    }

    #[rstest]
    fn test_unknown_metric() {
        let err = Metric::from_str("chrom").unwrap_err();
        assert!(err.contains("Unknown metric"));
    }

    #[rstest]
    fn test_metric_value() {
        let record = CoverageRecord {
            chrom: "chr11".to_string(),
            start: 100,
            end: 200,
            length: 101,
            name: None,
            gc: Some(0.4),
            mean_coverage: Some(812.5),
            normalized_coverage: None,
            min_normalized_coverage: Some(0.9),
            max_normalized_coverage: Some(1.3),
            min_coverage: 700,
            max_coverage: 900,
            pct_0x: Some(0.0),
            read_count: 1234,
        };

        assert_eq!(Metric::MeanCoverage.value(&record), Some(812.5));
        assert_eq!(Metric::NormalizedCoverage.value(&record), None);
        assert_eq!(Metric::ReadCount.value(&record), Some(1234.0));
        assert!(Metric::ReadCount.is_integer());
        assert!(!Metric::Pct0x.is_integer());
    }
}
