use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HunterError {
    /// The coverage report is missing required columns or holds a value that
    /// can't be coerced to the declared column type.
    #[error("Malformed coverage file {path:?}: {reason}")]
    Format { path: PathBuf, reason: String },

    /// The interval spec is structurally invalid. Fatal for the whole run.
    #[error("Malformed interval spec {path:?}: {reason}")]
    IntervalSpec { path: PathBuf, reason: String },

    #[error("No row in the coverage file matches region {region}")]
    NotFound { region: String },

    #[error("{count} rows in the coverage file match region {region}, expected exactly one")]
    AmbiguousMatch { region: String, count: usize },

    /// Several coverage files map to the same sample id, and thus the same artifact.
    #[error("Sample id {sample_id} is shared by {paths:?}")]
    DuplicateSample {
        sample_id: String,
        paths: Vec<PathBuf>,
    },

    #[error("Can't compute fold change: {0}")]
    Computation(String),

    #[error("Can't aggregate comparison files: {0}")]
    Aggregation(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl HunterError {
    /// Short, stable name of the failure kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            HunterError::Format { .. } => "FormatError",
            HunterError::IntervalSpec { .. } => "IntervalSpecError",
            HunterError::NotFound { .. } => "NotFoundError",
            HunterError::AmbiguousMatch { .. } => "AmbiguousMatchError",
            HunterError::DuplicateSample { .. } => "DuplicateSampleError",
            HunterError::Computation(_) => "ComputationError",
            HunterError::Aggregation(_) => "AggregationError",
            HunterError::Io(_) => "IoError",
        }
    }

    pub fn format<P: Into<PathBuf>, S: Into<String>>(path: P, reason: S) -> Self {
        HunterError::Format {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn interval_spec<P: Into<PathBuf>, S: Into<String>>(path: P, reason: S) -> Self {
        HunterError::IntervalSpec {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HunterError>;

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case(HunterError::format("a.tsv", "bad"), "FormatError")]
    #[case(HunterError::NotFound { region: "chr11".into() }, "NotFoundError")]
    #[case(HunterError::AmbiguousMatch { region: "chr11".into(), count: 2 }, "AmbiguousMatchError")]
    #[case(HunterError::Computation("zero".into()), "ComputationError")]
    #[case(HunterError::interval_spec("intervals.json", "missing region1"), "IntervalSpecError")]
    fn test_error_kind(#[case] err: HunterError, #[case] kind: &str) {
        assert_eq!(err.kind(), kind);
    }

    #[rstest]
    fn test_duplicate_sample_names_every_path() {
        let err = HunterError::DuplicateSample {
            sample_id: "S1".to_string(),
            paths: vec![PathBuf::from("runA/S1.qc.coverage.txt"), PathBuf::from("runB/S1.qc.coverage.txt")],
        };
        assert_eq!(err.kind(), "DuplicateSampleError");
        assert!(err.to_string().contains("runA/S1.qc.coverage.txt"));
        assert!(err.to_string().contains("runB/S1.qc.coverage.txt"));
    }
}
