use std::fmt::{self, Display};

///
/// Declared type of a column of the per-target coverage report.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Str,
    Int,
    Float,
}

impl Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Str => "string",
            ColumnType::Int => "int",
            ColumnType::Float => "float",
        };
        write!(f, "{}", name)
    }
}

/// Columns of a Picard `PER_TARGET_COVERAGE` report and their declared types.
/// Column order in the file is irrelevant, but every one of them must be present.
pub const COVERAGE_COLUMNS: [(&str, ColumnType); 14] = [
    ("chrom", ColumnType::Str),
    ("start", ColumnType::Int),
    ("end", ColumnType::Int),
    ("length", ColumnType::Int),
    ("name", ColumnType::Str),
    ("%gc", ColumnType::Float),
    ("mean_coverage", ColumnType::Float),
    ("normalized_coverage", ColumnType::Float),
    ("min_normalized_coverage", ColumnType::Float),
    ("max_normalized_coverage", ColumnType::Float),
    ("min_coverage", ColumnType::Int),
    ("max_coverage", ColumnType::Int),
    ("pct_0x", ColumnType::Float),
    ("read_count", ColumnType::Int),
];

///
/// One row of a per-target coverage report.
///
/// Float columns and `name` may hold the missing-value sentinel and are
/// therefore optional. Coordinates are kept exactly as they appear in the file.
///
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageRecord {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    pub length: u64,
    pub name: Option<String>,
    pub gc: Option<f64>,
    pub mean_coverage: Option<f64>,
    pub normalized_coverage: Option<f64>,
    pub min_normalized_coverage: Option<f64>,
    pub max_normalized_coverage: Option<f64>,
    pub min_coverage: u64,
    pub max_coverage: u64,
    pub pct_0x: Option<f64>,
    pub read_count: u64,
}

impl CoverageRecord {
    ///
    /// Locus of the record as `chrom:start-end`
    ///
    pub fn locus(&self) -> String {
        format!("{}:{}-{}", self.chrom, self.start, self.end)
    }
}
