pub mod comparison;
pub mod coverage;
pub mod metric;
pub mod region;

// re-export for cleaner imports
pub use self::comparison::{ComparisonResult, ComparisonTable};
pub use self::coverage::{COVERAGE_COLUMNS, ColumnType, CoverageRecord};
pub use self::metric::Metric;
pub use self::region::{IntervalPair, RegionSpec};
