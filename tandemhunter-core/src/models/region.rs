use std::fmt::{self, Display};

///
/// Region struct, one side of an interval pair. The identifying fields must be
/// found verbatim in the coverage report; `name` is the display label used in the output.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct RegionSpec {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    pub length: u64,
    pub name: String,
}

impl RegionSpec {
    ///
    /// Get comma separated representation of the region
    ///
    pub fn as_string(&self) -> String {
        format!(
            "{},{},{},{},{}",
            self.chrom, self.start, self.end, self.length, self.name
        )
    }
}

impl Display for RegionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

///
/// A named comparison unit: two regions and the fold change above which
/// a duplication is called.
///
#[derive(PartialEq, Debug, Clone)]
pub struct IntervalPair {
    pub region1: RegionSpec,
    pub region2: RegionSpec,
    pub dup_threshold: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn exon3() -> RegionSpec {
        RegionSpec {
            chrom: "chr11".to_string(),
            start: 118342365,
            end: 118345042,
            length: 2678,
            name: "MLL_EXON3".to_string(),
        }
    }

    #[rstest]
    fn test_region_as_string(exon3: RegionSpec) {
        assert_eq!(exon3.as_string(), "chr11,118342365,118345042,2678,MLL_EXON3");
        assert_eq!(exon3.to_string(), exon3.as_string());
    }

}
