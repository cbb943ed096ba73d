use tandemhunter_core::models::{CoverageRecord, IntervalPair, RegionSpec};
use tandemhunter_core::{HunterError, Result};

///
/// Equality predicate over the identifying fields of a region.
///
/// Every field but the display name takes part; `chrom` is compared as an
/// exact string and the coordinates as exact integers.
///
#[derive(Debug, Clone, Copy)]
pub struct RegionFilter<'a> {
    chrom: &'a str,
    start: u64,
    end: u64,
    length: u64,
}

impl<'a> RegionFilter<'a> {
    pub fn new(spec: &'a RegionSpec) -> Self {
        RegionFilter {
            chrom: &spec.chrom,
            start: spec.start,
            end: spec.end,
            length: spec.length,
        }
    }

    #[inline]
    pub fn matches(&self, record: &CoverageRecord) -> bool {
        record.start == self.start
            && record.end == self.end
            && record.length == self.length
            && record.chrom == self.chrom
    }

    /// Rows of `chunk` that satisfy every constraint.
    pub fn filter<'r>(&self, chunk: &'r [CoverageRecord]) -> Vec<&'r CoverageRecord> {
        chunk.iter().filter(|r| self.matches(r)).collect()
    }
}

///
/// A coverage row resolved for one region of one sample. The display name of the
/// row has been replaced with the region's label so that rows of different
/// samples line up under a common column.
///
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedRegion {
    pub sample_id: String,
    pub label: String,
    pub record: CoverageRecord,
}

///
/// Matches of one region, accumulated across every chunk of a coverage file.
///
#[derive(Debug)]
pub struct RegionMatches<'a> {
    spec: &'a RegionSpec,
    filter: RegionFilter<'a>,
    hits: Vec<CoverageRecord>,
}

impl<'a> RegionMatches<'a> {
    pub fn new(spec: &'a RegionSpec) -> Self {
        RegionMatches {
            spec,
            filter: RegionFilter::new(spec),
            hits: Vec::new(),
        }
    }

    pub fn accumulate(&mut self, chunk: &[CoverageRecord]) {
        self.hits
            .extend(self.filter.filter(chunk).into_iter().cloned());
    }

    ///
    /// Conclude matching once the whole file has been seen: exactly one hit is
    /// required.
    ///
    pub fn resolve(mut self, sample_id: &str) -> Result<MatchedRegion> {
        match self.hits.len() {
            0 => Err(HunterError::NotFound {
                region: self.spec.as_string(),
            }),
            1 => {
                let mut record = self.hits.remove(0);
                record.name = Some(self.spec.name.clone());
                Ok(MatchedRegion {
                    sample_id: sample_id.to_string(),
                    label: self.spec.name.clone(),
                    record,
                })
            }
            count => Err(HunterError::AmbiguousMatch {
                region: self.spec.as_string(),
                count,
            }),
        }
    }
}

///
/// Matches of both regions of one interval pair.
///
#[derive(Debug)]
pub struct PairMatches<'a> {
    pub pair: &'a IntervalPair,
    region1: RegionMatches<'a>,
    region2: RegionMatches<'a>,
}

impl<'a> PairMatches<'a> {
    pub fn new(pair: &'a IntervalPair) -> Self {
        PairMatches {
            pair,
            region1: RegionMatches::new(&pair.region1),
            region2: RegionMatches::new(&pair.region2),
        }
    }

    pub fn accumulate(&mut self, chunk: &[CoverageRecord]) {
        self.region1.accumulate(chunk);
        self.region2.accumulate(chunk);
    }

    pub fn resolve(self, sample_id: &str) -> Result<(MatchedRegion, MatchedRegion)> {
        let region1 = self.region1.resolve(sample_id)?;
        let region2 = self.region2.resolve(sample_id)?;
        Ok((region1, region2))
    }
}
