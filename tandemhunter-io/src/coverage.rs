use std::collections::HashMap;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};

use tandemhunter_core::consts::MISSING_VALUE;
use tandemhunter_core::models::{COVERAGE_COLUMNS, ColumnType, CoverageRecord};
use tandemhunter_core::utils::get_dynamic_reader;
use tandemhunter_core::{HunterError, Result};

/// Position of every declared column in the header of one coverage report.
#[derive(Debug, Clone)]
struct ColumnIndex {
    positions: HashMap<&'static str, usize>,
}

impl ColumnIndex {
    fn from_header(header: &StringRecord, path: &Path) -> Result<Self> {
        let mut positions: HashMap<&'static str, usize> = HashMap::new();
        let mut missing: Vec<&str> = Vec::new();

        for (column, _) in COVERAGE_COLUMNS.iter() {
            match header.iter().position(|h| h == *column) {
                Some(idx) => {
                    positions.insert(column, idx);
                }
                None => missing.push(column),
            }
        }

        if !missing.is_empty() {
            return Err(HunterError::format(
                path,
                format!("missing required columns: {}", missing.join(", ")),
            ));
        }

        Ok(ColumnIndex { positions })
    }

    fn get<'a>(&self, record: &'a StringRecord, column: &str) -> &'a str {
        self.positions
            .get(column)
            .and_then(|idx| record.get(*idx))
            .unwrap_or(MISSING_VALUE)
    }
}

///
/// Streaming reader over a per-target coverage report.
///
/// Rows are yielded in batches of at most `chunk_size` records so that peak memory
/// stays bounded for very large reports. Every batch is fully type-checked: a value
/// that can't be coerced to its column type ends the iteration with a
/// [HunterError::Format].
///
pub struct CoverageReader {
    path: PathBuf,
    reader: csv::Reader<BufReader<Box<dyn Read>>>,
    columns: ColumnIndex,
    chunk_size: usize,
    buffer: StringRecord,
    done: bool,
}

impl CoverageReader {
    ///
    /// Open a coverage report and validate its header.
    ///
    /// # Arguments
    /// - path: path to the (optionally gzipped) tab-separated report
    /// - chunk_size: maximum number of records per yielded batch
    pub fn from_path(path: &Path, chunk_size: usize) -> Result<Self> {
        let file = get_dynamic_reader(path)?;

        let mut reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .quoting(false)
            .trim(Trim::All)
            .from_reader(file);

        let header = reader
            .headers()
            .map_err(|e| HunterError::format(path, format!("can't read header: {}", e)))?
            .clone();
        let columns = ColumnIndex::from_header(&header, path)?;

        Ok(CoverageReader {
            path: path.to_path_buf(),
            reader,
            columns,
            chunk_size: chunk_size.max(1),
            buffer: StringRecord::new(),
            done: false,
        })
    }

    fn parse_record(&self, record: &StringRecord) -> Result<CoverageRecord> {
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let field = |column: &str| self.columns.get(record, column);

        let coerce_error = |column: &str, kind: ColumnType, value: &str| {
            HunterError::format(
                &self.path,
                format!(
                    "line {}: can't convert value '{}' of column '{}' to {}",
                    line, value, column, kind
                ),
            )
        };

        let int = |column: &str| -> Result<u64> {
            let value = field(column);
            value
                .parse::<u64>()
                .map_err(|_| coerce_error(column, ColumnType::Int, value))
        };

        let float = |column: &str| -> Result<Option<f64>> {
            let value = field(column);
            if value == MISSING_VALUE {
                return Ok(None);
            }
            value
                .parse::<f64>()
                .map(Some)
                .map_err(|_| coerce_error(column, ColumnType::Float, value))
        };

        let chrom = field("chrom");
        if chrom == MISSING_VALUE || chrom.is_empty() {
            return Err(coerce_error("chrom", ColumnType::Str, chrom));
        }

        let name = match field("name") {
            MISSING_VALUE => None,
            name => Some(name.to_string()),
        };

        Ok(CoverageRecord {
            chrom: chrom.to_string(),
            start: int("start")?,
            end: int("end")?,
            length: int("length")?,
            name,
            gc: float("%gc")?,
            mean_coverage: float("mean_coverage")?,
            normalized_coverage: float("normalized_coverage")?,
            min_normalized_coverage: float("min_normalized_coverage")?,
            max_normalized_coverage: float("max_normalized_coverage")?,
            min_coverage: int("min_coverage")?,
            max_coverage: int("max_coverage")?,
            pct_0x: float("pct_0x")?,
            read_count: int("read_count")?,
        })
    }

    fn next_chunk(&mut self) -> Result<Vec<CoverageRecord>> {
        let mut chunk: Vec<CoverageRecord> = Vec::with_capacity(self.chunk_size);

        while chunk.len() < self.chunk_size {
            let mut record = std::mem::take(&mut self.buffer);
            let more = self
                .reader
                .read_record(&mut record)
                .map_err(|e| HunterError::format(&self.path, e.to_string()))?;
            if !more {
                self.done = true;
                break;
            }
            chunk.push(self.parse_record(&record)?);
            self.buffer = record;
        }

        Ok(chunk)
    }
}

impl Iterator for CoverageReader {
    type Item = Result<Vec<CoverageRecord>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.next_chunk() {
            Ok(chunk) if chunk.is_empty() => None,
            Ok(chunk) => Some(Ok(chunk)),
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use pretty_assertions::assert_eq;
    use rstest::*;

    const HEADER: &str = "chrom\tstart\tend\tlength\tname\t%gc\tmean_coverage\tnormalized_coverage\tmin_normalized_coverage\tmax_normalized_coverage\tmin_coverage\tmax_coverage\tpct_0x\tread_count";

    fn get_test_path(file_name: &str) -> PathBuf {
        std::env::current_dir()
            .unwrap()
            .join("../tests/data/coverage")
            .join(file_name)
    }

    fn write_report(dir: &Path, rows: &[&str]) -> PathBuf {
        let path = dir.join("sample.coverage.tsv");
        let mut content = String::from(HEADER);
        for row in rows {
            content.push('\n');
            content.push_str(row);
        }
        content.push('\n');
        fs::write(&path, content).unwrap();
        path
    }

    #[rstest]
    #[case("PositiveSample.qc.coverage.txt")]
    #[case("PositiveSample.qc.coverage.txt.gz")]
    fn test_read_positive_sample(#[case] file_name: &str) {
        let path = get_test_path(file_name);
        let reader = CoverageReader::from_path(&path, 10_000).unwrap();
        let chunks: Vec<Vec<CoverageRecord>> = reader.map(|c| c.unwrap()).collect();

        assert_eq!(chunks.len(), 1);
        let exon3 = chunks[0]
            .iter()
            .find(|r| r.start == 118342365)
            .unwrap();
        assert_eq!(exon3.chrom, "chr11");
        assert_eq!(exon3.normalized_coverage, Some(2.284132));
    }

    #[rstest]
    fn test_chunking() {
        let path = get_test_path("PositiveSample.qc.coverage.txt");
        let all: usize = CoverageReader::from_path(&path, 10_000)
            .unwrap()
            .map(|c| c.unwrap().len())
            .sum();

        let chunks: Vec<usize> = CoverageReader::from_path(&path, 2)
            .unwrap()
            .map(|c| c.unwrap().len())
            .collect();

        assert!(chunks.iter().all(|len| *len <= 2));
        assert_eq!(chunks.iter().sum::<usize>(), all);
        assert!(chunks.len() > 1);
    }

    #[rstest]
    fn test_column_order_is_irrelevant() {
        let tempdir = tempfile::tempdir().unwrap();
        let mut columns: Vec<&str> = HEADER.split('\t').collect();
        columns.reverse();
        let row = "1200\t0.0\t900\t700\t1.3\t0.9\t1.5\t812.4\t0.55\tT1\t101\t200\t100\tchr1";
        let path = tempdir.path().join("reversed.coverage.tsv");
        fs::write(&path, format!("{}\n{}\n", columns.join("\t"), row)).unwrap();

        let mut reader = CoverageReader::from_path(&path, 10).unwrap();
        let chunk = reader.next().unwrap().unwrap();
        assert_eq!(chunk[0].chrom, "chr1");
        assert_eq!(chunk[0].start, 100);
        assert_eq!(chunk[0].normalized_coverage, Some(1.5));
        assert_eq!(chunk[0].read_count, 1200);
    }

    #[rstest]
    fn test_missing_value_sentinel() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = write_report(
            tempdir.path(),
            &["chr1\t100\t200\t101\t-\t0.5\t10.0\t-\t-\t-\t0\t20\t0.1\t50"],
        );

        let chunk = CoverageReader::from_path(&path, 10)
            .unwrap()
            .next()
            .unwrap()
            .unwrap();
        assert_eq!(chunk[0].name, None);
        assert_eq!(chunk[0].normalized_coverage, None);
        assert_eq!(chunk[0].mean_coverage, Some(10.0));
    }

    #[rstest]
    fn test_bad_header_is_format_error() {
        let path = get_test_path("BadHeader.qc.coverage.txt");
        let err = CoverageReader::from_path(&path, 10).err().unwrap();
        assert_eq!(err.kind(), "FormatError");
        assert!(err.to_string().contains("normalized_coverage"));
    }

    #[rstest]
    #[case("chr1\t100\t200\t101\tT1\t0.5\t10.0\tabc\t1\t1\t0\t20\t0.1\t50")]
    #[case("chr1\t100\t200\t101\tT1\t0.5\t10.0\t1.0\t1\t1\t-\t20\t0.1\t50")]
    #[case("chr1\t1.5\t200\t101\tT1\t0.5\t10.0\t1.0\t1\t1\t0\t20\t0.1\t50")]
    #[case("-\t100\t200\t101\tT1\t0.5\t10.0\t1.0\t1\t1\t0\t20\t0.1\t50")]
    #[case("chr1\t100\t200\t101\tT1")]
    fn test_uncoercible_row_is_format_error(#[case] row: &str) {
        let tempdir = tempfile::tempdir().unwrap();
        let path = write_report(tempdir.path(), &[row]);

        let mut reader = CoverageReader::from_path(&path, 10).unwrap();
        let err = reader.next().unwrap().unwrap_err();
        assert_eq!(err.kind(), "FormatError");
        assert!(reader.next().is_none());
    }
}
