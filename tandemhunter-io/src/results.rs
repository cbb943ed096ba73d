use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};
use tempfile::NamedTempFile;

use tandemhunter_core::models::comparison::{
    ABOVE_CUTOFF_COLUMN, FOLD_CHANGE_COLUMN, LOG2_FOLD_CHANGE_COLUMN, SAMPLE_ID_COLUMN,
};
use tandemhunter_core::models::{ComparisonResult, ComparisonTable};
use tandemhunter_core::utils::format_float;
use tandemhunter_core::{HunterError, Result};

pub trait ComparisonWrite {
    ///
    /// Write the table to disk as a comma separated file
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    fn write_csv<T: AsRef<Path>>(&self, path: T) -> Result<()>;
}

fn csv_error(e: csv::Error) -> HunterError {
    HunterError::Io(e.into())
}

///
/// Write a header and rows to a temporary file next to `path`, then move it into place.
///
/// A failed write leaves any earlier file at `path` untouched and no partial file behind.
///
fn write_records<I>(path: &Path, header: &[String], rows: I) -> Result<()>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    {
        let mut writer = WriterBuilder::new().from_writer(tmp.as_file_mut());
        writer.write_record(header).map_err(csv_error)?;
        for row in rows {
            writer.write_record(&row).map_err(csv_error)?;
        }
        writer.flush()?;
    }

    tmp.persist(path).map_err(|e| HunterError::Io(e.error))?;
    Ok(())
}

fn render_cell(row: &ComparisonResult, column: &str) -> String {
    match column {
        SAMPLE_ID_COLUMN => row.sample_id.clone(),
        FOLD_CHANGE_COLUMN => format_float(row.fold_change),
        LOG2_FOLD_CHANGE_COLUMN => format_float(row.log2_fold_change),
        ABOVE_CUTOFF_COLUMN => match row.above_cutoff {
            true => "TRUE".to_string(),
            false => "FALSE".to_string(),
        },
        label => match row.value_for(label) {
            Some(value) if row.metric.is_integer() => format!("{}", value as i64),
            Some(value) => format_float(value),
            None => String::new(),
        },
    }
}

impl ComparisonWrite for ComparisonTable {
    fn write_csv<T: AsRef<Path>>(&self, path: T) -> Result<()> {
        let columns = self.columns();
        let rows = self
            .rows
            .iter()
            .map(|row| columns.iter().map(|c| render_cell(row, c)).collect::<Vec<String>>());

        write_records(path.as_ref(), &columns, rows)
    }
}

///
/// A previously written result artifact, kept as plain text cells.
///
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonFile {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ComparisonFile {
    ///
    /// Read a comma separated result artifact.
    ///
    pub fn from_path(path: &Path) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .map_err(|e| HunterError::Aggregation(format!("can't open {:?}: {}", path, e)))?;

        let header: Vec<String> = reader
            .headers()
            .map_err(|e| HunterError::Aggregation(format!("can't read header of {:?}: {}", path, e)))?
            .iter()
            .map(|h| h.to_string())
            .collect();

        if !header.iter().any(|h| h == SAMPLE_ID_COLUMN) {
            return Err(HunterError::Aggregation(format!(
                "{:?} has no '{}' column",
                path, SAMPLE_ID_COLUMN
            )));
        }

        let mut rows: Vec<Vec<String>> = Vec::new();
        for record in reader.records() {
            let record = record
                .map_err(|e| HunterError::Aggregation(format!("can't read {:?}: {}", path, e)))?;
            rows.push(record.iter().map(|c| c.to_string()).collect());
        }

        Ok(ComparisonFile { header, rows })
    }

    ///
    /// Write the file back as comma separated text.
    ///
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        write_records(path, &self.header, self.rows.iter().cloned())
    }

    /// Cell of `row` under `column`, if both exist.
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.header.iter().position(|h| h == column)?;
        self.rows.get(row)?.get(idx).map(|c| c.as_str())
    }
}
