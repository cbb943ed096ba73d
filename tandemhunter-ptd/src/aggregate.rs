use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::info;

use tandemhunter_core::models::comparison::SAMPLE_ID_COLUMN;
use tandemhunter_core::{HunterError, Result};
use tandemhunter_io::ComparisonFile;

use crate::consts::{AGGREGATE_FNAME_SUFFIX, DEFAULT_AGGREGATE_FNAME};

///
/// Merge several per-sample result artifacts into one table.
///
/// The merged header is the union of all headers in order of first appearance;
/// cells of columns a file doesn't have are left empty. A sample id may not show
/// up in more than one artifact.
///
pub fn aggregate_comparisons(files: &[PathBuf]) -> Result<ComparisonFile> {
    if files.is_empty() {
        return Err(HunterError::Aggregation(
            "no comparison files to aggregate".to_string(),
        ));
    }

    let tables = files
        .iter()
        .map(|f| ComparisonFile::from_path(f))
        .collect::<Result<Vec<_>>>()?;

    let mut header: Vec<String> = Vec::new();
    for table in &tables {
        for column in &table.header {
            if !header.contains(column) {
                header.push(column.clone());
            }
        }
    }

    // sample id -> index of the file it was first seen in
    let mut owners: HashMap<String, usize> = HashMap::new();
    let mut rows: Vec<Vec<String>> = Vec::new();

    for (file_idx, table) in tables.iter().enumerate() {
        for idx in 0..table.rows.len() {
            let sample_id = table.cell(idx, SAMPLE_ID_COLUMN).unwrap_or_default();
            match owners.get(sample_id) {
                Some(owner) if *owner != file_idx => {
                    return Err(HunterError::Aggregation(format!(
                        "sample_id '{}' appears in both {} and {}",
                        sample_id,
                        files[*owner].display(),
                        files[file_idx].display()
                    )));
                }
                Some(_) => {}
                None => {
                    owners.insert(sample_id.to_string(), file_idx);
                }
            }

            rows.push(
                header
                    .iter()
                    .map(|column| table.cell(idx, column).unwrap_or_default().to_string())
                    .collect(),
            );
        }
    }

    Ok(ComparisonFile { header, rows })
}

/// File name of the merged artifact for an optional run name.
pub fn aggregate_fname(run: Option<&str>) -> String {
    match run {
        Some(run) => format!("{}{}", run, AGGREGATE_FNAME_SUFFIX),
        None => DEFAULT_AGGREGATE_FNAME.to_string(),
    }
}

///
/// Merge `files` and write the result into `out_dir`.
///
/// # Returns
/// Path of the merged artifact.
pub fn aggregate_to_file(files: &[PathBuf], out_dir: &Path, run: Option<&str>) -> Result<PathBuf> {
    let merged = aggregate_comparisons(files)?;

    let fname = out_dir.join(aggregate_fname(run));
    merged.write_csv(&fname)?;

    info!(
        "Aggregated {} rows from {} files into {}",
        merged.rows.len(),
        files.len(),
        fname.display()
    );
    Ok(fname)
}
