use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> std::io::Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path)?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

///
/// Derive the sample id from a coverage file name: everything in the basename
/// before the first occurrence of `pattern`, with dashes turned into underscores.
///
/// # Arguments
/// - path: path to the coverage file
/// - pattern: coverage filename suffix to strip
pub fn sample_id_from_path(path: &Path, pattern: &str) -> String {
    let basename = path
        .file_name()
        .map(|f| f.to_string_lossy().to_string())
        .unwrap_or_default();

    let stem = match pattern.is_empty() {
        true => basename.as_str(),
        false => basename.split(pattern).next().unwrap_or(&basename),
    };

    stem.replace('-', "_")
}

///
/// Round `value` to `decimals` places, resolving ties to the even neighbour.
///
pub fn round_half_even(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

///
/// Render a float with its shortest round-trip representation, always
/// keeping a decimal point for finite values (`2` is written as `2.0`).
///
pub fn format_float(value: f64) -> String {
    let repr = format!("{}", value);
    if value.is_finite() && !repr.contains('.') {
        format!("{}.0", repr)
    } else {
        repr
    }
}
