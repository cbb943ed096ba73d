use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::warn;
use serde::Deserialize;

use tandemhunter_core::models::comparison::{
    ABOVE_CUTOFF_COLUMN, FOLD_CHANGE_COLUMN, LOG2_FOLD_CHANGE_COLUMN, SAMPLE_ID_COLUMN,
};
use tandemhunter_core::models::{IntervalPair, RegionSpec};

/// Output columns a region label can't take.
const RESERVED_LABELS: [&str; 4] = [
    SAMPLE_ID_COLUMN,
    FOLD_CHANGE_COLUMN,
    LOG2_FOLD_CHANGE_COLUMN,
    ABOVE_CUTOFF_COLUMN,
];
use tandemhunter_core::{HunterError, Result};

///
/// Serialization format of an interval spec, picked from the file extension.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalFormat {
    Json,
    Yaml,
    Toml,
}

impl IntervalFormat {
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => IntervalFormat::Yaml,
            Some("toml") => IntervalFormat::Toml,
            _ => IntervalFormat::Json,
        }
    }
}

/// Integers may be written as numbers or as numeric strings.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum RawInt {
    Int(u64),
    Text(String),
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum RawFloat {
    Float(f64),
    Text(String),
}

#[derive(Deserialize, Debug)]
struct RawRegion {
    chrom: Option<String>,
    start: Option<RawInt>,
    end: Option<RawInt>,
    length: Option<RawInt>,
    name: Option<String>,
    #[serde(flatten)]
    extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Deserialize, Debug)]
struct RawIntervalPair {
    region1: Option<RawRegion>,
    region2: Option<RawRegion>,
    #[serde(default)]
    dup_threshold: Option<RawFloat>,
}

#[derive(Deserialize, Debug)]
struct RawTomlDocument {
    intervals: Vec<RawIntervalPair>,
}

fn parse_document(content: &str, format: IntervalFormat) -> std::result::Result<Vec<RawIntervalPair>, String> {
    match format {
        IntervalFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        IntervalFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        IntervalFormat::Toml => toml::from_str::<RawTomlDocument>(content)
            .map(|doc| doc.intervals)
            .map_err(|e| e.to_string()),
    }
}

fn resolve_int(value: Option<RawInt>, key: &str) -> std::result::Result<u64, String> {
    match value {
        Some(RawInt::Int(v)) => Ok(v),
        Some(RawInt::Text(s)) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| format!("'{}' must be a non-negative integer, found '{}'", key, s)),
        None => Err(format!("missing required key '{}'", key)),
    }
}

fn resolve_region(raw: Option<RawRegion>, key: &str) -> std::result::Result<RegionSpec, String> {
    let raw = raw.ok_or_else(|| format!("missing required key '{}'", key))?;

    for extra in raw.extra.keys() {
        warn!("Ignoring unknown key '{}' in {}", extra, key);
    }

    let chrom = raw
        .chrom
        .ok_or_else(|| format!("{}: missing required key 'chrom'", key))?;
    let name = raw
        .name
        .ok_or_else(|| format!("{}: missing required key 'name'", key))?;
    let start = resolve_int(raw.start, "start").map_err(|e| format!("{}: {}", key, e))?;
    let end = resolve_int(raw.end, "end").map_err(|e| format!("{}: {}", key, e))?;
    let length = resolve_int(raw.length, "length").map_err(|e| format!("{}: {}", key, e))?;

    if RESERVED_LABELS.contains(&name.as_str()) {
        return Err(format!(
            "{}: name '{}' is reserved for an output column",
            key, name
        ));
    }

    if end <= start {
        return Err(format!(
            "{}: end ({}) must be greater than start ({})",
            key, end, start
        ));
    }

    Ok(RegionSpec {
        chrom,
        start,
        end,
        length,
        name,
    })
}

fn resolve_threshold(raw: Option<RawFloat>, default: f64) -> std::result::Result<f64, String> {
    let threshold = match raw {
        None => default,
        Some(RawFloat::Float(v)) => v,
        Some(RawFloat::Text(s)) if s.trim().is_empty() => default,
        Some(RawFloat::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("'dup_threshold' must be a number, found '{}'", s))?,
    };

    if !threshold.is_finite() {
        return Err(format!("'dup_threshold' must be finite, found {}", threshold));
    }
    Ok(threshold)
}

fn resolve_pair(raw: RawIntervalPair, default: f64) -> std::result::Result<IntervalPair, String> {
    let region1 = resolve_region(raw.region1, "region1")?;
    let region2 = resolve_region(raw.region2, "region2")?;
    let dup_threshold = resolve_threshold(raw.dup_threshold, default)?;

    if region1.name == region2.name {
        return Err(format!(
            "region1 and region2 share the label '{}'",
            region1.name
        ));
    }

    Ok(IntervalPair {
        region1,
        region2,
        dup_threshold,
    })
}

///
/// Parse an interval spec from a string.
///
/// # Arguments
/// - content: the serialized spec
/// - format: serialization format of `content`
/// - default_threshold: threshold for pairs that don't define `dup_threshold`
/// - origin: path reported in errors
pub fn parse_intervals(
    content: &str,
    format: IntervalFormat,
    default_threshold: f64,
    origin: &Path,
) -> Result<Vec<IntervalPair>> {
    let raw = parse_document(content, format).map_err(|e| HunterError::interval_spec(origin, e))?;

    if raw.is_empty() {
        return Err(HunterError::interval_spec(origin, "no interval pairs defined"));
    }

    raw.into_iter()
        .enumerate()
        .map(|(idx, pair)| {
            resolve_pair(pair, default_threshold)
                .map_err(|e| HunterError::interval_spec(origin, format!("entry {}: {}", idx, e)))
        })
        .collect()
}

///
/// Load the interval pairs to compare from a JSON, YAML or TOML file.
///
/// Every failure, including an unreadable file, is an [HunterError::IntervalSpec]:
/// without a valid spec no sample can be processed.
///
pub fn load_intervals(path: &Path, default_threshold: f64) -> Result<Vec<IntervalPair>> {
    let content = fs::read_to_string(path)
        .map_err(|e| HunterError::interval_spec(path, format!("can't read file: {}", e)))?;

    parse_intervals(
        &content,
        IntervalFormat::from_path(path),
        default_threshold,
        path,
    )
}
