//! JSON record loading
//!
//! A document is either a single structure record or a list of them:
//!
//! ```json
//! { "name": "GTV", "volume": 50.0,
//!   "data": [ { "volume": 100.0, "dose": 50.0 } ] }
//! ```
//!
//! Each record becomes one [`DoseVolumeHistogram`] with its samples in
//! document order.

use crate::dvh::DoseVolumeHistogram;
use crate::error::{DvhError, Result};
use log::{debug, info};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Structure record as it appears in a document
///
/// Every field is optional at this stage so that a missing attribute can be
/// reported by name through [`DvhError::MissingField`].
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct DvhRecord {
    pub name: Option<String>,
    /// Reference volume of the structure
    pub volume: Option<f64>,
    pub data: Option<Vec<SampleRecord>>,
}

/// One `{ "volume": .., "dose": .. }` entry of a record
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct SampleRecord {
    pub volume: Option<f64>,
    pub dose: Option<f64>,
}

impl TryFrom<DvhRecord> for DoseVolumeHistogram {
    type Error = DvhError;

    fn try_from(record: DvhRecord) -> Result<Self> {
        let name = record.name.ok_or_else(|| DvhError::missing("name"))?;
        let reference_volume = record.volume.ok_or_else(|| DvhError::missing("volume"))?;
        let data = record.data.ok_or_else(|| DvhError::missing("data"))?;

        let mut dvh = DoseVolumeHistogram::new(name).with_reference_volume(reference_volume);
        for (i, entry) in data.into_iter().enumerate() {
            let volume = entry
                .volume
                .ok_or_else(|| DvhError::missing(format!("data[{}].volume", i)))?;
            let dose = entry
                .dose
                .ok_or_else(|| DvhError::missing(format!("data[{}].dose", i)))?;
            dvh.add(volume, dose);
        }
        Ok(dvh)
    }
}

impl DoseVolumeHistogram {
    /// Builds a histogram from a record
    ///
    /// # Errors
    ///
    /// Returns [`DvhError::MissingField`] if the record lacks its name,
    /// reference volume, sample list, or any sample's volume or dose.
    pub fn from_record(record: DvhRecord) -> Result<Self> {
        Self::try_from(record)
    }
}

/// Reads a JSON file and builds one histogram per record
///
/// # Errors
///
/// Returns an error if the file cannot be read or any record is invalid.
pub fn read_json(path: impl AsRef<Path>) -> Result<Vec<DoseVolumeHistogram>> {
    let path = path.as_ref();
    info!("Reading DVH records from {}", path.display());
    let contents = fs::read_to_string(path)?;
    parse_json_str(&contents)
}

/// Parses a JSON string into histograms
///
/// # Example
///
/// ```
/// use rtdvh_core::parse_json_str;
///
/// let dvhs = parse_json_str(
///     r#"{"name": "GTV", "volume": 50.0,
///         "data": [{"volume": 100.0, "dose": 50.0}, {"volume": 80.0, "dose": 55.0}]}"#,
/// )
/// .unwrap();
///
/// assert_eq!(dvhs.len(), 1);
/// assert_eq!(dvhs[0].name(), "GTV");
/// assert_eq!(dvhs[0].size(), 2);
/// ```
pub fn parse_json_str(json: &str) -> Result<Vec<DoseVolumeHistogram>> {
    let value: Value = serde_json::from_str(json)?;
    parse_json_value(value)
}

/// Builds histograms from an already-parsed document
///
/// # Errors
///
/// Returns [`DvhError::InvalidDocument`] if the document is neither an
/// object nor an array, and propagates the first record error otherwise.
/// Nothing is returned for a document containing an invalid record.
pub fn parse_json_value(value: Value) -> Result<Vec<DoseVolumeHistogram>> {
    let records = match value {
        Value::Object(_) => vec![value],
        Value::Array(items) => items,
        other => {
            return Err(DvhError::InvalidDocument(format!(
                "expected an object or an array of objects, got {}",
                json_type_name(&other)
            )))
        }
    };

    let dvhs = records
        .into_iter()
        .map(|item| {
            let record: DvhRecord = serde_json::from_value(item)?;
            DoseVolumeHistogram::from_record(record)
        })
        .collect::<Result<Vec<_>>>()?;

    debug!("Parsed {} DVH records", dvhs.len());
    Ok(dvhs)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
