//! JSON encoding of the dataset for storage and export files.
//!
//! Decoding is deliberately shallow: it only insists that `creatorId`,
//! `profile` and `records` are present and that the document has the shape of
//! a dataset. Values inside are taken as-is; [`inspect`] reports anything
//! suspicious without rejecting it.

use chrono::NaiveDate;
use serde_json::Value;

use crate::error::CoreError;
use crate::types::Dataset;

const REQUIRED_FIELDS: [&str; 3] = ["creatorId", "profile", "records"];

/// Encodes the dataset as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`CoreError::Encode`] if serialization fails.
pub fn serialize(dataset: &Dataset) -> Result<Vec<u8>, CoreError> {
    serde_json::to_vec_pretty(dataset).map_err(CoreError::Encode)
}

/// Decodes a dataset previously produced by [`serialize`] or an export file.
///
/// # Errors
///
/// Returns [`CoreError::MalformedData`] if the bytes are not JSON, if any of
/// `creatorId`, `profile` or `records` is missing or empty, or if the document
/// cannot be read as a dataset.
pub fn deserialize(bytes: &[u8]) -> Result<Dataset, CoreError> {
    let document: Value = serde_json::from_slice(bytes).map_err(|e| CoreError::MalformedData {
        reason: format!("not valid JSON: {e}"),
    })?;

    for field in REQUIRED_FIELDS {
        if !is_present(document.get(field)) {
            return Err(CoreError::MalformedData {
                reason: format!("missing required field `{field}`"),
            });
        }
    }

    serde_json::from_value(document).map_err(|e| CoreError::MalformedData {
        reason: e.to_string(),
    })
}

/// Treats `null`, `false`, `0` and `""` as absent.
fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

/// A questionable value accepted on import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetWarning {
    NegativeFollowers { date: NaiveDate, followers: i64 },
    DuplicateDate { date: NaiveDate },
    OutOfOrder { date: NaiveDate, previous: NaiveDate },
}

impl std::fmt::Display for DatasetWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetWarning::NegativeFollowers { date, followers } => {
                write!(f, "{date}: negative follower count {followers}")
            }
            DatasetWarning::DuplicateDate { date } => write!(f, "{date}: more than one record"),
            DatasetWarning::OutOfOrder { date, previous } => {
                write!(f, "{date}: recorded after later date {previous}")
            }
        }
    }
}

/// Lists semantic problems in an imported dataset.
#[must_use]
pub fn inspect(dataset: &Dataset) -> Vec<DatasetWarning> {
    let mut warnings = Vec::new();
    let mut previous: Option<NaiveDate> = None;

    for record in &dataset.records {
        if record.followers < 0 {
            warnings.push(DatasetWarning::NegativeFollowers {
                date: record.date,
                followers: record.followers,
            });
        }
        if let Some(prev) = previous {
            if record.date == prev {
                warnings.push(DatasetWarning::DuplicateDate { date: record.date });
            } else if record.date < prev {
                warnings.push(DatasetWarning::OutOfOrder {
                    date: record.date,
                    previous: prev,
                });
            }
        }
        previous = Some(previous.map_or(record.date, |p| p.max(record.date)));
    }

    warnings
}

/// File name for an export taken on `today`.
#[must_use]
pub fn export_filename(creator_id: &str, today: NaiveDate) -> String {
    format!("note-follower-{creator_id}-{}.json", today.format("%Y-%m-%d"))
}

#[cfg(test)]
#[path = "codec_test.rs"]
mod tests;
