use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A stored item: a JSON object with at least the collection's key attribute.
pub type Record = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VolumeStatus {
    Discovered,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationStatus {
    Queued,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub account_id: String,
    pub external_id: String,
}

impl Account {
    /// Returns `None` unless both identifiers are present. Identifiers are non-empty strings
    /// or non-zero numbers; numbers are rendered as written, e.g. a bare account number.
    pub fn from_record(record: &Record) -> Option<Self> {
        let field = |name: &str| match record.get(name)? {
            Value::String(value) if !value.is_empty() => Some(value.clone()),
            Value::Number(value) if value.as_f64() != Some(0.0) => Some(value.to_string()),
            _ => None,
        };
        Some(Account {
            account_id: field("accountId")?,
            external_id: field("externalId")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    pub volume_id: String,
    pub instance_id: String,
    pub size_gb: i64,
    pub eligible: bool,
    pub status: VolumeStatus,
}

impl Volume {
    /// Eligibility is only meaningful once the evaluation worker has run.
    pub fn discovered(volume_id: String, instance_id: String, size_gb: i64) -> Self {
        Volume {
            volume_id,
            instance_id,
            size_gb,
            eligible: true,
            status: VolumeStatus::Discovered,
        }
    }

    pub fn to_record(&self) -> Result<Record, serde_json::Error> {
        serde_json::from_value(serde_json::to_value(self)?)
    }
}
