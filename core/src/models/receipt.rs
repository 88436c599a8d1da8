// core/src/models/receipt.rs

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Summary returned by checkout. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
  pub total: i64,
  #[serde(serialize_with = "serialize_iso8601", deserialize_with = "deserialize_iso8601")]
  pub timestamp: DateTime<Utc>,
}

impl Receipt {
  pub fn new(total: i64) -> Self {
    Self {
      total,
      timestamp: Utc::now(),
    }
  }
}

// ISO-8601 in UTC with millisecond precision, e.g. 2024-05-01T12:30:00.000Z
fn serialize_iso8601<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
  serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn deserialize_iso8601<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
  let raw = String::deserialize(deserializer)?;
  DateTime::parse_from_rfc3339(&raw)
    .map(|ts| ts.with_timezone(&Utc))
    .map_err(serde::de::Error::custom)
}
