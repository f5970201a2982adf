use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field holding a record's identity. Assigned once on creation, never changed.
pub const IDENTITY_FIELD: &str = "creation_timestamp";

/// ISO-8601 local timestamp with microsecond precision.
pub fn new_identity() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

/// One persisted exercise entry: a mapping from field name to JSON value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn identity(&self) -> Option<&str> {
        self.0.get(IDENTITY_FIELD).and_then(Value::as_str)
    }

    /// Only a string identity counts; `null` or a number is missing.
    pub fn has_identity(&self) -> bool {
        matches!(self.0.get(IDENTITY_FIELD), Some(Value::String(_)))
    }

    pub fn set_identity(&mut self, identity: impl Into<String>) {
        self.0
            .insert(IDENTITY_FIELD.to_string(), Value::String(identity.into()));
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    pub fn get_i64(&self, field: &str) -> Option<i64> {
        self.0.get(field).and_then(Value::as_i64)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Only JSON objects are records.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use serde_json::json;

    #[test]
    fn test_new_identity_is_iso_timestamp() {
        let id = new_identity();
        assert!(NaiveDateTime::parse_from_str(&id, "%Y-%m-%dT%H:%M:%S%.f").is_ok());
        assert_eq!(id.split('.').nth(1).map(str::len), Some(6));
    }

    #[test]
    fn test_null_identity_is_missing() {
        let record = Record::from_value(json!({ "creation_timestamp": null })).unwrap();
        assert!(!record.has_identity());
        assert_eq!(record.identity(), None);

        let mut record = Record::default();
        record.set_identity("2024-01-01T09:00:00.000000");
        assert!(record.has_identity());
        assert_eq!(record.identity(), Some("2024-01-01T09:00:00.000000"));
    }

    #[test]
    fn test_non_string_identity_is_missing() {
        let record = Record::from_value(json!({ "creation_timestamp": 5 })).unwrap();
        assert!(!record.has_identity());
        assert_eq!(record.identity(), None);
    }

    #[test]
    fn test_from_value_rejects_non_objects() {
        assert!(Record::from_value(json!([1, 2])).is_none());
        assert!(Record::from_value(json!("text")).is_none());
        assert!(Record::from_value(json!({})).is_some());
    }

    #[test]
    fn test_field_order_is_kept() {
        let mut record =
            Record::from_value(json!({ "Date": "2024-01-01", "Situation": "Meeting" })).unwrap();
        record.set_identity("t1");

        let keys: Vec<&str> = record.fields().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Date", "Situation", IDENTITY_FIELD]);
    }
}
