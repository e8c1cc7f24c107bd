use serde_json::{Map, Value};
use std::collections::HashMap;

/// Errors that can occur during Record operations
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("Invalid JSON format: {0}")]
    InvalidJson(String),
    #[error("Missing required field: {0}")]
    MissingRequiredField(String),
    #[error("Field '{field}' must be a scalar value")]
    NonScalarField { field: String },
}

/// Read a status-like value as a flag.
///
/// JSON booleans pass through. The backend also sends status as text, so
/// "true"/"active" and "false"/"inactive" are accepted in any case.
pub fn parse_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "active" => Some(true),
            "false" | "inactive" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// A dynamic row as returned by the backend: field name to scalar JSON value.
///
/// Every record carries an `id`, which is the rendering key for the table and the target
/// of update/delete calls. Numeric and string ids are both accepted and compared in their
/// stringified form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: HashMap<String, Value>,
}

impl Record {
    /// Create a new empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Create record from a backend JSON object
    ///
    /// Nested arrays and objects are rejected, except for `tags`-style string lists which are
    /// flattened to a comma separated string so they can still be searched and exported.
    pub fn from_json(json: Value) -> Result<Self, RecordError> {
        let map = match json {
            Value::Object(map) => map,
            _ => return Err(RecordError::InvalidJson("Expected JSON object".to_string())),
        };

        let mut record = Self::new();
        for (key, value) in map {
            let value = match value {
                Value::Array(items) if items.iter().all(|v| v.is_string()) => Value::String(
                    items.iter().filter_map(|v| v.as_str()).collect::<Vec<_>>().join(", "),
                ),
                Value::Array(_) | Value::Object(_) => {
                    return Err(RecordError::NonScalarField { field: key })
                }
                scalar => scalar,
            };
            record.fields.insert(key, value);
        }

        if record.id().is_none() {
            return Err(RecordError::MissingRequiredField("id".to_string()));
        }
        Ok(record)
    }

    /// Get field value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Field rendered as plain text; null and missing fields become ""
    pub fn text(&self, key: &str) -> String {
        match self.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Bool(b)) => b.to_string(),
            Some(Value::Number(n)) => n.to_string(),
            Some(other) => other.to_string(),
        }
    }

    /// Field as a boolean flag; see [`parse_flag`] for the accepted spellings
    pub fn flag(&self, key: &str) -> Option<bool> {
        parse_flag(self.get(key)?)
    }

    /// Set field value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    // ========================================
    // Standard field accessors
    // ========================================

    /// Record id, stringified
    pub fn id(&self) -> Option<String> {
        match self.get("id")? {
            Value::Number(n) => Some(n.to_string()),
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }
    }

    // ========================================
    // Serialization
    // ========================================

    /// Convert to JSON Value (all fields)
    pub fn to_json(&self) -> Value {
        Value::Object(self.to_map())
    }

    /// Convert to serde_json::Map
    pub fn to_map(&self) -> Map<String, Value> {
        self.fields.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

// ========================================
// Conversions
// ========================================

impl From<HashMap<String, Value>> for Record {
    fn from(fields: HashMap<String, Value>) -> Self {
        Self { fields }
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        record.to_json()
    }
}

// ========================================
// Bulk Conversion Helpers
// ========================================

impl Record {
    /// Convert JSON array to Vec<Record> with proper error handling
    pub fn from_json_array(json: Value) -> Result<Vec<Self>, RecordError> {
        match json {
            Value::Array(array) => {
                let mut records = Vec::with_capacity(array.len());
                for (index, item) in array.into_iter().enumerate() {
                    let record = Self::from_json(item)
                        .map_err(|e| RecordError::InvalidJson(format!("Item {}: {}", index, e)))?;
                    records.push(record);
                }
                Ok(records)
            }
            _ => Err(RecordError::InvalidJson("Expected JSON array".to_string())),
        }
    }

    /// Accepts a bare array or a `{"results": [...]}` / `{"data": [...]}` envelope
    pub fn from_json_flexible(json: Value) -> Result<Vec<Self>, RecordError> {
        match json {
            Value::Array(_) => Self::from_json_array(json),
            Value::Object(mut map) => {
                for key in ["results", "data"] {
                    if let Some(inner @ Value::Array(_)) = map.remove(key) {
                        return Self::from_json_array(inner);
                    }
                }
                Ok(vec![Self::from_json(Value::Object(map))?])
            }
            _ => Err(RecordError::InvalidJson("Expected JSON object or array".to_string())),
        }
    }
}
