use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Text used for the "not measured" sentinel, both on screen and in the
/// `roms` table.
pub const NO_VALUE_TEXT: &str = "Ei mitattu";

/// Current value of a form field.
///
/// Booleans are carried as text (e.g. "Kyllä"/"Ei"), the same way the
/// database stores them.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    /// The "no value" sentinel: the measurement was not taken.
    NoValue,
}

impl FieldValue {
    /// Interpret stored or typed text, mapping the sentinel text to [`FieldValue::NoValue`].
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text == NO_VALUE_TEXT {
            FieldValue::NoValue
        } else {
            FieldValue::Text(text)
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn is_no_value(&self) -> bool {
        matches!(self, FieldValue::NoValue)
    }

    /// JSON form used for backups: numbers stay numbers, the sentinel becomes its text.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            FieldValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            FieldValue::Text(t) => serde_json::Value::String(t.clone()),
            FieldValue::NoValue => serde_json::Value::String(NO_VALUE_TEXT.to_string()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // f64 Display already drops a zero fraction: 10.0 -> "10"
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Text(t) => f.write_str(t),
            FieldValue::NoValue => f.write_str(NO_VALUE_TEXT),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        FieldValue::from_text(text)
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Number(n) => serializer.serialize_f64(*n),
            FieldValue::Text(t) => serializer.serialize_str(t),
            FieldValue::NoValue => serializer.serialize_str(NO_VALUE_TEXT),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Number(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<RawValue>::deserialize(deserializer)? {
            None => FieldValue::NoValue,
            Some(RawValue::Number(n)) => FieldValue::Number(n),
            Some(RawValue::Text(t)) => FieldValue::from_text(t),
        })
    }
}
