use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::registry::FieldKind;

/// Live or submitted field values keyed by field name.
pub type FieldValues = BTreeMap<String, FieldValue>;

/// A single entered value. Number fields keep numeric input as numbers;
/// everything else, including unparsable numeric input, stays text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl FieldValue {
    /// Interprets raw input for a field of the given kind.
    /// Blank input to a number or date field is empty, as a native control
    /// would hold it.
    pub fn from_input(kind: &FieldKind, raw: &str) -> Self {
        let trimmed = raw.trim();
        match kind {
            FieldKind::Number | FieldKind::Date if trimmed.is_empty() => FieldValue::default(),
            FieldKind::Number => match trimmed.parse::<f64>() {
                Ok(number) if number.is_finite() => FieldValue::Number(number),
                _ => FieldValue::Text(raw.to_string()),
            },
            _ => FieldValue::Text(raw.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Number(_) => false,
            FieldValue::Text(text) => text.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            FieldValue::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(number) => Some(*number),
            FieldValue::Text(_) => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Number(number) if number.fract() == 0.0 && number.abs() < 1e15 => {
                write!(f, "{:.0}", number)
            }
            FieldValue::Number(number) => write!(f, "{}", number),
        }
    }
}
