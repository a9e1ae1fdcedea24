use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

/// Canonical identity of a picker option.
///
/// Identifiers arrive as numbers on some payloads and numeric strings on
/// others (`10` vs `"10"` for the same month), so every value is reduced to a
/// string at the boundary. Equality is plain string equality after that.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OptionValue(String);

impl OptionValue {
    /// Strings are kept verbatim, numbers and booleans use their JSON text,
    /// `null` becomes the empty string, and arrays/objects use compact JSON.
    /// Whole floats drop the fraction so `10.0` and `10` compare equal.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(text) => Self(text.clone()),
            Value::Number(number) => Self(number_text(number)),
            Value::Bool(flag) => Self(flag.to_string()),
            Value::Null => Self(String::new()),
            Value::Array(_) | Value::Object(_) => Self(value.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

const MAX_EXACT_FLOAT_INT: f64 = 9_007_199_254_740_992.0;

fn number_text(number: &serde_json::Number) -> String {
    match number.as_f64() {
        Some(float)
            if number.is_f64() && float.fract() == 0.0 && float.abs() <= MAX_EXACT_FLOAT_INT =>
        {
            format!("{}", float as i64)
        }
        _ => number.to_string(),
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<&Value> for OptionValue {
    fn from(value: &Value) -> Self {
        Self::from_json(value)
    }
}

impl<'de> Deserialize<'de> for OptionValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(|value| Self::from_json(&value))
    }
}

/// An option entry as callers hand it over, before normalization.
#[derive(Clone, Debug, PartialEq)]
pub enum RawOption {
    Scalar(Value),
    Labeled { label: Option<String>, value: Value },
}

impl From<Value> for RawOption {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => {
                let label = map.get("label").and_then(label_text);
                // A record without a usable `value` stands for itself.
                let value = match map.get("value") {
                    Some(value) if !value.is_null() => value.clone(),
                    _ => Value::Object(map),
                };
                RawOption::Labeled { label, value }
            }
            other => RawOption::Scalar(other),
        }
    }
}

impl<'de> Deserialize<'de> for RawOption {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(RawOption::from)
    }
}

fn label_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PickerOption {
    pub label: String,
    pub value: OptionValue,
}

impl PickerOption {
    pub fn new(label: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

impl From<RawOption> for PickerOption {
    fn from(raw: RawOption) -> Self {
        match raw {
            RawOption::Scalar(value) => {
                let label = if value.is_null() {
                    "null".to_string()
                } else {
                    OptionValue::from_json(&value).to_string()
                };
                Self {
                    label,
                    value: OptionValue::from_json(&value),
                }
            }
            RawOption::Labeled { label, value } => {
                let value = OptionValue::from_json(&value);
                Self {
                    label: label.unwrap_or_else(|| value.to_string()),
                    value,
                }
            }
        }
    }
}

pub fn normalize_options(raw: impl IntoIterator<Item = RawOption>) -> Vec<PickerOption> {
    raw.into_iter().map(PickerOption::from).collect()
}

/// Anything other than a JSON array yields no options, which renders as the empty state.
pub fn options_from_json(value: &Value) -> Vec<PickerOption> {
    match value {
        Value::Array(items) => normalize_options(items.iter().cloned().map(RawOption::from)),
        _ => Vec::new(),
    }
}

/// First option whose value matches; later duplicates never win.
pub fn first_index_of(options: &[PickerOption], value: &OptionValue) -> Option<usize> {
    options.iter().position(|option| &option.value == value)
}
