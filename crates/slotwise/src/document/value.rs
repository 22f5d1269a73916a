//! Variant values.

use serde::{Deserialize, Serialize};

/// A selected or declared variant value: a string or a boolean.
///
/// Booleans are stored as-is so that selections keep their meaning, but
/// they are looked up under the keys `"true"` and `"false"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariantValue {
    Bool(bool),
    Str(String),
}

impl VariantValue {
    /// The key this value is looked up under in a variant table.
    pub fn as_key(&self) -> &str {
        match self {
            VariantValue::Bool(true) => "true",
            VariantValue::Bool(false) => "false",
            VariantValue::Str(value) => value,
        }
    }

    /// `false`, `"false"` and `""` are falsy.
    pub fn is_falsy(&self) -> bool {
        matches!(self.as_key(), "false" | "")
    }
}

impl std::fmt::Display for VariantValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_key())
    }
}

impl From<&str> for VariantValue {
    fn from(value: &str) -> Self {
        VariantValue::Str(value.to_string())
    }
}

impl From<String> for VariantValue {
    fn from(value: String) -> Self {
        VariantValue::Str(value)
    }
}

impl From<&String> for VariantValue {
    fn from(value: &String) -> Self {
        VariantValue::Str(value.clone())
    }
}

impl From<bool> for VariantValue {
    fn from(value: bool) -> Self {
        VariantValue::Bool(value)
    }
}
