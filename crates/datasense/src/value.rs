//! Cell values and their coarse runtime kinds.

use std::fmt;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single record: column name to cell value, in column order.
pub type Row = IndexMap<String, CellValue>;

// Numeric literal accepted by dynamic typing (leading/trailing blanks allowed).
static NUMERIC_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*-?(\d+\.?|\.\d+|\d+\.\d+)([eE][-+]?\d+)?\s*$").unwrap()
});

/// Coarse runtime kind of a cell value.
///
/// `Undefined` is the sentinel recorded for a column that has no
/// non-null sample at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Number,
    String,
    Boolean,
    #[default]
    Undefined,
}

impl ValueKind {
    /// Get the lowercase label for this kind.
    pub fn label(&self) -> &'static str {
        match self {
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Boolean => "boolean",
            ValueKind::Undefined => "undefined",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A cell in a decoded table.
///
/// `Absent` is a key the source never provided; `Null` is an explicit null.
/// Both serialize as JSON `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum CellValue {
    Absent,
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Returns true for absent, null or empty-string cells.
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Absent | CellValue::Null => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Returns true for absent or null cells (empty strings are values).
    pub fn is_nullish(&self) -> bool {
        matches!(self, CellValue::Absent | CellValue::Null)
    }

    /// Runtime kind of the value, or `None` for absent and null cells.
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            CellValue::Absent | CellValue::Null => None,
            CellValue::Bool(_) => Some(ValueKind::Boolean),
            CellValue::Number(_) => Some(ValueKind::Number),
            CellValue::Text(_) => Some(ValueKind::String),
        }
    }

    /// Hashable identity used when counting distinct values.
    ///
    /// Absent, null and `""` stay distinct from each other; `-0` equals `0`
    /// and every NaN equals every other NaN.
    pub(crate) fn distinct_key(&self) -> DistinctKey<'_> {
        match self {
            CellValue::Absent => DistinctKey::Absent,
            CellValue::Null => DistinctKey::Null,
            CellValue::Bool(b) => DistinctKey::Bool(*b),
            CellValue::Number(n) => {
                let canonical = if n.is_nan() {
                    f64::NAN
                } else if *n == 0.0 {
                    0.0
                } else {
                    *n
                };
                DistinctKey::Number(canonical.to_bits())
            }
            CellValue::Text(s) => DistinctKey::Text(s),
        }
    }

    /// Decode a raw text field, turning numeric and boolean literals into
    /// typed values and empty fields into null.
    pub fn parse_typed(raw: &str) -> CellValue {
        match raw {
            "" => CellValue::Null,
            "true" | "TRUE" | "True" => CellValue::Bool(true),
            "false" | "FALSE" | "False" => CellValue::Bool(false),
            _ if NUMERIC_LITERAL.is_match(raw) => match raw.trim().parse::<f64>() {
                Ok(n) => CellValue::Number(n),
                Err(_) => CellValue::Text(raw.to_string()),
            },
            _ => CellValue::Text(raw.to_string()),
        }
    }
}

/// See [`CellValue::distinct_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum DistinctKey<'a> {
    Absent,
    Null,
    Bool(bool),
    Number(u64),
    Text(&'a str),
}

/// String coercion used for join keys and CSV export.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Absent => f.write_str("undefined"),
            CellValue::Null => f.write_str("null"),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Number(n) => f.write_str(&format_number(*n)),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        (if n > 0.0 { "Infinity" } else { "-Infinity" }).to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{:.0}", n)
    } else {
        format!("{}", n)
    }
}

impl From<Value> for CellValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => CellValue::Null,
            Value::Bool(b) => CellValue::Bool(b),
            Value::Number(n) => CellValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => CellValue::Text(s),
            other => CellValue::Text(other.to_string()),
        }
    }
}

impl From<CellValue> for Value {
    fn from(cell: CellValue) -> Self {
        match cell {
            CellValue::Absent | CellValue::Null => Value::Null,
            CellValue::Bool(b) => Value::Bool(b),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 => {
                Value::from(n as i64)
            }
            CellValue::Number(n) => serde_json::Number::from_f64(n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            CellValue::Text(s) => Value::String(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}
