//! Cell values for colframe tables
//!
//! Every cell in a [`Table`](crate::table::Table) holds a [`Value`]. Missing
//! data is the explicit [`Value::Null`] variant; the textual sentinels used by
//! CSV files (`NA` and the empty string) are translated to and from it only
//! at the CSV boundary.
//!
//! Values never coerce between variants on comparison: `Text("1")`,
//! `Integer(1)` and `Float(1.0)` are three distinct values. Numeric
//! interpretation is requested explicitly through [`Value::to_numeric`] and
//! [`Value::as_f64`].

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::{ColframeError, ColframeResult};

/// Sentinel written for missing cells and recognized when reading them
pub const MISSING_SENTINEL: &str = "NA";

/// Represents a value in a table cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    /// Represents a missing value
    Null,
    /// 64-bit signed integer
    Integer(i64),
    /// 64-bit floating point number
    Float(f64),
    /// UTF-8 text
    Text(String),
}

/// Exact equality: variants never compare equal to each other.
///
/// Floats compare by bit pattern so that `Eq` and `Hash` agree, which lets
/// values serve as group and join keys.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Text(a), Value::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::Null => 0_u8.hash(state),
            Value::Integer(i) => {
                1_u8.hash(state);
                i.hash(state);
            }
            Value::Float(f) => {
                2_u8.hash(state);
                f.to_bits().hash(state);
            }
            Value::Text(s) => {
                3_u8.hash(state);
                s.hash(state);
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "{}", MISSING_SENTINEL),
            Value::Integer(i) => write!(f, "{}", i),
            // Debug keeps the trailing ".0" on integral floats
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

/// Whether a raw field is one of the missing-value sentinels
pub fn is_missing_field(field: &str) -> bool {
    field.is_empty() || field == MISSING_SENTINEL
}

/// Whether a raw field can be read as a number
///
/// Missing sentinels are never numeric.
pub fn is_numeric_field(field: &str) -> bool {
    !is_missing_field(field) && field.trim().parse::<f64>().is_ok()
}

impl Value {
    /// Convert a raw CSV field, keeping present values as text
    pub fn from_field(field: &str) -> Self {
        if is_missing_field(field) {
            Value::Null
        } else {
            Value::Text(field.to_string())
        }
    }

    /// Convert a raw CSV field, parsing numbers where possible
    ///
    /// Integers are tried before floats so that `"42"` stays integral.
    /// Surrounding whitespace is ignored when parsing.
    pub fn infer_field(field: &str) -> Self {
        if is_missing_field(field) {
            return Value::Null;
        }
        let trimmed = field.trim();
        if let Ok(i) = trimmed.parse::<i64>() {
            return Value::Integer(i);
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            return Value::Float(f);
        }
        Value::Text(field.to_string())
    }

    /// Render the value as a CSV field, writing missing cells as `NA`
    pub fn to_field(&self) -> String {
        self.to_string()
    }

    /// Returns true for the missing value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the text content, if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Whether the value can be interpreted as a number
    pub fn is_numeric(&self) -> bool {
        match self {
            Value::Integer(_) | Value::Float(_) => true,
            Value::Text(s) => is_numeric_field(s),
            Value::Null => false,
        }
    }

    /// Interpret the value as a number, returning `Integer` or `Float`
    ///
    /// Text is parsed on demand. Missing values and non-numeric text fail
    /// with [`ColframeError::TypeConversionError`].
    pub fn to_numeric(&self) -> ColframeResult<Value> {
        match self {
            Value::Integer(_) | Value::Float(_) => Ok(self.clone()),
            Value::Text(s) => {
                let trimmed = s.trim();
                if let Ok(i) = trimmed.parse::<i64>() {
                    Ok(Value::Integer(i))
                } else if let Ok(f) = trimmed.parse::<f64>() {
                    Ok(Value::Float(f))
                } else {
                    Err(ColframeError::TypeConversionError(format!(
                        "'{}' is not a number",
                        s
                    )))
                }
            }
            Value::Null => Err(ColframeError::TypeConversionError(
                "missing value where a number was expected".to_string(),
            )),
        }
    }

    /// Interpret the value as a 64-bit float
    pub fn as_f64(&self) -> ColframeResult<f64> {
        match self.to_numeric()? {
            Value::Integer(i) => Ok(i as f64),
            Value::Float(f) => Ok(f),
            other => Err(ColframeError::TypeConversionError(format!(
                "'{}' is not a number",
                other
            ))),
        }
    }
}
