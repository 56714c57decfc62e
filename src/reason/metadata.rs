//! Metadata attached to reasons.

use std::collections::BTreeMap;
use std::fmt;

/// Metadata map carried by every reason. Keys are unique; later writes win.
pub type Metadata = BTreeMap<String, MetadataValue>;

/// A metadata value, compared by value.
///
/// # Examples
///
/// ```
/// use causeway::MetadataValue;
///
/// assert_eq!(MetadataValue::from(42), MetadataValue::Int(42));
/// assert_eq!(MetadataValue::from("id"), MetadataValue::Text("id".to_string()));
/// assert_eq!(MetadataValue::from(true).to_string(), "true");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum MetadataValue {
    /// Boolean flag
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Unsigned integer too large for `Int`
    UInt(u64),
    /// Floating point number
    Float(f64),
    /// Free text
    Text(String),
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::Bool(v) => write!(f, "{}", v),
            MetadataValue::Int(v) => write!(f, "{}", v),
            MetadataValue::UInt(v) => write!(f, "{}", v),
            MetadataValue::Float(v) => write!(f, "{}", v),
            MetadataValue::Text(v) => f.write_str(v),
        }
    }
}

macro_rules! impl_from_lossless {
    ($variant:ident, $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for MetadataValue {
                fn from(value: $source) -> Self {
                    MetadataValue::$variant(<$target>::from(value))
                }
            }
        )+
    };
}

impl_from_lossless!(Int, i64: i8, i16, i32, i64);
impl_from_lossless!(Float, f64: f32, f64);

impl From<u8> for MetadataValue {
    fn from(value: u8) -> Self {
        MetadataValue::Int(i64::from(value))
    }
}

impl From<u16> for MetadataValue {
    fn from(value: u16) -> Self {
        MetadataValue::Int(i64::from(value))
    }
}

impl From<u32> for MetadataValue {
    fn from(value: u32) -> Self {
        MetadataValue::Int(i64::from(value))
    }
}

impl From<u64> for MetadataValue {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(v) => MetadataValue::Int(v),
            Err(_) => MetadataValue::UInt(value),
        }
    }
}

impl From<usize> for MetadataValue {
    fn from(value: usize) -> Self {
        MetadataValue::from(value as u64)
    }
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        MetadataValue::Bool(value)
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        MetadataValue::Text(value.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        MetadataValue::Text(value)
    }
}

/// Whether `metadata` holds `key` with a value equal to `value`.
pub(crate) fn metadata_matches(metadata: &Metadata, key: &str, value: &MetadataValue) -> bool {
    metadata.get(key) == Some(value)
}
