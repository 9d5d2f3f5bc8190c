//! Attribute values carried by nodes and edges.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Attribute key holding an edge's strength.
pub const WEIGHT: &str = "weight";

/// Attribute map of a node or edge (ordered, so iteration and serialization are stable).
pub type Attrs = BTreeMap<String, AttrValue>;

/// Closed set of scalar attribute values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl AttrValue {
    /// Numeric view; `None` for text and booleans.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Int(i) => Some(*i as f64),
            AttrValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Multiply a numeric value in place. Integers become floats.
    /// Returns false (and leaves the value untouched) for non-numeric values.
    pub fn scale(&mut self, factor: f64) -> bool {
        match self.as_f64() {
            Some(v) => {
                *self = AttrValue::Float(v * factor);
                true
            }
            None => false,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Bool(b) => write!(f, "{}", b),
            AttrValue::Int(i) => write!(f, "{}", i),
            AttrValue::Float(x) => write!(f, "{}", x),
            AttrValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        AttrValue::Bool(v)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Int(v)
    }
}

impl From<i32> for AttrValue {
    fn from(v: i32) -> Self {
        AttrValue::Int(v.into())
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Float(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::Text(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        AttrValue::Text(v)
    }
}

/// Build an attribute map holding only a weight.
pub fn weighted(weight: f64) -> Attrs {
    let mut attrs = Attrs::new();
    attrs.insert(WEIGHT.to_string(), AttrValue::Float(weight));
    attrs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_converts_ints_and_skips_text() {
        let mut i = AttrValue::Int(4);
        assert!(i.scale(0.5));
        assert_eq!(i, AttrValue::Float(2.0));

        let mut t = AttrValue::from("close");
        assert!(!t.scale(0.5));
        assert_eq!(t.as_str(), Some("close"));
    }

    #[test]
    fn untagged_json_keeps_integer_and_float_apart() {
        let attrs: Attrs =
            serde_json::from_str(r#"{"age": 31, "weight": 0.5, "name": "ann", "active": true}"#)
                .unwrap();
        assert_eq!(attrs["age"], AttrValue::Int(31));
        assert_eq!(attrs["weight"], AttrValue::Float(0.5));
        assert_eq!(attrs["name"].as_str(), Some("ann"));
        assert_eq!(attrs["active"].as_bool(), Some(true));
    }
}
