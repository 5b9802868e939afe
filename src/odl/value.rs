//! Value classification
//!
//! Infers a typed representation for the raw right-hand side of a `KEY = VALUE` statement.
//! Shapes are tried in order and the first match wins:
//!
//! 1. number (integer or float, with sign, leading zeros and exponent)
//! 2. quoted string (`"..."` or `'...'`, quotes stripped, no escapes)
//! 3. date/time literal (`YYYY-MM-DD` or `MM-DD-YYYY`, optional time of day)
//! 4. anything else, kept as the raw token
//!
//! Classification never fails.

use crate::odl::document::Document;
use once_cell::sync::Lazy;
use regex::{Regex, RegexSet};
use serde::ser::{Serialize, Serializer};

/// sign, leading zeros, integer part, decimal part, exponent
static NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<sign>[+\-])?(?P<zeros>0*)(?P<integer>[1-9][0-9]*)?(?P<decimal>\.[0-9]*)?(?P<power>[eE][+\-]?[0-9]+)?$",
    )
    .unwrap()
});

static QUOTED_REGEXES: Lazy<[Regex; 2]> = Lazy::new(|| {
    [
        Regex::new(r#"^"(?P<content>[^"]*)"$"#).unwrap(),
        Regex::new(r"^'(?P<content>[^']*)'$").unwrap(),
    ]
});

/// Matches e.g. 2020-10-29T11:30:51.000000Z, 2019-05-14, 10-29-2020T11:30, 05-14-2019
static DATETIME_REGEXES: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"^([0-9]{4}-[0-9]{2}-[0-9]{2})(T|-)?([0-9]{2}(:[0-9]{2}){0,2}(\.[0-9]*)?(Z)?)?$",
        r"^([0-9]{2}-[0-9]{2}-[0-9]{4})(T|-)?([0-9]{2}(:[0-9]{2}){0,2}(\.[0-9]*)?(Z)?)?$",
    ])
    .unwrap()
});

/// A typed document value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Wide enough for any unsigned 64-bit quantity without loss
    Integer(i128),
    Float(f64),
    /// Quoted string with the quotes stripped, or an unrecognized raw token
    String(String),
    /// Token recognized as a date/time shape, kept verbatim
    DateTime(String),
    /// Nested document produced by a group
    Group(Document),
}

impl Value {
    pub fn as_integer(&self) -> Option<i128> {
        match self {
            Value::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// String content of `String` and `DateTime` values
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) | Value::DateTime(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&Document> {
        match self {
            Value::Group(document) => Some(document),
            _ => None,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Value::Group(_))
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Integer(value) => serializer.serialize_i128(*value),
            Value::Float(value) => serializer.serialize_f64(*value),
            Value::String(value) | Value::DateTime(value) => serializer.serialize_str(value),
            Value::Group(document) => document.serialize(serializer),
        }
    }
}

/// Classify one raw value token.
pub fn classify(token: &str) -> Value {
    if token.is_empty() {
        return Value::String(String::new());
    }

    classify_number(token)
        .or_else(|| classify_quoted(token))
        .or_else(|| classify_datetime(token))
        .unwrap_or_else(|| Value::String(token.to_string()))
}

/// Numeric shapes. A shape whose digits do not form a valid number (`.`, `e5`)
/// is not a number.
pub fn classify_number(token: &str) -> Option<Value> {
    let captures = NUMBER_REGEX.captures(token)?;
    let part = |name: &str| captures.name(name).map_or("", |m| m.as_str());

    let sign = part("sign");
    let zeros = part("zeros");
    let integer = part("integer");
    let decimal = part("decimal");
    let power = part("power");

    if !decimal.is_empty() || !power.is_empty() {
        let integer = if integer.is_empty() && !zeros.is_empty() {
            "0"
        } else {
            integer
        };
        return format!("{sign}{integer}{decimal}{power}")
            .parse::<f64>()
            .ok()
            .map(Value::Float);
    }

    if integer.is_empty() {
        // only a sign and/or zeros remain
        return Some(Value::Integer(0));
    }

    // beyond i128 there is no exact integer left to build
    let digits = format!("{sign}{integer}");
    match digits.parse::<i128>() {
        Ok(value) => Some(Value::Integer(value)),
        Err(_) => digits.parse::<f64>().ok().map(Value::Float),
    }
}

pub fn classify_quoted(token: &str) -> Option<Value> {
    QUOTED_REGEXES
        .iter()
        .find_map(|regex| regex.captures(token))
        .and_then(|captures| captures.name("content"))
        .map(|content| Value::String(content.as_str().to_string()))
}

pub fn classify_datetime(token: &str) -> Option<Value> {
    DATETIME_REGEXES
        .is_match(token)
        .then(|| Value::DateTime(token.to_string()))
}
