//! The value domain: what hands and floor tiles can hold.
//!
//! A value is a non-empty token of one of two disjoint shapes: a decimal
//! integer literal with an optional leading minus (`-17`, `0`, `42`), or a
//! single ASCII letter. The shape is the classification; nothing else is
//! stored. Emptiness is modelled as `Option<Value>` by the slots that hold
//! values, never by `Value` itself.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{HrmError, HrmResult};

/// Which shape a value has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Numeric,
    Alphabetic,
}

/// A legal cell or register content. Immutable once built.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Value(Box<str>);

impl Value {
    /// Validate `text` as a value.
    pub fn parse(text: &str) -> HrmResult<Self> {
        if classify(text).is_some() {
            Ok(Value(text.into()))
        } else {
            Err(HrmError::InvalidValue { text: text.to_string() })
        }
    }

    /// Render an integer as a decimal literal.
    pub fn number(n: i64) -> Self {
        Value(n.to_string().into_boxed_str())
    }

    /// A single-letter value. Returns `None` for anything but an ASCII letter.
    pub fn letter(c: char) -> Option<Self> {
        if c.is_ascii_alphabetic() {
            Some(Value(c.to_string().into_boxed_str()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn kind(&self) -> ValueKind {
        // Construction guarantees one of the two shapes.
        classify(&self.0).unwrap_or(ValueKind::Alphabetic)
    }

    pub fn is_numeric(&self) -> bool {
        self.kind() == ValueKind::Numeric
    }

    pub fn is_alphabetic(&self) -> bool {
        self.kind() == ValueKind::Alphabetic
    }

    /// The integer this value spells, if it is numeric.
    pub fn to_integer(&self) -> Option<i64> {
        if self.is_numeric() {
            self.0.parse().ok()
        } else {
            None
        }
    }

    /// The letter this value holds, if it is alphabetic.
    pub fn to_letter(&self) -> Option<char> {
        if self.is_alphabetic() {
            self.0.chars().next()
        } else {
            None
        }
    }

    /// True only for the exact zero literal `0`.
    pub fn is_zero_literal(&self) -> bool {
        &*self.0 == "0"
    }
}

/// Classify `text` by shape, or `None` if it is not a legal value.
fn classify(text: &str) -> Option<ValueKind> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => return Some(ValueKind::Alphabetic),
        (None, _) => return None,
        _ => {}
    }

    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Numeric tokens must fit the integer type arithmetic runs on.
    text.parse::<i64>().ok().map(|_| ValueKind::Numeric)
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &*self.0)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Value {
    type Err = HrmError;

    fn from_str(s: &str) -> HrmResult<Self> {
        Value::parse(s)
    }
}

impl TryFrom<String> for Value {
    type Error = HrmError;

    fn try_from(s: String) -> HrmResult<Self> {
        Value::parse(&s)
    }
}

impl From<Value> for String {
    fn from(v: Value) -> String {
        v.0.into_string()
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::number(n)
    }
}

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

/// Build an inbox from a character string, one value per non-whitespace
/// character: `"AB12"` becomes `A`, `B`, `1`, `2`.
pub fn inbox_from_chars(chars: &str) -> HrmResult<Vec<Value>> {
    chars
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| Value::parse(c.encode_utf8(&mut [0u8; 4])))
        .collect()
}

/// Build an inbox from already-tokenized values such as `["-4", "12", "A"]`.
pub fn inbox_from_tokens<I, S>(tokens: I) -> HrmResult<Vec<Value>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens.into_iter().map(|t| Value::parse(t.as_ref())).collect()
}
