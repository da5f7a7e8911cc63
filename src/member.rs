//! Member fields and the member grammar.
//!
//! A structured line carries zero or more members, each a qualifier glued to
//! a value: `w800`, `n"PA030369.JPG"`, `Ra0.25`, `v=0`, `S10,20,30,40`.
//! The value text is classified by trying these alternatives in order and
//! taking the first that matches:
//!
//! 1. float: optional sign, then `digits.digits?` or `.digits`
//! 2. rectangle: four signed integers `L,R,T,B`
//! 3. int: optional sign, digits
//! 4. back reference: `=` followed by digits
//! 5. string: double-quoted, `\"` allowed inside
//! 6. word: any run of non-space characters
//!
//! Qualifiers are a single letter, except for the enumerated multi-letter
//! prefixes in [`MULTI_LETTER_QUALIFIERS`].
//!
//! ## Examples
//!
//! ```rust
//! use pto_scan::{from_str, DataType, Value};
//!
//! let doc = from_str("i v=3 S10,20,30,40 n\"a,b\"\n").unwrap();
//! let line = &doc.lines()[0];
//!
//! let v = line.member("v").unwrap();
//! assert_eq!(v.value(), &Value::Backref(3));
//! assert_eq!(v.separator().as_str(), "=");
//!
//! assert_eq!(line.member("S").unwrap().data_type(), DataType::Rectangle);
//! assert_eq!(line.member("n").unwrap().value().as_str(), Some("a,b"));
//! ```

use crate::value::{BigRect, Rect};
use crate::{Error, Result, Value};
use num_bigint::{BigInt, BigUint};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::fmt;

/// Multi-letter qualifier prefixes, tried before the single-letter fallback.
///
/// The list covers the prefixes known to occur in the wild. Add a pattern
/// here when a tool introduces a new one.
pub const MULTI_LETTER_QUALIFIERS: &[&str] = &[
    "R[a-e]",         // Ra..Re
    "V[a-dxym]",      // Va..Vd, Vx, Vy, Vm
    "T[xyzrs][XYZ]*", // Tx, TrX, TsXYZ, ...
    "E[rb]",          // Er, Eb
    "Eev",
];

pub(crate) const FLOAT: &str = r"(?P<float>[+-]?(?:[0-9]+\.[0-9]*|\.[0-9]+))";
pub(crate) const RECTANGLE: &str = r"(?P<rectangle>(?P<left>[+-]?[0-9]+),(?P<right>[+-]?[0-9]+),(?P<top>[+-]?[0-9]+),(?P<bottom>[+-]?[0-9]+))";
pub(crate) const INT: &str = r"(?P<int>[+-]?[0-9]+)";
pub(crate) const BACKREF: &str = r"(?P<backref>=[0-9]+)";
pub(crate) const STRING: &str = r#"(?P<string>"(?:\\"|[^"])*")"#;
pub(crate) const WORD: &str = r"(?P<word>\S+)";

static MEMBER_REGEX: Lazy<Regex> = Lazy::new(|| {
    let qualifier = format!("{}|[A-Za-z]", MULTI_LETTER_QUALIFIERS.join("|"));
    Regex::new(&format!(
        r"\s*(?P<qualifier>{})(?P<text>{}|{}|{}|{}|{}|{})",
        qualifier, FLOAT, RECTANGLE, INT, BACKREF, STRING, WORD
    ))
    .expect("member grammar is a valid regex")
});

/// Text between a member's qualifier and its value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Separator {
    #[default]
    None,
    Equals,
}

impl Separator {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Separator::None => "",
            Separator::Equals => "=",
        }
    }
}

/// One field of a structured line.
///
/// The value may be edited in place; [`text`](Member::text) keeps the token
/// as it was scanned, while rendering always uses the current value.
#[derive(Clone, Debug, PartialEq)]
pub struct Member {
    qualifier: String,
    value: Value,
    text: String,
    separator: Separator,
}

impl Member {
    /// Creates a member from a qualifier and a value. Back references get
    /// the `=` separator.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pto_scan::{Member, Value};
    ///
    /// assert_eq!(Member::new("v", Value::Backref(0)).to_string(), "v=0");
    /// assert_eq!(Member::new("w", Value::Int(800)).to_string(), "w800");
    /// ```
    #[must_use]
    pub fn new(qualifier: &str, value: Value) -> Self {
        let separator = if value.is_backref() {
            Separator::Equals
        } else {
            Separator::None
        };
        Member::with_separator(qualifier, separator, value)
    }

    /// Creates a member with an explicit separator.
    #[must_use]
    pub fn with_separator(qualifier: &str, separator: Separator, value: Value) -> Self {
        let text = if value.is_backref() {
            format!("={}", value)
        } else {
            value.to_string()
        };
        Member {
            qualifier: qualifier.to_string(),
            value,
            text,
            separator,
        }
    }

    pub(crate) fn scanned(
        qualifier: &str,
        separator: Separator,
        value: Value,
        text: &str,
    ) -> Self {
        Member {
            qualifier: qualifier.to_string(),
            value,
            text: text.to_string(),
            separator,
        }
    }

    /// The field name, e.g. `n`, `Ra` or `TrX`. Empty for untagged fields.
    #[inline]
    #[must_use]
    pub fn qualifier(&self) -> &str {
        &self.qualifier
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    #[inline]
    pub fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    /// Replaces the value. Switching to or from a back reference also
    /// switches the `=` separator, so the rendered text scans back to the
    /// same type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pto_scan::{Member, Value};
    ///
    /// let mut v = Member::new("v", Value::Int(80));
    /// v.set_value(Value::Backref(0));
    /// assert_eq!(v.to_string(), "v=0");
    /// v.set_value(Value::Float(75.5));
    /// assert_eq!(v.to_string(), "v75.5");
    /// ```
    pub fn set_value(&mut self, value: Value) {
        if value.is_backref() {
            self.separator = Separator::Equals;
        } else if self.value.is_backref() {
            self.separator = Separator::None;
        }
        self.value = value;
    }

    /// The value text exactly as scanned, quotes and `=` included.
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    #[must_use]
    pub fn separator(&self) -> Separator {
        self.separator
    }

    #[inline]
    #[must_use]
    pub fn data_type(&self) -> crate::DataType {
        self.value.data_type()
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.qualifier, self.separator.as_str(), self.value)
    }
}

/// Scans the members of a generic data line, starting after the header.
pub(crate) fn scan_members(source: &str, start: usize, line: usize) -> Result<Vec<Member>> {
    scan_with(&MEMBER_REGEX, source, start, line, None)
}

/// Drives `grammar` over `source[start..]`, left to right, until it stops
/// matching. A fixed separator overrides the one implied by the value.
pub(crate) fn scan_with(
    grammar: &Regex,
    source: &str,
    start: usize,
    line: usize,
    fixed_separator: Option<Separator>,
) -> Result<Vec<Member>> {
    let body = source.get(start..).unwrap_or("");
    let mut members = Vec::new();

    for caps in grammar.captures_iter(body) {
        let qualifier = caps.name("qualifier").map_or("", |m| m.as_str());
        let text = caps.name("text").map_or("", |m| m.as_str());
        let (value, separator) = classify(&caps, line, source)?;
        members.push(Member::scanned(
            qualifier,
            fixed_separator.unwrap_or(separator),
            value,
            text,
        ));
    }

    Ok(members)
}

/// Turns the value alternative that matched into a typed value.
///
/// Numbers that overflow the native types fall back to their big forms, so
/// a token the grammar accepts never fails the scan.
fn classify(caps: &Captures<'_>, line: usize, source: &str) -> Result<(Value, Separator)> {
    let text = caps.name("text").map_or("", |m| m.as_str());
    let fault = || Error::structural(line, text, source);

    if let Some(m) = caps.name("float") {
        let f = m.as_str().parse::<f64>().map_err(|_| fault())?;
        let value = if f.is_finite() {
            Value::Float(f)
        } else {
            Value::BigFloat(m.as_str().to_string())
        };
        return Ok((value, Separator::None));
    }
    if caps.name("rectangle").is_some() {
        let sides: Vec<&str> = ["left", "right", "top", "bottom"]
            .iter()
            .map(|name| caps.name(name).map_or("", |m| m.as_str()))
            .collect();
        let small: Option<Vec<i64>> = sides.iter().map(|s| s.parse().ok()).collect();
        let value = match small.as_deref() {
            Some(&[left, right, top, bottom]) => {
                Value::Rectangle(Rect::new(left, right, top, bottom))
            }
            _ => {
                let big = sides
                    .iter()
                    .map(|s| s.parse::<BigInt>().map_err(|_| fault()))
                    .collect::<Result<Vec<_>>>()?;
                let [left, right, top, bottom]: [BigInt; 4] =
                    big.try_into().map_err(|_| fault())?;
                Value::BigRectangle(BigRect::new(left, right, top, bottom))
            }
        };
        return Ok((value, Separator::None));
    }
    if let Some(m) = caps.name("int") {
        let value = match m.as_str().parse::<i64>() {
            Ok(i) => Value::Int(i),
            Err(_) => Value::BigInt(m.as_str().parse().map_err(|_| fault())?),
        };
        return Ok((value, Separator::None));
    }
    if let Some(m) = caps.name("backref") {
        let digits = &m.as_str()[1..];
        let value = match digits.parse::<u64>() {
            Ok(i) => Value::Backref(i),
            Err(_) => Value::BigBackref(digits.parse::<BigUint>().map_err(|_| fault())?),
        };
        return Ok((value, Separator::Equals));
    }
    if let Some(m) = caps.name("string") {
        let quoted = m.as_str();
        let inner = &quoted[1..quoted.len() - 1];
        return Ok((Value::String(inner.to_string()), Separator::None));
    }
    if let Some(m) = caps.name("word") {
        return Ok((Value::Word(m.as_str().to_string()), Separator::None));
    }

    Err(fault())
}
