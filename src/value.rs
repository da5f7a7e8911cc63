//! Typed field values.
//!
//! This module provides the [`Value`] enum holding the content of one member
//! field, together with [`DataType`] (which grammar alternative produced it)
//! and [`Rect`] for crop rectangles.
//!
//! Numbers that do not fit the native types keep an exact form instead of
//! failing the scan: ints and rectangle sides beyond `i64` become
//! [`BigInt`](num_bigint::BigInt)s, back references beyond `u64` become
//! [`BigUint`](num_bigint::BigUint)s, and float literals beyond the `f64`
//! range are kept as written.
//!
//! The scan is purely syntactic: a field the format means as a float but
//! written as `0` scans as [`Value::Int`], and a name written without quotes
//! scans as [`Value::Word`]. Use the lenient accessors ([`Value::as_f64`],
//! [`Value::as_str`]) when reading fields whose spelling varies.
//!
//! ## Examples
//!
//! ```rust
//! use pto_scan::{DataType, Rect, Value};
//!
//! let v = Value::Int(80);
//! assert_eq!(v.data_type(), DataType::Int);
//! assert_eq!(v.as_f64(), Some(80.0));
//!
//! let crop = Value::Rectangle(Rect::new(10, 20, 30, 40));
//! assert_eq!(crop.to_string(), "10,20,30,40");
//!
//! assert_eq!(Value::Float(0.0).to_string(), "0.0");
//! assert_eq!(Value::String("a,b".into()).to_string(), "\"a,b\"");
//! ```

use num_bigint::{BigInt, BigUint};
use serde::{Serialize, Serializer};
use std::fmt;

/// The syntactic type of a field, named after the grammar alternative that
/// matched its text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DataType {
    Float,
    Int,
    Rectangle,
    Backref,
    String,
    Word,
}

impl DataType {
    /// One-letter code for this data type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pto_scan::DataType;
    ///
    /// assert_eq!(DataType::Backref.code(), 'b');
    /// assert_eq!(DataType::Word.code(), 'w');
    /// ```
    #[must_use]
    pub const fn code(&self) -> char {
        match self {
            DataType::Float => 'f',
            DataType::Int => 'i',
            DataType::Rectangle => 'r',
            DataType::Backref => 'b',
            DataType::String => 's',
            DataType::Word => 'w',
        }
    }

    /// Human-readable name, as used by [`Document::walk`](crate::Document::walk).
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            DataType::Float => "float",
            DataType::Int => "int",
            DataType::Rectangle => "rectangle",
            DataType::Backref => "back reference",
            DataType::String => "string",
            DataType::Word => "word",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A rectangle in left, right, top, bottom order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub left: i64,
    pub right: i64,
    pub top: i64,
    pub bottom: i64,
}

impl Rect {
    #[must_use]
    pub const fn new(left: i64, right: i64, top: i64, bottom: i64) -> Self {
        Rect {
            left,
            right,
            top,
            bottom,
        }
    }

    /// The rectangle as an `(L, R, T, B)` tuple.
    #[must_use]
    pub const fn as_tuple(&self) -> (i64, i64, i64, i64) {
        (self.left, self.right, self.top, self.bottom)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.left, self.right, self.top, self.bottom)
    }
}

impl From<(i64, i64, i64, i64)> for Rect {
    fn from((left, right, top, bottom): (i64, i64, i64, i64)) -> Self {
        Rect::new(left, right, top, bottom)
    }
}

/// A rectangle with at least one side outside the `i64` range.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct BigRect {
    pub left: BigInt,
    pub right: BigInt,
    pub top: BigInt,
    pub bottom: BigInt,
}

impl BigRect {
    #[must_use]
    pub fn new(left: BigInt, right: BigInt, top: BigInt, bottom: BigInt) -> Self {
        BigRect {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Narrows to a [`Rect`] when every side fits `i64`.
    #[must_use]
    pub fn to_rect(&self) -> Option<Rect> {
        let side = |v: &BigInt| i64::try_from(v).ok();
        Some(Rect::new(
            side(&self.left)?,
            side(&self.right)?,
            side(&self.top)?,
            side(&self.bottom)?,
        ))
    }
}

impl fmt::Display for BigRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.left, self.right, self.top, self.bottom)
    }
}

impl From<Rect> for BigRect {
    fn from(r: Rect) -> Self {
        BigRect::new(r.left.into(), r.right.into(), r.top.into(), r.bottom.into())
    }
}

/// The typed content of a member field.
///
/// `Display` produces the canonical field text without qualifier or
/// separator: numbers in default form (floats always keep a decimal point),
/// rectangles as `L,R,T,B`, back references as the bare index, strings
/// re-quoted and words verbatim.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Float(f64),
    /// Float literal outside the `f64` range, kept as written.
    BigFloat(String),
    Int(i64),
    BigInt(BigInt),
    Rectangle(Rect),
    BigRectangle(BigRect),
    /// Index of the image whose value is reused.
    Backref(u64),
    BigBackref(BigUint),
    /// Unquoted string content. Escapes are kept as written.
    String(String),
    Word(String),
}

impl Value {
    /// Returns the data type matching this variant.
    #[inline]
    #[must_use]
    pub const fn data_type(&self) -> DataType {
        match self {
            Value::Float(_) | Value::BigFloat(_) => DataType::Float,
            Value::Int(_) | Value::BigInt(_) => DataType::Int,
            Value::Rectangle(_) | Value::BigRectangle(_) => DataType::Rectangle,
            Value::Backref(_) | Value::BigBackref(_) => DataType::Backref,
            Value::String(_) => DataType::String,
            Value::Word(_) => DataType::Word,
        }
    }

    /// Returns `true` for floats and ints.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(
            self,
            Value::Float(_) | Value::BigFloat(_) | Value::Int(_) | Value::BigInt(_)
        )
    }

    /// Returns `true` for numbers, rectangles and back references that did
    /// not fit the native types.
    #[inline]
    #[must_use]
    pub const fn is_big(&self) -> bool {
        matches!(
            self,
            Value::BigFloat(_) | Value::BigInt(_) | Value::BigRectangle(_) | Value::BigBackref(_)
        )
    }

    /// Returns `true` for back references.
    #[inline]
    #[must_use]
    pub const fn is_backref(&self) -> bool {
        matches!(self, Value::Backref(_) | Value::BigBackref(_))
    }

    /// If the value is an int, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// If the value is an int too large for `i64`, returns it.
    #[inline]
    #[must_use]
    pub fn as_bigint(&self) -> Option<&BigInt> {
        match self {
            Value::BigInt(bi) => Some(bi),
            _ => None,
        }
    }

    /// Returns floats as-is and widens ints. Float literals beyond the `f64`
    /// range give an infinity. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pto_scan::Value;
    ///
    /// assert_eq!(Value::Float(1.5).as_f64(), Some(1.5));
    /// assert_eq!(Value::Int(2).as_f64(), Some(2.0));
    /// assert_eq!(Value::Backref(2).as_f64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::BigFloat(text) => text.parse().ok(),
            Value::Int(i) => Some(*i as f64),
            Value::BigInt(bi) => bi.to_string().parse().ok(),
            _ => None,
        }
    }

    /// Returns the text of strings and words. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) | Value::Word(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is a rectangle, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_rect(&self) -> Option<Rect> {
        match self {
            Value::Rectangle(r) => Some(*r),
            _ => None,
        }
    }

    /// If the value is a back reference, returns the referenced index.
    #[inline]
    #[must_use]
    pub fn as_backref(&self) -> Option<u64> {
        match self {
            Value::Backref(i) => Some(*i),
            _ => None,
        }
    }
}

/// Shortest round-trip decimal, always with a decimal point so the text
/// scans back as a float.
pub(crate) fn format_float(f: f64) -> String {
    let text = f.to_string();
    if f.is_finite() && !text.contains('.') {
        format!("{}.0", text)
    } else {
        text
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Float(fl) => f.write_str(&format_float(*fl)),
            Value::BigFloat(text) => f.write_str(text),
            Value::Int(i) => write!(f, "{}", i),
            Value::BigInt(bi) => write!(f, "{}", bi),
            Value::Rectangle(r) => write!(f, "{}", r),
            Value::BigRectangle(r) => write!(f, "{}", r),
            Value::Backref(i) => write!(f, "{}", i),
            Value::BigBackref(i) => write!(f, "{}", i),
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::Word(w) => f.write_str(w),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Rectangle(r) => {
                use serde::ser::SerializeTuple;
                let mut tuple = serializer.serialize_tuple(4)?;
                tuple.serialize_element(&r.left)?;
                tuple.serialize_element(&r.right)?;
                tuple.serialize_element(&r.top)?;
                tuple.serialize_element(&r.bottom)?;
                tuple.end()
            }
            Value::BigRectangle(r) => {
                use serde::ser::SerializeTuple;
                let mut tuple = serializer.serialize_tuple(4)?;
                for side in [&r.left, &r.right, &r.top, &r.bottom] {
                    tuple.serialize_element(&side.to_string())?;
                }
                tuple.end()
            }
            Value::Backref(i) => serializer.serialize_u64(*i),
            Value::BigInt(bi) => serializer.serialize_str(&bi.to_string()),
            Value::BigBackref(i) => serializer.serialize_str(&i.to_string()),
            Value::BigFloat(text) => serializer.serialize_str(text),
            Value::String(s) | Value::Word(s) => serializer.serialize_str(s),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Value::BigInt(value)
    }
}

impl From<Rect> for Value {
    fn from(value: Rect) -> Self {
        Value::Rectangle(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_formatting_keeps_decimal_point() {
        assert_eq!(format_float(0.0), "0.0");
        assert_eq!(format_float(-3.0), "-3.0");
        assert_eq!(format_float(1.5), "1.5");
        assert_eq!(format_float(0.25), "0.25");
        assert_eq!(format_float(f64::INFINITY), "inf");
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Int(-7).to_string(), "-7");
        assert_eq!(Value::Backref(3).to_string(), "3");
        assert_eq!(Value::Word("PTBlender".into()).to_string(), "PTBlender");
        assert_eq!(
            Value::Rectangle(Rect::new(-1, 2, -3, 4)).to_string(),
            "-1,2,-3,4"
        );
        assert_eq!(
            Value::String("IMG_0001.JPG".into()).to_string(),
            "\"IMG_0001.JPG\""
        );
    }

    #[test]
    fn test_data_types() {
        assert_eq!(Value::Float(1.0).data_type(), DataType::Float);
        assert_eq!(Value::Word(String::new()).data_type().code(), 'w');
        assert_eq!(DataType::Backref.to_string(), "back reference");
    }

    #[test]
    fn test_accessors() {
        let word = Value::Word("LZW".into());
        assert_eq!(word.as_str(), Some("LZW"));
        assert_eq!(word.as_i64(), None);
        assert!(!word.is_number());

        let crop = Value::from(Rect::from((1, 2, 3, 4)));
        assert_eq!(crop.as_rect().map(|r| r.as_tuple()), Some((1, 2, 3, 4)));
        assert_eq!(Value::Backref(0).as_backref(), Some(0));
        assert!(Value::Backref(0).is_backref());
    }

    #[test]
    fn test_big_values_keep_their_type() {
        let big: BigInt = "-123456789012345678901234567890".parse().unwrap();
        let v = Value::from(big.clone());
        assert_eq!(v.data_type(), DataType::Int);
        assert!(v.is_number() && v.is_big());
        assert_eq!(v.as_bigint(), Some(&big));
        assert_eq!(v.as_i64(), None);
        assert_eq!(v.to_string(), "-123456789012345678901234567890");

        let r = BigRect::new(big.clone(), 2.into(), 3.into(), 4.into());
        assert_eq!(r.to_rect(), None);
        assert_eq!(
            BigRect::from(Rect::new(1, 2, 3, 4)).to_rect(),
            Some(Rect::new(1, 2, 3, 4))
        );
        let crop = Value::BigRectangle(r);
        assert_eq!(crop.data_type(), DataType::Rectangle);
        assert_eq!(crop.as_rect(), None);

        let link = Value::BigBackref("18446744073709551616".parse().unwrap());
        assert!(link.is_backref());
        assert_eq!(link.as_backref(), None);
        assert_eq!(link.data_type(), DataType::Backref);

        let huge = format!("1{}.5", "0".repeat(400));
        let v = Value::BigFloat(huge.clone());
        assert_eq!(v.data_type(), DataType::Float);
        assert_eq!(v.to_string(), huge);
        assert_eq!(v.as_f64(), Some(f64::INFINITY));
    }

    #[test]
    fn test_big_values_serialize_as_strings() {
        let v = Value::BigInt("99999999999999999999".parse().unwrap());
        assert_eq!(serde_json::to_value(&v).unwrap(), "99999999999999999999");

        let crop = Value::BigRectangle(BigRect::new(
            "99999999999999999999".parse().unwrap(),
            0.into(),
            (-1).into(),
            1.into(),
        ));
        assert_eq!(
            serde_json::to_value(&crop).unwrap(),
            serde_json::json!(["99999999999999999999", "0", "-1", "1"])
        );
    }
}
