//! # pto_scan
//!
//! A scanner and serializer for panorama-stitching project scripts (`.pto`
//! files).
//!
//! ## What is a project script?
//!
//! A project script is a line-oriented text file. Each data line starts with
//! a one-letter header (`p` panorama, `i` image, `c` control point, ...)
//! followed by tagged fields such as `w800` or `n"IMG_0001.JPG"`. Tools embed
//! their own dialects inside comment lines (`#-hugin`, `#hugin_xxx`,
//! `#-imgfile`). Everything after a line starting with `*` is trailer.
//!
//! ## Key Features
//!
//! - **Typed fields**: every field is classified as float, int, rectangle,
//!   back reference, string or word by an ordered grammar
//! - **Vendor dialects**: the three comment-embedded extension lines are
//!   scanned into the same line shape as data lines
//! - **Lossless**: comments, blanks and unknown lines are kept verbatim and
//!   can be written back unchanged
//! - **Editable**: fields can be changed in place before rendering
//!
//! ## Quick Start
//!
//! ```rust
//! use pto_scan::{from_str, to_string, Value};
//!
//! let script = "\
//! p f2 w3000 h1500 v360 n\"TIFF_m c:LZW\"
//! i w800 h600 f0 n\"PA030369.JPG\" y0 p0 r0 v80
//! ";
//! let mut doc = from_str(script).unwrap();
//!
//! let image = doc.lines_with_header("i")[0];
//! assert_eq!(image.value("n"), Some(&Value::String("PA030369.JPG".into())));
//! assert_eq!(image.value("v"), Some(&Value::Int(80)));
//!
//! // Unedited canonical input renders byte-for-byte.
//! assert_eq!(to_string(&doc).unwrap(), script);
//!
//! doc.lines_mut()[1].member_mut("y").unwrap().set_value(Value::Float(12.5));
//! assert!(to_string(&doc).unwrap().contains(" y12.5 "));
//! ```
//!
//! ## Strictness
//!
//! By default any ASCII letter starts a data line. [`ScanOptions::strict`]
//! limits data lines to the standard headers; other lines are kept opaque.
//!
//! ```rust
//! use pto_scan::{from_str_with_options, LineKind, ScanOptions};
//!
//! let doc = from_str_with_options("q a1\ni w1\n", ScanOptions::strict()).unwrap();
//! assert_eq!(doc.lines()[0].kind(), LineKind::Opaque);
//! assert_eq!(doc.lines()[1].kind(), LineKind::Generic);
//! ```
//!
//! ## Reading
//!
//! Input is read completely before scanning. Scripts are small, and the
//! single forward pass needs nothing else.

pub mod document;
pub mod error;
pub mod extension;
pub mod index;
pub mod line;
pub mod member;
pub mod options;
pub mod project;
pub mod scan;
pub mod ser;
pub mod value;

pub use document::Document;
pub use error::{Error, Result};
pub use index::{FieldSlots, HeaderIndex};
pub use line::{Line, LineKind};
pub use member::{Member, Separator};
pub use options::{HeaderSet, RenderOptions, ScanOptions};
pub use project::{image_records, ImageRecord, ProjectDirectory};
pub use ser::Serializer;
pub use value::{BigRect, DataType, Rect, Value};

use std::io;
use std::path::Path;

/// Render a document to a string, opaque lines included.
///
/// # Examples
///
/// ```rust
/// use pto_scan::{from_str, to_string};
///
/// let doc = from_str("# header\np w100 h50\n").unwrap();
/// assert_eq!(to_string(&doc).unwrap(), "# header\np w100 h50\n");
/// ```
///
/// # Errors
///
/// Rendering into memory does not fail; the `Result` matches the writer API.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string(doc: &Document) -> Result<String> {
    to_string_with_options(doc, RenderOptions::default())
}

/// Render a document to a string with custom options.
///
/// # Examples
///
/// ```rust
/// use pto_scan::{from_str, to_string_with_options, RenderOptions};
///
/// let doc = from_str("# header\n\np w100 h50\n").unwrap();
/// let text = to_string_with_options(&doc, RenderOptions::content_only()).unwrap();
/// assert_eq!(text, "p w100 h50\n");
/// ```
///
/// # Errors
///
/// Rendering into memory does not fail; the `Result` matches the writer API.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options(doc: &Document, options: RenderOptions) -> Result<String> {
    let mut serializer = Serializer::new(options);
    serializer.serialize_document(doc);
    Ok(serializer.into_inner())
}

/// Render a document to a writer, opaque lines included.
///
/// # Errors
///
/// Returns an I/O error if writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W>(writer: W, doc: &Document) -> Result<()>
where
    W: io::Write,
{
    to_writer_with_options(writer, doc, RenderOptions::default())
}

/// Render a document to a writer with custom options.
///
/// # Examples
///
/// ```rust
/// use pto_scan::{from_str, to_writer_with_options, RenderOptions};
///
/// let doc = from_str("# note\ni w1\n").unwrap();
/// let mut buffer = Vec::new();
/// to_writer_with_options(&mut buffer, &doc, RenderOptions::content_only()).unwrap();
/// assert_eq!(buffer, b"i w1\n");
/// ```
///
/// # Errors
///
/// Returns an I/O error if writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W>(mut writer: W, doc: &Document, options: RenderOptions) -> Result<()>
where
    W: io::Write,
{
    let text = to_string_with_options(doc, options)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Scan script text with default options.
///
/// # Examples
///
/// ```rust
/// use pto_scan::{from_str, DataType};
///
/// let doc = from_str("#hugin_blender PTBlender\n").unwrap();
/// let line = &doc.lines()[0];
/// assert_eq!(line.header(), "#hugin_blender");
/// let members = line.members().unwrap();
/// assert_eq!(members.len(), 1);
/// assert_eq!(members[0].data_type(), DataType::Word);
/// assert_eq!(members[0].value().as_str(), Some("PTBlender"));
/// ```
///
/// # Errors
///
/// Returns a structural error if a field cannot be typed. No
/// partial document is returned.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(s: &str) -> Result<Document> {
    Document::from_str(s)
}

/// Scan script text with custom options.
///
/// # Errors
///
/// Returns a structural error if a field cannot be typed.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options(s: &str, options: ScanOptions) -> Result<Document> {
    Document::from_str_with_options(s, options)
}

/// Read a reader to its end and scan the text with default options.
///
/// # Examples
///
/// ```rust
/// use pto_scan::from_reader;
/// use std::io::Cursor;
///
/// let doc = from_reader(Cursor::new(b"p w100\ni w1\n")).unwrap();
/// assert_eq!(doc.len(), 2);
/// ```
///
/// # Errors
///
/// Returns an I/O error if reading fails or the text is not UTF-8, and a
/// structural error if a field cannot be typed.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(reader: R) -> Result<Document>
where
    R: io::Read,
{
    Document::from_reader(reader, ScanOptions::default())
}

/// Scan UTF-8 bytes with default options.
///
/// # Errors
///
/// Returns an I/O error if the bytes are not UTF-8.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(v: &[u8]) -> Result<Document> {
    Document::try_from(v)
}

/// Open and scan a file with default options.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Document> {
    Document::open(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = "\
# hugin project file
#hugin_ptoversion 2
p f2 w3000 h1500 v360 E0 R0 n\"TIFF_m c:LZW r:CROP\"
m i0

# image lines
#-hugin cropFactor=1
i w2816 h2112 f0 v80 Ra0 Rb0 Rc0 Rd0 Re0 Eev0 Er1 Eb1 r0 p0 y0 TrX0 TrY0 TrZ0 j0 a0 b0 c0 d0 e0 g0 t0 Va1 Vb0 Vc0 Vd0 Vx0 Vy0 Vm5 n\"a.jpg\"
#-hugin cropFactor=1
i w2816 h2112 f0 v=0 Ra=0 Rb=0 Rc=0 Rd=0 Re=0 Eev0 Er1 Eb1 r0 p0 y45.5 TrX0 TrY0 TrZ0 j0 a=0 b=0 c=0 d0 e0 g0 t0 Va=0 Vb=0 Vc=0 Vd=0 Vx=0 Vy=0 Vm5 n\"b.jpg\"

c n0 N1 x10.5 y20 X30 Y40.25 t0
";

    #[test]
    fn test_round_trip() {
        let doc = from_str(SCRIPT).unwrap();
        assert_eq!(to_string(&doc).unwrap(), SCRIPT);
    }

    #[test]
    fn test_round_trip_through_bytes() {
        let doc = from_slice(SCRIPT.as_bytes()).unwrap();
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &doc).unwrap();
        assert_eq!(buffer, SCRIPT.as_bytes());
    }

    #[test]
    fn test_multi_letter_qualifiers() {
        let doc = from_str(SCRIPT).unwrap();
        let image = doc.lines_with_header("i")[1];
        assert_eq!(image.value("Ra"), Some(&Value::Backref(0)));
        assert_eq!(image.value("TrX"), Some(&Value::Int(0)));
        assert_eq!(image.value("Eev"), Some(&Value::Int(0)));
        assert_eq!(image.value("Vm"), Some(&Value::Int(5)));
        assert_eq!(image.value("y"), Some(&Value::Float(45.5)));
        assert_eq!(image.member("v").map(Member::separator), Some(Separator::Equals));
    }

    #[test]
    fn test_content_only() {
        let doc = from_str(SCRIPT).unwrap();
        let text = to_string_with_options(&doc, RenderOptions::content_only()).unwrap();
        assert!(!text.contains("# image lines"));
        assert!(!text.contains("\n\n"));
        assert!(text.starts_with("#hugin_ptoversion 2\np f2"));
    }

    #[test]
    fn test_header_index() {
        let doc = from_str(SCRIPT).unwrap();
        let index = doc.index().unwrap();
        assert_eq!(index.get("#-hugin").len(), 2);
        assert_eq!(index.get("").len(), 2);
        assert_eq!(doc.lines_with_header("#hugin_ptoversion").len(), 1);
    }

    #[test]
    fn test_from_slice_rejects_invalid_utf8() {
        assert!(matches!(from_slice(&[0xc3, 0x28]), Err(Error::Io(_))));
    }
}
