//! Rendering documents back to text.
//!
//! Structured lines are re-rendered from their current members:
//! the header, then each member as `qualifier + separator + value`,
//! space-separated and newline-terminated. Opaque lines are copied from
//! their source text, or skipped when auxiliary content is off.
//!
//! The output matches the input byte-for-byte when nothing was edited and
//! every token was already in canonical form (single spaces, `\n`
//! terminators, floats with a decimal point).
//!
//! ## Usage
//!
//! ```rust
//! use pto_scan::{from_str, to_string, to_string_with_options, RenderOptions};
//!
//! let doc = from_str("# made by hand\ni w800 h600 n\"a.jpg\"\n").unwrap();
//!
//! assert_eq!(to_string(&doc).unwrap(), "# made by hand\ni w800 h600 n\"a.jpg\"\n");
//! assert_eq!(
//!     to_string_with_options(&doc, RenderOptions::content_only()).unwrap(),
//!     "i w800 h600 n\"a.jpg\"\n"
//! );
//! ```

use crate::{Document, Line, Member, RenderOptions, Value};
use std::fmt::Write;

/// Accumulates rendered text.
pub struct Serializer {
    output: String,
    options: RenderOptions,
}

impl Serializer {
    pub fn new(options: RenderOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Renders every line of `doc` in order.
    pub fn serialize_document(&mut self, doc: &Document) {
        self.output.reserve(doc.len() * 48);
        for line in doc.lines() {
            self.serialize_line(line);
        }
    }

    /// Renders one line per the current options.
    pub fn serialize_line(&mut self, line: &Line) {
        match line.members() {
            Some(members) => {
                self.output.push_str(line.header());
                for member in members {
                    self.output.push(' ');
                    self.write_member(member);
                }
                self.output.push('\n');
            }
            None if self.options.include_aux => self.output.push_str(line.source()),
            None => {}
        }
    }

    fn write_member(&mut self, member: &Member) {
        self.output.push_str(member.qualifier());
        self.output.push_str(member.separator().as_str());
        // Writing into a String cannot fail.
        let _ = write!(self.output, "{}", member.value());
    }

    /// Appends the verbose description of one line used by
    /// [`Document::walk`].
    pub(crate) fn describe_line(&mut self, line: &Line) {
        let _ = writeln!(
            self.output,
            "line {:04} header '{}' source:",
            line.number(),
            line.header()
        );
        // The source keeps its terminator, so a terminated line is
        // followed by an empty one.
        self.output.push_str(line.source());
        self.output.push('\n');
        if let Some(members) = line.members().filter(|m| !m.is_empty()) {
            let _ = writeln!(self.output, "line contains {} member fields", members.len());
            for member in members {
                let _ = writeln!(
                    self.output,
                    "  field: '{}' data type: '{}' content: '{}'",
                    member.qualifier(),
                    member.data_type(),
                    describe_value(member.value())
                );
            }
        }
        self.output.push('\n');
    }
}

fn describe_value(value: &Value) -> String {
    match value {
        Value::Rectangle(_) | Value::BigRectangle(_) => format!("({})", value),
        other if other.is_backref() => format!("={}", other),
        other => other.to_string(),
    }
}
