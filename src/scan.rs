//! Line classification.
//!
//! This module drives the per-line grammars over a whole script. The input
//! is complete before scanning starts: scripts are small, and the trailing
//! sentinel rule needs only a single forward pass. Each physical line keeps
//! its own terminator.
//!
//! Dispatch on the first character:
//!
//! | First char | Result |
//! |------------|--------|
//! | accepted header | [`LineKind::Generic`], members scanned after the header |
//! | `#` | extension line if enabled and recognized, else opaque comment |
//! | `*` | opaque sentinel; every later line is opaque with an empty header |
//! | anything else | opaque, empty header |

use crate::extension::{self, HUGIN_EXTENSION_HEADER, IMGFILE_EXTENSION_HEADER};
use crate::line::{Line, LineKind};
use crate::member::scan_members;
use crate::{Result, ScanOptions};
use log::{debug, trace};

/// Header given to lines following the `*` sentinel and to unrecognized lines.
pub const NO_HEADER: &str = "";
pub const COMMENT_HEADER: &str = "#";
pub const SENTINEL_HEADER: &str = "*";

/// Scans complete script text into lines.
pub struct Scanner<'a> {
    input: &'a str,
    options: &'a ScanOptions,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str, options: &'a ScanOptions) -> Self {
        Scanner { input, options }
    }

    /// Classifies every physical line in order.
    ///
    /// # Errors
    ///
    /// Fails on the first field that cannot be typed; nothing is returned
    /// for the lines already scanned.
    pub fn scan(&self) -> Result<Vec<Line>> {
        let mut lines = Vec::new();
        let mut physical = self.input.split_inclusive('\n').enumerate();

        for (number, source) in physical.by_ref() {
            let line = self.classify(source, number)?;
            trace!(
                "line {}: {:?} header {:?}",
                number,
                line.kind(),
                line.header()
            );
            let sentinel = line.header() == SENTINEL_HEADER;
            lines.push(line);
            if sentinel {
                debug!("Sentinel at line {}; keeping the rest verbatim", number);
                break;
            }
        }

        for (number, source) in physical {
            lines.push(Line::opaque(source, number, NO_HEADER));
        }

        debug!("Scanned {} lines", lines.len());
        Ok(lines)
    }

    fn classify(&self, source: &str, number: usize) -> Result<Line> {
        let Some(first) = source.chars().next() else {
            return Ok(Line::opaque(source, number, NO_HEADER));
        };

        if self.options.accepted_headers.accepts(first) {
            let mut buf = [0u8; 4];
            let header = first.encode_utf8(&mut buf);
            let members = scan_members(source, header.len(), number)?;
            return Ok(Line::structured(
                LineKind::Generic,
                source,
                number,
                header,
                members,
            ));
        }

        match first {
            '#' if self.options.extensions => self.classify_comment(source, number),
            '#' => Ok(Line::opaque(source, number, COMMENT_HEADER)),
            '*' => Ok(Line::opaque(source, number, SENTINEL_HEADER)),
            _ => Ok(Line::opaque(source, number, NO_HEADER)),
        }
    }

    fn classify_comment(&self, source: &str, number: usize) -> Result<Line> {
        if source.starts_with(HUGIN_EXTENSION_HEADER) {
            let members = extension::scan_hugin_extension(source, number)?;
            return Ok(Line::structured(
                LineKind::HuginExtension,
                source,
                number,
                HUGIN_EXTENSION_HEADER,
                members,
            ));
        }
        if let Some(header) = extension::hugin_option_header(source) {
            let members = extension::scan_hugin_option(source, header);
            return Ok(Line::structured(
                LineKind::HuginOption,
                source,
                number,
                header,
                members,
            ));
        }
        if source.starts_with(IMGFILE_EXTENSION_HEADER) {
            let members = extension::scan_imgfile_extension(source, number)?;
            return Ok(Line::structured(
                LineKind::ImgfileExtension,
                source,
                number,
                IMGFILE_EXTENSION_HEADER,
                members,
            ));
        }
        Ok(Line::opaque(source, number, COMMENT_HEADER))
    }
}
