//! Vendor extension lines hidden in comments.
//!
//! Orthodox readers ignore every line starting with `#`, so several tools
//! store extra data there. Three dialects are recognized:
//!
//! - `#-hugin  cropFactor=1 autoCenterCrop=1`: key=value pairs. Values are
//!   float, int, string or word (no rectangles or back references).
//! - `#hugin_blender PTBlender`: an option token followed by free text. The
//!   whole token is the header; the rest, if any, is a single word member.
//! - `#-imgfile 2816 2112 "IMG_1234.JPG"`: untagged values, each float, int,
//!   string or word.
//!
//! ## Examples
//!
//! ```rust
//! use pto_scan::{from_str, LineKind, Value};
//!
//! let doc = from_str("#hugin_blender PTBlender\n#hugin_outputLDRBlended\n").unwrap();
//!
//! let blender = &doc.lines()[0];
//! assert_eq!(blender.kind(), LineKind::HuginOption);
//! assert_eq!(blender.header(), "#hugin_blender");
//! assert_eq!(blender.value(""), Some(&Value::Word("PTBlender".into())));
//!
//! // No value: recognized, but without members.
//! let flag = &doc.lines()[1];
//! assert_eq!(flag.members().map(|m| m.len()), Some(0));
//! ```

use crate::member::{scan_with, Separator, FLOAT, INT, STRING, WORD};
use crate::{Member, Result, Value};
use once_cell::sync::Lazy;
use regex::Regex;

pub const HUGIN_EXTENSION_HEADER: &str = "#-hugin";
pub const IMGFILE_EXTENSION_HEADER: &str = "#-imgfile";
pub const HUGIN_OPTION_PREFIX: &str = "#hugin_";

static HUGIN_OPTION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^{}\S+", regex::escape(HUGIN_OPTION_PREFIX)))
        .expect("hugin option header is a valid regex")
});

static KEY_VALUE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\s*(?P<qualifier>[^=\s]+)=(?P<text>{}|{}|{}|{})",
        FLOAT, INT, STRING, WORD
    ))
    .expect("hugin key=value grammar is a valid regex")
});

static UNTAGGED_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\s*(?P<text>{}|{}|{}|{})",
        FLOAT, INT, STRING, WORD
    ))
    .expect("imgfile grammar is a valid regex")
});

/// Returns the `#hugin_xxx` token if `source` starts with one.
pub(crate) fn hugin_option_header(source: &str) -> Option<&str> {
    HUGIN_OPTION_REGEX.find(source).map(|m| m.as_str())
}

/// Members of a `#-hugin` line: key=value pairs, separator always `=`.
pub(crate) fn scan_hugin_extension(source: &str, line: usize) -> Result<Vec<Member>> {
    scan_with(
        &KEY_VALUE_REGEX,
        source,
        HUGIN_EXTENSION_HEADER.len(),
        line,
        Some(Separator::Equals),
    )
}

/// Members of a `#hugin_xxx` line: nothing, or one untagged word holding
/// the text after the header.
pub(crate) fn scan_hugin_option(source: &str, header: &str) -> Vec<Member> {
    let trimmed = source.trim();
    let rest = trimmed.get(header.len()..).unwrap_or("");
    let mut chars = rest.chars();
    if chars.next().is_none() {
        return Vec::new();
    }
    let value = chars.as_str();
    vec![Member::scanned(
        "",
        Separator::None,
        Value::Word(value.to_string()),
        value,
    )]
}

/// Members of a `#-imgfile` line: untagged values.
pub(crate) fn scan_imgfile_extension(source: &str, line: usize) -> Result<Vec<Member>> {
    scan_with(
        &UNTAGGED_REGEX,
        source,
        IMGFILE_EXTENSION_HEADER.len(),
        line,
        None,
    )
}
