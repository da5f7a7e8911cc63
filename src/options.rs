//! Configuration options for scanning and rendering.
//!
//! This module provides types to customize how a project script is read and
//! written back:
//!
//! - [`HeaderSet`]: which first characters make a line a structured data line
//! - [`ScanOptions`]: header policy, extension scanning and index building
//! - [`RenderOptions`]: whether auxiliary (opaque) lines are reproduced
//!
//! ## Examples
//!
//! ```rust
//! use pto_scan::{from_str_with_options, HeaderSet, ScanOptions};
//!
//! // Only the canonical line headers are structured
//! let doc = from_str_with_options("x 1\ni w10\n", ScanOptions::strict()).unwrap();
//! assert!(doc.lines()[0].is_opaque());
//! assert!(!doc.lines()[1].is_opaque());
//!
//! // Custom header set, comment extensions left alone
//! let options = ScanOptions::new()
//!     .with_accepted_headers(HeaderSet::only("ic"))
//!     .with_extensions(false);
//! assert!(options.accepted_headers.accepts('c'));
//! ```

use std::collections::BTreeSet;
use std::fmt;

/// The set of characters accepted as headers of structured data lines.
///
/// The liberal default accepts any ASCII letter, so line types introduced by
/// newer tools still scan as long as they keep the usual field layout. The
/// strict set restricts structure to the canonical headers.
///
/// # Examples
///
/// ```rust
/// use pto_scan::HeaderSet;
///
/// assert!(HeaderSet::Alphabetic.accepts('q'));
/// assert!(!HeaderSet::standard().accepts('q'));
/// assert!(HeaderSet::standard().accepts('k'));
/// assert!(!HeaderSet::Alphabetic.accepts('#'));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum HeaderSet {
    #[default]
    Alphabetic,
    Only(BTreeSet<char>),
}

impl HeaderSet {
    /// Canonical line headers of the format.
    pub const STANDARD: &'static str = "pvimozck";

    /// The canonical header set {p,v,i,m,o,z,c,k}.
    #[must_use]
    pub fn standard() -> Self {
        Self::only(Self::STANDARD)
    }

    /// A header set made of exactly the given characters.
    #[must_use]
    pub fn only(chars: &str) -> Self {
        HeaderSet::Only(chars.chars().collect())
    }

    /// Returns `true` if a line starting with `c` is a structured data line.
    #[inline]
    #[must_use]
    pub fn accepts(&self, c: char) -> bool {
        match self {
            HeaderSet::Alphabetic => c.is_ascii_alphabetic(),
            HeaderSet::Only(set) => set.contains(&c),
        }
    }
}

impl fmt::Display for HeaderSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderSet::Alphabetic => write!(f, "A-Za-z"),
            HeaderSet::Only(set) => {
                for c in set {
                    write!(f, "{}", c)?;
                }
                Ok(())
            }
        }
    }
}

/// Configuration options for scanning a project script.
///
/// # Examples
///
/// ```rust
/// use pto_scan::{HeaderSet, ScanOptions};
///
/// let options = ScanOptions::new();
/// assert!(options.extensions);
/// assert!(options.build_index);
///
/// let strict = ScanOptions::strict();
/// assert_eq!(strict.accepted_headers, HeaderSet::standard());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanOptions {
    pub accepted_headers: HeaderSet,
    pub extensions: bool,
    pub build_index: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        ScanOptions {
            accepted_headers: HeaderSet::default(),
            extensions: true,
            build_index: true,
        }
    }
}

impl ScanOptions {
    /// Creates default options (any letter is a header, extensions scanned,
    /// index built at construction).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options restricted to the canonical header set.
    #[must_use]
    pub fn strict() -> Self {
        ScanOptions {
            accepted_headers: HeaderSet::standard(),
            ..Default::default()
        }
    }

    /// Sets the accepted header set.
    #[must_use]
    pub fn with_accepted_headers(mut self, headers: HeaderSet) -> Self {
        self.accepted_headers = headers;
        self
    }

    /// Enables or disables recognition of extension comment lines.
    ///
    /// When disabled every `#` line is an opaque comment.
    #[must_use]
    pub fn with_extensions(mut self, extensions: bool) -> Self {
        self.extensions = extensions;
        self
    }

    /// Chooses whether the header index and field slots are built during
    /// construction. Without them, lookups scan the lines.
    #[must_use]
    pub fn with_index(mut self, build_index: bool) -> Self {
        self.build_index = build_index;
        self
    }
}

/// Configuration options for rendering a document back to text.
///
/// # Examples
///
/// ```rust
/// use pto_scan::RenderOptions;
///
/// assert!(RenderOptions::new().include_aux);
/// assert!(!RenderOptions::content_only().include_aux);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    pub include_aux: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions { include_aux: true }
    }
}

impl RenderOptions {
    /// Creates default options (faithful reconstruction, opaque lines kept).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that drop comments, blanks and other opaque lines.
    #[must_use]
    pub fn content_only() -> Self {
        RenderOptions { include_aux: false }
    }

    /// Sets whether opaque lines are written verbatim.
    #[must_use]
    pub fn with_aux(mut self, include_aux: bool) -> Self {
        self.include_aux = include_aux;
        self
    }
}
