//! Scanned lines.
//!
//! Every physical line of a script becomes a [`Line`]: its source text
//! (terminator included), zero-based line number, header, and either a
//! member list or nothing. "Recognized with no members" and "not recognized"
//! are different states: [`Line::members`] returns `Some(&[])` for the first
//! and `None` for the second.
//!
//! All line kinds share this one shape; [`LineKind`] records which grammar
//! produced the members.

use crate::index::FieldSlots;
use crate::{Member, Value};
use std::fmt;

/// Which grammar a line was scanned with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// Data line whose first character is an accepted header.
    Generic,
    /// `#-hugin` key=value line.
    HuginExtension,
    /// `#hugin_xxx` option line.
    HuginOption,
    /// `#-imgfile` untagged value line.
    ImgfileExtension,
    /// Kept verbatim: comments, blanks, the `*` sentinel and whatever
    /// follows it, unknown headers.
    Opaque,
}

/// One physical line of a project script.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    kind: LineKind,
    source: String,
    number: usize,
    header: String,
    members: Option<Vec<Member>>,
    slots: Option<FieldSlots>,
}

impl Line {
    pub(crate) fn structured(
        kind: LineKind,
        source: &str,
        number: usize,
        header: &str,
        members: Vec<Member>,
    ) -> Self {
        Line {
            kind,
            source: source.to_string(),
            number,
            header: header.to_string(),
            members: Some(members),
            slots: None,
        }
    }

    pub(crate) fn opaque(source: &str, number: usize, header: &str) -> Self {
        Line {
            kind: LineKind::Opaque,
            source: source.to_string(),
            number,
            header: header.to_string(),
            members: None,
            slots: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> LineKind {
        self.kind
    }

    /// The original text, line terminator included.
    #[inline]
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Zero-based position in the file. Blank lines count.
    #[inline]
    #[must_use]
    pub fn number(&self) -> usize {
        self.number
    }

    /// A letter for data lines, the full tag for extension lines, `#` for
    /// comments, `*` for the sentinel and empty for anything else.
    #[inline]
    #[must_use]
    pub fn header(&self) -> &str {
        &self.header
    }

    #[inline]
    #[must_use]
    pub fn is_opaque(&self) -> bool {
        self.members.is_none()
    }

    #[inline]
    #[must_use]
    pub fn members(&self) -> Option<&[Member]> {
        self.members.as_deref()
    }

    /// Mutable access to the members for in-place edits.
    ///
    /// The members may be reordered through this slice, so registered slots
    /// are dropped and lookups scan until
    /// [`register_slots`](Line::register_slots) runs again.
    #[inline]
    pub fn members_mut(&mut self) -> Option<&mut [Member]> {
        self.slots = None;
        self.members.as_deref_mut()
    }

    /// The first member with the given qualifier.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pto_scan::{from_str, Value};
    ///
    /// let doc = from_str("c n0 N1 x10.5 y20 X30 Y40.25 t0\n").unwrap();
    /// let cp = &doc.lines()[0];
    /// assert_eq!(cp.member("x").map(|m| m.value()), Some(&Value::Float(10.5)));
    /// assert!(cp.member("z").is_none());
    /// ```
    #[must_use]
    pub fn member(&self, qualifier: &str) -> Option<&Member> {
        let position = self.position_of(qualifier)?;
        self.members.as_ref()?.get(position)
    }

    /// Mutable access to the first member with the given qualifier.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pto_scan::{from_str, to_string, Value};
    ///
    /// let mut doc = from_str("i n\"a.jpg\" y0\n").unwrap();
    /// doc.lines_mut()[0].member_mut("y").unwrap().set_value(Value::Float(12.5));
    /// assert_eq!(to_string(&doc).unwrap(), "i n\"a.jpg\" y12.5\n");
    /// ```
    pub fn member_mut(&mut self, qualifier: &str) -> Option<&mut Member> {
        let position = self.position_of(qualifier)?;
        self.members.as_mut()?.get_mut(position)
    }

    /// The value of the first member with the given qualifier.
    #[must_use]
    pub fn value(&self, qualifier: &str) -> Option<&Value> {
        self.member(qualifier).map(Member::value)
    }

    /// Registers one named slot per distinct qualifier. Calling it again is
    /// a no-op. Opaque lines have no slots.
    pub fn register_slots(&mut self) {
        if self.slots.is_some() {
            return;
        }
        if let Some(members) = &self.members {
            let mut slots = FieldSlots::new();
            for (position, member) in members.iter().enumerate() {
                slots.register(member.qualifier(), position);
            }
            self.slots = Some(slots);
        }
    }

    /// The slot registry, if [`register_slots`](Line::register_slots) ran.
    #[must_use]
    pub fn slots(&self) -> Option<&FieldSlots> {
        self.slots.as_ref()
    }

    /// Looks the qualifier up through the slots when registered, scanning
    /// otherwise.
    fn position_of(&self, qualifier: &str) -> Option<usize> {
        let members = self.members.as_ref()?;
        match &self.slots {
            Some(slots) => slots.get(qualifier),
            None => members.iter().position(|m| m.qualifier() == qualifier),
        }
    }
}

/// The structural form: header, then space-separated members. Opaque lines
/// show their header only.
impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.header)?;
        if let Some(members) = &self.members {
            for member in members {
                write!(f, " {}", member)?;
            }
        }
        Ok(())
    }
}
