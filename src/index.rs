//! Ordered lookup maps derived from a scan.
//!
//! This module provides two thin wrappers around [`IndexMap`]:
//!
//! - [`HeaderIndex`]: header string to the positions of the lines carrying it
//! - [`FieldSlots`]: qualifier to the position of the first member carrying it
//!
//! Both hold positions, never the lines or members themselves, so the
//! document keeps sole ownership and lines stay editable. Insertion order is
//! first-appearance order in the file, which keeps iteration deterministic.
//!
//! Building either map twice gives the same result: entries are only added
//! when absent.

use indexmap::IndexMap;

/// Positions of lines grouped by header, in file order.
///
/// # Examples
///
/// ```rust
/// use pto_scan::HeaderIndex;
///
/// let mut index = HeaderIndex::new();
/// index.insert("i", 2);
/// index.insert("i", 5);
/// index.insert("i", 5);
/// assert_eq!(index.get("i"), &[2, 5]);
/// assert!(index.get("c").is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeaderIndex(IndexMap<String, Vec<usize>>);

impl HeaderIndex {
    #[must_use]
    pub fn new() -> Self {
        HeaderIndex(IndexMap::new())
    }

    /// Records line `position` under `header`. Positions must arrive in
    /// ascending order; a position already present is ignored.
    pub fn insert(&mut self, header: &str, position: usize) {
        let positions = self.0.entry(header.to_string()).or_default();
        if positions.last().map_or(true, |&last| last < position) {
            positions.push(position);
        }
    }

    /// Line positions for `header`, empty if none.
    #[must_use]
    pub fn get(&self, header: &str) -> &[usize] {
        self.0.get(header).map_or(&[], |v| v.as_slice())
    }

    /// Returns `true` if at least one line carries `header`.
    #[must_use]
    pub fn contains(&self, header: &str) -> bool {
        self.0.contains_key(header)
    }

    /// Distinct headers in order of first appearance.
    pub fn headers(&self) -> indexmap::map::Keys<'_, String, Vec<usize>> {
        self.0.keys()
    }

    /// Number of distinct headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Vec<usize>> {
        self.0.iter()
    }
}

/// Named slots of one line: qualifier to member position.
///
/// # Examples
///
/// ```rust
/// use pto_scan::FieldSlots;
///
/// let mut slots = FieldSlots::new();
/// assert!(slots.register("n", 4));
/// assert!(!slots.register("n", 9));
/// assert_eq!(slots.get("n"), Some(4));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldSlots(IndexMap<String, usize>);

impl FieldSlots {
    #[must_use]
    pub fn new() -> Self {
        FieldSlots(IndexMap::new())
    }

    /// Registers a slot unless one with that name exists. Returns `true` if
    /// the slot was added.
    pub fn register(&mut self, qualifier: &str, position: usize) -> bool {
        if self.0.contains_key(qualifier) {
            return false;
        }
        self.0.insert(qualifier.to_string(), position);
        true
    }

    #[must_use]
    pub fn get(&self, qualifier: &str) -> Option<usize> {
        self.0.get(qualifier).copied()
    }

    /// Slot names in member order.
    pub fn names(&self) -> indexmap::map::Keys<'_, String, usize> {
        self.0.keys()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
