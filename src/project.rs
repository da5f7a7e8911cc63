//! Project directories and image records.
//!
//! A [`ProjectDirectory`] lists the scripts in one directory and loads a
//! named script into flat [`ImageRecord`]s: one per image line, holding the
//! file name and orientation fields. Missing fields are `None`, never an
//! error.
//!
//! ## Examples
//!
//! ```rust
//! use pto_scan::{from_str, image_records, Value};
//!
//! let doc = from_str("i w800 h600 f0 n\"PA030369.JPG\" y0 p0 r0 v80\ni n\"b.jpg\" y=0\n").unwrap();
//! let records = image_records(&doc);
//!
//! assert_eq!(records[0].name, Some(Value::String("PA030369.JPG".into())));
//! assert_eq!(records[0].view, Some(Value::Int(80)));
//! assert_eq!(records[1].yaw, Some(Value::Backref(0)));
//! assert_eq!(records[1].view, None);
//! ```

use crate::{Document, Error, Line, Result, Value};
use log::debug;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Header of image lines.
pub const IMAGE_HEADER: &str = "i";

/// Default script file extension.
pub const DEFAULT_EXTENSION: &str = "pto";

/// Name and orientation of one image line.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ImageRecord {
    pub name: Option<Value>,
    pub yaw: Option<Value>,
    pub pitch: Option<Value>,
    pub roll: Option<Value>,
    pub view: Option<Value>,
}

impl ImageRecord {
    /// Reads the `n`, `y`, `p`, `r` and `v` members of a line.
    #[must_use]
    pub fn from_line(line: &Line) -> Self {
        let field = |qualifier: &str| line.value(qualifier).cloned();
        ImageRecord {
            name: field("n"),
            yaw: field("y"),
            pitch: field("p"),
            roll: field("r"),
            view: field("v"),
        }
    }
}

/// One record per image line, in file order.
#[must_use]
pub fn image_records(doc: &Document) -> Vec<ImageRecord> {
    doc.lines_with_header(IMAGE_HEADER)
        .into_iter()
        .map(ImageRecord::from_line)
        .collect()
}

/// A directory holding project scripts.
///
/// # Examples
///
/// ```rust
/// use pto_scan::ProjectDirectory;
///
/// let dir = ProjectDirectory::new("/data/panoramas").with_extension(".PTO");
/// assert_eq!(dir.extension(), "PTO");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectDirectory {
    root: PathBuf,
    extension: String,
}

impl ProjectDirectory {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        ProjectDirectory {
            root: root.into(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Sets the file extension to list. A leading `.` is ignored.
    #[must_use]
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Names of the regular files directly in the directory whose extension
    /// matches, sorted. Matching is case-sensitive: `b.PTO` is not a `pto`
    /// file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory cannot be read.
    pub fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let path = entry.path();
            let matches = path
                .extension()
                .map_or(false, |ext| ext == self.extension.as_str());
            if !matches {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();
        debug!(
            "Listed {} .{} files in {}",
            names.len(),
            self.extension,
            self.root.display()
        );
        Ok(names)
    }

    /// Scans the named script and returns its image records.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFilename`] for names containing a path
    /// separator or starting with `.`, and I/O or scan errors otherwise.
    pub fn load_images(&self, name: &str) -> Result<Vec<ImageRecord>> {
        validate_name(name)?;
        let doc = Document::open(self.root.join(name))?;
        let records = image_records(&doc);
        debug!("{}: {} image records", name, records.len());
        Ok(records)
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name.starts_with('.') || name.contains(['/', '\\']) {
        return Err(Error::invalid_filename(name));
    }
    Ok(())
}
