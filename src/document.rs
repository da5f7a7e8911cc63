//! Scanned project scripts.
//!
//! A [`Document`] owns every line of one script in file order, the options
//! it was scanned with and, once built, a [`HeaderIndex`] over its lines.
//! Lines and their members stay editable; rendering always reads their
//! current state.
//!
//! ## Usage
//!
//! ```rust
//! use pto_scan::{Document, Value};
//!
//! let script = "\
//! p f2 w3000 h1500 v360 n\"TIFF_m c:LZW\"
//! i w800 h600 f0 n\"a.jpg\" y0 p0 r0 v80
//! i w800 h600 f0 n\"b.jpg\" y45.5 p0 r0 v=0
//! ";
//! let doc = Document::from_str(script).unwrap();
//!
//! let images = doc.lines_with_header("i");
//! assert_eq!(images.len(), 2);
//! assert_eq!(images[1].value("y"), Some(&Value::Float(45.5)));
//! assert_eq!(images[1].value("v"), Some(&Value::Backref(0)));
//! ```

use crate::index::HeaderIndex;
use crate::scan::Scanner;
use crate::ser::Serializer;
use crate::{Line, RenderOptions, Result, ScanOptions};
use log::{debug, info};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

/// A fully scanned project script.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    source_name: Option<String>,
    options: ScanOptions,
    lines: Vec<Line>,
    index: Option<HeaderIndex>,
}

impl Document {
    /// Scans script text with default options.
    ///
    /// # Errors
    ///
    /// Returns a structural error if a field cannot be typed.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &str) -> Result<Self> {
        Self::from_str_with_options(input, ScanOptions::default())
    }

    /// Scans script text with the given options.
    pub fn from_str_with_options(input: &str, options: ScanOptions) -> Result<Self> {
        Self::build(None, input, options)
    }

    /// Reads the reader to its end, releases it, then scans.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if reading fails or the text is not UTF-8.
    pub fn from_reader<R: Read>(reader: R, options: ScanOptions) -> Result<Self> {
        let text = read_all(reader)?;
        Self::build(None, &text, options)
    }

    /// Opens and scans a file with default options.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ScanOptions::default())
    }

    /// Opens and scans a file. The file is closed before scanning begins.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ScanOptions) -> Result<Self> {
        let path = path.as_ref();
        info!("Reading project script {}", path.display());
        let text = read_all(File::open(path)?)?;
        Self::build(Some(path.display().to_string()), &text, options)
    }

    fn build(source_name: Option<String>, text: &str, options: ScanOptions) -> Result<Self> {
        let lines = Scanner::new(text, &options).scan()?;
        let mut doc = Document {
            source_name,
            options,
            lines,
            index: None,
        };
        if doc.options.build_index {
            doc.build_index();
            doc.register_slots();
        }
        Ok(doc)
    }

    /// Names the source, e.g. for [`walk`](Document::walk) output.
    #[must_use]
    pub fn with_source_name(mut self, name: &str) -> Self {
        self.source_name = Some(name.to_string());
        self
    }

    /// File path or name the document was read from, if known.
    #[must_use]
    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    #[must_use]
    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// All lines in file order.
    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Mutable access to the lines for in-place edits. Lines cannot be added
    /// or removed, so the header index stays valid.
    pub fn lines_mut(&mut self) -> &mut [Line] {
        &mut self.lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Builds the header index. Already built: no-op.
    pub fn build_index(&mut self) {
        if self.index.is_some() {
            return;
        }
        let mut index = HeaderIndex::new();
        for (position, line) in self.lines.iter().enumerate() {
            index.insert(line.header(), position);
        }
        debug!("Header index built: {} distinct headers", index.len());
        self.index = Some(index);
    }

    /// The header index, if built.
    #[must_use]
    pub fn index(&self) -> Option<&HeaderIndex> {
        self.index.as_ref()
    }

    /// Registers field slots on every line. Lines already registered are
    /// left untouched.
    pub fn register_slots(&mut self) {
        for line in &mut self.lines {
            line.register_slots();
        }
    }

    /// Lines whose header equals `header`, in file order; empty if none.
    ///
    /// Uses the index when built and scans the lines otherwise.
    #[must_use]
    pub fn lines_with_header(&self, header: &str) -> Vec<&Line> {
        match &self.index {
            Some(index) => index
                .get(header)
                .iter()
                .filter_map(|&position| self.lines.get(position))
                .collect(),
            None => self
                .lines
                .iter()
                .filter(|line| line.header() == header)
                .collect(),
        }
    }

    /// Same as [`lines_with_header`](Document::lines_with_header) for
    /// single-character headers.
    #[must_use]
    pub fn lines_with_header_char(&self, header: char) -> Vec<&Line> {
        let mut buf = [0u8; 4];
        self.lines_with_header(header.encode_utf8(&mut buf))
    }

    /// Writes the reconstruction of this document to `sink`: structured
    /// lines re-rendered from their members, opaque lines verbatim when
    /// `include_aux` is set and dropped otherwise.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the sink fails.
    pub fn render<W: Write>(&self, sink: W, include_aux: bool) -> Result<()> {
        crate::to_writer_with_options(sink, self, RenderOptions::new().with_aux(include_aux))
    }

    /// Writes every line's source text unchanged.
    pub fn echo<W: Write>(&self, mut sink: W) -> Result<()> {
        for line in &self.lines {
            sink.write_all(line.source().as_bytes())?;
        }
        Ok(())
    }

    /// Writes a verbose dump of the scan: per line its number, header and
    /// source, followed by every member with its data type.
    pub fn walk<W: Write>(&self, mut sink: W) -> Result<()> {
        writeln!(
            sink,
            "scan of pto file {}",
            self.source_name.as_deref().unwrap_or("<input>")
        )?;
        writeln!(sink, "accepted line headers: {}", self.options.accepted_headers)?;
        if self.options.extensions {
            writeln!(sink, "extensions were accepted")?;
        }
        writeln!(sink, "total of {} lines", self.lines.len())?;

        let mut serializer = Serializer::new(RenderOptions::default());
        for line in &self.lines {
            serializer.describe_line(line);
        }
        sink.write_all(serializer.into_inner().as_bytes())?;
        Ok(())
    }
}

fn read_all<R: Read>(mut reader: R) -> Result<String> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(text)
}

impl std::str::FromStr for Document {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self> {
        Document::from_str(s)
    }
}

impl TryFrom<&[u8]> for Document {
    type Error = crate::Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| crate::Error::from(io::Error::new(io::ErrorKind::InvalidData, e)))?;
        Document::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, LineKind};

    const SCRIPT: &str = "p w100 h50\ni n\"a\"\n# note\ni n\"b\"\nc n0 N1\n";

    #[test]
    fn test_index_is_idempotent() {
        let mut doc = Document::from_str(SCRIPT).unwrap();
        let before = doc.index().cloned();
        doc.build_index();
        doc.register_slots();
        assert_eq!(doc.index().cloned(), before);
        assert_eq!(doc.lines_with_header("i").len(), 2);
    }

    #[test]
    fn test_lazy_lookup_matches_indexed() {
        let lazy =
            Document::from_str_with_options(SCRIPT, ScanOptions::new().with_index(false)).unwrap();
        assert!(lazy.index().is_none());
        assert!(lazy.lines()[1].slots().is_none());

        let indexed = Document::from_str(SCRIPT).unwrap();
        for header in ["p", "i", "#", "c", "z"] {
            assert_eq!(
                lazy.lines_with_header(header),
                indexed.lines_with_header(header)
            );
        }
    }

    #[test]
    fn test_lines_with_header_order() {
        let doc = Document::from_str(SCRIPT).unwrap();
        let numbers: Vec<_> = doc
            .lines_with_header_char('i')
            .iter()
            .map(|l| l.number())
            .collect();
        assert_eq!(numbers, vec![1, 3]);
        assert!(doc.lines_with_header("v").is_empty());
    }

    #[test]
    fn test_echo_is_exact() {
        let input = "p  w100\r\n\n# x\n*\nanything";
        let doc = Document::from_str(input).unwrap();
        let mut out = Vec::new();
        doc.echo(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), input);
    }

    #[test]
    fn test_walk_output() {
        let doc = Document::from_str("i v=0 S1,2,3,4\n# c\n")
            .unwrap()
            .with_source_name("demo.pto");
        let mut out = Vec::new();
        doc.walk(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "scan of pto file demo.pto\n\
             accepted line headers: A-Za-z\n\
             extensions were accepted\n\
             total of 2 lines\n\
             line 0000 header 'i' source:\n\
             i v=0 S1,2,3,4\n\
             \n\
             line contains 2 member fields\n\
             \x20 field: 'v' data type: 'back reference' content: '=0'\n\
             \x20 field: 'S' data type: 'rectangle' content: '(1,2,3,4)'\n\
             \n\
             line 0001 header '#' source:\n\
             # c\n\
             \n\
             \n"
        );
    }

    #[test]
    fn test_walk_unterminated_last_line() {
        let doc = Document::from_str("p w1").unwrap();
        let mut out = Vec::new();
        doc.walk(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("line 0000 header 'p' source:\np w1\nline contains 1 member fields\n  field: 'w' data type: 'int' content: '1'\n\n"));
    }

    #[test]
    fn test_render_with_and_without_aux() {
        let input = "# project\np  w100 h50\n\n#hugin_outputLDRBlended\nv\n*\ntrailer";

        let mut full = Vec::new();
        Document::from_str(input).unwrap().render(&mut full, true).unwrap();
        assert_eq!(
            String::from_utf8(full).unwrap(),
            "# project\np w100 h50\n\n#hugin_outputLDRBlended\nv\n*\ntrailer"
        );

        let mut content = Vec::new();
        Document::from_str(input).unwrap().render(&mut content, false).unwrap();
        assert_eq!(
            String::from_utf8(content).unwrap(),
            "p w100 h50\n#hugin_outputLDRBlended\nv\n"
        );
    }

    #[test]
    fn test_render_opaque_only_document() {
        let doc = Document::from_str("# just a note\n\n").unwrap();

        let mut content = Vec::new();
        doc.render(&mut content, false).unwrap();
        assert!(content.is_empty());

        let mut full = Vec::new();
        doc.render(&mut full, true).unwrap();
        assert_eq!(full, b"# just a note\n\n");
    }

    #[test]
    fn test_render_reports_sink_failure() {
        struct Refuse;
        impl Write for Refuse {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let doc = Document::from_str(SCRIPT).unwrap();
        assert!(matches!(doc.render(Refuse, true), Err(Error::Io(_))));
    }

    #[test]
    fn test_from_reader_non_utf8() {
        let bytes: &[u8] = &[b'i', b' ', 0xff, b'\n'];
        let err = Document::from_reader(bytes, ScanOptions::new()).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(matches!(Document::try_from(bytes), Err(Error::Io(_))));
    }

    #[test]
    fn test_open_missing_file() {
        let err = Document::open("/nonexistent/dir/missing.pto").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_parse_trait() {
        let doc: Document = "#hugin_blender PTBlender\n".parse().unwrap();
        assert_eq!(doc.lines()[0].kind(), LineKind::HuginOption);
    }
}
