//! Texture reference discovery in FBX files.
//!
//! Two scanners share the [`ReferenceScanner`] interface: a line-oriented
//! state machine for ASCII FBX and a heuristic byte scanner for binary FBX.
//! [`scan_model`] sniffs the header and dispatches to the right one.

pub mod binary;
pub mod text;

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Seek};
use std::path::{Path, PathBuf};

use crate::sniff::{self, Encoding};

pub use binary::BinaryScanner;
pub use text::TextScanner;

/// Failure while reading model data. The pipeline treats this as "no
/// references found" rather than a fatal error.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("cannot open model file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error reading model data: {0}")]
    Read(#[source] io::Error),
}

/// Texture basenames in discovery order, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextureRefs {
    names: Vec<String>,
    seen: HashSet<String>,
}

impl TextureRefs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `name` unless it is empty or already present. Returns whether it was added.
    pub fn push(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if name.is_empty() || self.seen.contains(&name) {
            return false;
        }
        self.seen.insert(name.clone());
        self.names.push(name);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    pub fn into_vec(self) -> Vec<String> {
        self.names
    }
}

impl<S: Into<String>> FromIterator<S> for TextureRefs {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut refs = TextureRefs::new();
        for name in iter {
            refs.push(name);
        }
        refs
    }
}

/// A strategy for discovering texture references in model content.
pub trait ReferenceScanner {
    fn scan(&self, reader: &mut dyn BufRead) -> Result<TextureRefs, ScanError>;
}

/// Scanner for the given encoding.
pub fn scanner_for(encoding: Encoding) -> Box<dyn ReferenceScanner> {
    match encoding {
        Encoding::Binary => Box::new(BinaryScanner),
        Encoding::Text => Box::new(TextScanner),
    }
}

/// Sniff the encoding of `reader` and run the matching scanner from the
/// reader's current position.
pub fn scan_model<R: Read + Seek>(reader: R) -> Result<TextureRefs, ScanError> {
    let mut reader = BufReader::new(reader);
    let encoding = sniff::sniff(&mut reader).map_err(ScanError::Read)?;
    tracing::debug!(encoding = encoding.as_str(), "sniffed model encoding");
    scanner_for(encoding).scan(&mut reader)
}

/// Open the model file at `path` and scan it.
pub fn scan_path(path: &Path) -> Result<TextureRefs, ScanError> {
    let file = File::open(path).map_err(|source| ScanError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    scan_model(file)
}

/// Text between the first and last double quote of `s`, if there are two.
pub(crate) fn quoted(s: &str) -> Option<&str> {
    let start = s.find('"')?;
    let end = s.rfind('"')?;
    if end > start {
        Some(&s[start + 1..end])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn texture_refs_dedup_and_order() {
        let mut refs = TextureRefs::new();
        assert!(refs.push("b.png"));
        assert!(refs.push("a.png"));
        assert!(!refs.push("b.png"));
        assert!(!refs.push(""));
        assert_eq!(refs.as_slice(), &["b.png".to_string(), "a.png".to_string()]);
        assert!(refs.contains("a.png"));
        assert_eq!(refs.len(), 2);
    }

    #[test]
    fn quoted_takes_outermost_quotes() {
        assert_eq!(quoted(r#"RelativeFilename: "tex\wood.png""#), Some(r"tex\wood.png"));
        assert_eq!(quoted(r#"a "x", "y" b"#), Some(r#"x", "y"#));
        assert_eq!(quoted(r#"only "one"#), None);
        assert_eq!(quoted("none"), None);
    }

    #[test]
    fn scan_model_dispatches_on_encoding() {
        let ascii = "; FBX 6.1.0 project file\n\
                     Model: \"Model::wood\", \"Texture\" {\n\
                     \tRelativeFilename: \"wood.png\"\n\
                     }\n";
        let refs = scan_model(Cursor::new(ascii.as_bytes().to_vec())).unwrap();
        assert_eq!(refs.as_slice(), &["wood.png".to_string()]);

        let mut bin = b"Kaydara FBX Binary  \x00\x1a\x00".to_vec();
        bin.extend_from_slice(&[0xe8, 0x1c, 0, 0, 0, 0, 0, 0x08]);
        bin.extend_from_slice(b"wood.png\x00\x00");
        let refs = scan_model(Cursor::new(bin)).unwrap();
        assert_eq!(refs.as_slice(), &["wood.png".to_string()]);
    }

    #[test]
    fn scan_path_missing_file_is_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = scan_path(&dir.path().join("missing.fbx")).unwrap_err();
        assert!(matches!(err, ScanError::Open { .. }));
    }
}
