//! Binary FBX scanner.
//!
//! There is no structural parse here. The buffer is searched for texture
//! extensions; each hit is extended backwards over filename characters and
//! the candidate is kept if it still looks like a texture filename. Missed
//! names are tolerated (the pipeline then keeps every texture); spurious
//! names are unlikely because candidates must pass [`is_valid_name`].

use std::io::{BufRead, Read};

use super::{ReferenceScanner, ScanError, TextureRefs};
use crate::formats::{self, BINARY_SCAN_EXTENSIONS};

const MIN_NAME_LEN: usize = 5;
const MAX_NAME_LEN: usize = 255;

/// Scanner for binary FBX content.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryScanner;

impl ReferenceScanner for BinaryScanner {
    fn scan(&self, reader: &mut dyn BufRead) -> Result<TextureRefs, ScanError> {
        scan_binary(reader)
    }
}

/// Read the whole stream and scan it.
pub fn scan_binary<R: Read + ?Sized>(reader: &mut R) -> Result<TextureRefs, ScanError> {
    let mut content = Vec::new();
    reader.read_to_end(&mut content).map_err(ScanError::Read)?;
    Ok(scan_bytes(&content))
}

/// Scan a buffer for texture filenames. Never panics.
pub fn scan_bytes(content: &[u8]) -> TextureRefs {
    let mut refs = TextureRefs::new();
    for ext in BINARY_SCAN_EXTENSIONS {
        let ext = ext.as_bytes();
        if content.len() < ext.len() {
            continue;
        }
        for hit in 0..=content.len() - ext.len() {
            let end = hit + ext.len();
            if !content[hit..end].eq_ignore_ascii_case(ext) {
                continue;
            }
            if extends_to_longer(content, hit, ext) {
                continue;
            }
            let start = name_start(content, hit, end);
            let candidate = trim_non_printable(&content[start..end]);
            if candidate.len() <= ext.len() || !is_valid_name(candidate) {
                continue;
            }
            // Validated as printable ASCII above.
            if let Ok(name) = std::str::from_utf8(candidate) {
                refs.push(name);
            }
        }
    }
    refs
}

/// True when the hit is the prefix of a longer scanned extension, e.g. the
/// `.tif` in `.tiff`. The longer extension produces the name instead.
fn extends_to_longer(content: &[u8], hit: usize, ext: &[u8]) -> bool {
    BINARY_SCAN_EXTENSIONS.iter().any(|longer| {
        let longer = longer.as_bytes();
        longer.len() > ext.len()
            && longer.starts_with(ext)
            && matches!(
                content.get(hit..hit + longer.len()),
                Some(s) if s.eq_ignore_ascii_case(longer)
            )
    })
}

/// Walk back from `hit` while the preceding byte can be part of a filename.
/// Stops once the name would exceed [`MAX_NAME_LEN`], which keeps long
/// printable runs from making the scan quadratic.
fn name_start(content: &[u8], hit: usize, end: usize) -> usize {
    let mut start = hit;
    while start > 0 && end - start <= MAX_NAME_LEN && is_name_byte(content[start - 1]) {
        start -= 1;
    }
    start
}

fn is_name_byte(b: u8) -> bool {
    is_printable(b) && !matches!(b, b'\\' | b'/' | b'"' | b' ')
}

fn is_printable(b: u8) -> bool {
    (32..=126).contains(&b)
}

fn trim_non_printable(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| is_printable(b)).unwrap_or(bytes.len());
    let end = bytes.iter().rposition(|&b| is_printable(b)).map_or(start, |i| i + 1);
    &bytes[start..end.max(start)]
}

/// Length bounds, a dot, printable ASCII only, and a texture extension.
pub fn is_valid_name(name: &[u8]) -> bool {
    if !(MIN_NAME_LEN..=MAX_NAME_LEN).contains(&name.len()) {
        return false;
    }
    if !name.contains(&b'.') || !name.iter().all(|&b| is_printable(b)) {
        return false;
    }
    match std::str::from_utf8(name) {
        Ok(s) => formats::is_texture_file(s),
        Err(_) => false,
    }
}
