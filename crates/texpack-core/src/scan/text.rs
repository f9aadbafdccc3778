//! ASCII FBX scanner.
//!
//! The scanner walks the file line by line. Each line goes through [`step`],
//! a pure function of the current [`Block`] and the line text, which yields
//! the next block state and whatever the line contributes. Three triggers
//! feed the same result list:
//!
//! - filename properties inside a texture or material definition,
//! - shading-channel properties, whose value is on the following line,
//! - connection declarations that mention a texture.

use std::io::{self, BufRead};

use super::{quoted, ReferenceScanner, ScanError, TextureRefs};
use crate::formats;

/// Opens a definition when combined with `Texture` or `Material`.
const DEFINITION_TOKEN: &str = "Model:";

/// Declares a link between two objects.
const CONNECTION_TOKEN: &str = "Connect:";

const FILENAME_KEYS: &[&str] = &["RelativeFilename:", "Filename:", "FileName:"];

const CHANNEL_TOKENS: &[&str] = &[
    "DiffuseColor",
    "BaseColor",
    "NormalMap",
    "SpecularColor",
    "EmissiveColor",
    "Bump",
    "DisplacementColor",
    "TransparencyFactor",
    "ReflectionColor",
];

/// Which kind of definition block the scanner is inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Block {
    #[default]
    Outside,
    Texture,
    Material,
}

/// What one line contributes to the scan.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Step {
    /// Block state for the next line.
    pub block: Block,
    /// Basename from a filename property inside a block.
    pub filename: Option<String>,
    /// The line names a shading channel; the next line holds its value.
    pub lookahead: bool,
    /// Texture names quoted in a connection declaration.
    pub connections: Vec<String>,
}

/// Process one trimmed line in the given block state.
pub fn step(block: Block, line: &str) -> Step {
    if line.contains(DEFINITION_TOKEN) {
        if line.contains("Texture") {
            return Step::enter(Block::Texture);
        }
        if line.contains("Material") {
            return Step::enter(Block::Material);
        }
    }
    if line == "}" {
        return Step::enter(Block::Outside);
    }

    Step {
        block,
        filename: block_filename(block, line),
        lookahead: names_channel(line),
        connections: connection_refs(line),
    }
}

impl Step {
    fn enter(block: Block) -> Self {
        Step {
            block,
            ..Step::default()
        }
    }
}

/// Basename of a filename property, when inside a texture or material block.
pub fn block_filename(block: Block, line: &str) -> Option<String> {
    if block == Block::Outside || !FILENAME_KEYS.iter().any(|k| line.contains(k)) {
        return None;
    }
    let name = path_basename(quoted(line)?);
    (!name.is_empty()).then_some(name)
}

pub fn names_channel(line: &str) -> bool {
    CHANNEL_TOKENS.iter().any(|t| line.contains(t))
}

/// Basename quoted on the line following a channel property, if it looks
/// like a file (has an extension dot).
pub fn lookahead_ref(next_line: &str) -> Option<String> {
    let name = path_basename(quoted(next_line)?);
    (!name.is_empty() && name.contains('.')).then_some(name)
}

/// Texture names quoted in the comma-separated parts of a connection line.
pub fn connection_refs(line: &str) -> Vec<String> {
    if !(line.contains(CONNECTION_TOKEN) && line.contains("Texture")) {
        return Vec::new();
    }
    line.split(',')
        .filter_map(|part| quoted(part.trim()))
        .filter(|candidate| formats::is_texture_file(candidate))
        .map(path_basename)
        .filter(|name| !name.is_empty())
        .collect()
}

fn path_basename(path: &str) -> String {
    formats::basename(&path.replace('\\', "/")).to_string()
}

/// Scanner for ASCII FBX content.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextScanner;

impl ReferenceScanner for TextScanner {
    fn scan(&self, reader: &mut dyn BufRead) -> Result<TextureRefs, ScanError> {
        scan_text(reader)
    }
}

/// Scan ASCII FBX content. Lines that are not valid UTF-8 are decoded
/// lossily; read errors abort the scan.
pub fn scan_text<R: BufRead + ?Sized>(reader: &mut R) -> Result<TextureRefs, ScanError> {
    let mut refs = TextureRefs::new();
    let mut lines = Lines::new(reader);
    let mut block = Block::Outside;

    while let Some(line) = lines.next_line().map_err(ScanError::Read)? {
        let step = step(block, &line);
        block = step.block;

        if let Some(name) = step.filename {
            refs.push(name);
        }
        if step.lookahead {
            if let Some(next) = lines.next_line().map_err(ScanError::Read)? {
                if let Some(name) = lookahead_ref(&next) {
                    refs.push(name);
                }
            }
        }
        for name in step.connections {
            refs.push(name);
        }
    }

    Ok(refs)
}

/// Trimmed lines from a byte stream, tolerant of invalid UTF-8.
struct Lines<'a, R: BufRead + ?Sized> {
    reader: &'a mut R,
    buf: Vec<u8>,
}

impl<'a, R: BufRead + ?Sized> Lines<'a, R> {
    fn new(reader: &'a mut R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }

    fn next_line(&mut self) -> io::Result<Option<String>> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&self.buf).trim().to_string()))
    }
}
