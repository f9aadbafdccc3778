//! FBX encoding detection from the file header.

use std::io::{self, Read, Seek, SeekFrom};

use serde::Serialize;

/// Magic prefix of binary FBX files. The full header continues with two
/// spaces, a NUL, `0x1A 0x00`, and the little-endian version.
pub const BINARY_SIGNATURE: &[u8] = b"Kaydara FBX Binary";

/// Number of header bytes inspected; covers the signature and version field.
pub const SNIFF_LEN: usize = 27;

/// How an FBX file is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    Binary,
    Text,
}

impl Encoding {
    pub fn as_str(self) -> &'static str {
        match self {
            Encoding::Binary => "binary",
            Encoding::Text => "text",
        }
    }
}

/// Classify a header prefix. Anything that is not an exact signature match,
/// including inputs shorter than the signature, is `Text`.
pub fn sniff_bytes(header: &[u8]) -> Encoding {
    if header.starts_with(BINARY_SIGNATURE) {
        Encoding::Binary
    } else {
        Encoding::Text
    }
}

/// Peek at up to [`SNIFF_LEN`] bytes and classify them.
///
/// The reader is seeked back to the position it had on entry before this
/// returns, whether or not the read succeeded.
pub fn sniff<R: Read + Seek>(reader: &mut R) -> io::Result<Encoding> {
    let start = reader.stream_position()?;
    let mut header = Vec::with_capacity(SNIFF_LEN);
    let read = reader.by_ref().take(SNIFF_LEN as u64).read_to_end(&mut header);
    reader.seek(SeekFrom::Start(start))?;
    read?;
    Ok(sniff_bytes(&header))
}
