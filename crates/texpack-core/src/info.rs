//! Header facts about an FBX file: encoding, version, creator, and the
//! texture references the scanners find.

use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use serde::Serialize;

use crate::scan::{self, quoted, ScanError};
use crate::sniff::{self, Encoding, SNIFF_LEN};

/// Offset of the little-endian `u32` version in a binary FBX header.
const BINARY_VERSION_OFFSET: usize = 23;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FbxInfo {
    pub encoding: Encoding,
    pub version: Option<String>,
    pub creator: Option<String>,
    pub texture_refs: Vec<String>,
}

/// Read the header facts and texture references of the FBX file at `path`.
pub fn read_info(path: &Path) -> Result<FbxInfo, ScanError> {
    let mut file = File::open(path).map_err(|source| ScanError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut header = Vec::with_capacity(SNIFF_LEN);
    file.by_ref()
        .take(SNIFF_LEN as u64)
        .read_to_end(&mut header)
        .map_err(ScanError::Read)?;
    let encoding = sniff::sniff_bytes(&header);

    let (version, creator) = match encoding {
        Encoding::Binary => (binary_version(&header).map(|v| v.to_string()), None),
        Encoding::Text => {
            file.seek(SeekFrom::Start(0)).map_err(ScanError::Read)?;
            text_header(&mut BufReader::new(&mut file))?
        }
    };

    file.seek(SeekFrom::Start(0)).map_err(ScanError::Read)?;
    let texture_refs = scan::scan_model(&mut file)?.into_vec();

    Ok(FbxInfo {
        encoding,
        version,
        creator,
        texture_refs,
    })
}

/// Version number stored after the binary signature, if the header is complete.
pub fn binary_version(header: &[u8]) -> Option<u32> {
    let bytes = header.get(BINARY_VERSION_OFFSET..BINARY_VERSION_OFFSET + 4)?;
    Some(u32::from_le_bytes(bytes.try_into().ok()?))
}

/// `FBXVersion:` and `Creator:` from the `FBXHeaderExtension:` block of an
/// ASCII file. Nested blocks inside the header are skipped over.
pub fn text_header<R: BufRead>(
    reader: &mut R,
) -> Result<(Option<String>, Option<String>), ScanError> {
    let mut version = None;
    let mut creator = None;
    let mut in_header = false;
    let mut depth = 0usize;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).map_err(ScanError::Read)? == 0 {
            break;
        }
        let raw = String::from_utf8_lossy(&buf);
        let line = raw.trim();

        if !in_header {
            if line.contains("FBXHeaderExtension:") {
                in_header = true;
                depth = usize::from(line.ends_with('{'));
            }
            continue;
        }

        if depth == 1 {
            if let Some(rest) = line.strip_prefix("FBXVersion:") {
                version = Some(rest.trim().to_string());
            } else if line.starts_with("Creator:") {
                creator = quoted(line).map(str::to_string);
            }
        }
        if line.ends_with('{') {
            depth += 1;
        }
        if line.starts_with('}') {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                break;
            }
        }
    }

    Ok((version, creator))
}
