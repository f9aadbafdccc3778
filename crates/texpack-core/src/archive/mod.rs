//! Read side of the pipeline: open a ZIP container, list its entries, and
//! copy selected entries into the per-call staging directory.
//!
//! In-archive paths are untrusted. Nothing here ever joins an entry name
//! onto a filesystem path; staged files get generated names.

mod classify;

use std::fs::{File, OpenOptions};
use std::io::{self, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::ExtractError;
use crate::formats;

pub use classify::{classify, classify_entries, Classified, ClassifiedEntry, EntryCategory};

/// `ArchiveRead` stage reported when the scan candidate cannot be read out
/// of the archive.
pub const MODEL_CANDIDATE_STAGE: &str = "reading model candidate";

/// One file inside the archive. Directory entries are never listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Position in the central directory.
    pub index: usize,
    /// Path as stored in the archive.
    pub name: String,
    /// Uncompressed size in bytes.
    pub size: u64,
}

impl ArchiveEntry {
    pub fn basename(&self) -> &str {
        formats::basename(&self.name)
    }
}

/// Model file copied out of the archive for reference scanning. The file is
/// removed when this value is dropped.
#[derive(Debug)]
pub struct ModelCandidate {
    pub entry: ArchiveEntry,
    pub file: NamedTempFile,
}

pub struct ArchiveWalker {
    path: PathBuf,
    archive: ZipArchive<File>,
}

impl ArchiveWalker {
    /// Open `path` as a ZIP archive. A missing file and a corrupt container
    /// both fail with [`ExtractError::ArchiveOpen`].
    pub fn open(path: &Path) -> Result<Self, ExtractError> {
        let open_err = |source| ExtractError::ArchiveOpen {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(|e| open_err(ZipError::Io(e)))?;
        let archive = ZipArchive::new(file).map_err(open_err)?;
        tracing::debug!(archive = %path.display(), entries = archive.len(), "opened archive");
        Ok(Self {
            path: path.to_path_buf(),
            archive,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Non-directory entries in central-directory order.
    pub fn entries(&mut self) -> Result<Vec<ArchiveEntry>, ExtractError> {
        let mut out = Vec::with_capacity(self.archive.len());
        for index in 0..self.archive.len() {
            let file = self
                .archive
                .by_index_raw(index)
                .map_err(|e| ExtractError::read(&self.path, "listing entries", zip_io(e)))?;
            if file.is_dir() {
                continue;
            }
            out.push(ArchiveEntry {
                index,
                name: file.name().to_string(),
                size: file.size(),
            });
        }
        Ok(out)
    }

    /// Decompress `entry` into `out`, returning the number of bytes written.
    pub fn copy_entry(&mut self, entry: &ArchiveEntry, out: &mut dyn Write) -> io::Result<u64> {
        let mut file = self.archive.by_index(entry.index).map_err(zip_io)?;
        io::copy(&mut file, out)
    }

    /// Copy the first `.fbx` entry of `entries` into a temp file inside
    /// `dir`, rewound for reading. `Ok(None)` when there is no such entry.
    ///
    /// Failing to create the temp file is [`ExtractError::Staging`]; failing
    /// to decompress the entry is [`ExtractError::ArchiveRead`] with stage
    /// [`MODEL_CANDIDATE_STAGE`].
    pub fn extract_model_candidate(
        &mut self,
        entries: &[ArchiveEntry],
        dir: &Path,
    ) -> Result<Option<ModelCandidate>, ExtractError> {
        let Some(entry) = entries.iter().find(|e| formats::is_scannable_model(&e.name)) else {
            return Ok(None);
        };

        let mut file = tempfile::Builder::new()
            .prefix("model-")
            .suffix(formats::SCANNABLE_MODEL_EXTENSION)
            .tempfile_in(dir)
            .map_err(|source| ExtractError::Staging {
                dir: dir.to_path_buf(),
                source,
            })?;

        let copied = self
            .copy_entry(entry, file.as_file_mut())
            .and_then(|n| file.as_file_mut().seek(SeekFrom::Start(0)).map(|_| n))
            .map_err(|e| ExtractError::read(&self.path, MODEL_CANDIDATE_STAGE, e))?;
        tracing::debug!(entry = %entry.name, bytes = copied, "staged model candidate");

        Ok(Some(ModelCandidate {
            entry: entry.clone(),
            file,
        }))
    }

    /// Copy `entry` to `dir/entry-<index>`. A half-written file is removed
    /// on failure.
    pub fn stage(&mut self, entry: &ArchiveEntry, dir: &Path) -> io::Result<PathBuf> {
        let target = dir.join(format!("entry-{}", entry.index));
        let mut out = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)?;
        let copied = self.copy_entry(entry, &mut out).and_then(|n| out.flush().map(|_| n));
        match copied {
            Ok(_) => Ok(target),
            Err(e) => {
                drop(out);
                let _ = std::fs::remove_file(&target);
                Err(e)
            }
        }
    }
}

/// Flatten a zip error into an I/O error, keeping real I/O errors intact.
fn zip_io(e: ZipError) -> io::Error {
    match e {
        ZipError::Io(e) => e,
        other => io::Error::new(io::ErrorKind::InvalidData, other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::write::SimpleFileOptions;

    fn build_zip(dir: &Path, files: &[(&str, &[u8])]) -> PathBuf {
        let path = dir.join("fixture.zip");
        let mut writer = zip::ZipWriter::new(File::create(&path).unwrap());
        let options = SimpleFileOptions::default();
        for (name, data) in files {
            if name.ends_with('/') {
                writer.add_directory(*name, options).unwrap();
            } else {
                writer.start_file(*name, options).unwrap();
                writer.write_all(data).unwrap();
            }
        }
        writer.finish().unwrap();
        path
    }

    #[test]
    fn lists_files_in_order_without_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = build_zip(
            dir.path(),
            &[("maps/", b""), ("maps/a.png", b"aa"), ("model.FBX", b"m"), ("b.txt", b"bbb")],
        );
        let mut walker = ArchiveWalker::open(&path).unwrap();
        let entries = walker.entries().unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["maps/a.png", "model.FBX", "b.txt"]);
        assert_eq!(entries[0].index, 1);
        assert_eq!(entries[0].size, 2);
        assert_eq!(entries[0].basename(), "a.png");
    }

    #[test]
    fn open_rejects_missing_and_corrupt_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = ArchiveWalker::open(&dir.path().join("nope.zip")).err().unwrap();
        assert_eq!(missing.kind(), "archive_open");

        let junk = dir.path().join("junk.zip");
        std::fs::write(&junk, b"definitely not a zip").unwrap();
        let corrupt = ArchiveWalker::open(&junk).err().unwrap();
        assert!(matches!(corrupt, ExtractError::ArchiveOpen { .. }));
    }

    #[test]
    fn model_candidate_is_first_fbx_and_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = build_zip(
            dir.path(),
            &[("x.obj", b"o"), ("first.fbx", b"FIRST"), ("second.FBX", b"SECOND")],
        );
        let staging = tempfile::tempdir().unwrap();
        let mut walker = ArchiveWalker::open(&path).unwrap();
        let entries = walker.entries().unwrap();

        let mut candidate = walker
            .extract_model_candidate(&entries, staging.path())
            .unwrap()
            .unwrap();
        assert_eq!(candidate.entry.name, "first.fbx");
        let mut body = String::new();
        candidate.file.read_to_string(&mut body).unwrap();
        assert_eq!(body, "FIRST");

        let temp_path = candidate.file.path().to_path_buf();
        assert!(temp_path.starts_with(staging.path()));
        drop(candidate);
        assert!(!temp_path.exists());
    }

    #[test]
    fn unreadable_candidate_is_read_error_and_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crc.zip");
        let mut writer = zip::ZipWriter::new(File::create(&path).unwrap());
        let stored = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        writer.start_file("scene.fbx", stored).unwrap();
        writer.write_all(b"; FBX 7.4.0 project file\n; payload\n").unwrap();
        writer.finish().unwrap();

        let mut bytes = std::fs::read(&path).unwrap();
        let at = bytes.windows(7).position(|w| w == b"payload").unwrap();
        bytes[at] ^= 0x20;
        std::fs::write(&path, bytes).unwrap();

        let staging = tempfile::tempdir().unwrap();
        let mut walker = ArchiveWalker::open(&path).unwrap();
        let entries = walker.entries().unwrap();
        let err = walker
            .extract_model_candidate(&entries, staging.path())
            .unwrap_err();
        match err {
            ExtractError::ArchiveRead { stage, .. } => assert_eq!(stage, MODEL_CANDIDATE_STAGE),
            other => panic!("expected ArchiveRead, got {other:?}"),
        }
        assert_eq!(std::fs::read_dir(staging.path()).unwrap().count(), 0);
    }

    #[test]
    fn no_fbx_means_no_candidate() {
        let dir = tempfile::tempdir().unwrap();
        let path = build_zip(dir.path(), &[("mesh.glb", b"g"), ("a.png", b"p")]);
        let mut walker = ArchiveWalker::open(&path).unwrap();
        let entries = walker.entries().unwrap();
        assert!(walker
            .extract_model_candidate(&entries, dir.path())
            .unwrap()
            .is_none());
    }

    #[test]
    fn stage_uses_generated_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = build_zip(dir.path(), &[("../../evil.png", b"\x00\xffpng")]);
        let staging = tempfile::tempdir().unwrap();
        let mut walker = ArchiveWalker::open(&path).unwrap();
        let entries = walker.entries().unwrap();

        let staged = walker.stage(&entries[0], staging.path()).unwrap();
        assert_eq!(staged, staging.path().join("entry-0"));
        assert_eq!(std::fs::read(&staged).unwrap(), b"\x00\xffpng");
        assert_eq!(std::fs::read_dir(staging.path()).unwrap().count(), 1);
    }
}
