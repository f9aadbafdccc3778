//! Error taxonomy for archive extraction.
//!
//! Fatal errors abort the whole extraction and are returned to the caller.
//! Best-effort failures (model parsing, single-entry uploads) have their own
//! types in [`crate::scan`] and [`crate::storage`] and are absorbed by the
//! pipeline.

use std::path::PathBuf;

/// Fatal failure of one extraction call.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The container is missing, unreadable, or not a valid archive.
    #[error("cannot open archive {}: {source}", .path.display())]
    ArchiveOpen {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// I/O failure on the container while walking or staging entries.
    #[error("archive {} unreadable during {stage}: {source}", .path.display())]
    ArchiveRead {
        path: PathBuf,
        stage: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// The archive holds no entry with a supported model extension, or none
    /// of them could be stored.
    #[error("no supported 3D model file found in archive {}", .path.display())]
    NoModelFound { path: PathBuf },

    /// The private staging area could not be created.
    #[error("cannot create staging area in {}: {source}", .dir.display())]
    Staging {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExtractError {
    pub(crate) fn read(path: &std::path::Path, stage: &'static str, source: std::io::Error) -> Self {
        ExtractError::ArchiveRead {
            path: path.to_path_buf(),
            stage,
            source,
        }
    }

    /// Short machine-friendly name of the variant, for logs and CLI output.
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractError::ArchiveOpen { .. } => "archive_open",
            ExtractError::ArchiveRead { .. } => "archive_read",
            ExtractError::NoModelFound { .. } => "no_model_found",
            ExtractError::Staging { .. } => "staging",
        }
    }
}
