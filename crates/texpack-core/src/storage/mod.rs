//! Upload side of the pipeline.
//!
//! [`Uploader`] is the boundary to whatever stores extracted files: a local
//! directory ([`LocalStore`]) or a remote object store implemented outside
//! this crate. Callers pick a unique storage name per file (see
//! [`unique_name`]); uploaders only copy bytes and report where they went.

mod local;
mod mime;
mod naming;
pub mod urls;

use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;

pub use local::LocalStore;
pub use mime::content_type;
pub use naming::unique_name;

/// Failure to store one file. The pipeline logs these and skips the entry.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// The storage name is empty or contains path components.
    #[error("invalid storage name {0:?}")]
    InvalidName(String),

    /// The staged source file could not be opened for reading.
    #[error("cannot read staged file {}: {source}", .path.display())]
    Source {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing to the destination failed.
    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl UploadError {
    /// Underlying I/O error kind, when there is one.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            UploadError::Source { source, .. } | UploadError::Write { source, .. } => {
                Some(source.kind())
            }
            UploadError::InvalidName(_) => None,
        }
    }
}

/// Stores one file's content under a caller-chosen unique name and returns
/// its public identifier (usually a URL).
///
/// Implementations must be binary safe and callable from several threads at
/// once; the pipeline fans uploads out over a worker pool.
pub trait Uploader: Send + Sync {
    fn upload(&self, content: &mut dyn Read, name: &str) -> Result<String, UploadError>;

    /// MIME type the store should record for `name`.
    fn content_type(&self, name: &str) -> &'static str {
        content_type(name)
    }
}

impl<T: Uploader + ?Sized> Uploader for &T {
    fn upload(&self, content: &mut dyn Read, name: &str) -> Result<String, UploadError> {
        (**self).upload(content, name)
    }
}

impl<T: Uploader + ?Sized> Uploader for Box<T> {
    fn upload(&self, content: &mut dyn Read, name: &str) -> Result<String, UploadError> {
        (**self).upload(content, name)
    }
}

impl<T: Uploader + ?Sized> Uploader for Arc<T> {
    fn upload(&self, content: &mut dyn Read, name: &str) -> Result<String, UploadError> {
        (**self).upload(content, name)
    }
}

/// Reject names that would escape the store's directory.
pub(crate) fn validate_name(name: &str) -> Result<(), UploadError> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(|c: char| matches!(c, '/' | '\\' | '\0'));
    if bad {
        return Err(UploadError::InvalidName(name.to_string()));
    }
    Ok(())
}
