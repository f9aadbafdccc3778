//! In-memory uploaders.

use std::collections::HashSet;
use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Mutex;

use texpack_core::storage::{UploadError, Uploader};

/// Records every upload; the returned identifier is `mem://<name>`.
#[derive(Default)]
pub struct MemoryStore {
    pub uploads: Mutex<Vec<(String, Vec<u8>)>>,
}

impl MemoryStore {
    pub fn names(&self) -> Vec<String> {
        self.uploads.lock().unwrap().iter().map(|(n, _)| n.clone()).collect()
    }

    pub fn body(&self, name: &str) -> Option<Vec<u8>> {
        self.uploads
            .lock()
            .unwrap()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, b)| b.clone())
    }
}

impl Uploader for MemoryStore {
    fn upload(&self, content: &mut dyn Read, name: &str) -> Result<String, UploadError> {
        let mut body = Vec::new();
        content
            .read_to_end(&mut body)
            .map_err(|source| UploadError::Source {
                path: PathBuf::from(name),
                source,
            })?;
        self.uploads.lock().unwrap().push((name.to_string(), body));
        Ok(format!("mem://{name}"))
    }
}

/// Delegates to a [`MemoryStore`] but rejects uploads whose storage name
/// ends with one of `fail_suffixes` (compared case-sensitively).
pub struct FlakyStore {
    pub inner: MemoryStore,
    pub fail_suffixes: HashSet<String>,
}

impl FlakyStore {
    pub fn failing(suffixes: &[&str]) -> Self {
        Self {
            inner: MemoryStore::default(),
            fail_suffixes: suffixes.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Uploader for FlakyStore {
    fn upload(&self, content: &mut dyn Read, name: &str) -> Result<String, UploadError> {
        if self.fail_suffixes.iter().any(|s| name.ends_with(s.as_str())) {
            return Err(UploadError::Write {
                path: PathBuf::from(name),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "bucket is read-only"),
            });
        }
        self.inner.upload(content, name)
    }
}
