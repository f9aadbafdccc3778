//! Filesystem-backed uploader.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use super::{urls, validate_name, UploadError, Uploader};

/// Stores files under `<root>/<subdir>/<name>` and returns
/// `<base_url>/<subdir>/<name>`.
///
/// Names must be unique; an existing file is never overwritten.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
    subdir: String,
    base_url: String,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>, subdir: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            subdir: subdir.into().trim_matches('/').to_string(),
            base_url: base_url.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory that receives uploaded files.
    pub fn dir(&self) -> PathBuf {
        if self.subdir.is_empty() {
            self.root.clone()
        } else {
            self.root.join(&self.subdir)
        }
    }

    pub fn path_for(&self, name: &str) -> Result<PathBuf, UploadError> {
        validate_name(name)?;
        Ok(self.dir().join(name))
    }

    /// Public URL a stored `name` is served under.
    pub fn url_for(&self, name: &str) -> String {
        let rel = if self.subdir.is_empty() {
            format!("/{name}")
        } else {
            format!("/{}/{name}", self.subdir)
        };
        urls::with_domain(&self.base_url, &rel)
    }

    /// Read a stored file back.
    pub fn read(&self, name: &str) -> Result<Vec<u8>, UploadError> {
        let path = self.path_for(name)?;
        fs::read(&path).map_err(|source| UploadError::Source { path, source })
    }

    /// Remove a stored file. Missing files are not an error.
    pub fn delete(&self, name: &str) -> Result<(), UploadError> {
        let path = self.path_for(name)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(UploadError::Write { path, source }),
        }
    }
}

impl Uploader for LocalStore {
    fn upload(&self, content: &mut dyn Read, name: &str) -> Result<String, UploadError> {
        let path = self.path_for(name)?;
        let dir = self.dir();
        fs::create_dir_all(&dir).map_err(|source| UploadError::Write {
            path: dir.clone(),
            source,
        })?;

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|source| UploadError::Write {
                path: path.clone(),
                source,
            })?;

        if let Err(source) = copy_and_sync(content, &mut file) {
            drop(file);
            let _ = fs::remove_file(&path);
            return Err(UploadError::Write { path, source });
        }

        tracing::debug!(
            name,
            content_type = self.content_type(name),
            path = %path.display(),
            "stored file"
        );
        Ok(self.url_for(name))
    }
}

fn copy_and_sync(content: &mut dyn Read, file: &mut File) -> io::Result<()> {
    io::copy(content, file)?;
    file.sync_all()
}
