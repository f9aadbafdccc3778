//! Map upload failures onto retry policy error kinds.

use std::io;

use crate::retry::policy::ErrorKind;
use crate::storage::UploadError;

/// Retry kind for an I/O error kind. Timeouts and dropped connections are
/// transient; everything else (missing file, permissions, name clash) is not.
pub fn classify_io_kind(kind: io::ErrorKind) -> ErrorKind {
    match kind {
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => ErrorKind::Timeout,
        io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::ConnectionRefused
        | io::ErrorKind::BrokenPipe
        | io::ErrorKind::Interrupted
        | io::ErrorKind::UnexpectedEof => ErrorKind::Connection,
        _ => ErrorKind::Other,
    }
}

pub fn classify(e: &UploadError) -> ErrorKind {
    e.io_kind().map_or(ErrorKind::Other, classify_io_kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_err(kind: io::ErrorKind) -> UploadError {
        UploadError::Write {
            path: PathBuf::from("x"),
            source: io::Error::new(kind, "boom"),
        }
    }

    #[test]
    fn transient_io_kinds() {
        assert_eq!(classify(&write_err(io::ErrorKind::TimedOut)), ErrorKind::Timeout);
        assert_eq!(
            classify(&write_err(io::ErrorKind::ConnectionReset)),
            ErrorKind::Connection
        );
        assert_eq!(classify_io_kind(io::ErrorKind::BrokenPipe), ErrorKind::Connection);
    }

    #[test]
    fn permanent_failures() {
        assert_eq!(classify(&write_err(io::ErrorKind::AlreadyExists)), ErrorKind::Other);
        assert_eq!(
            classify(&write_err(io::ErrorKind::PermissionDenied)),
            ErrorKind::Other
        );
        assert_eq!(
            classify(&UploadError::InvalidName("..".into())),
            ErrorKind::Other
        );
        let missing = UploadError::Source {
            path: PathBuf::from("entry-3"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert_eq!(classify(&missing), ErrorKind::Other);
    }
}
