//! Error types for linking operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a linking operation.
///
/// None of these are retried or caught inside the traversal. Links and
/// manifest lines written before the failure stay on disk.
#[derive(Debug, Error)]
pub enum LinkError {
    /// The source root does not exist.
    #[error("Path not found: {path}")]
    PathNotFound { path: PathBuf },

    /// The source root exists but is not a directory.
    #[error("Source path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// A destination directory could not be created.
    #[error("Failed to create directory {path}: {source}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A hard link (or copy) could not be created.
    #[error("Failed to link {from} to {to}: {source}")]
    LinkCreation {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A source directory could not be listed.
    #[error("Failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Appending to a manifest file failed.
    #[error("Failed to write to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The destination lies inside the source tree, so the mirror would be
    /// listed and mirrored again.
    #[error("Destination {destination} is inside the source directory {source_root}")]
    DestinationInsideSource {
        source_root: PathBuf,
        destination: PathBuf,
    },
}

impl LinkError {
    /// Classify an I/O error raised while inspecting the source root.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::PathNotFound { path },
            _ => Self::ReadDir { path, source },
        }
    }

    /// Create a manifest write error.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_error_io_not_found() {
        let err = LinkError::io(
            "/missing/data",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, LinkError::PathNotFound { .. }));
        assert!(err.to_string().contains("/missing/data"));
    }

    #[test]
    fn test_link_error_io_other() {
        let err = LinkError::io(
            "/data",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, LinkError::ReadDir { .. }));
    }

    #[test]
    fn test_destination_inside_source_message() {
        let err = LinkError::DestinationInsideSource {
            source_root: PathBuf::from("/data"),
            destination: PathBuf::from("/data/res"),
        };
        assert_eq!(
            err.to_string(),
            "Destination /data/res is inside the source directory /data"
        );
    }

    #[test]
    fn test_link_creation_message() {
        let err = LinkError::LinkCreation {
            from: PathBuf::from("/data/a.txt"),
            to: PathBuf::from("/proj/res/a.txt"),
            source: std::io::Error::new(std::io::ErrorKind::AlreadyExists, "exists"),
        };
        let message = err.to_string();
        assert!(message.contains("/data/a.txt"));
        assert!(message.contains("/proj/res/a.txt"));
    }
}
