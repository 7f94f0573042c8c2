//! Entries visited during a traversal.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use compact_str::CompactString;

/// Type of a visited entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Regular file.
    File {
        /// Size in bytes as reported by the filesystem.
        size: u64,
    },
    /// Directory.
    Directory,
    /// Symbolic link. Not followed.
    Symlink,
    /// Sockets, devices, fifos.
    Other,
}

impl NodeKind {
    /// Classify a directory entry. `size` is only used for regular files.
    pub fn from_file_type(file_type: std::fs::FileType, size: u64) -> Self {
        if file_type.is_symlink() {
            NodeKind::Symlink
        } else if file_type.is_dir() {
            NodeKind::Directory
        } else if file_type.is_file() {
            NodeKind::File { size }
        } else {
            NodeKind::Other
        }
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, NodeKind::Directory)
    }

    /// Check if this is a regular file.
    pub fn is_file(&self) -> bool {
        matches!(self, NodeKind::File { .. })
    }

    /// File size, `None` for anything but regular files.
    pub fn size(&self) -> Option<u64> {
        match self {
            NodeKind::File { size } => Some(*size),
            _ => None,
        }
    }
}

/// A filesystem entry paired with its mirrored destination.
///
/// Nodes only live for the duration of a traversal step.
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Entry name (last path component, lossily converted for display).
    pub name: CompactString,
    /// Path of the entry in the source tree.
    pub source: PathBuf,
    /// Path the entry is mirrored to.
    pub destination: PathBuf,
    /// Entry type.
    pub kind: NodeKind,
    /// Distance from the traversal root; entries of the root are at depth 0.
    pub depth: usize,
}

impl TreeNode {
    /// Create a node for `name` inside the given source and destination directories.
    pub fn new(
        name: impl AsRef<OsStr>,
        source_dir: &Path,
        destination_dir: &Path,
        kind: NodeKind,
        depth: usize,
    ) -> Self {
        let name = name.as_ref();
        Self {
            name: CompactString::from(name.to_string_lossy()),
            source: source_dir.join(name),
            destination: destination_dir.join(name),
            kind,
            depth,
        }
    }

    /// Check if this node is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    /// Check if this node is a file.
    pub fn is_file(&self) -> bool {
        self.kind.is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_paths() {
        let node = TreeNode::new(
            "a.txt",
            Path::new("/data"),
            Path::new("/proj/res"),
            NodeKind::File { size: 100 },
            0,
        );
        assert_eq!(node.source, PathBuf::from("/data/a.txt"));
        assert_eq!(node.destination, PathBuf::from("/proj/res/a.txt"));
        assert!(node.is_file());
        assert_eq!(node.kind.size(), Some(100));
    }

    #[test]
    fn test_node_kind_discrimination() {
        assert!(NodeKind::Directory.is_dir());
        assert!(!NodeKind::Directory.is_file());
        assert_eq!(NodeKind::Directory.size(), None);
        assert!(!NodeKind::Symlink.is_file());
        assert!(!NodeKind::Other.is_dir());
    }

    #[test]
    fn test_node_kind_from_file_type() {
        let temp = std::env::temp_dir();
        let file_type = std::fs::metadata(&temp).unwrap().file_type();
        assert_eq!(NodeKind::from_file_type(file_type, 0), NodeKind::Directory);
    }
}
