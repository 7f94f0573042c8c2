//! Tree linking engine for sciprodir.
//!
//! This crate mirrors an external resource directory into a project with hard
//! links and writes a human-readable manifest of what was linked.
//!
//! # Example
//!
//! ```rust,no_run
//! use sciprodir_link::{LinkConfig, ManifestTarget, TreeLinker, human_readable_size};
//!
//! let config = LinkConfig::new("/data/run42", "proj/res", "proj")
//!     .with_manifest(ManifestTarget::markdown("proj/README.md"));
//! let result = TreeLinker::new().link(&config).unwrap();
//!
//! println!(
//!     "Linked {} files in {} folders with a total datasize of {}.",
//!     result.files,
//!     result.folders,
//!     human_readable_size(result.total_bytes)
//! );
//! ```
//!
//! # Manifest
//!
//! Every linked file and every entered subdirectory produces one line,
//! appended to each manifest target as soon as it is known. A failed
//! traversal therefore leaves a manifest describing exactly the work that
//! was done.

mod linker;
mod manifest;
mod progress;
mod size;

pub use linker::{TreeLinker, link_tree};
pub use manifest::{
    FILL, INDENT, LineKind, MARKER, ManifestLine, ManifestSink, SIZE_COLUMN, append_line,
    display_path,
};
pub use progress::LinkProgress;
pub use size::human_readable_size;

// Re-export core types for convenience
pub use sciprodir_core::{
    LinkConfig, LinkError, LinkMode, LinkResult, ManifestStyle, ManifestTarget, NodeKind,
    TreeNode,
};
