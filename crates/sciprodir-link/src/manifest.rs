//! Manifest line formatting and append-only manifest output.
//!
//! A manifest line looks like
//!
//! ```text
//! |---|--> /res/sub/b.txt.................................2.0000 KB
//! ```
//!
//! The indentation token is repeated once per traversal depth, the path is
//! relative to the project root, and file lines are padded with dots up to
//! a fixed column before the size.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Component, Path};

use sciprodir_core::{LinkError, ManifestStyle, ManifestTarget, TreeNode};

use crate::size::human_readable_size;

/// Indentation token, repeated once per depth level.
pub const INDENT: &str = "|---";

/// Marker placed between the indentation and the path.
pub const MARKER: &str = "|--> ";

/// Column the size suffix of a file line is padded to.
pub const SIZE_COLUMN: usize = 60;

/// Padding character for file lines.
pub const FILL: char = '.';

/// What a manifest line records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// A linked file and its size.
    File { size: u64 },
    /// Descent into a subdirectory.
    Directory,
}

/// One formatted manifest entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestLine {
    /// Indentation depth.
    pub depth: usize,
    /// Path relative to the project root.
    pub display: String,
    /// File or directory entry.
    pub kind: LineKind,
}

impl ManifestLine {
    /// Line for a linked file.
    pub fn file(depth: usize, display: impl Into<String>, size: u64) -> Self {
        Self {
            depth,
            display: display.into(),
            kind: LineKind::File { size },
        }
    }

    /// Line announcing descent into a directory.
    pub fn directory(depth: usize, display: impl Into<String>) -> Self {
        Self {
            depth,
            display: display.into(),
            kind: LineKind::Directory,
        }
    }

    /// Line for a visited node, or `None` for symlinks and special files.
    pub fn from_node(node: &TreeNode, project_root: &Path) -> Option<Self> {
        let display = display_path(&node.destination, project_root);
        if let Some(size) = node.kind.size() {
            Some(Self::file(node.depth, display, size))
        } else if node.is_dir() {
            Some(Self::directory(node.depth, format!("{display}/")))
        } else {
            None
        }
    }

    /// Indentation, marker and path.
    fn prefix(&self) -> String {
        format!("{}{MARKER}{}", INDENT.repeat(self.depth), self.display)
    }

    /// Render the bare line.
    pub fn render(&self) -> String {
        let prefix = self.prefix();
        match self.kind {
            LineKind::File { size } => {
                let padding = SIZE_COLUMN.saturating_sub(prefix.chars().count());
                let fill: String = std::iter::repeat_n(FILL, padding).collect();
                format!("{prefix}{fill}{}", human_readable_size(size))
            }
            LineKind::Directory => prefix,
        }
    }

    /// Render the line decorated for the given style.
    pub fn render_styled(&self, style: ManifestStyle) -> String {
        match style {
            ManifestStyle::Plain => self.render(),
            ManifestStyle::Markdown => format!("``{}``<br>", self.render()),
        }
    }
}

/// Path of `path` relative to `project_root`, rendered with a leading `/`.
///
/// Paths outside the project root are rendered unchanged.
pub fn display_path(path: &Path, project_root: &Path) -> String {
    match path.strip_prefix(project_root) {
        Ok(relative) => {
            let parts: Vec<_> = relative
                .components()
                .filter_map(|c| match c {
                    Component::Normal(part) => Some(part.to_string_lossy()),
                    _ => None,
                })
                .collect();
            format!("/{}", parts.join("/"))
        }
        Err(_) => path.display().to_string(),
    }
}

/// Append `text` plus a newline to every destination file.
///
/// Each file is opened in append mode, written and closed again; no handle
/// outlives the call.
pub fn append_line<P: AsRef<Path>>(text: &str, destinations: &[P]) -> Result<(), LinkError> {
    for destination in destinations {
        let path = destination.as_ref();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| LinkError::write(path, e))?;
        writeln!(file, "{text}").map_err(|e| LinkError::write(path, e))?;
    }
    Ok(())
}

/// Fan-out writer for manifest lines.
#[derive(Debug, Clone)]
pub struct ManifestSink {
    targets: Vec<ManifestTarget>,
}

impl ManifestSink {
    /// Create a sink writing to the given targets.
    pub fn new(targets: Vec<ManifestTarget>) -> Self {
        Self { targets }
    }

    /// Append a manifest line to every target in that target's style.
    pub fn write_line(&self, line: &ManifestLine) -> Result<(), LinkError> {
        for target in &self.targets {
            append_line(&line.render_styled(target.style), &[&target.path])?;
        }
        Ok(())
    }
}
