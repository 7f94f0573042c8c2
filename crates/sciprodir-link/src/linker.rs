//! Hard-link tree mirroring.

use std::fs;
use std::path::{Path, PathBuf};

use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use sciprodir_core::{
    LinkConfig, LinkError, LinkMode, LinkResult, ManifestTarget, NodeKind, TreeNode,
};

use crate::manifest::{ManifestLine, ManifestSink};
use crate::progress::{LinkProgress, ProgressTracker};

/// Mirrors a source directory into a destination directory with hard links,
/// writing a manifest line for every file and subdirectory on the way.
///
/// Traversal is depth-first and single-threaded. Entries are processed in the
/// order the filesystem lists them: files of a directory first, then its
/// subdirectories. That order is platform-dependent and not sorted.
///
/// Directories still to be visited are kept on an explicit stack, so deep
/// trees do not grow the call stack. Symbolic links are never followed; they
/// and other special files are skipped with a warning.
pub struct TreeLinker {
    progress_tx: broadcast::Sender<LinkProgress>,
}

/// A directory waiting on the frontier.
struct Frame {
    source: PathBuf,
    destination: PathBuf,
    /// Depth of the entries inside this directory.
    depth: usize,
    /// Line written right before the directory is entered.
    announce: Option<ManifestLine>,
}

impl TreeLinker {
    /// Create a new linker.
    pub fn new() -> Self {
        let (progress_tx, _) = broadcast::channel(100);
        Self { progress_tx }
    }

    /// Subscribe to link progress updates, sent after every linked file.
    pub fn subscribe(&self) -> broadcast::Receiver<LinkProgress> {
        self.progress_tx.subscribe()
    }

    /// Link every file under `config.source` into `config.destination`.
    ///
    /// Fails before touching the filesystem if the source root is missing,
    /// not a directory, or contains the destination. Any later failure aborts
    /// the traversal; links and manifest lines written up to that point are
    /// kept.
    pub fn link(&self, config: &LinkConfig) -> Result<LinkResult, LinkError> {
        let metadata =
            fs::metadata(&config.source).map_err(|e| LinkError::io(&config.source, e))?;
        if !metadata.is_dir() {
            return Err(LinkError::NotADirectory {
                path: config.source.clone(),
            });
        }
        config.check_destination()?;

        if !config.is_inside_project(&config.destination) {
            warn!(
                destination = %config.destination.display(),
                project_root = %config.project_root.display(),
                "Destination is outside the project root, manifest shows full paths"
            );
        }

        let sink = ManifestSink::new(config.manifests.clone());
        let mut tracker = ProgressTracker::new();
        let mut frontier = vec![Frame {
            source: config.source.clone(),
            destination: config.destination.clone(),
            depth: config.depth,
            announce: None,
        }];

        while let Some(frame) = frontier.pop() {
            if let Some(line) = &frame.announce {
                sink.write_line(line)?;
            }
            self.visit(frame, config, &sink, &mut tracker, &mut frontier)?;
        }

        let result = tracker.totals();
        info!(
            source = %config.source.display(),
            files = result.files,
            folders = result.folders,
            bytes = result.total_bytes,
            "Linked tree"
        );
        Ok(result)
    }

    /// Link the files of one directory and queue its subdirectories.
    fn visit(
        &self,
        frame: Frame,
        config: &LinkConfig,
        sink: &ManifestSink,
        tracker: &mut ProgressTracker,
        frontier: &mut Vec<Frame>,
    ) -> Result<(), LinkError> {
        ensure_dir(&frame.destination)?;
        tracker.record_dir();

        let mut subdirs = Vec::new();
        for mut node in read_entries(&frame)? {
            let kind = node.kind;
            match kind {
                NodeKind::File { .. } => {
                    let size = transfer(&node, config.mode)?;
                    node.kind = NodeKind::File { size };

                    if let Some(line) = ManifestLine::from_node(&node, &config.project_root) {
                        sink.write_line(&line)?;
                    }
                    info!(
                        from = %node.source.display(),
                        to = %node.destination.display(),
                        mode = %config.mode,
                        "Linked file"
                    );

                    tracker.record_file(node.destination, size);
                    let _ = self.progress_tx.send(tracker.snapshot());
                }
                NodeKind::Directory => subdirs.push(node),
                NodeKind::Symlink | NodeKind::Other => {
                    warn!(
                        path = %node.source.display(),
                        "Skipping entry that is not a regular file or directory"
                    );
                }
            }
        }

        // Reversed so the first listed subdirectory is visited next.
        for node in subdirs.into_iter().rev() {
            let announce = ManifestLine::from_node(&node, &config.project_root);
            frontier.push(Frame {
                depth: node.depth + 1,
                source: node.source,
                destination: node.destination,
                announce,
            });
        }

        Ok(())
    }
}

impl Default for TreeLinker {
    fn default() -> Self {
        Self::new()
    }
}

/// Hard-link `source` into `destination` and write manifest lines to `manifests`.
///
/// Shorthand for [`TreeLinker::link`] with a default configuration.
pub fn link_tree(
    source: impl Into<PathBuf>,
    destination: impl Into<PathBuf>,
    project_root: impl Into<PathBuf>,
    manifests: Vec<ManifestTarget>,
) -> Result<LinkResult, LinkError> {
    let mut config = LinkConfig::new(source, destination, project_root);
    config.manifests = manifests;
    TreeLinker::new().link(&config)
}

/// Create `path` and any missing parents.
fn ensure_dir(path: &Path) -> Result<(), LinkError> {
    if path.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(path).map_err(|source| LinkError::DirectoryCreation {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "Created directory");
    Ok(())
}

/// List the immediate entries of a frame's source directory.
fn read_entries(frame: &Frame) -> Result<Vec<TreeNode>, LinkError> {
    let read_err = |source| LinkError::ReadDir {
        path: frame.source.clone(),
        source,
    };

    let mut nodes = Vec::new();
    for entry in fs::read_dir(&frame.source).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let file_type = entry.file_type().map_err(read_err)?;
        let node = TreeNode::new(
            entry.file_name(),
            &frame.source,
            &frame.destination,
            NodeKind::from_file_type(file_type, 0),
            frame.depth,
        );
        debug!(path = %node.source.display(), kind = ?node.kind, "Visiting entry");
        nodes.push(node);
    }
    Ok(nodes)
}

/// Reproduce one file at its destination and return its size.
fn transfer(node: &TreeNode, mode: LinkMode) -> Result<u64, LinkError> {
    let link_err = |source| LinkError::LinkCreation {
        from: node.source.clone(),
        to: node.destination.clone(),
        source,
    };

    match mode {
        LinkMode::HardLink => {
            fs::hard_link(&node.source, &node.destination).map_err(link_err)?;
            fs::metadata(&node.destination)
                .map(|m| m.len())
                .map_err(link_err)
        }
        LinkMode::Copy => {
            if fs::symlink_metadata(&node.destination).is_ok() {
                return Err(link_err(std::io::Error::new(
                    std::io::ErrorKind::AlreadyExists,
                    "destination already exists",
                )));
            }
            fs::copy(&node.source, &node.destination).map_err(link_err)
        }
    }
}
