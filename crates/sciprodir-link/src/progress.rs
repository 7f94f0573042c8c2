//! Link progress reporting.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use sciprodir_core::LinkResult;

/// Progress information during a linking operation.
#[derive(Debug, Clone)]
pub struct LinkProgress {
    /// Number of files linked so far.
    pub files_linked: u64,
    /// Number of directories entered so far, including the root.
    pub dirs_visited: u64,
    /// Total bytes linked so far.
    pub bytes_linked: u64,
    /// Destination of the most recent link.
    pub current_path: PathBuf,
    /// Time elapsed since linking started.
    pub elapsed: Duration,
}

impl LinkProgress {
    /// Create initial progress state.
    pub fn new() -> Self {
        Self {
            files_linked: 0,
            dirs_visited: 0,
            bytes_linked: 0,
            current_path: PathBuf::new(),
            elapsed: Duration::ZERO,
        }
    }

    /// Calculate link rate in files per second.
    pub fn files_per_second(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.files_linked as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }
}

impl Default for LinkProgress {
    fn default() -> Self {
        Self::new()
    }
}

/// Running totals of a traversal with timing.
#[derive(Debug)]
pub(crate) struct ProgressTracker {
    start_time: Instant,
    totals: LinkResult,
    current_path: PathBuf,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            totals: LinkResult::empty(),
            current_path: PathBuf::new(),
        }
    }

    pub fn record_dir(&mut self) {
        self.totals += LinkResult::new();
    }

    pub fn record_file(&mut self, path: PathBuf, size: u64) {
        self.totals.record_file(size);
        self.current_path = path;
    }

    pub fn totals(&self) -> LinkResult {
        self.totals
    }

    pub fn snapshot(&self) -> LinkProgress {
        LinkProgress {
            files_linked: self.totals.files,
            dirs_visited: self.totals.folders,
            bytes_linked: self.totals.total_bytes,
            current_path: self.current_path.clone(),
            elapsed: self.start_time.elapsed(),
        }
    }
}
