//! Aggregate statistics of a linking operation.

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// Totals accumulated while linking a tree.
///
/// `folders` counts the traversal root itself, so a successful traversal of
/// an existing root always reports at least one folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkResult {
    /// Number of linked files.
    pub files: u64,
    /// Number of visited directories, including the root.
    pub folders: u64,
    /// Sum of the sizes of all linked files.
    pub total_bytes: u64,
}

impl Default for LinkResult {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkResult {
    /// Result for a single directory with no files yet.
    pub fn new() -> Self {
        Self {
            files: 0,
            folders: 1,
            total_bytes: 0,
        }
    }

    /// Result with every counter at zero, the identity for [`merge`](Self::merge).
    pub fn empty() -> Self {
        Self {
            files: 0,
            folders: 0,
            total_bytes: 0,
        }
    }

    /// Record a linked file.
    pub fn record_file(&mut self, size: u64) {
        self.files += 1;
        self.total_bytes += size;
    }

    /// Fold a subdirectory's result into this one.
    pub fn merge(&mut self, other: LinkResult) {
        self.files += other.files;
        self.folders += other.folders;
        self.total_bytes += other.total_bytes;
    }
}

impl Add for LinkResult {
    type Output = LinkResult;

    fn add(mut self, rhs: LinkResult) -> LinkResult {
        self.merge(rhs);
        self
    }
}

impl AddAssign for LinkResult {
    fn add_assign(&mut self, rhs: LinkResult) {
        self.merge(rhs);
    }
}

impl Sum for LinkResult {
    fn sum<I: Iterator<Item = LinkResult>>(iter: I) -> Self {
        iter.fold(LinkResult::empty(), Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_result_new_counts_root() {
        let result = LinkResult::new();
        assert_eq!(result.files, 0);
        assert_eq!(result.folders, 1);
        assert_eq!(result.total_bytes, 0);
    }

    #[test]
    fn test_link_result_record_file() {
        let mut result = LinkResult::new();
        result.record_file(100);
        result.record_file(2048);

        assert_eq!(result.files, 2);
        assert_eq!(result.total_bytes, 2148);
        assert_eq!(result.folders, 1);
    }

    #[test]
    fn test_link_result_merge_siblings() {
        let mut root = LinkResult::new();
        root.record_file(10);

        let mut first = LinkResult::new();
        first.record_file(20);
        let mut second = LinkResult::new();
        second.record_file(30);
        second.record_file(40);

        root.merge(first);
        root += second;

        assert_eq!(root.files, 4);
        assert_eq!(root.folders, 3);
        assert_eq!(root.total_bytes, 100);
    }

    #[test]
    fn test_link_result_sum() {
        let total: LinkResult = [LinkResult::new(), LinkResult::new()].into_iter().sum();
        assert_eq!(total.folders, 2);

        let none: LinkResult = std::iter::empty().sum();
        assert_eq!(none, LinkResult::empty());
    }
}
