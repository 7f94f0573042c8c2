//! Core types for sciprodir.
//!
//! This crate provides the data structures shared by the linking engine and
//! the project scaffolder: the aggregate [`LinkResult`], the transient
//! [`TreeNode`] visited during traversal, link configuration and errors.

mod config;
mod error;
mod node;
mod stats;

pub use config::{LinkConfig, LinkConfigBuilder, LinkMode, ManifestStyle, ManifestTarget};
pub use error::LinkError;
pub use node::{NodeKind, TreeNode};
pub use stats::LinkResult;
