//! Link configuration types.

use std::path::{Path, PathBuf};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::LinkError;

/// How files are reproduced in the destination tree.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LinkMode {
    /// Create a hard link to the source file.
    #[default]
    HardLink,
    /// Copy the file contents.
    Copy,
}

/// Text decoration applied to manifest lines written to a target.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ManifestStyle {
    /// The bare manifest line.
    #[default]
    Plain,
    /// Wrapped in a Markdown code span followed by `<br>`.
    Markdown,
}

/// A file that receives manifest lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestTarget {
    /// Path of the manifest file. Lines are appended.
    pub path: PathBuf,
    /// How lines are decorated for this file.
    #[serde(default)]
    pub style: ManifestStyle,
}

impl ManifestTarget {
    /// Create a target with the given style.
    pub fn new(path: impl Into<PathBuf>, style: ManifestStyle) -> Self {
        Self {
            path: path.into(),
            style,
        }
    }

    /// Create a plain-text target.
    pub fn plain(path: impl Into<PathBuf>) -> Self {
        Self::new(path, ManifestStyle::Plain)
    }

    /// Create a Markdown target.
    pub fn markdown(path: impl Into<PathBuf>) -> Self {
        Self::new(path, ManifestStyle::Markdown)
    }
}

/// Configuration for a tree linking operation.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct LinkConfig {
    /// Existing directory whose contents are mirrored.
    pub source: PathBuf,

    /// Directory receiving the mirrored tree. Created when missing.
    pub destination: PathBuf,

    /// Prefix stripped from destination paths in manifest lines.
    pub project_root: PathBuf,

    /// Indentation depth of the source root's entries.
    #[builder(default = "0")]
    #[serde(default)]
    pub depth: usize,

    /// Hard link or copy.
    #[builder(default)]
    #[serde(default)]
    pub mode: LinkMode,

    /// Files receiving manifest lines.
    #[builder(default)]
    #[serde(default)]
    pub manifests: Vec<ManifestTarget>,
}

impl LinkConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        for (name, value) in [("Source", &self.source), ("Destination", &self.destination)] {
            match value {
                Some(path) if path.as_os_str().is_empty() => {
                    return Err(format!("{name} path cannot be empty"));
                }
                Some(_) => {}
                None => return Err(format!("{name} path is required")),
            }
        }
        if self.project_root.is_none() {
            return Err("Project root is required".to_string());
        }
        Ok(())
    }
}

impl LinkConfig {
    /// Create a new link config builder.
    pub fn builder() -> LinkConfigBuilder {
        LinkConfigBuilder::default()
    }

    /// Create a hard-link config without manifest targets.
    pub fn new(
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
        project_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            project_root: project_root.into(),
            depth: 0,
            mode: LinkMode::HardLink,
            manifests: Vec::new(),
        }
    }

    /// Add a manifest target.
    pub fn with_manifest(mut self, target: ManifestTarget) -> Self {
        self.manifests.push(target);
        self
    }

    /// Set the link mode.
    pub fn with_mode(mut self, mode: LinkMode) -> Self {
        self.mode = mode;
        self
    }

    /// Whether `path` lies under the configured project root.
    pub fn is_inside_project(&self, path: &Path) -> bool {
        path.starts_with(&self.project_root)
    }

    /// Reject a destination equal to or below the source root.
    ///
    /// Both paths are made absolute against the current directory first;
    /// symbolic links are not resolved.
    pub fn check_destination(&self) -> Result<(), LinkError> {
        let source = std::path::absolute(&self.source).map_err(|e| LinkError::io(&self.source, e))?;
        let destination = std::path::absolute(&self.destination)
            .map_err(|e| LinkError::io(&self.destination, e))?;
        if destination.starts_with(&source) {
            return Err(LinkError::DestinationInsideSource {
                source_root: source,
                destination,
            });
        }
        Ok(())
    }
}
