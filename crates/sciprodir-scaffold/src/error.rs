//! Error types for project scaffolding.

use std::path::PathBuf;

use sciprodir_core::LinkError;
use thiserror::Error;

use crate::config::DocFormat;

/// Errors that abort project creation or plot insertion.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The project directory is already present.
    #[error("Path {path} already exists")]
    ProjectExists { path: PathBuf },

    /// The project to insert plots into does not exist.
    #[error("Path {path} does not exist")]
    ProjectNotFound { path: PathBuf },

    /// The resource directory to link does not exist.
    #[error("Path {path} does not exist")]
    DataNotFound { path: PathBuf },

    /// Both a single data link and train/validation data were requested.
    #[error("Cannot use --link and --machine-learning together, please choose only one of them")]
    ConflictingDataSources,

    /// The training data directory does not exist.
    #[error("Cannot find path to training data: {path}")]
    TrainDataNotFound { path: PathBuf },

    /// The validation data directory does not exist.
    #[error("Cannot find path to validation data: {path}")]
    ValidationDataNotFound { path: PathBuf },

    /// Gitignore entries were given for a project without git.
    #[error("Can use --gitignore only if --git is used")]
    GitignoreWithoutGit,

    /// The ORCID fails the format or checksum test.
    #[error("ORCID {orcid} does not match standards")]
    InvalidOrcid { orcid: String },

    /// The git URL has too few path segments to name the project.
    #[error("Cannot derive project name from git URL {url}")]
    InvalidGitUrl { url: String },

    /// The document plots should be added to is missing.
    #[error("File {path} does not exist")]
    DocumentNotFound { path: PathBuf, format: DocFormat },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Linking resource data failed.
    #[error(transparent)]
    Link(#[from] LinkError),

    /// A git operation failed.
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl ScaffoldError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Process exit code reported for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::DataNotFound { .. } => 2,
            Self::ConflictingDataSources => 3,
            Self::TrainDataNotFound { .. } => 4,
            Self::ValidationDataNotFound { .. } => 5,
            Self::GitignoreWithoutGit => 6,
            Self::InvalidOrcid { .. } => 7,
            Self::DocumentNotFound { format, .. } => match format {
                DocFormat::Latex => 2,
                DocFormat::Markdown => 3,
            },
            _ => 1,
        }
    }
}

/// Result alias for scaffolding operations.
pub type Result<T> = std::result::Result<T, ScaffoldError>;
