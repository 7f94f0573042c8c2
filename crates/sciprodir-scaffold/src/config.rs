//! Project configuration types.

use std::path::{Path, PathBuf};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use sciprodir_core::LinkMode;

use crate::error::{Result, ScaffoldError};
use crate::git::GitRemote;

/// Documentation format targeted by plot insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DocFormat {
    /// `README.md` at the project root.
    Markdown,
    /// `doc/attachments.tex`.
    Latex,
}

impl DocFormat {
    /// Document inside the project that receives plots.
    pub fn document(&self, project_dir: &Path) -> PathBuf {
        match self {
            DocFormat::Markdown => project_dir.join("README.md"),
            DocFormat::Latex => project_dir.join("doc").join("attachments.tex"),
        }
    }
}

/// Where the project directory comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectSource {
    /// A new local directory at this path.
    Local(PathBuf),
    /// A clone of an existing (empty) remote repository.
    Git(String),
}

/// Resource data linked into `res/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    /// No data.
    #[default]
    None,
    /// One directory mirrored into `res/`.
    Link(PathBuf),
    /// Training and validation data mirrored into `res/traindata` and `res/valdata`.
    MachineLearning { train: PathBuf, validation: PathBuf },
}

impl DataSource {
    /// Combine the mutually exclusive command line options.
    pub fn from_options(
        link: Option<PathBuf>,
        machine_learning: Option<(PathBuf, PathBuf)>,
    ) -> Result<Self> {
        match (link, machine_learning) {
            (Some(_), Some(_)) => Err(ScaffoldError::ConflictingDataSources),
            (Some(path), None) => Ok(DataSource::Link(path)),
            (None, Some((train, validation))) => {
                Ok(DataSource::MachineLearning { train, validation })
            }
            (None, None) => Ok(DataSource::None),
        }
    }
}

/// Configuration for creating a project.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ProjectConfig {
    /// Local path or git URL of the project.
    pub project: ProjectSource,

    /// Directory relative project paths and clones are resolved against.
    #[builder(default = "PathBuf::from(\".\")")]
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,

    /// Short project description for the LaTeX title page.
    #[builder(default)]
    #[serde(default)]
    pub description: String,

    /// Resource data to link.
    #[builder(default)]
    #[serde(default)]
    pub data: DataSource,

    /// Hard link or copy the resource data.
    #[builder(default)]
    #[serde(default)]
    pub link_mode: LinkMode,

    /// Entries written to `.gitignore` (git projects only).
    #[builder(default)]
    #[serde(default)]
    pub gitignore: Vec<String>,

    /// Author name; the login name when unset.
    #[builder(default)]
    #[serde(default)]
    pub author: Option<String>,

    /// Supervisor name.
    #[builder(default)]
    #[serde(default)]
    pub supervisor: Option<String>,

    /// Organization name.
    #[builder(default)]
    #[serde(default)]
    pub organization: Option<String>,

    /// ORCID of the author.
    #[builder(default)]
    #[serde(default)]
    pub orcid: Option<String>,

    /// Generate LaTeX documentation stubs.
    #[builder(default = "false")]
    #[serde(default)]
    pub latex: bool,

    /// Append host hardware specs to the README.
    #[builder(default = "false")]
    #[serde(default)]
    pub specs: bool,

    /// Push the initial commit to the remote (git projects only).
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub push: bool,

    /// Command line recorded in the README files.
    #[builder(default)]
    #[serde(default)]
    pub command: String,
}

fn default_base_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_true() -> bool {
    true
}

impl ProjectConfigBuilder {
    fn validate(&self) -> std::result::Result<(), String> {
        match &self.project {
            Some(ProjectSource::Local(path)) if path.as_os_str().is_empty() => {
                Err("Project path cannot be empty".to_string())
            }
            Some(ProjectSource::Git(url)) if url.trim().is_empty() => {
                Err("Git URL cannot be empty".to_string())
            }
            Some(_) => Ok(()),
            None => Err("Project path or git URL is required".to_string()),
        }
    }
}

impl ProjectConfig {
    /// Create a new project config builder.
    pub fn builder() -> ProjectConfigBuilder {
        ProjectConfigBuilder::default()
    }

    /// Create a plain local project config.
    pub fn local(path: impl Into<PathBuf>) -> Self {
        Self {
            project: ProjectSource::Local(path.into()),
            base_dir: default_base_dir(),
            description: String::new(),
            data: DataSource::None,
            link_mode: LinkMode::HardLink,
            gitignore: Vec::new(),
            author: None,
            supervisor: None,
            organization: None,
            orcid: None,
            latex: false,
            specs: false,
            push: true,
            command: String::new(),
        }
    }

    /// Whether the project is backed by a git remote.
    pub fn uses_git(&self) -> bool {
        matches!(self.project, ProjectSource::Git(_))
    }

    /// Project directory and display name.
    ///
    /// Spaces in the directory name become underscores; underscores in the
    /// display name become spaces.
    pub fn resolve_project(&self) -> Result<(PathBuf, String)> {
        let last_segment = match &self.project {
            ProjectSource::Local(path) => {
                let dir = PathBuf::from(path.to_string_lossy().replace(' ', "_"));
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().replace('_', " "))
                    .unwrap_or_else(|| path.to_string_lossy().to_string());
                return Ok((self.base_dir.join(dir), name));
            }
            ProjectSource::Git(url) => GitRemote::parse(url)?.repository,
        };
        Ok((
            self.base_dir.join(last_segment.replace(' ', "_")),
            last_segment.replace('_', " "),
        ))
    }

    /// Configured author or the current login name.
    pub fn author_name(&self) -> String {
        self.author
            .clone()
            .filter(|a| !a.trim().is_empty())
            .or_else(|| std::env::var("USER").ok())
            .or_else(|| std::env::var("USERNAME").ok())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ProjectConfig::builder()
            .project(ProjectSource::Local(PathBuf::from("work/my project")))
            .latex(true)
            .orcid(Some("0000-0002-1825-0097".to_string()))
            .build()
            .unwrap();

        assert!(config.latex);
        assert!(!config.specs);
        assert!(config.push);
        assert_eq!(config.base_dir, PathBuf::from("."));
        assert_eq!(config.data, DataSource::None);
        assert!(!config.uses_git());
    }

    #[test]
    fn test_config_builder_requires_project() {
        let err = ProjectConfig::builder().build().unwrap_err();
        assert!(err.to_string().contains("required"));

        let err = ProjectConfig::builder()
            .project(ProjectSource::Git("  ".to_string()))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_resolve_local_project() {
        let mut config = ProjectConfig::local("work/my_cool project");
        config.base_dir = PathBuf::from("/home/me");

        let (dir, name) = config.resolve_project().unwrap();
        assert_eq!(dir, PathBuf::from("/home/me/work/my_cool_project"));
        assert_eq!(name, "my cool project");
    }

    #[test]
    fn test_resolve_git_project() {
        let mut config = ProjectConfig::local("unused");
        config.project = ProjectSource::Git("https://github.com/someone/deep_learning.git".into());
        config.base_dir = PathBuf::from("/home/me");

        let (dir, name) = config.resolve_project().unwrap();
        assert_eq!(dir, PathBuf::from("/home/me/deep_learning"));
        assert_eq!(name, "deep learning");
        assert!(config.uses_git());
    }

    #[test]
    fn test_data_source_from_options() {
        assert_eq!(DataSource::from_options(None, None).unwrap(), DataSource::None);
        assert_eq!(
            DataSource::from_options(Some(PathBuf::from("/data")), None).unwrap(),
            DataSource::Link(PathBuf::from("/data"))
        );
        assert!(matches!(
            DataSource::from_options(
                Some(PathBuf::from("/data")),
                Some((PathBuf::from("/t"), PathBuf::from("/v")))
            ),
            Err(ScaffoldError::ConflictingDataSources)
        ));
    }

    #[test]
    fn test_author_name_prefers_config() {
        let mut config = ProjectConfig::local("p");
        config.author = Some("Ada Lovelace".into());
        assert_eq!(config.author_name(), "Ada Lovelace");
    }

    #[test]
    fn test_doc_format_document() {
        let project = Path::new("/proj");
        assert_eq!(DocFormat::Markdown.document(project), PathBuf::from("/proj/README.md"));
        assert_eq!(
            DocFormat::Latex.document(project),
            PathBuf::from("/proj/doc/attachments.tex")
        );
        assert_eq!("latex".parse::<DocFormat>().unwrap(), DocFormat::Latex);
    }
}
