//! End-to-end project creation.

use std::fs;
use std::path::{Path, PathBuf};

use git2::Repository;
use serde::Serialize;
use tracing::{info, warn};

use sciprodir_core::{LinkConfig, LinkResult, ManifestTarget};
use sciprodir_link::{TreeLinker, human_readable_size};

use crate::config::{DataSource, ProjectConfig, ProjectSource};
use crate::error::{Result, ScaffoldError};
use crate::git::{self, GitRemote};
use crate::latex::{LatexMeta, write_latex};
use crate::layout::create_skeleton;
use crate::orcid::is_orcid;
use crate::readme::{
    Readme, Stamp, TOOL_NAME, TOOL_VERSION, directory_description, link_summary,
};
use crate::specs::collect_specs;

/// One data root mirrored into `res/`.
#[derive(Debug, Clone, Serialize)]
pub struct LinkedData {
    /// `traindata` or `validationdata` in machine-learning mode.
    pub label: Option<String>,
    /// Absolute source directory.
    pub source: PathBuf,
    /// Directory inside the project the data was linked into.
    pub destination: PathBuf,
    /// Link totals.
    pub result: LinkResult,
}

/// What `create_project` produced.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectReport {
    /// Project directory.
    pub project_dir: PathBuf,
    /// Display name of the project.
    pub project_name: String,
    /// Project-relative README files of the skeleton.
    pub readmes: Vec<PathBuf>,
    /// LaTeX files written into `doc/`.
    pub latex_files: Vec<PathBuf>,
    /// Linked data roots in link order.
    pub data: Vec<LinkedData>,
    /// Whether the initial commit was pushed.
    pub pushed: bool,
}

impl ProjectReport {
    /// Totals over every linked data root.
    pub fn data_totals(&self) -> LinkResult {
        self.data.iter().map(|d| d.result).sum()
    }
}

/// Check every precondition that can be decided before touching the disk.
fn validate(config: &ProjectConfig, project_dir: &Path) -> Result<()> {
    if project_dir.exists() {
        return Err(ScaffoldError::ProjectExists {
            path: project_dir.to_path_buf(),
        });
    }

    let res = project_dir.join("res");
    match &config.data {
        DataSource::None => {}
        DataSource::Link(path) => {
            if !path.exists() {
                return Err(ScaffoldError::DataNotFound { path: path.clone() });
            }
            LinkConfig::new(path, &res, project_dir).check_destination()?;
        }
        DataSource::MachineLearning { train, validation } => {
            if !train.exists() {
                return Err(ScaffoldError::TrainDataNotFound { path: train.clone() });
            }
            if !validation.exists() {
                return Err(ScaffoldError::ValidationDataNotFound {
                    path: validation.clone(),
                });
            }
            LinkConfig::new(train, res.join("traindata"), project_dir).check_destination()?;
            LinkConfig::new(validation, res.join("valdata"), project_dir).check_destination()?;
        }
    }

    if !config.gitignore.is_empty() && !config.uses_git() {
        return Err(ScaffoldError::GitignoreWithoutGit);
    }

    if let Some(orcid) = config.orcid.as_deref().filter(|o| !o.is_empty()) {
        if !is_orcid(orcid) {
            return Err(ScaffoldError::InvalidOrcid {
                orcid: orcid.to_string(),
            });
        }
    }

    Ok(())
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|e| ScaffoldError::io(path, e))
}

/// Link one data root into `destination` and document it in the README.
fn link_data(
    linker: &TreeLinker,
    readme: &Readme,
    config: &ProjectConfig,
    project_dir: &Path,
    source: &Path,
    destination: PathBuf,
    label: Option<&str>,
) -> Result<LinkedData> {
    let source = absolute(source)?;
    readme.md(&format!("Resources/Data linked from<br>\n{}<br>", source.display()))?;

    let link_config = LinkConfig::new(&source, &destination, project_dir)
        .with_mode(config.link_mode)
        .with_manifest(ManifestTarget::markdown(&readme.markdown));
    let result = linker.link(&link_config)?;

    info!(
        label = label.unwrap_or("data"),
        files = result.files,
        folders = result.folders,
        size = %human_readable_size(result.total_bytes),
        "Linked resources"
    );

    let summary = link_summary(label, &result);
    match label {
        Some(_) => readme.md(&format!("{summary}<br>\n"))?,
        None => readme.md(&summary)?,
    }

    Ok(LinkedData {
        label: label.map(str::to_string),
        source,
        destination,
        result,
    })
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| ScaffoldError::io(path, e))?;
    info!(path = %path.display(), "Created directory");
    Ok(())
}

/// Create a project directory with skeleton, README files, optional LaTeX
/// stubs, optional git setup and linked resource data.
///
/// All argument checks run before anything is written; a failing check
/// leaves the filesystem untouched.
pub fn create_project(config: &ProjectConfig) -> Result<ProjectReport> {
    let (project_dir, project_name) = config.resolve_project()?;
    let remote = match &config.project {
        ProjectSource::Git(url) => Some(GitRemote::parse(url)?),
        ProjectSource::Local(_) => None,
    };
    validate(config, &project_dir)?;

    let author = config.author_name();
    let stamp = Stamp::now(&author);

    let repo: Option<Repository> = match &remote {
        Some(remote) => {
            info!(url = %remote.url, "Using git for version control");
            let repo = git::clone(&remote.url, &project_dir)?;
            git::write_gitignore(&project_dir, &config.gitignore)?;
            Some(repo)
        }
        None => {
            create_dir(&project_dir)?;
            None
        }
    };
    info!(name = %project_name, path = %project_dir.display(), "Created project directory");

    let readmes = create_skeleton(&project_dir, &stamp)?;

    let readme = Readme::new(&project_dir);
    let cwd = std::env::current_dir().map_err(|e| ScaffoldError::io(".", e))?;
    readme.write_header(&project_name, &stamp, &cwd, &config.command)?;

    let latex_files = if config.latex {
        let meta = LatexMeta {
            project_name: project_name.clone(),
            description: config.description.clone(),
            author: author.clone(),
            organization: config.organization.clone(),
            orcid: config.orcid.clone(),
            supervisor: config.supervisor.clone(),
        };
        write_latex(&project_dir.join("doc"), &meta)?
    } else {
        Vec::new()
    };

    if let Some(repo) = &repo {
        git::commit_files(
            repo,
            &readmes,
            &format!("initial commit of {project_name} with {TOOL_NAME} {TOOL_VERSION}"),
            &author,
        )?;
    }

    if let Some(remote) = &remote {
        readme.sh(&format!("# {}", remote.description()))?;
        readme.md(&format!("-    {}", remote.description()))?;
    }

    readme.md(&format!("-    Created with {TOOL_NAME} version {TOOL_VERSION}."))?;
    readme.md(&format!("<pre>\n{}\n</pre>", config.command))?;
    if let Some(orcid) = config.orcid.as_deref().filter(|o| !o.is_empty()) {
        readme.md(&format!("-    ORCID of the author: https://orcid.org/{orcid}"))?;
    }
    if let Some(supervisor) = config.supervisor.as_deref().filter(|s| !s.is_empty()) {
        readme.md(&format!("-    Project supervised by: {supervisor}"))?;
    }
    if let Some(organization) = config.organization.as_deref().filter(|o| !o.is_empty()) {
        readme.md(&format!("-    Project developed at: {organization}"))?;
    }

    readme.md(&directory_description(&project_name))?;

    if config.specs {
        readme.md(&format!("\n{}", collect_specs()))?;
    }

    let linker = TreeLinker::new();
    let res = project_dir.join("res");
    let mut data = Vec::new();
    match &config.data {
        DataSource::None => {}
        DataSource::Link(source) => {
            readme.md("\n# Data to be analyzed:")?;
            data.push(link_data(&linker, &readme, config, &project_dir, source, res, None)?);
        }
        DataSource::MachineLearning { train, validation } => {
            let train_dir = res.join("traindata");
            let validation_dir = res.join("valdata");
            create_dir(&train_dir)?;
            create_dir(&validation_dir)?;
            readme.md("\n# Data to be analyzed:")?;
            data.push(link_data(
                &linker,
                &readme,
                config,
                &project_dir,
                train,
                train_dir,
                Some("traindata"),
            )?);
            data.push(link_data(
                &linker,
                &readme,
                config,
                &project_dir,
                validation,
                validation_dir,
                Some("validationdata"),
            )?);
        }
    }

    let pushed = match &repo {
        Some(repo) if config.push => {
            git::push(repo)?;
            true
        }
        Some(_) => {
            warn!("Skipping push to origin");
            false
        }
        None => false,
    };

    readme.md(&format!("# Protocol\n## {}", stamp.date()))?;
    info!(
        markdown = %readme.markdown.display(),
        shell = %readme.shell.display(),
        "Created project readmes"
    );

    Ok(ProjectReport {
        project_dir,
        project_name,
        readmes,
        latex_files,
        data,
        pushed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sciprodir_core::LinkError;
    use tempfile::TempDir;

    fn config_in(base: &Path, name: &str) -> ProjectConfig {
        let mut config = ProjectConfig::local(name);
        config.base_dir = base.to_path_buf();
        config.author = Some("tester".to_string());
        config
    }

    #[test]
    fn test_validate_existing_project() {
        let base = TempDir::new().unwrap();
        fs::create_dir(base.path().join("taken")).unwrap();
        let err = create_project(&config_in(base.path(), "taken")).unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_validate_order_leaves_disk_untouched() {
        let base = TempDir::new().unwrap();
        let mut config = config_in(base.path(), "proj");
        config.data = DataSource::MachineLearning {
            train: base.path().join("train"),
            validation: base.path().join("val"),
        };
        fs::create_dir(base.path().join("train")).unwrap();

        let err = create_project(&config).unwrap_err();
        assert_eq!(err.exit_code(), 5);
        assert!(!base.path().join("proj").exists());
    }

    #[test]
    fn test_validate_data_containing_project() {
        let base = TempDir::new().unwrap();
        let mut config = config_in(base.path(), "proj");
        config.data = DataSource::Link(base.path().to_path_buf());

        let err = create_project(&config).unwrap_err();
        assert!(matches!(
            err,
            ScaffoldError::Link(LinkError::DestinationInsideSource { .. })
        ));
        assert_eq!(err.exit_code(), 1);
        assert!(!base.path().join("proj").exists());
    }

    #[test]
    fn test_validate_gitignore_and_orcid() {
        let base = TempDir::new().unwrap();
        let mut config = config_in(base.path(), "proj");
        config.gitignore = vec!["*.log".to_string()];
        assert_eq!(create_project(&config).unwrap_err().exit_code(), 6);

        let mut config = config_in(base.path(), "proj");
        config.orcid = Some("0000-0002-1825-0098".to_string());
        assert_eq!(create_project(&config).unwrap_err().exit_code(), 7);
        assert!(!base.path().join("proj").exists());
    }

    #[test]
    fn test_data_totals() {
        let report = ProjectReport {
            project_dir: PathBuf::from("p"),
            project_name: "p".into(),
            readmes: Vec::new(),
            latex_files: Vec::new(),
            data: vec![
                LinkedData {
                    label: Some("traindata".into()),
                    source: PathBuf::from("/t"),
                    destination: PathBuf::from("p/res/traindata"),
                    result: LinkResult { files: 2, folders: 1, total_bytes: 10 },
                },
                LinkedData {
                    label: Some("validationdata".into()),
                    source: PathBuf::from("/v"),
                    destination: PathBuf::from("p/res/valdata"),
                    result: LinkResult { files: 1, folders: 2, total_bytes: 5 },
                },
            ],
            pushed: false,
        };
        assert_eq!(
            report.data_totals(),
            LinkResult { files: 3, folders: 3, total_bytes: 15 }
        );
    }
}
