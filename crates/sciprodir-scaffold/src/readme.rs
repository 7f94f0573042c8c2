//! README text for generated projects.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use sciprodir_core::LinkResult;
use sciprodir_link::{append_line, human_readable_size};

use crate::error::Result;

/// Name the tool signs generated files with.
pub const TOOL_NAME: &str = "sciprodir";

/// Version recorded in generated files.
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Who created the project and when.
#[derive(Debug, Clone)]
pub struct Stamp {
    /// Author name.
    pub author: String,
    /// Creation time.
    pub created: DateTime<Local>,
}

impl Stamp {
    /// Stamp for `author` at the current local time.
    pub fn now(author: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            created: Local::now(),
        }
    }

    /// Creation time as `YYYY.MM.DD HH:MM:SS`.
    pub fn time(&self) -> String {
        self.created.format("%Y.%m.%d %H:%M:%S").to_string()
    }

    /// Creation date as `YYYY.MM.DD`.
    pub fn date(&self) -> String {
        self.created.format("%Y.%m.%d").to_string()
    }
}

/// Short description of each skeleton directory.
pub const DIRECTORY_DESCRIPTIONS: [(&str, &str); 9] = [
    ("src", "containing project scripts"),
    ("res", "containing project resources and data"),
    ("bin", "containing project binaries"),
    ("lib", "containing external libraries"),
    ("doc", "containing project documentation files"),
    ("build", "containing project binaries"),
    ("temp", "containing temporary files"),
    ("out", "containing output files, produced by processing/analyzing resources"),
    ("out/plots", "containing output plot files and diagrams"),
];

/// The two top-level README files of a project.
#[derive(Debug, Clone)]
pub struct Readme {
    /// `README.md`
    pub markdown: PathBuf,
    /// `README.sh`
    pub shell: PathBuf,
}

impl Readme {
    /// README files at the root of `project_dir`.
    pub fn new(project_dir: &Path) -> Self {
        Self {
            markdown: project_dir.join("README.md"),
            shell: project_dir.join("README.sh"),
        }
    }

    /// Append a line to `README.md`.
    pub fn md(&self, text: &str) -> Result<()> {
        Ok(append_line(text, &[&self.markdown])?)
    }

    /// Append a line to `README.sh`.
    pub fn sh(&self, text: &str) -> Result<()> {
        Ok(append_line(text, &[&self.shell])?)
    }

    /// Append a line to both files.
    pub fn both(&self, text: &str) -> Result<()> {
        Ok(append_line(text, &[&self.markdown, &self.shell])?)
    }

    /// Write the headers: project line in both files, then the tool version,
    /// working directory and command line in `README.sh`.
    pub fn write_header(
        &self,
        project_name: &str,
        stamp: &Stamp,
        cwd: &Path,
        command: &str,
    ) -> Result<()> {
        self.both(&format!(
            "# Project '{project_name}' created on {} from {}.",
            stamp.time(),
            stamp.author
        ))?;
        self.sh(&format!("# with {TOOL_NAME} version {TOOL_VERSION}."))?;
        self.sh(&format!("# Used the following command in {}", cwd.display()))?;
        self.sh(command)
    }
}

/// Rebuild a command line: flags bare, values single-quoted.
pub fn render_command<S: AsRef<str>>(program: &str, args: &[S]) -> String {
    let mut command = format!("{program} ");
    for arg in args {
        let arg = arg.as_ref();
        if arg.starts_with('-') {
            command.push_str(&format!("{arg} "));
        } else {
            command.push_str(&format!("'{arg}' "));
        }
    }
    command
}

/// The `## <name> directory structure:` section.
pub fn directory_description(project_name: &str) -> String {
    let mut text = format!("\n## {project_name} directory structure:");
    for (dir, description) in DIRECTORY_DESCRIPTIONS {
        text.push_str(&format!("\n-   {dir}: {description}"));
    }
    text
}

/// Sentence summarizing a link result, optionally labelled (`traindata`, ...).
pub fn link_summary(label: Option<&str>, result: &LinkResult) -> String {
    let prefix = match label {
        Some(label) => format!("Linked {label}:"),
        None => "Linked".to_string(),
    };
    format!(
        "{prefix} {} files in {} folders with a total datasize of {}.",
        result.files,
        result.folders,
        human_readable_size(result.total_bytes)
    )
}
