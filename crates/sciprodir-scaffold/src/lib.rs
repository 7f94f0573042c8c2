//! Project scaffolding for sciprodir.
//!
//! This crate creates research project directories: a fixed skeleton with
//! README files, optional LaTeX documentation stubs, an optional git clone
//! with an initial commit, and resource data mirrored into `res/` with the
//! link engine. It also inserts plot files into an existing project's
//! documentation.

mod config;
mod error;
pub mod git;
mod latex;
mod layout;
mod orcid;
mod plots;
mod project;
mod readme;
mod specs;

pub use config::{
    DataSource, DocFormat, ProjectConfig, ProjectConfigBuilder, ProjectSource,
};
pub use error::{Result, ScaffoldError};
pub use git::GitRemote;
pub use latex::{LatexMeta, title_page, write_latex};
pub use layout::{PROJECT_DIRS, create_skeleton};
pub use orcid::is_orcid;
pub use plots::{PLOT_PATTERNS, collect_plots, insert_plots, latex_block, markdown_block};
pub use project::{LinkedData, ProjectReport, create_project};
pub use readme::{
    DIRECTORY_DESCRIPTIONS, Readme, Stamp, TOOL_NAME, TOOL_VERSION, directory_description,
    link_summary, render_command,
};
pub use specs::{HostSpecs, collect_specs};
