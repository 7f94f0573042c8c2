//! Insert plot files into project documentation.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use jwalk::WalkDir;
use sciprodir_link::append_line;
use tracing::{info, warn};

use crate::config::DocFormat;
use crate::error::{Result, ScaffoldError};

/// File name patterns accepted as plots.
pub const PLOT_PATTERNS: [&str; 5] = ["*.pdf", "*.png", "*.jpg", "*.jpeg", "*.eps"];

fn plot_matcher() -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in PLOT_PATTERNS {
        let glob = Glob::new(pattern).map_err(|e| ScaffoldError::InvalidConfig {
            message: e.to_string(),
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| ScaffoldError::InvalidConfig {
        message: e.to_string(),
    })
}

/// Every plot file below `plot_dir`, in sorted walk order.
pub fn collect_plots(plot_dir: &Path) -> Result<Vec<PathBuf>> {
    if !plot_dir.is_dir() {
        return Err(ScaffoldError::DataNotFound {
            path: plot_dir.to_path_buf(),
        });
    }

    let matcher = plot_matcher()?;
    let mut plots = Vec::new();

    for entry in WalkDir::new(plot_dir).sort(true).skip_hidden(false) {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                warn!(error = %err, "Skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if matcher.is_match(entry.file_name()) {
            plots.push(entry.path());
        }
    }

    Ok(plots)
}

/// Markdown block for one plot.
pub fn markdown_block(plot: &Path) -> String {
    let name = plot
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    format!("## {name}\n![]({})", plot.display())
}

/// LaTeX `figure` block for one plot, followed by a blank line.
pub fn latex_block(plot: &Path) -> String {
    let stem = plot
        .file_stem()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let caption = stem.replace('_', " ");
    format!(
        "\t\\begin{{figure}}[H]\n\
         \t\t\\centering\n\
         \t\t\\includegraphics[width=\\textwidth]{{{}}}\n\
         \t\t\\caption[{caption}]{{{caption}}}\n\
         \t\t\\label{{fig:{stem}}}\n\
         \t\\end{{figure}}\n",
        plot.display()
    )
}

/// Append every plot under `plot_dir` to the project's document and return
/// how many were added.
pub fn insert_plots(plot_dir: &Path, project_dir: &Path, format: DocFormat) -> Result<usize> {
    if !project_dir.exists() {
        return Err(ScaffoldError::ProjectNotFound {
            path: project_dir.to_path_buf(),
        });
    }
    let document = format.document(project_dir);
    if !document.is_file() {
        return Err(ScaffoldError::DocumentNotFound {
            path: document,
            format,
        });
    }

    let plots = collect_plots(plot_dir)?;
    for plot in &plots {
        let absolute = plot.canonicalize().map_err(|e| ScaffoldError::io(plot, e))?;
        info!(plot = %absolute.display(), document = %document.display(), "Including plot");
        let block = match format {
            DocFormat::Markdown => markdown_block(&absolute),
            DocFormat::Latex => latex_block(&absolute),
        };
        append_line(&block, &[&document])?;
    }

    Ok(plots.len())
}
