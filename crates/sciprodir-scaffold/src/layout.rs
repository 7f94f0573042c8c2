//! Project directory skeleton.

use std::fs;
use std::path::{Path, PathBuf};

use sciprodir_link::append_line;
use tracing::{info, warn};

use crate::error::{Result, ScaffoldError};
use crate::readme::{Stamp, TOOL_NAME};

/// Directories created in every project, in creation order.
pub const PROJECT_DIRS: [&str; 9] = [
    "src", "res", "bin", "lib", "doc", "build", "out", "out/plots", "temp",
];

/// Directories that do not get their own README.
const WITHOUT_README: [&str; 2] = ["out/plots", "doc"];

/// Create the skeleton under `project_dir` and return the project-relative
/// paths of the README files written into it.
///
/// Directories that already exist are kept.
pub fn create_skeleton(project_dir: &Path, stamp: &Stamp) -> Result<Vec<PathBuf>> {
    let mut readmes = Vec::new();

    for dir in PROJECT_DIRS {
        let path = project_dir.join(dir);
        if path.exists() {
            warn!(path = %path.display(), "Path already exists");
        } else {
            fs::create_dir_all(&path).map_err(|e| ScaffoldError::io(&path, e))?;
            info!(path = %path.display(), "Created directory");
        }

        if WITHOUT_README.contains(&dir) {
            continue;
        }

        let relative = Path::new(dir).join("README.md");
        let readme = project_dir.join(&relative);
        append_line(
            &format!(
                "<!-- Created markdown file for {dir}/ on {} from {} with {TOOL_NAME}. -->",
                stamp.time(),
                stamp.author
            ),
            &[&readme],
        )?;
        if dir == "res" {
            append_line(
                "res contains the resource data the way you like, either the hard links to your resource data or the actual resource data files.",
                &[&readme],
            )?;
        }
        info!(path = %readme.display(), "Created readme");
        readmes.push(relative);
    }

    Ok(readmes)
}
