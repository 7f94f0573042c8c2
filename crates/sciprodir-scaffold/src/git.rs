//! Git repository setup for cloned projects.

use std::path::{Path, PathBuf};

use git2::{
    Cred, CredentialType, ErrorCode, PushOptions, RemoteCallbacks, Repository, Signature,
};
use sciprodir_link::append_line;
use tracing::info;

use crate::error::{Result, ScaffoldError};

/// Parts of a remote URL such as `https://github.com/user/project.git`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitRemote {
    /// The full URL.
    pub url: String,
    /// Repository name without a `.git` suffix.
    pub repository: String,
    /// Account owning the repository.
    pub account: String,
    /// Hosting service.
    pub service: String,
}

impl GitRemote {
    /// Split a remote URL into service, account and repository.
    ///
    /// Both `https://host/account/repo` and `git@host:account/repo` forms are
    /// accepted.
    pub fn parse(url: &str) -> Result<Self> {
        let segments: Vec<&str> = url
            .trim_end_matches('/')
            .split(['/', ':'])
            .filter(|s| !s.is_empty())
            .collect();
        let [.., service, account, repository] = segments.as_slice() else {
            return Err(ScaffoldError::InvalidGitUrl {
                url: url.to_string(),
            });
        };

        let service = service.rsplit('@').next().unwrap_or_default();
        Ok(Self {
            url: url.to_string(),
            repository: repository.trim_end_matches(".git").to_string(),
            account: account.to_string(),
            service: service.to_string(),
        })
    }

    /// Sentence used in the README files.
    pub fn description(&self) -> String {
        format!(
            "Using git {} for version control on account {} on {}.",
            self.url, self.account, self.service
        )
    }
}

/// Clone `url` into `destination`.
pub fn clone(url: &str, destination: &Path) -> Result<Repository> {
    let repo = Repository::clone(url, destination)?;
    info!(url = %url, path = %destination.display(), "Cloned repository");
    Ok(repo)
}

/// Append ignore entries to the repository's `.gitignore`.
pub fn write_gitignore(project_dir: &Path, entries: &[String]) -> Result<()> {
    let path = project_dir.join(".gitignore");
    for entry in entries {
        append_line(entry, &[&path])?;
    }
    Ok(())
}

/// Stage `files` (relative to the work tree) and commit them on HEAD.
///
/// Works on a freshly cloned empty repository, in which case the commit has no
/// parent. The committer falls back to `author` when git has no identity
/// configured.
pub fn commit_files(
    repo: &Repository,
    files: &[PathBuf],
    message: &str,
    author: &str,
) -> Result<git2::Oid> {
    let mut index = repo.index()?;
    for file in files {
        index.add_path(file)?;
    }
    index.write()?;

    let tree = repo.find_tree(index.write_tree()?)?;
    let signature = match repo.signature() {
        Ok(signature) => signature,
        Err(_) => Signature::now(author, &format!("{}@localhost", author.replace(' ', ".")))?,
    };

    let parent = match repo.head() {
        Ok(head) => Some(head.peel_to_commit()?),
        Err(e) if e.code() == ErrorCode::UnbornBranch => None,
        Err(e) => return Err(e.into()),
    };
    let parents: Vec<_> = parent.iter().collect();

    let oid = repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;
    info!(files = files.len(), commit = %oid, "Added files to git commit");
    Ok(oid)
}

/// Push the current branch to `origin`.
///
/// Credentials come from the ssh agent or the configured git credential helper.
pub fn push(repo: &Repository) -> Result<()> {
    let head = repo.head()?;
    let branch = head.shorthand().unwrap_or("main").to_string();
    let refspec = format!("refs/heads/{branch}:refs/heads/{branch}");

    let config = repo.config()?;
    let mut callbacks = RemoteCallbacks::new();
    callbacks.credentials(move |url, username, allowed| {
        if allowed.contains(CredentialType::SSH_KEY) {
            Cred::ssh_key_from_agent(username.unwrap_or("git"))
        } else if allowed.contains(CredentialType::USER_PASS_PLAINTEXT) {
            Cred::credential_helper(&config, url, username)
        } else {
            Cred::default()
        }
    });
    let mut options = PushOptions::new();
    options.remote_callbacks(callbacks);

    let mut remote = repo.find_remote("origin")?;
    remote.push(&[&refspec], Some(&mut options))?;
    info!(branch = %branch, "Pushed to origin");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_https() {
        let remote = GitRemote::parse("https://github.com/someone/my_project.git").unwrap();
        assert_eq!(remote.repository, "my_project");
        assert_eq!(remote.account, "someone");
        assert_eq!(remote.service, "github.com");
        assert_eq!(
            remote.description(),
            "Using git https://github.com/someone/my_project.git for version control on account someone on github.com."
        );
    }

    #[test]
    fn test_parse_scp_style() {
        let remote = GitRemote::parse("git@gitlab.com:group/analysis.git").unwrap();
        assert_eq!(remote.repository, "analysis");
        assert_eq!(remote.account, "group");
        assert_eq!(remote.service, "gitlab.com");
    }

    #[test]
    fn test_parse_too_short() {
        assert!(matches!(
            GitRemote::parse("project"),
            Err(ScaffoldError::InvalidGitUrl { .. })
        ));
    }

    #[test]
    fn test_clone_commit_push_local_remote() {
        let temp = TempDir::new().unwrap();
        let remote_path = temp.path().join("remote.git");
        let bare = Repository::init_bare(&remote_path).unwrap();

        let work = temp.path().join("work");
        let repo = clone(remote_path.to_str().unwrap(), &work).unwrap();

        fs::create_dir_all(work.join("src")).unwrap();
        fs::write(work.join("src/README.md"), "hello\n").unwrap();
        write_gitignore(&work, &["temp/".to_string(), "*.log".to_string()]).unwrap();
        assert_eq!(
            fs::read_to_string(work.join(".gitignore")).unwrap(),
            "temp/\n*.log\n"
        );

        let oid = commit_files(
            &repo,
            &[PathBuf::from("src/README.md")],
            "initial commit",
            "Test Author",
        )
        .unwrap();
        push(&repo).unwrap();

        let branch = repo.head().unwrap().shorthand().unwrap().to_string();
        let pushed = bare
            .find_reference(&format!("refs/heads/{branch}"))
            .unwrap()
            .target()
            .unwrap();
        assert_eq!(pushed, oid);
    }

    #[test]
    fn test_commit_files_chains_parent() {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();

        fs::write(temp.path().join("a.txt"), "a\n").unwrap();
        let first = commit_files(&repo, &[PathBuf::from("a.txt")], "first", "Test Author").unwrap();
        assert_eq!(repo.find_commit(first).unwrap().parent_count(), 0);

        fs::write(temp.path().join("b.txt"), "b\n").unwrap();
        let second =
            commit_files(&repo, &[PathBuf::from("b.txt")], "second", "Test Author").unwrap();
        let commit = repo.find_commit(second).unwrap();
        assert_eq!(commit.parent_count(), 1);
        assert_eq!(commit.parent_id(0).unwrap(), first);
    }
}
