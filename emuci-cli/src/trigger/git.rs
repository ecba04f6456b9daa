//! Local repository queries

use anyhow::{Context, Result};
use std::path::Path;
use tokio::process::Command;

/// Name of the branch checked out in `repo`
///
/// Fails on a detached HEAD, since the build server needs a branch name to
/// check out.
pub async fn current_branch(repo: &Path) -> Result<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--abbrev-ref", "HEAD"])
        .current_dir(repo)
        .output()
        .await
        .context("Failed to execute 'git rev-parse'. Is git installed?")?;

    if !output.status.success() {
        anyhow::bail!(
            "git rev-parse failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    let branch = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if branch.is_empty() || branch == "HEAD" {
        anyhow::bail!("No branch is checked out (detached HEAD); pass --branch explicitly");
    }

    Ok(branch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command as StdCommand;

    fn git(repo: &Path, args: &[&str]) -> bool {
        StdCommand::new("git")
            .args(args)
            .current_dir(repo)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    /// Creates a repository with one commit on `branch`
    fn init_repo(repo: &Path, branch: &str) -> bool {
        git(repo, &["init", "-q"])
            && git(repo, &["checkout", "-q", "-b", branch])
            && git(
                repo,
                &[
                    "-c",
                    "user.name=ci",
                    "-c",
                    "user.email=ci@example.com",
                    "commit",
                    "-q",
                    "--allow-empty",
                    "-m",
                    "init",
                ],
            )
    }

    #[tokio::test]
    async fn test_current_branch() {
        let dir = tempfile::tempdir().unwrap();
        if !init_repo(dir.path(), "feature/uart") {
            // git is not available in this environment
            return;
        }

        assert_eq!(current_branch(dir.path()).await.unwrap(), "feature/uart");
    }

    #[tokio::test]
    async fn test_detached_head_fails() {
        let dir = tempfile::tempdir().unwrap();
        let repo = dir.path();
        if !(init_repo(repo, "master") && git(repo, &["checkout", "-q", "--detach"])) {
            return;
        }

        let err = current_branch(repo).await.unwrap_err();
        assert!(err.to_string().contains("--branch"));
    }

    #[tokio::test]
    async fn test_outside_repository_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(current_branch(dir.path()).await.is_err());
    }
}
