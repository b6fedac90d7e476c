use crate::domain::entities::repository::Repository;
use crate::domain::value_objects::remote_url::RemoteUrl;
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

/// Result of a mirror push. Never an error: failures are logged and reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    /// git exited with status 0
    Pushed { stderr: String },
    /// git ran but exited nonzero
    Rejected { exit_code: Option<i32>, stderr: String },
    /// git could not be started at all
    LaunchFailed { message: String },
}

impl PushOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PushOutcome::Pushed { .. })
    }
}

/// Pushes a local repository's complete ref set to a remote
#[async_trait]
pub trait MirrorPusher: Send + Sync {
    async fn push(&self, repository: &Repository, remote: &RemoteUrl) -> PushOutcome;
}

/// `git push --mirror --force` through the git executable
pub struct GitMirrorPusher {
    git_executable: String,
}

impl Default for GitMirrorPusher {
    fn default() -> Self {
        Self {
            git_executable: "git".to_string(),
        }
    }
}

impl GitMirrorPusher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pusher with custom executable path
    pub fn with_executable(executable: impl Into<String>) -> Self {
        Self {
            git_executable: executable.into(),
        }
    }

    pub fn mirror_args(remote: &RemoteUrl) -> Vec<&str> {
        vec!["push", "--mirror", "--force", remote.as_str()]
    }
}

#[async_trait]
impl MirrorPusher for GitMirrorPusher {
    async fn push(&self, repository: &Repository, remote: &RemoteUrl) -> PushOutcome {
        let args = Self::mirror_args(remote);
        tracing::debug!(
            repo = %repository.name,
            path = %repository.path.display(),
            url = %remote,
            "Running {} {}",
            self.git_executable,
            args.join(" ")
        );

        let output = Command::new(&self.git_executable)
            .args(&args)
            .current_dir(&repository.path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await;

        let output = match output {
            Ok(output) => output,
            Err(e) => {
                let message = format!("failed to launch {}: {}", self.git_executable, e);
                tracing::error!(repo = %repository.name, url = %remote, "{}", message);
                return PushOutcome::LaunchFailed { message };
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if !stdout.is_empty() {
            tracing::debug!(repo = %repository.name, "{}", stdout);
        }

        if !output.status.success() {
            tracing::error!(
                repo = %repository.name,
                url = %remote,
                exit_code = output.status.code().unwrap_or(-1),
                "Mirror push failed: {}",
                stderr
            );
            return PushOutcome::Rejected {
                exit_code: output.status.code(),
                stderr,
            };
        }

        // git reports progress on stderr even on success
        if !stderr.is_empty() {
            tracing::info!(repo = %repository.name, "{}", stderr);
        }
        tracing::info!(repo = %repository.name, url = %remote, "Pushed mirror to {}", remote);

        PushOutcome::Pushed { stderr }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn remote() -> RemoteUrl {
        RemoteUrl::build("github.com", "acme", "libfoo", None)
    }

    #[test]
    fn test_mirror_args() {
        let url = remote();
        assert_eq!(
            GitMirrorPusher::mirror_args(&url),
            vec!["push", "--mirror", "--force", "git@github.com:acme/libfoo.git"]
        );
    }

    #[tokio::test]
    async fn test_missing_executable_is_reported_not_raised() {
        let dir = TempDir::new().unwrap();
        let pusher = GitMirrorPusher::with_executable("repomirror-no-such-git-binary");

        let outcome = pusher
            .push(&Repository::new("libfoo", dir.path()), &remote())
            .await;

        assert!(matches!(outcome, PushOutcome::LaunchFailed { .. }));
        assert!(!outcome.is_success());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_is_rejected() {
        let dir = TempDir::new().unwrap();
        let pusher = GitMirrorPusher::with_executable("false");

        let outcome = pusher
            .push(&Repository::new("libfoo", dir.path()), &remote())
            .await;

        assert_eq!(
            outcome,
            PushOutcome::Rejected {
                exit_code: Some(1),
                stderr: String::new()
            }
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_zero_exit_is_pushed() {
        let dir = TempDir::new().unwrap();
        let pusher = GitMirrorPusher::with_executable("true");

        let outcome = pusher
            .push(&Repository::new("libfoo", dir.path()), &remote())
            .await;

        assert!(outcome.is_success());
    }
}
