//! Test fixtures for creating test data

use repomirror::domain::entities::{
    mirror_config::MirrorConfig, mirror_job::MirrorJob, project::Project,
    repository::Repository,
};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test fixture for mirror jobs
pub struct JobFixture;

impl JobFixture {
    pub fn job(repo_name: &str) -> MirrorJob {
        MirrorJob::new(
            Repository::new(repo_name, format!("/src/{}", repo_name)),
            Project::new("libs"),
        )
    }

    pub fn job_with_key(repo_name: &str, project: &str, key: &str) -> MirrorJob {
        MirrorJob::new(
            Repository::new(repo_name, format!("/src/{}", repo_name)),
            Project::new(project).with_key(key),
        )
    }
}

/// Test fixture for provider configurations
pub struct MirrorFixture;

impl MirrorFixture {
    pub fn github() -> MirrorConfig {
        MirrorConfig::new("github", "ghp_test").with_organization("acme")
    }

    pub fn bitbucket() -> MirrorConfig {
        MirrorConfig::new("bitbucket", "app-pass")
            .with_username("bot")
            .with_team("acme")
    }

    pub fn codeberg() -> MirrorConfig {
        MirrorConfig::new("codeberg", "cb_test").with_organization("acme")
    }

    pub fn sourcehut() -> MirrorConfig {
        MirrorConfig::new("sourcehut", "srht_test")
            .with_username("alice")
            .with_organization("~alice")
    }
}

/// A temporary directory holding repositories and a configuration file
pub struct ConfigFixture {
    pub dir: TempDir,
}

impl ConfigFixture {
    /// Create the directory with one subdirectory per repository name
    pub fn with_repos(repo_names: &[&str]) -> Self {
        let dir = TempDir::new().expect("temp dir");
        for name in repo_names {
            std::fs::create_dir_all(dir.path().join(name)).expect("repo dir");
        }
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write `contents` as `repomirror.yml` with the given mode
    pub fn write_config(&self, contents: &str, mode: u32) -> PathBuf {
        let path = self.dir.path().join("repomirror.yml");
        std::fs::write(&path, contents).expect("write config");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(mode))
                .expect("chmod config");
        }
        #[cfg(not(unix))]
        let _ = mode;
        path
    }
}
