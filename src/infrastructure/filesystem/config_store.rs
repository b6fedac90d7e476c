use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::common::error::MirrorError;
use crate::common::result::{MirrorResult, OptionExt, ResultExt};
use crate::domain::entities::{
    mirror_config::MirrorConfig,
    mirrors_config::{MirrorsConfig, ProjectConfig},
    project::Project,
    repository::Repository,
};

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "repomirror.yml";

/// On-disk layout, before validation
#[derive(Debug, Deserialize)]
struct RawConfig {
    root: Option<String>,
    projects: Option<Vec<RawProject>>,
    mirrors: Option<Vec<MirrorConfig>>,
}

#[derive(Debug, Deserialize)]
struct RawProject {
    name: String,
    #[serde(default)]
    key: Option<String>,
    repos: Vec<BTreeMap<String, String>>,
}

/// Locates, reads and validates the configuration file
///
/// Everything wrong with the configuration is reported here, before a single
/// job exists.
pub struct ConfigStore {
    search_paths: Vec<PathBuf>,
}

impl ConfigStore {
    /// Create a store using the default search locations
    pub fn new() -> Self {
        Self {
            search_paths: Self::default_search_paths(),
        }
    }

    /// Create a store with custom search locations
    pub fn with_search_paths(search_paths: Vec<PathBuf>) -> Self {
        Self { search_paths }
    }

    /// `./repomirror.yml`, then `$XDG_CONFIG_HOME/repomirror/config.yml`,
    /// then `$HOME/.config/repomirror/config.yml`
    pub fn default_search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
            paths.push(PathBuf::from(xdg).join("repomirror").join("config.yml"));
        }
        if let Some(home) = std::env::var_os("HOME").filter(|v| !v.is_empty()) {
            paths.push(
                PathBuf::from(home)
                    .join(".config")
                    .join("repomirror")
                    .join("config.yml"),
            );
        }
        paths
    }

    /// Pick the explicit path if given, otherwise the first existing search path
    pub fn discover(&self, explicit: Option<&Path>) -> MirrorResult<PathBuf> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(MirrorError::config_error(
                    format!("configuration file not found: {}", path.display()),
                    Some(path.to_path_buf()),
                ));
            }
            return Ok(path.to_path_buf());
        }

        let searched = self
            .search_paths
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");

        self.search_paths
            .iter()
            .find(|p| p.is_file())
            .cloned()
            .ok_or_config_error(format!("no configuration file found (searched: {})", searched), None)
    }

    /// Read, permission-check and validate a configuration file
    pub async fn load(&self, path: &Path) -> MirrorResult<MirrorsConfig> {
        check_permissions(path).await?;

        let contents = tokio::fs::read_to_string(path)
            .await
            .with_filesystem_error("Failed to read configuration", Some(path.to_path_buf()))?;

        let base_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let config = parse_config(&contents, &base_dir).map_err(|e| match e {
            MirrorError::SerializationError { message, source } => MirrorError::ConfigError {
                message,
                path: Some(path.to_path_buf()),
                source,
            },
            other => other,
        })?;

        tracing::debug!(
            path = %path.display(),
            projects = config.projects.len(),
            repositories = config.repository_count(),
            mirrors = config.mirrors.len(),
            "Configuration loaded"
        );
        Ok(config)
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Reject configuration files readable by group or others (they hold tokens)
#[cfg(unix)]
pub async fn check_permissions(path: &Path) -> MirrorResult<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = tokio::fs::metadata(path)
        .await
        .with_filesystem_error("Failed to stat configuration", Some(path.to_path_buf()))?;
    let mode = metadata.permissions().mode() & 0o777;

    if mode & 0o044 != 0 {
        return Err(MirrorError::permission_error(path, mode));
    }
    Ok(())
}

#[cfg(not(unix))]
pub async fn check_permissions(_path: &Path) -> MirrorResult<()> {
    Ok(())
}

/// Parse and validate configuration text
///
/// A leading `~` expands from `$HOME`. Relative `root` values resolve against `base_dir`
/// and relative repository paths against the root. Every stored path is canonical.
pub fn parse_config(contents: &str, base_dir: &Path) -> MirrorResult<MirrorsConfig> {
    let home = std::env::var_os("HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from);
    parse_config_with_home(contents, base_dir, home.as_deref())
}

fn parse_config_with_home(
    contents: &str,
    base_dir: &Path,
    home: Option<&Path>,
) -> MirrorResult<MirrorsConfig> {
    let raw: RawConfig = serde_yaml::from_str(contents)?;

    let root = raw
        .root
        .ok_or_validation_error("root", "missing top-level section")?;
    let projects = raw
        .projects
        .ok_or_validation_error("projects", "missing top-level section")?;
    let mirrors = raw
        .mirrors
        .ok_or_validation_error("mirrors", "missing top-level section")?;

    let root = absolute_dir(
        "root",
        &resolve_path(&root, base_dir, home),
        "not an existing directory",
    )?;

    let mut config = MirrorsConfig::new(root.clone());

    for (i, raw_project) in projects.into_iter().enumerate() {
        let mut project = Project::new(raw_project.name);
        if let Some(key) = raw_project.key.filter(|k| !k.trim().is_empty()) {
            project = project.with_key(key);
        }

        let mut repositories = Vec::with_capacity(raw_project.repos.len());
        for (j, entry) in raw_project.repos.into_iter().enumerate() {
            let field = format!("projects[{}].repos[{}]", i, j);
            if entry.len() != 1 {
                return Err(MirrorError::validation_error(
                    field,
                    format!("expected a single `name: path` mapping, found {} keys", entry.len()),
                    None,
                ));
            }
            let Some((name, path)) = entry.into_iter().next() else {
                continue;
            };

            let path = absolute_dir(
                format!("{}.{}", field, name),
                &resolve_path(&path, &root, home),
                "repository path is not an existing directory",
            )?;
            repositories.push(Repository::new(name, path));
        }

        config = config.with_project(ProjectConfig::new(project, repositories));
    }

    for (i, mirror) in mirrors.into_iter().enumerate() {
        validate_mirror(i, &mirror)?;
        config = config.with_mirror(mirror);
    }

    Ok(config)
}

/// Canonical absolute form of an existing directory
fn absolute_dir(field: impl Into<String>, path: &Path, message: &str) -> MirrorResult<PathBuf> {
    let field = field.into();
    let invalid = || {
        MirrorError::validation_error(field.clone(), message, Some(path.display().to_string()))
    };
    if !path.is_dir() {
        return Err(invalid());
    }
    std::fs::canonicalize(path).map_err(|_| invalid())
}

fn validate_mirror(index: usize, mirror: &MirrorConfig) -> MirrorResult<()> {
    if mirror.token.trim().is_empty() {
        return Err(MirrorError::validation_error(
            format!("mirrors[{}].token", index),
            "must not be empty",
            None,
        ));
    }

    if let Some(api_url) = &mirror.api_url {
        let parsed = url::Url::parse(api_url).map_err(|e| {
            MirrorError::validation_error(
                format!("mirrors[{}].api_url", index),
                format!("invalid URL: {}", e),
                Some(api_url.clone()),
            )
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(MirrorError::validation_error(
                format!("mirrors[{}].api_url", index),
                "scheme must be http or https",
                Some(api_url.clone()),
            ));
        }
    }

    Ok(())
}

/// Expand a leading `~` from `home`, then resolve relative paths against `base`
fn resolve_path(raw: &str, base: &Path, home: Option<&Path>) -> PathBuf {
    let expanded = match (raw.strip_prefix('~'), home) {
        (Some(rest), Some(home)) if rest.is_empty() || rest.starts_with('/') => {
            home.join(rest.trim_start_matches('/'))
        }
        _ => PathBuf::from(raw),
    };

    if expanded.is_absolute() {
        expanded
    } else {
        base.join(expanded)
    }
}
