use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hosting provider family a mirror entry targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// GitHub REST API
    GitHub,
    /// Bitbucket Cloud 2.0 API
    Bitbucket,
    /// Gitea API (Codeberg and other Gitea/Forgejo instances)
    Gitea,
    /// SourceHut GraphQL API
    SourceHut,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::GitHub => write!(f, "github"),
            ProviderKind::Bitbucket => write!(f, "bitbucket"),
            ProviderKind::Gitea => write!(f, "gitea"),
            ProviderKind::SourceHut => write!(f, "sourcehut"),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = ProviderKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "github" => Ok(ProviderKind::GitHub),
            "bitbucket" => Ok(ProviderKind::Bitbucket),
            "gitea" | "codeberg" | "forgejo" => Ok(ProviderKind::Gitea),
            "sourcehut" | "srht" => Ok(ProviderKind::SourceHut),
            _ => Err(ProviderKindError::UnsupportedProvider(s.to_string())),
        }
    }
}

impl ProviderKind {
    /// Default API endpoint. For SourceHut this is the GraphQL query URL.
    pub fn default_api_url(&self) -> &'static str {
        match self {
            ProviderKind::GitHub => "https://api.github.com",
            ProviderKind::Bitbucket => "https://api.bitbucket.org/2.0",
            ProviderKind::Gitea => "https://codeberg.org/api/v1",
            ProviderKind::SourceHut => "https://git.sr.ht/query",
        }
    }

    /// Default host used in the SSH push URL
    pub fn default_git_host(&self) -> &'static str {
        match self {
            ProviderKind::GitHub => "github.com",
            ProviderKind::Bitbucket => "bitbucket.org",
            ProviderKind::Gitea => "codeberg.org",
            ProviderKind::SourceHut => "git.sr.ht",
        }
    }

    /// Configuration key holding the group the repositories live under
    pub fn group_key(&self) -> &'static str {
        match self {
            ProviderKind::Bitbucket => "team",
            _ => "organization",
        }
    }

    /// Prefix marking a personal namespace (e.g. `~alice`), if the provider has one
    pub fn personal_namespace_marker(&self) -> Option<&'static str> {
        match self {
            ProviderKind::SourceHut => Some("~"),
            _ => None,
        }
    }
}

/// Errors that can occur when resolving a provider name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderKindError {
    #[error("Unsupported provider: '{0}'. Supported providers are: github, bitbucket, gitea, sourcehut")]
    UnsupportedProvider(String),
}
