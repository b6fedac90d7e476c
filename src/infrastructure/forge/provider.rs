use super::bitbucket::BitbucketProvider;
use super::error::ForgeError;
use super::gitea::GiteaProvider;
use super::github::GitHubProvider;
use super::sourcehut::SourceHutProvider;
use super::transport::ApiTransport;
use crate::common::error_flag::ErrorFlag;
use crate::domain::entities::{mirror_config::MirrorConfig, mirror_job::MirrorJob};
use crate::domain::value_objects::{provider_kind::ProviderKind, remote_url::RemoteUrl};
use crate::infrastructure::git::mirror_pusher::{MirrorPusher, PushOutcome};
use std::sync::Arc;

/// Collaborators every worker needs to mirror a job
#[derive(Clone)]
pub struct MirrorContext {
    pub transport: Arc<dyn ApiTransport>,
    pub pusher: Arc<dyn MirrorPusher>,
    pub errors: Arc<ErrorFlag>,
}

impl MirrorContext {
    pub fn new(
        transport: Arc<dyn ApiTransport>,
        pusher: Arc<dyn MirrorPusher>,
        errors: Arc<ErrorFlag>,
    ) -> Self {
        Self {
            transport,
            pusher,
            errors,
        }
    }
}

/// What happened to one job/provider pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorOutcome {
    Pushed,
    Failed,
    Skipped,
}

/// A configured mirror target
#[derive(Debug, Clone)]
pub enum Provider {
    GitHub(GitHubProvider),
    Bitbucket(BitbucketProvider),
    Gitea(GiteaProvider),
    SourceHut(SourceHutProvider),
    /// A `mirrors[]` entry whose name matched no known provider
    Unsupported(String),
}

impl Provider {
    pub fn from_config(config: MirrorConfig) -> Self {
        match config.kind() {
            Some(ProviderKind::GitHub) => Provider::GitHub(GitHubProvider::new(config)),
            Some(ProviderKind::Bitbucket) => Provider::Bitbucket(BitbucketProvider::new(config)),
            Some(ProviderKind::Gitea) => Provider::Gitea(GiteaProvider::new(config)),
            Some(ProviderKind::SourceHut) => Provider::SourceHut(SourceHutProvider::new(config)),
            None => Provider::Unsupported(config.name),
        }
    }

    pub fn kind(&self) -> Option<ProviderKind> {
        match self {
            Provider::GitHub(_) => Some(ProviderKind::GitHub),
            Provider::Bitbucket(_) => Some(ProviderKind::Bitbucket),
            Provider::Gitea(_) => Some(ProviderKind::Gitea),
            Provider::SourceHut(_) => Some(ProviderKind::SourceHut),
            Provider::Unsupported(_) => None,
        }
    }

    pub fn config(&self) -> Option<&MirrorConfig> {
        match self {
            Provider::GitHub(p) => Some(p.config()),
            Provider::Bitbucket(p) => Some(p.config()),
            Provider::Gitea(p) => Some(p.config()),
            Provider::SourceHut(p) => Some(p.config()),
            Provider::Unsupported(_) => None,
        }
    }

    /// Name as written in the configuration
    pub fn name(&self) -> &str {
        match self {
            Provider::Unsupported(name) => name,
            _ => self.config().map(|c| c.name.as_str()).unwrap_or_default(),
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Provider::Unsupported(_))
    }

    /// Organization, team or namespace the repositories live under
    pub fn group(&self) -> Option<&str> {
        let kind = self.kind()?;
        self.config()?.group(kind)
    }

    /// Ensure the remote repository exists, creating it if needed
    pub async fn sanity_check(
        &self,
        job: &MirrorJob,
        transport: &dyn ApiTransport,
    ) -> Result<(), ForgeError> {
        match self {
            Provider::GitHub(p) => p.sanity_check(job, transport).await,
            Provider::Bitbucket(p) => p.sanity_check(job, transport).await,
            Provider::Gitea(p) => p.sanity_check(job, transport).await,
            Provider::SourceHut(p) => p.sanity_check(job, transport).await,
            Provider::Unsupported(name) => Err(ForgeError::unsupported(name.as_str())),
        }
    }

    /// SSH URL the job is pushed to, if the provider is usable
    pub fn remote_url(&self, job: &MirrorJob) -> Option<RemoteUrl> {
        let kind = self.kind()?;
        let config = self.config()?;
        let group = self.group()?;
        Some(RemoteUrl::build(
            config.git_host(kind),
            group,
            job.repo_name(),
            kind.personal_namespace_marker(),
        ))
    }

    /// Ensure-then-push for one job. Every failure is logged, raises the
    /// error flag and ends here; nothing propagates to the worker.
    pub async fn mirror(&self, job: &MirrorJob, ctx: &MirrorContext) -> MirrorOutcome {
        let Some(kind) = self.kind() else {
            tracing::warn!(
                provider = self.name(),
                repo = job.repo_name(),
                "Unsupported provider, skipping"
            );
            return MirrorOutcome::Skipped;
        };

        let Some(remote) = self.remote_url(job) else {
            tracing::error!(
                provider = self.name(),
                repo = job.repo_name(),
                "No `{}` configured for provider '{}', not pushing",
                kind.group_key(),
                self.name()
            );
            ctx.errors.raise();
            return MirrorOutcome::Failed;
        };

        if let Err(e) = self.sanity_check(job, ctx.transport.as_ref()).await {
            tracing::error!(
                provider = self.name(),
                repo = job.repo_name(),
                "Sanity check failed: {}",
                e
            );
            ctx.errors.raise();
            return MirrorOutcome::Failed;
        }

        match ctx.pusher.push(&job.repository, &remote).await {
            PushOutcome::Pushed { .. } => MirrorOutcome::Pushed,
            PushOutcome::Rejected { .. } | PushOutcome::LaunchFailed { .. } => {
                ctx.errors.raise();
                MirrorOutcome::Failed
            }
        }
    }
}
