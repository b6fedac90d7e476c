use super::error::ForgeError;
use super::transport::{expect_success, probe, ApiAuth, ApiRequest, ApiTransport, ProbeOutcome};
use crate::domain::entities::{mirror_config::MirrorConfig, mirror_job::MirrorJob};
use crate::domain::value_objects::provider_kind::ProviderKind;
use serde_json::{json, Value};

/// Bitbucket Cloud team mirror target
///
/// When the job's project carries a key, the repository is attached to a
/// Bitbucket project with that key, which is created first if it is missing.
#[derive(Debug, Clone)]
pub struct BitbucketProvider {
    config: MirrorConfig,
}

impl BitbucketProvider {
    pub fn new(config: MirrorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MirrorConfig {
        &self.config
    }

    pub fn team(&self) -> Option<&str> {
        self.config.group(ProviderKind::Bitbucket)
    }

    fn api_url(&self) -> &str {
        self.config.api_url(ProviderKind::Bitbucket)
    }

    // App passwords authenticate as a user; fall back to the team account.
    fn auth(&self, team: &str) -> ApiAuth {
        ApiAuth::Basic {
            username: self
                .config
                .username
                .clone()
                .unwrap_or_else(|| team.to_string()),
            password: self.config.token.clone(),
        }
    }

    pub async fn sanity_check(
        &self,
        job: &MirrorJob,
        transport: &dyn ApiTransport,
    ) -> Result<(), ForgeError> {
        let team = self
            .team()
            .ok_or_else(|| ForgeError::missing_setting("bitbucket", "team"))?;
        let repo_url = format!("{}/repositories/{}/{}", self.api_url(), team, job.repo_name());

        if let ProbeOutcome::Found(_) =
            probe(transport, ApiRequest::get(repo_url.clone(), self.auth(team))).await?
        {
            tracing::debug!(repo = job.repo_name(), team, "Repository already exists on bitbucket");
            return Ok(());
        }

        let mut payload = json!({
            "scm": "git",
            "has_wiki": false,
            "has_issues": false,
        });

        if let Some(key) = job.project.key.as_deref() {
            self.ensure_project(job, team, key, transport).await?;
            payload["project"] = json!({ "key": key });
        }

        expect_success(transport, ApiRequest::post(repo_url, self.auth(team), payload)).await?;

        tracing::info!(repo = job.repo_name(), team, "Created repository on bitbucket");
        Ok(())
    }

    async fn ensure_project(
        &self,
        job: &MirrorJob,
        team: &str,
        key: &str,
        transport: &dyn ApiTransport,
    ) -> Result<(), ForgeError> {
        let projects_url = format!("{}/workspaces/{}/projects", self.api_url(), team);
        let probe_url = format!("{}/{}", projects_url, key);

        if probe(transport, ApiRequest::get(probe_url, self.auth(team)))
            .await?
            .exists()
        {
            return Ok(());
        }

        let payload: Value = json!({ "name": job.project.name, "key": key });
        expect_success(transport, ApiRequest::post(projects_url, self.auth(team), payload)).await?;

        tracing::info!(project = %job.project.name, key, team, "Created project on bitbucket");
        Ok(())
    }
}
