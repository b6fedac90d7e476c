use super::error::ForgeError;
use super::transport::{expect_success, probe, ApiAuth, ApiRequest, ApiTransport, ProbeOutcome};
use crate::domain::entities::{mirror_config::MirrorConfig, mirror_job::MirrorJob};
use crate::domain::value_objects::provider_kind::ProviderKind;
use serde_json::{json, Value};

/// GitHub organization mirror target
#[derive(Debug, Clone)]
pub struct GitHubProvider {
    config: MirrorConfig,
}

impl GitHubProvider {
    pub fn new(config: MirrorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MirrorConfig {
        &self.config
    }

    pub fn organization(&self) -> Option<&str> {
        self.config.group(ProviderKind::GitHub)
    }

    fn auth(&self) -> ApiAuth {
        ApiAuth::Token(self.config.token.clone())
    }

    fn api_url(&self) -> &str {
        self.config.api_url(ProviderKind::GitHub)
    }

    /// Ensure `{org}/{repo}` exists, creating it under the organization if missing
    pub async fn sanity_check(
        &self,
        job: &MirrorJob,
        transport: &dyn ApiTransport,
    ) -> Result<(), ForgeError> {
        let org = self
            .organization()
            .ok_or_else(|| ForgeError::missing_setting("github", "organization"))?;
        let repo_url = format!("{}/repos/{}/{}", self.api_url(), org, job.repo_name());

        if let ProbeOutcome::Found(_) = probe(transport, ApiRequest::get(repo_url, self.auth())).await? {
            tracing::debug!(repo = job.repo_name(), org, "Repository already exists on github");
            return Ok(());
        }

        let create_url = format!("{}/orgs/{}/repos", self.api_url(), org);
        expect_success(
            transport,
            ApiRequest::post(create_url, self.auth(), self.create_payload(job)),
        )
        .await?;

        tracing::info!(repo = job.repo_name(), org, "Created repository on github");
        Ok(())
    }

    fn create_payload(&self, job: &MirrorJob) -> Value {
        let mut payload = json!({
            "name": job.repo_name(),
            "has_wiki": false,
            "has_issues": false,
        });
        if let Some(team_id) = self.config.team_id {
            payload["team_id"] = json!(team_id);
        }
        payload
    }
}
