use super::error::ForgeError;
use super::transport::{expect_success, probe, ApiAuth, ApiRequest, ApiTransport, ProbeOutcome};
use crate::domain::entities::{mirror_config::MirrorConfig, mirror_job::MirrorJob};
use crate::domain::value_objects::provider_kind::ProviderKind;
use serde_json::json;

/// Gitea-compatible mirror target (Codeberg, Forgejo, self-hosted Gitea)
#[derive(Debug, Clone)]
pub struct GiteaProvider {
    config: MirrorConfig,
}

impl GiteaProvider {
    pub fn new(config: MirrorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MirrorConfig {
        &self.config
    }

    pub fn organization(&self) -> Option<&str> {
        self.config.group(ProviderKind::Gitea)
    }

    fn auth(&self) -> ApiAuth {
        ApiAuth::Token(self.config.token.clone())
    }

    fn api_url(&self) -> &str {
        self.config.api_url(ProviderKind::Gitea)
    }

    pub async fn sanity_check(
        &self,
        job: &MirrorJob,
        transport: &dyn ApiTransport,
    ) -> Result<(), ForgeError> {
        let org = self
            .organization()
            .ok_or_else(|| ForgeError::missing_setting(&self.config.name, "organization"))?;
        let repo_url = format!("{}/repos/{}/{}", self.api_url(), org, job.repo_name());

        if let ProbeOutcome::Found(_) = probe(transport, ApiRequest::get(repo_url, self.auth())).await? {
            tracing::debug!(repo = job.repo_name(), org, provider = %self.config.name, "Repository already exists");
            return Ok(());
        }

        let payload = json!({
            "name": job.repo_name(),
            "default_branch": "master",
        });
        let create_url = format!("{}/orgs/{}/repos", self.api_url(), org);
        expect_success(transport, ApiRequest::post(create_url, self.auth(), payload)).await?;

        tracing::info!(repo = job.repo_name(), org, provider = %self.config.name, "Created repository");
        Ok(())
    }
}
