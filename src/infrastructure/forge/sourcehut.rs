use super::error::ForgeError;
use super::transport::{expect_success, ApiAuth, ApiRequest, ApiTransport, ProbeOutcome};
use crate::domain::entities::{mirror_config::MirrorConfig, mirror_job::MirrorJob};
use crate::domain::value_objects::provider_kind::ProviderKind;
use serde_json::{json, Value};

const REPOSITORY_QUERY: &str = "query RepositoryByName($username: String!, $name: String!) {
  user(username: $username) { repository(name: $name) { id } }
}";

const CREATE_REPOSITORY: &str = "mutation CreateRepository($name: String!, $visibility: Visibility!) {
  createRepository(name: $name, visibility: $visibility) { id }
}";

const GRANT_ACCESS: &str = "mutation GrantAccess($repoId: Int!, $entity: ID!) {
  updateACL(repoId: $repoId, mode: RW, entity: $entity) { id }
}";

/// SourceHut (git.sr.ht) mirror target, driven through the GraphQL API
///
/// The configured group is a personal namespace such as `~alice`. New
/// repositories are public and grant read/write access to the configured user.
#[derive(Debug, Clone)]
pub struct SourceHutProvider {
    config: MirrorConfig,
}

impl SourceHutProvider {
    pub fn new(config: MirrorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MirrorConfig {
        &self.config
    }

    pub fn owner(&self) -> Option<&str> {
        self.config.group(ProviderKind::SourceHut)
    }

    fn auth(&self) -> ApiAuth {
        ApiAuth::Bearer(self.config.token.clone())
    }

    pub async fn sanity_check(
        &self,
        job: &MirrorJob,
        transport: &dyn ApiTransport,
    ) -> Result<(), ForgeError> {
        let owner = self
            .owner()
            .ok_or_else(|| ForgeError::missing_setting("sourcehut", "organization"))?;
        let username = owner.trim_start_matches('~');

        if self.lookup(username, job.repo_name(), transport).await?.exists() {
            tracing::debug!(repo = job.repo_name(), owner, "Repository already exists on sourcehut");
            return Ok(());
        }

        let user = self
            .config
            .username
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| ForgeError::missing_setting("sourcehut", "username"))?;

        let repo_id = self.create(job.repo_name(), transport).await?;
        self.grant_access(repo_id, user, transport).await?;

        tracing::info!(repo = job.repo_name(), owner, repo_id, "Created repository on sourcehut");
        Ok(())
    }

    async fn lookup(
        &self,
        username: &str,
        name: &str,
        transport: &dyn ApiTransport,
    ) -> Result<ProbeOutcome, ForgeError> {
        let data = self
            .execute(
                REPOSITORY_QUERY,
                json!({ "username": username, "name": name }),
                transport,
            )
            .await?;

        // A missing user and a missing repository both mean "not there yet".
        match data.get("user").and_then(|u| u.get("repository")) {
            Some(repository) if !repository.is_null() => Ok(ProbeOutcome::Found(repository.clone())),
            _ => Ok(ProbeOutcome::NotFound),
        }
    }

    async fn create(&self, name: &str, transport: &dyn ApiTransport) -> Result<i64, ForgeError> {
        let data = self
            .execute(
                CREATE_REPOSITORY,
                json!({ "name": name, "visibility": "PUBLIC" }),
                transport,
            )
            .await?;

        let created = non_null(&data, "createRepository")?;
        created
            .get("id")
            .and_then(Value::as_i64)
            .ok_or_else(|| ForgeError::missing_field("createRepository.id"))
    }

    async fn grant_access(
        &self,
        repo_id: i64,
        user: &str,
        transport: &dyn ApiTransport,
    ) -> Result<(), ForgeError> {
        let entity = canonical_user(user);
        let data = self
            .execute(
                GRANT_ACCESS,
                json!({ "repoId": repo_id, "entity": entity }),
                transport,
            )
            .await?;

        non_null(&data, "updateACL")?;
        Ok(())
    }

    /// Run a GraphQL document and return its `data` object
    async fn execute(
        &self,
        query: &str,
        variables: Value,
        transport: &dyn ApiTransport,
    ) -> Result<Value, ForgeError> {
        let endpoint = self.config.api_url(ProviderKind::SourceHut);
        let body = json!({ "query": query, "variables": variables });
        let mut response = expect_success(transport, ApiRequest::post(endpoint, self.auth(), body)).await?;

        if let Some(errors) = response.get("errors").and_then(Value::as_array) {
            if !errors.is_empty() {
                let message = errors
                    .iter()
                    .map(|e| {
                        e.get("message")
                            .and_then(Value::as_str)
                            .map(str::to_string)
                            .unwrap_or_else(|| e.to_string())
                    })
                    .collect::<Vec<_>>()
                    .join("; ");
                return Err(ForgeError::graphql(message));
            }
        }

        match response.get_mut("data").map(Value::take) {
            Some(data) if !data.is_null() => Ok(data),
            _ => Err(ForgeError::upstream_null("data")),
        }
    }
}

fn non_null<'a>(data: &'a Value, field: &str) -> Result<&'a Value, ForgeError> {
    match data.get(field) {
        Some(value) if !value.is_null() => Ok(value),
        _ => Err(ForgeError::upstream_null(field)),
    }
}

fn canonical_user(user: &str) -> String {
    if user.starts_with('~') {
        user.to_string()
    } else {
        format!("~{}", user)
    }
}
