use super::error::ForgeError;
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

/// Credentials attached to an API request
#[derive(Clone, PartialEq, Eq)]
pub enum ApiAuth {
    /// `Authorization: token <token>` (GitHub, Gitea)
    Token(String),
    /// `Authorization: Bearer <token>` (SourceHut)
    Bearer(String),
    /// HTTP basic auth (Bitbucket app passwords)
    Basic { username: String, password: String },
}

impl std::fmt::Debug for ApiAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiAuth::Token(_) => write!(f, "Token(<redacted>)"),
            ApiAuth::Bearer(_) => write!(f, "Bearer(<redacted>)"),
            ApiAuth::Basic { username, .. } => write!(f, "Basic({}, <redacted>)", username),
        }
    }
}

/// A single JSON request against a provider API
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub auth: ApiAuth,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(url: impl Into<String>, auth: ApiAuth) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            auth,
            body: None,
        }
    }

    pub fn post(url: impl Into<String>, auth: ApiAuth, body: Value) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            auth,
            body: Some(body),
        }
    }

    /// `METHOD url`, used in log lines and error messages
    pub fn describe(&self) -> String {
        format!("{} {}", self.method, self.url)
    }
}

/// Status code and decoded JSON body of a response
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

/// Result of an existence probe
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeOutcome {
    Found(Value),
    NotFound,
}

impl ProbeOutcome {
    pub fn exists(&self) -> bool {
        matches!(self, ProbeOutcome::Found(_))
    }
}

/// Transport used by every provider to talk to its API
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Send the request. Non-2xx statuses are returned as responses, not errors;
    /// only failures to get a response at all are errors.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ForgeError>;
}

/// Send a probe request: 2xx is `Found`, 404 is `NotFound`, anything else fails
pub async fn probe(
    transport: &dyn ApiTransport,
    request: ApiRequest,
) -> Result<ProbeOutcome, ForgeError> {
    let description = request.describe();
    let response = transport.send(request).await?;

    if response.is_success() {
        Ok(ProbeOutcome::Found(response.body))
    } else if response.is_not_found() {
        Ok(ProbeOutcome::NotFound)
    } else {
        Err(ForgeError::unexpected_status(description, &response))
    }
}

/// Send a request that must succeed with a 2xx status
pub async fn expect_success(
    transport: &dyn ApiTransport,
    request: ApiRequest,
) -> Result<Value, ForgeError> {
    let description = request.describe();
    let response = transport.send(request).await?;

    if response.is_success() {
        Ok(response.body)
    } else {
        Err(ForgeError::unexpected_status(description, &response))
    }
}

/// reqwest-backed transport used outside of tests
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, ForgeError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("repomirror/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ForgeError::transport("building HTTP client", e))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ApiTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ForgeError> {
        let description = request.describe();
        tracing::debug!(request = %description, "Sending API request");

        let mut builder = self
            .client
            .request(request.method, &request.url)
            .header(reqwest::header::ACCEPT, "application/json");

        builder = match request.auth {
            ApiAuth::Token(token) => {
                builder.header(reqwest::header::AUTHORIZATION, format!("token {}", token))
            }
            ApiAuth::Bearer(token) => builder.bearer_auth(token),
            ApiAuth::Basic { username, password } => builder.basic_auth(username, Some(password)),
        };

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ForgeError::transport(description.clone(), e))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ForgeError::transport(description.clone(), e))?;

        // Error pages are not always JSON; keep the raw text for diagnostics.
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        tracing::debug!(request = %description, status, "API response received");
        Ok(ApiResponse::new(status, body))
    }
}
