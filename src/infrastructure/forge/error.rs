use super::transport::ApiResponse;

/// Errors raised while talking to a hosting provider
///
/// Every variant is a per-job failure: it aborts the sanity check for one
/// job/provider pair and never crosses a worker boundary.
#[derive(Debug, thiserror::Error)]
pub enum ForgeError {
    #[error("{request} returned HTTP {status}: {body}")]
    UnexpectedStatus {
        request: String,
        status: u16,
        body: String,
    },

    #[error("Transport error during {context}: {source}")]
    Transport {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("GraphQL query failed: {message}")]
    GraphQl { message: String },

    #[error("Upstream returned null for `{field}`")]
    UpstreamNull { field: String },

    #[error("Response is missing field `{field}`")]
    MissingField { field: String },

    #[error("Provider '{provider}' requires `{key}` to be configured")]
    MissingSetting { provider: String, key: String },

    #[error("Unsupported provider '{provider}'")]
    Unsupported { provider: String },
}

impl ForgeError {
    pub fn unexpected_status(request: impl Into<String>, response: &ApiResponse) -> Self {
        let body = match &response.body {
            serde_json::Value::Null => String::new(),
            serde_json::Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        Self::UnexpectedStatus {
            request: request.into(),
            status: response.status,
            body,
        }
    }

    pub fn transport(context: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            context: context.into(),
            source,
        }
    }

    pub fn graphql(message: impl Into<String>) -> Self {
        Self::GraphQl {
            message: message.into(),
        }
    }

    pub fn upstream_null(field: impl Into<String>) -> Self {
        Self::UpstreamNull {
            field: field.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    pub fn unsupported(provider: impl Into<String>) -> Self {
        Self::Unsupported {
            provider: provider.into(),
        }
    }

    pub fn missing_setting(provider: impl Into<String>, key: impl Into<String>) -> Self {
        Self::MissingSetting {
            provider: provider.into(),
            key: key.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unexpected_status_message() {
        let response = ApiResponse::new(403, json!({"message": "Forbidden"}));
        let error = ForgeError::unexpected_status("GET https://x/repos/a/b", &response);
        assert_eq!(
            error.to_string(),
            r#"GET https://x/repos/a/b returned HTTP 403: {"message":"Forbidden"}"#
        );
    }

    #[test]
    fn test_unexpected_status_with_text_body() {
        let response = ApiResponse::new(502, json!("Bad Gateway"));
        let error = ForgeError::unexpected_status("POST https://x", &response);
        assert!(error.to_string().ends_with("HTTP 502: Bad Gateway"));
    }

    #[test]
    fn test_missing_setting_message() {
        let error = ForgeError::missing_setting("sourcehut", "username");
        assert_eq!(
            error.to_string(),
            "Provider 'sourcehut' requires `username` to be configured"
        );
    }
}
