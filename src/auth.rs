use crate::error::{DssError, DssResult};
use base64::{Engine, engine::general_purpose};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

/// Authentication trait for the DSS public API
#[async_trait::async_trait]
pub trait Authentication: Send + Sync {
    /// Apply authentication to the request headers
    async fn apply_auth(&self, headers: &mut HeaderMap) -> DssResult<()>;
}

fn header_value(value: String) -> DssResult<HeaderValue> {
    value
        .parse()
        .map_err(|e| DssError::auth_error(format!("Invalid auth header: {}", e)))
}

/// API key authentication.
///
/// DSS expects the key as the user name of an HTTP Basic header, with an
/// empty password.
#[derive(Clone)]
pub struct ApiKeyAuth {
    api_key: String,
}

impl ApiKeyAuth {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }
}

impl std::fmt::Debug for ApiKeyAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyAuth").field("api_key", &"***").finish()
    }
}

#[async_trait::async_trait]
impl Authentication for ApiKeyAuth {
    async fn apply_auth(&self, headers: &mut HeaderMap) -> DssResult<()> {
        let credentials = format!("{}:", self.api_key);
        let encoded = general_purpose::STANDARD.encode(credentials.as_bytes());
        headers.insert(AUTHORIZATION, header_value(format!("Basic {}", encoded))?);

        Ok(())
    }
}

/// Bearer token authentication
#[derive(Debug, Clone)]
pub struct BearerAuth {
    token: String,
}

impl BearerAuth {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait::async_trait]
impl Authentication for BearerAuth {
    async fn apply_auth(&self, headers: &mut HeaderMap) -> DssResult<()> {
        headers.insert(AUTHORIZATION, header_value(format!("Bearer {}", self.token))?);

        Ok(())
    }
}

/// No authentication
#[derive(Debug, Clone)]
pub struct NoAuth;

#[async_trait::async_trait]
impl Authentication for NoAuth {
    async fn apply_auth(&self, _headers: &mut HeaderMap) -> DssResult<()> {
        Ok(())
    }
}
