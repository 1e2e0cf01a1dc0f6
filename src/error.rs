use thiserror::Error;

/// DSS client error types
#[derive(Error, Debug)]
pub enum DssError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization/deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parsing failed: {0}")]
    Url(#[from] url::ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("API error: {status} - {message}")]
    Api {
        status: u16,
        error_type: Option<String>,
        message: String,
    },

    #[error("Transport busy: an export stream is still open on this client")]
    TransportBusy,

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type for DSS operations
pub type DssResult<T> = Result<T, DssError>;

impl DssError {
    /// Create an API error from a status code and message
    pub fn api_error(status: u16, error_type: Option<String>, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            error_type,
            message: message.into(),
        }
    }

    /// Create an authentication error
    pub fn auth_error(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// HTTP status of the failed call, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
