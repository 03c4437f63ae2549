use thiserror::Error;

/// Errors raised while talking to the instance API.
/// `anyhow` is used at the top level for CLI error handling,
/// these typed errors let the API layer be precise about failures.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The instance name could not be turned into an API base URL
    #[error("Invalid instance '{instance}': {message}")]
    InvalidInstance { instance: String, message: String },

    /// The server answered with a non-success status code
    #[error("HTTP {status} from {url}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    /// The request never got a response (DNS, TLS, timeout, ...)
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// A pagination link points away from the instance we hold a token for
    #[error("Refusing to follow link to another host: {url}")]
    ForeignLink { url: String },

    /// The response body was not the JSON we expected
    #[error("Invalid response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    /// Build an error from a failed `ureq` call
    pub fn from_ureq(url: &str, err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, response) => {
                let body = response.into_string().unwrap_or_default();
                ApiError::Status {
                    url: url.to_string(),
                    status,
                    body: crate::common::format::truncate(body.trim(), 200),
                }
            }
            ureq::Error::Transport(transport) => ApiError::Transport {
                url: url.to_string(),
                message: transport.to_string(),
            },
        }
    }

    /// HTTP status code, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
