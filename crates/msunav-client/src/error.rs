use thiserror::Error;

/// Errors returned by the Navigator API client.
///
/// [`NavigatorError::Http`] and [`NavigatorError::UnexpectedStatus`] are
/// transport failures; [`NavigatorError::Deserialize`] is a parse failure.
/// A well-formed response with no usable data is not an error.
#[derive(Debug, Error)]
pub enum NavigatorError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured base URL cannot be used to build endpoint URLs.
    #[error("invalid base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl NavigatorError {
    /// Returns `true` for network failures and non-2xx responses.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::UnexpectedStatus { .. })
    }
}

/// Errors reading or writing the persisted last-search state.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid state file {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
