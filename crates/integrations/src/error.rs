//! Integration errors.

/// Error type for integration calls.
pub type Result<T> = std::result::Result<T, IntegrationError>;

/// Errors that can occur when calling an external service.
///
/// A missing API key is not an error; see the outcome types.
#[derive(Debug, thiserror::Error)]
pub enum IntegrationError {
    /// Request never produced a response
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Service answered with a non-success status
    #[error("{service} API returned HTTP {status}: {body}")]
    Api {
        /// Which integration failed
        service: &'static str,
        /// HTTP status code
        status: u16,
        /// Response body excerpt
        body: String,
    },

    /// Configuration present but unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Response body was not the expected JSON
    #[error("JSON error: {0}")]
    Decode(#[from] serde_json::Error),
}
