use cwcrm_core::CoreError;

/// Errors from the CRM REST client.
///
/// Every variant reaches the user through the same path:
/// [`ClientError::message`] shown as a transient alert.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("CRM API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the error header or body.
        message: String,
    },

    /// The record was rejected before any request was sent.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ClientError {
    /// Text to surface to the user.
    pub fn message(&self) -> String {
        match self {
            ClientError::Request(e) => e.to_string(),
            ClientError::Api { message, .. } => message.clone(),
            ClientError::Core(CoreError::Validation(msg)) => msg.clone(),
            ClientError::Core(e) => e.to_string(),
        }
    }

    /// HTTP status, when the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Request(e) => e.status().map(|s| s.as_u16()),
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Core(_) => None,
        }
    }
}

/// Invalid environment configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var}={value:?} is invalid: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}
