use thiserror::Error;

/// Failures surfaced by the Kuupress API client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Kuupress API is not configured: {0}")]
    Config(String),
    #[error("failed to reach the Kuupress API: {0}")]
    Network(#[source] reqwest::Error),
    #[error("Kuupress API error: {status} {status_text}")]
    Remote { status: u16, status_text: String },
    #[error("unexpected response body from the Kuupress API: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("no Kuupress profile named `{username}`")]
    NotFound { username: String },
}

impl ApiError {
    /// Transport failures and 5xx answers are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Remote { status, .. } => *status >= 500,
            _ => false,
        }
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;

    fn remote(status: u16) -> ApiError {
        ApiError::Remote {
            status,
            status_text: String::new(),
        }
    }

    #[test]
    fn only_server_errors_are_retryable() {
        assert!(remote(500).is_retryable());
        assert!(remote(503).is_retryable());
        assert!(!remote(404).is_retryable());
        assert!(!remote(429).is_retryable());
        assert!(!ApiError::Config("unset".to_owned()).is_retryable());
        assert!(
            !ApiError::NotFound {
                username: "aki".to_owned()
            }
            .is_retryable()
        );
    }

    #[test]
    fn remote_error_mentions_status() {
        let err = ApiError::Remote {
            status: 503,
            status_text: "Service Unavailable".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "Kuupress API error: 503 Service Unavailable"
        );
    }
}
