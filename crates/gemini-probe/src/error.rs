use thiserror::Error;

/// Failures that stop a probe from producing a response.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Errors from the HTTP client: timeouts, DNS, refused connections, body reads
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),

    /// JSON serialization errors
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),

    /// No API key was supplied on the command line or in the environment
    #[error("Provide an API key via --api-key or the GEMINI_API_KEY environment variable.")]
    AuthenticationMissing,

    /// URL building error
    #[error("URL build failed: {0}")]
    UrlBuildError(String),
}

impl From<url::ParseError> for ProbeError {
    fn from(err: url::ParseError) -> Self {
        ProbeError::UrlBuildError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authentication_missing_message_names_both_sources() {
        let message = ProbeError::AuthenticationMissing.to_string();
        assert!(message.contains("--api-key"));
        assert!(message.contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_url_parse_error_conversion() {
        let err = url::Url::parse("not a url").unwrap_err();
        let probe_err = ProbeError::from(err);
        assert!(matches!(probe_err, ProbeError::UrlBuildError(_)));
        assert!(probe_err.to_string().starts_with("URL build failed"));
    }
}
