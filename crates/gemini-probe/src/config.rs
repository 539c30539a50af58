use crate::{ProbeError, request::DEFAULT_PROMPT};

/// Inputs resolved from the command line and environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    /// Non-empty API key.
    pub api_key: String,
    /// Prompt exactly as supplied, before trimming.
    pub prompt: String,
}

impl ProbeConfig {
    /// `api_key` is whatever the CLI resolved (explicit flag first, then
    /// `GEMINI_API_KEY`). An absent or empty key is fatal.
    ///
    /// # Errors
    ///
    /// `ProbeError::AuthenticationMissing` when no usable key is given.
    pub fn resolve(api_key: Option<String>, prompt: Option<String>) -> Result<Self, ProbeError> {
        let api_key = api_key
            .filter(|key| !key.is_empty())
            .ok_or(ProbeError::AuthenticationMissing)?;

        Ok(Self {
            api_key,
            prompt: prompt.unwrap_or_else(|| DEFAULT_PROMPT.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_fatal() {
        assert!(matches!(
            ProbeConfig::resolve(None, None),
            Err(ProbeError::AuthenticationMissing)
        ));
        assert!(matches!(
            ProbeConfig::resolve(Some(String::new()), Some("hi".into())),
            Err(ProbeError::AuthenticationMissing)
        ));
    }

    #[test]
    fn test_prompt_defaults() {
        let config = ProbeConfig::resolve(Some("k".into()), None).unwrap();
        assert_eq!(config.api_key, "k");
        assert_eq!(config.prompt, DEFAULT_PROMPT);
    }

    #[test]
    fn test_explicit_blank_prompt_is_kept() {
        let config = ProbeConfig::resolve(Some("k".into()), Some("   ".into())).unwrap();
        assert_eq!(config.prompt, "   ");
    }
}
