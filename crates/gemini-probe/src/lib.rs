#![cfg_attr(not(test), deny(unsafe_code))]
#![warn(
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::missing_docs_in_private_items
)]

//! One-shot diagnostic probe for the Gemini `generateContent` endpoint.
//!
//! A probe sends exactly one request and reports the raw outcome, so an
//! operator can tell API rate limiting apart from a bug in their own client.
//!
//! ```no_run
//! use gemini_probe::{GeminiProbe, request::ProbeRequest, report};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let probe = GeminiProbe::builder().api_key("your-api-key").build();
//! let response = probe.probe(&ProbeRequest::from_prompt("Say hi")).await?;
//! report::write_report(&mut std::io::stdout(), &response)?;
//! # Ok(())
//! # }
//! ```

use core::fmt;
use std::time::Duration;

use bon::Builder;
use url::Url;

pub mod config;
pub mod error;
mod internal;
pub mod report;
pub mod request;
pub mod response;

pub use crate::config::ProbeConfig;
pub use crate::error::ProbeError;
pub use crate::report::Verdict;
pub use crate::request::ProbeRequest;
pub use crate::response::{ProbeResponse, ResponseBody};

use crate::internal::ProbeRequestHelper;

/// Model probed when `--model` is not given.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
/// Public Gemini API host.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// API version segment of the endpoint path.
pub const DEFAULT_API_VERSION: &str = "v1beta";
/// Upper bound on the whole request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Environment variable holding the default API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Client for the single `generateContent` probe.
///
/// Holds everything needed to address the endpoint. Nothing is sent until
/// [`GeminiProbe::probe`] is awaited.
#[derive(Clone, Builder)]
pub struct GeminiProbe {
    /// API key sent as the `key` query parameter.
    #[builder(into)]
    pub(crate) api_key: Option<String>,
    /// Model identifier embedded in the endpoint path.
    #[builder(default = DEFAULT_MODEL.to_string(), into)]
    pub(crate) model: String,
    /// Scheme and host, optionally with a path prefix.
    #[builder(default = DEFAULT_BASE_URL.to_string(), into)]
    pub(crate) base_url: String,
    /// Version segment, e.g. `v1beta`.
    #[builder(default = DEFAULT_API_VERSION.to_string(), into)]
    pub(crate) api_version: String,
    /// Per-request timeout.
    #[builder(default = DEFAULT_TIMEOUT)]
    pub(crate) timeout: Duration,
    /// HTTP client, injectable for proxies and tests.
    #[builder(default)]
    pub(crate) client: reqwest::Client,
}

impl GeminiProbe {
    /// Create a probe for the default model with the provided API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::builder().api_key(api_key).build()
    }

    /// Create a probe keyed from `GEMINI_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns the `VarError` when the variable is unset or not unicode.
    pub fn load_from_env() -> Result<Self, std::env::VarError> {
        let api_key = std::env::var(API_KEY_ENV)?;
        Ok(Self::new(api_key))
    }

    /// Model identifier being probed.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// The `generateContent` URL for the configured model, without the key.
    ///
    /// # Errors
    ///
    /// `ProbeError::UrlBuildError` when the parts do not form a URL.
    pub fn endpoint_url(&self) -> Result<Url, ProbeError> {
        let url = format!(
            "{}/{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.api_version,
            self.model
        );
        Ok(Url::parse(&url)?)
    }

    /// Sends the single probe request.
    ///
    /// Any HTTP status is a successful probe; only transport failures and a
    /// missing key are errors.
    ///
    /// # Errors
    ///
    /// - `ProbeError::AuthenticationMissing` - no API key, nothing was sent
    /// - `ProbeError::UrlBuildError` - base URL and model do not form a URL
    /// - `ProbeError::ReqwestError` - timeout, DNS or connection failure
    pub async fn probe(&self, request: &ProbeRequest) -> Result<ProbeResponse, ProbeError> {
        let helper = ProbeRequestHelper::for_generate(self)?;
        helper.send_generate_content_request(request).await
    }
}

impl fmt::Debug for GeminiProbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiProbe")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let probe = GeminiProbe::new("test-api-key");
        assert_eq!(probe.api_key.as_deref(), Some("test-api-key"));
        assert_eq!(probe.model(), DEFAULT_MODEL);
        assert_eq!(probe.timeout, Duration::from_secs(30));
        assert_eq!(
            probe.endpoint_url().unwrap().as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let probe = GeminiProbe::builder()
            .base_url("http://127.0.0.1:8080/")
            .model("gemini-2.5-flash")
            .build();
        assert_eq!(
            probe.endpoint_url().unwrap().as_str(),
            "http://127.0.0.1:8080/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_bad_base_url() {
        let probe = GeminiProbe::builder().base_url("not a url").build();
        assert!(matches!(
            probe.endpoint_url(),
            Err(ProbeError::UrlBuildError(_))
        ));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let probe = GeminiProbe::new("super-secret-key");
        let debug = format!("{probe:?}");
        assert!(!debug.contains("super-secret-key"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_no_auth() {
        let probe = GeminiProbe::builder().build();
        assert_eq!(probe.api_key, None);
    }
}
