use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::{GeminiProbe, ProbeError, request::ProbeRequest, response::ProbeResponse};

/// Builds and sends the one `generateContent` call.
pub(crate) struct ProbeRequestHelper {
    /// Client shared with the owning probe.
    client: reqwest::Client,
    /// Endpoint without the key.
    endpoint: Url,
    /// Non-empty API key.
    api_key: String,
    /// Per-request timeout.
    timeout: Duration,
}

impl ProbeRequestHelper {
    /// Fails before any I/O if no usable key is configured.
    pub(crate) fn for_generate(probe: &GeminiProbe) -> Result<Self, ProbeError> {
        let api_key = probe
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(ProbeError::AuthenticationMissing)?
            .to_string();

        Ok(Self {
            client: probe.client.clone(),
            endpoint: probe.endpoint_url()?,
            api_key,
            timeout: probe.timeout,
        })
    }

    /// POST to the endpoint with key, content type and timeout applied.
    fn build_request(&self) -> reqwest::RequestBuilder {
        self.client
            .post(self.endpoint.clone())
            .query(&[("key", self.api_key.as_str())])
            .header(CONTENT_TYPE, "application/json")
            .timeout(self.timeout)
    }

    /// Sends `request` and reads back whatever the server answered.
    pub(crate) async fn send_generate_content_request(
        &self,
        request: &ProbeRequest,
    ) -> Result<ProbeResponse, ProbeError> {
        let body = serde_json::to_value(request)?;
        log::debug!("POST {}?key=[REDACTED] payload: {}", self.endpoint, body);

        let res = self.build_request().json(&body).send().await?;
        ProbeResponse::from_reqwest(res).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_rejected() {
        let probe = GeminiProbe::builder().build();
        assert!(matches!(
            ProbeRequestHelper::for_generate(&probe),
            Err(ProbeError::AuthenticationMissing)
        ));
    }

    #[test]
    fn test_empty_key_is_rejected() {
        let probe = GeminiProbe::builder().api_key("").build();
        assert!(matches!(
            ProbeRequestHelper::for_generate(&probe),
            Err(ProbeError::AuthenticationMissing)
        ));
    }

    #[test]
    fn test_request_carries_key_and_json_content_type() {
        let probe = GeminiProbe::builder()
            .api_key("secret")
            .base_url("https://example.test")
            .model("m")
            .build();
        let helper = ProbeRequestHelper::for_generate(&probe).unwrap();
        let request = helper.build_request().build().unwrap();

        assert_eq!(request.method(), reqwest::Method::POST);
        assert_eq!(
            request.url().as_str(),
            "https://example.test/v1beta/models/m:generateContent?key=secret"
        );
        assert_eq!(request.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(request.timeout(), Some(&Duration::from_secs(30)));
    }
}
