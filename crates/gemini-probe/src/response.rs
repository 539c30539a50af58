use reqwest::{StatusCode, header::RETRY_AFTER};
use serde::Deserialize;
use serde_json::Value;

use crate::ProbeError;

/// What came back in the response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// The body parsed as JSON.
    Json(Value),
    /// The body did not parse as JSON and is kept verbatim.
    Raw(String),
}

impl ResponseBody {
    /// Parses `text` as JSON, keeping it verbatim when that fails.
    #[must_use]
    pub fn parse(text: String) -> Self {
        match serde_json::from_str::<Value>(&text) {
            Ok(value) => Self::Json(value),
            Err(err) => {
                log::warn!("response body is not valid JSON: {err}");
                Self::Raw(text)
            }
        }
    }

    /// The parsed JSON, `None` for a raw body.
    #[must_use]
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Raw(_) => None,
        }
    }
}

/// Outcome of the probe, kept only long enough to be rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResponse {
    /// HTTP status of the response.
    pub status: StatusCode,
    /// `Retry-After` header value, if the server sent a non-empty one.
    pub retry_after: Option<String>,
    /// Parsed or raw body.
    pub body: ResponseBody,
}

/// The slice of a response candidate the probe reads.
#[derive(Debug, Default, Deserialize)]
struct Candidate {
    /// Generated content; absent when generation was blocked.
    #[serde(default)]
    content: CandidateContent,
}

/// Content of a candidate.
#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    /// Parts in generation order.
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

/// A single part; only text parts carry `text`.
#[derive(Debug, Default, Deserialize)]
struct CandidatePart {
    /// Text of the part, if any.
    text: Option<String>,
}

impl ProbeResponse {
    /// Assembles a response. An empty `retry_after` is treated as absent.
    pub fn new(status: StatusCode, retry_after: Option<String>, body: ResponseBody) -> Self {
        Self {
            status,
            retry_after: retry_after.filter(|v| !v.is_empty()),
            body,
        }
    }

    /// Drains a `reqwest` response. Fails only if the body cannot be read.
    pub async fn from_reqwest(res: reqwest::Response) -> Result<Self, ProbeError> {
        let status = res.status();
        let retry_after = res
            .headers()
            .get(RETRY_AFTER)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());
        let text = res.text().await?;
        log::debug!("received HTTP {} with {} byte body", status.as_u16(), text.len());

        Ok(Self::new(status, retry_after, ResponseBody::parse(text)))
    }

    /// Numeric HTTP status.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Canonical reason phrase, empty for unregistered codes.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or_default()
    }

    /// Text of the first candidate: non-empty `text` parts joined by newlines,
    /// then trimmed.
    ///
    /// `None` when the status is not 2xx, the body is not JSON, or there is no
    /// first candidate. An empty string means a candidate came back without
    /// any text.
    #[must_use]
    pub fn model_output(&self) -> Option<String> {
        if !self.status.is_success() {
            return None;
        }
        let value = self.body.as_json()?;
        let first = value.get("candidates")?.get(0)?;
        let candidate = Candidate::deserialize(first).ok()?;

        let text = candidate
            .content
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        Some(text.trim().to_string())
    }
}
