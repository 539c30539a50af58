//! Operator-facing rendering of a probe.
//!
//! Everything here writes to a caller-supplied [`Write`] so the binary can
//! target stdout and tests can target a buffer.

use core::fmt;
use std::io::{self, Write};

use reqwest::StatusCode;
use serde_json::Value;

use crate::response::{ProbeResponse, ResponseBody};

/// Printed when the body yields no model text to show.
pub const NO_OUTPUT_MESSAGE: &str = "Non-200 response received. See body above for error details.";

/// Printed in place of model output that is empty after trimming.
pub const EMPTY_OUTPUT_MARKER: &str = "<empty>";

/// Final classification of a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// HTTP 429: the API is throttling us.
    RateLimited,
    /// HTTP 200: the API is fine; look downstream.
    Succeeded,
    /// Anything else.
    Other(StatusCode),
}

impl Verdict {
    /// Classifies a status code.
    #[must_use]
    pub fn classify(status: StatusCode) -> Self {
        match status {
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimited,
            StatusCode::OK => Self::Succeeded,
            other => Self::Other(other),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => f.write_str(
                "Result: Rate limit (429) confirmed from the API - client code is not the culprit.",
            ),
            Self::Succeeded => f.write_str(
                "Result: Request succeeded - investigate frontend/back-end code if the UI still fails.",
            ),
            Self::Other(status) => write!(
                f,
                "Result: Received HTTP {}. Check the payload and API key.",
                status.as_u16()
            ),
        }
    }
}

/// Header block printed before the request goes out.
///
/// # Errors
///
/// Propagates write failures.
pub fn write_banner(
    out: &mut impl Write,
    endpoint: &str,
    model: &str,
    prompt: &str,
) -> io::Result<()> {
    writeln!(out, "Testing Gemini endpoint {endpoint}")?;
    writeln!(out, "Model: {model}")?;
    writeln!(out, "Prompt: {prompt}")
}

/// Two-space indented JSON.
fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Status line, Retry-After notice, body, model output and verdict.
///
/// # Errors
///
/// Propagates write failures.
pub fn write_report(out: &mut impl Write, response: &ProbeResponse) -> io::Result<()> {
    writeln!(out, "HTTP {} {}", response.status_code(), response.reason())?;
    if let Some(retry_after) = &response.retry_after {
        writeln!(out, "Retry-After header: {retry_after}s")?;
    }

    match &response.body {
        ResponseBody::Json(value) => writeln!(out, "Response body:\n{}", pretty(value))?,
        ResponseBody::Raw(text) => writeln!(out, "Raw response body:\n{text}")?,
    }

    match response.model_output() {
        Some(text) if text.is_empty() => writeln!(out, "\nModel output:\n{EMPTY_OUTPUT_MARKER}")?,
        Some(text) => writeln!(out, "\nModel output:\n{text}")?,
        None => writeln!(out, "\n{NO_OUTPUT_MESSAGE}")?,
    }

    writeln!(out, "\n{}", Verdict::classify(response.status))
}
