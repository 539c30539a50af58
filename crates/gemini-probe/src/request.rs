use bon::Builder;
use serde::Serialize;

/// Prompt sent when the caller does not supply one.
pub const DEFAULT_PROMPT: &str = "Explain prepared statements in one paragraph.";

/// Substituted when the prompt is blank after trimming.
pub const FALLBACK_PROMPT: &str = "Say hello";

/// Sampling temperature attached to every probe.
pub const PROBE_TEMPERATURE: f64 = 0.2;

/// A text part of a content item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Text {
    /// The prompt text.
    pub text: String,
}

/// One content item of the request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Content {
    /// Parts sent in order.
    pub parts: Vec<Text>,
}

impl Content {
    /// Content made of a single text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![Text { text: text.into() }],
        }
    }
}

/// Sampling settings; the probe only pins the temperature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationConfig {
    /// Sampling temperature.
    pub temperature: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: PROBE_TEMPERATURE,
        }
    }
}

/// Body of the single `generateContent` call.
#[derive(Debug, Clone, PartialEq, Serialize, Builder)]
#[serde(rename_all = "camelCase")]
pub struct ProbeRequest {
    /// Content items, a single one for a probe.
    #[builder(field)]
    pub contents: Vec<Content>,
    /// Serialized as `generationConfig`.
    #[builder(default)]
    pub generation_config: GenerationConfig,
}

impl<S: probe_request_builder::State> ProbeRequestBuilder<S> {
    /// Appends a content item.
    #[must_use]
    pub fn content(mut self, content: impl Into<Content>) -> Self {
        self.contents.push(content.into());
        self
    }
}

impl ProbeRequest {
    /// Wraps a user prompt. Surrounding whitespace is dropped and a blank
    /// prompt becomes [`FALLBACK_PROMPT`].
    #[must_use]
    pub fn from_prompt(prompt: &str) -> Self {
        let trimmed = prompt.trim();
        let text = if trimmed.is_empty() {
            FALLBACK_PROMPT
        } else {
            trimmed
        };
        Self::builder().content(Content::text(text)).build()
    }

    /// Text of the first part, which is what the probe actually sends.
    #[must_use]
    pub fn prompt_text(&self) -> Option<&str> {
        self.contents
            .first()
            .and_then(|c| c.parts.first())
            .map(|p| p.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blank_prompts_fall_back() {
        for prompt in ["", "   ", "\n\t "] {
            let request = ProbeRequest::from_prompt(prompt);
            assert_eq!(request.prompt_text(), Some(FALLBACK_PROMPT));
        }
    }

    #[test]
    fn test_prompt_is_trimmed() {
        let request = ProbeRequest::from_prompt("  What is a nonce?\n");
        assert_eq!(request.prompt_text(), Some("What is a nonce?"));
    }

    #[test]
    fn test_temperature_is_fixed() {
        for prompt in ["", "hi", "a much longer prompt with words"] {
            let request = ProbeRequest::from_prompt(prompt);
            assert_eq!(request.generation_config.temperature, 0.2);
        }
    }

    #[test]
    fn test_payload_shape() {
        let request = ProbeRequest::from_prompt("Ping");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "contents": [{ "parts": [{ "text": "Ping" }] }],
                "generationConfig": { "temperature": 0.2 }
            })
        );
    }
}
