//! Gemini gateway implementation.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value as JsonValue;
use tracing::{debug, error, info};

use docbench_core::defaults::{self, FALLBACK_ANALYSIS, FALLBACK_OCR, FALLBACK_QNA};
use docbench_core::logging::SUBSYSTEM_INFERENCE;
use docbench_core::{Error, GenerationSettings, ModelGateway, Result};

use super::error::{to_docbench_error, GeminiErrorCode};
use super::types::*;
use crate::config::GeminiConfig;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gateway over the Gemini `generateContent` endpoint.
///
/// Every operation is a single request; nothing is retried or cached.
pub struct GeminiGateway {
    client: Client,
    config: GeminiConfig,
}

/// Shape of one `generateContent` call.
struct CallSpec<'a> {
    op: &'static str,
    settings: &'a GenerationSettings,
    parts: Vec<Part>,
    temperature: Option<f32>,
    response_mime_type: Option<&'static str>,
}

impl GeminiGateway {
    /// Create a new gateway with the given configuration.
    pub fn new(config: GeminiConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            subsystem = SUBSYSTEM_INFERENCE,
            component = "gemini",
            base_url = %config.base_url,
            "Initializing Gemini gateway"
        );

        Ok(Self { client, config })
    }

    /// Create with default configuration.
    pub fn with_defaults() -> Result<Self> {
        Self::new(GeminiConfig::default())
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(GeminiConfig::from_env()?)
    }

    /// Get the current configuration.
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        )
    }

    /// Issue one `generateContent` request and return the reply text.
    async fn generate_content(&self, call: CallSpec<'_>) -> Result<String> {
        let api_key = self
            .config
            .resolve_api_key()
            .ok_or_else(|| Error::Config(defaults::MSG_NO_API_KEY.to_string()))?;

        let prompt_len: usize = call
            .parts
            .iter()
            .map(|p| {
                p.text.as_ref().map_or(0, String::len)
                    + p.inline_data.as_ref().map_or(0, |d| d.data.len())
            })
            .sum();

        debug!(
            subsystem = SUBSYSTEM_INFERENCE,
            component = "gemini",
            op = call.op,
            model = %call.settings.model,
            max_tokens = call.settings.max_tokens,
            prompt_len,
            "Sending generateContent request"
        );

        let request = GenerateContentRequest {
            contents: vec![Content::user(call.parts)],
            generation_config: GenerationConfig {
                max_output_tokens: call.settings.max_tokens,
                temperature: call.temperature,
                response_mime_type: call.response_mime_type.map(str::to_string),
            },
        };

        let start = Instant::now();
        let response = self
            .client
            .post(self.endpoint(&call.settings.model))
            .header(API_KEY_HEADER, api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Request(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let (api_status, message) = match serde_json::from_str::<GeminiErrorResponse>(&body) {
                Ok(parsed) => (parsed.error.status, parsed.error.message),
                Err(_) => (String::new(), body),
            };
            let code = GeminiErrorCode::from_response(status.as_u16(), &api_status, &message);
            return Err(to_docbench_error(code, &message));
        }

        let result: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| Error::Request(format!("Failed to parse response: {}", e)))?;

        let text = result.text();
        debug!(
            subsystem = SUBSYSTEM_INFERENCE,
            component = "gemini",
            op = call.op,
            response_len = text.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "generateContent complete"
        );
        Ok(text)
    }
}

/// Log a failed call and rethrow it as the operation's user-facing error.
///
/// A missing API key is passed through unchanged so the user is told what
/// to fix.
fn fail(op: &'static str, err: Error, message: &str) -> Error {
    error!(
        subsystem = SUBSYSTEM_INFERENCE,
        component = "gemini",
        op,
        error = %err,
        "Gateway call failed"
    );
    match err {
        Error::Config(_) => err,
        _ => Error::Gateway(message.to_string()),
    }
}

pub(crate) fn or_fallback(text: String, fallback: &str) -> String {
    if text.is_empty() {
        fallback.to_string()
    } else {
        text
    }
}

/// Remove a surrounding Markdown code fence, if any.
pub(crate) fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = match rest.split_once('\n') {
        Some((_lang, body)) => body,
        None => strip_fence_language(rest),
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Drop a language tag glued to the opening fence, as in "```json{...}```".
fn strip_fence_language(rest: &str) -> &str {
    let tag_len = rest
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(rest.len());
    let after = &rest[tag_len..];
    if tag_len > 0 && after.starts_with(['{', '[', ' ', '\t']) {
        after
    } else {
        rest
    }
}

/// Parse a structured-note reply. An empty reply is an empty object.
pub(crate) fn parse_note_reply(reply: &str) -> Result<JsonValue> {
    let body = strip_code_fence(reply);
    let body = if body.is_empty() { "{}" } else { body };
    serde_json::from_str(body).map_err(|e| {
        error!(
            subsystem = SUBSYSTEM_INFERENCE,
            op = "generate_structured_note",
            error = %e,
            response_len = reply.len(),
            "Structured note reply is not valid JSON"
        );
        Error::InvalidFormat(format!(
            "{} The model did not return valid JSON.",
            defaults::MSG_NOTE_FAILED
        ))
    })
}

#[async_trait]
impl ModelGateway for GeminiGateway {
    async fn perform_ocr(
        &self,
        base64_payload: &str,
        mime_type: &str,
        settings: &GenerationSettings,
    ) -> Result<String> {
        let call = CallSpec {
            op: "perform_ocr",
            settings,
            parts: vec![
                Part::inline(mime_type, base64_payload),
                Part::text(defaults::OCR_PROMPT),
            ],
            temperature: None,
            response_mime_type: None,
        };
        self.generate_content(call)
            .await
            .map(|text| or_fallback(text, FALLBACK_OCR))
            .map_err(|e| fail("perform_ocr", e, defaults::MSG_OCR_FAILED))
    }

    async fn generate_structured_note(
        &self,
        text: &str,
        instruction_prompt: &str,
        settings: &GenerationSettings,
    ) -> Result<JsonValue> {
        let call = CallSpec {
            op: "generate_structured_note",
            settings,
            parts: vec![Part::text(format!(
                "{}\n\nTEXT TO ANALYZE:\n{}",
                instruction_prompt, text
            ))],
            temperature: None,
            response_mime_type: Some("application/json"),
        };
        let reply = self
            .generate_content(call)
            .await
            .map_err(|e| fail("generate_structured_note", e, defaults::MSG_NOTE_FAILED))?;

        parse_note_reply(&reply)
    }

    async fn ask_question(
        &self,
        document_text: &str,
        question: &str,
        settings: &GenerationSettings,
    ) -> Result<String> {
        let call = CallSpec {
            op: "ask_question",
            settings,
            parts: vec![
                Part::text(format!(
                    "You are a helpful assistant analyzing the following document:\n\n{}",
                    document_text
                )),
                Part::text(format!("Question: {}", question)),
            ],
            temperature: Some(defaults::QNA_TEMPERATURE),
            response_mime_type: None,
        };
        match self.generate_content(call).await {
            Ok(text) => Ok(or_fallback(text, FALLBACK_QNA)),
            Err(err) => {
                // Q&A surfaces the underlying message verbatim
                let verbatim = err.to_string();
                let message = if verbatim.is_empty() {
                    defaults::MSG_QNA_FAILED
                } else {
                    verbatim.as_str()
                };
                Err(fail("ask_question", err, message))
            }
        }
    }

    async fn analyze_text(
        &self,
        text: &str,
        instruction_prompt: &str,
        settings: &GenerationSettings,
    ) -> Result<String> {
        let call = CallSpec {
            op: "analyze_text",
            settings,
            parts: vec![
                Part::text(format!("Document Text:\n{}", text)),
                Part::text(format!("Instruction:\n{}", instruction_prompt)),
            ],
            temperature: Some(defaults::ANALYSIS_TEMPERATURE),
            response_mime_type: None,
        };
        self.generate_content(call)
            .await
            .map(|text| or_fallback(text, FALLBACK_ANALYSIS))
            .map_err(|e| fail("analyze_text", e, defaults::MSG_ANALYSIS_FAILED))
    }
}
