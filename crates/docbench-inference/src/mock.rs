//! Scripted model gateway for deterministic testing.
//!
//! [`MockGateway`] implements [`ModelGateway`] without touching the network.
//! Replies are scripted per operation, failures can be injected, and every
//! call is logged for assertions.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use docbench_core::{GenerationSettings, ModelGateway};
//! use docbench_inference::mock::{MockGateway, MockOperation};
//!
//! #[tokio::test]
//! async fn test_with_mock_gateway() {
//!     let gateway = MockGateway::new().with_ocr_response("Hello");
//!
//!     let text = gateway
//!         .perform_ocr("QUJD", "image/png", &GenerationSettings::default())
//!         .await
//!         .unwrap();
//!     assert_eq!(text, "Hello");
//!     assert_eq!(gateway.call_count(MockOperation::Ocr), 1);
//! }
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use docbench_core::defaults::{self, FALLBACK_ANALYSIS, FALLBACK_OCR, FALLBACK_QNA};
use docbench_core::{Error, GenerationSettings, ModelGateway, Result};

use crate::gemini::{or_fallback, parse_note_reply};

/// Gateway operation, used to script replies and count calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOperation {
    Ocr,
    StructuredNote,
    Question,
    Analysis,
}

impl MockOperation {
    fn failure_message(self) -> &'static str {
        match self {
            Self::Ocr => defaults::MSG_OCR_FAILED,
            Self::StructuredNote => defaults::MSG_NOTE_FAILED,
            Self::Question => defaults::MSG_QNA_FAILED,
            Self::Analysis => defaults::MSG_ANALYSIS_FAILED,
        }
    }
}

/// Mock gateway for testing.
#[derive(Clone, Default)]
pub struct MockGateway {
    config: Arc<MockConfig>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

#[derive(Debug, Clone, Default)]
struct MockConfig {
    replies: HashMap<MockOperation, String>,
    failures: HashMap<MockOperation, String>,
    /// Replies keyed by operation and an exact input or instruction.
    mapped_replies: HashMap<(MockOperation, String), String>,
    mapped_failures: HashMap<(MockOperation, String), String>,
    missing_api_key: bool,
    latency_ms: u64,
}

/// One logged gateway call.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub operation: MockOperation,
    /// Text, document text, or base64 payload sent.
    pub input: String,
    /// Prompt, question, or MIME type sent alongside the input.
    pub instruction: String,
    pub model: String,
    pub max_tokens: u32,
    pub timestamp: std::time::Instant,
}

impl MockGateway {
    /// Create a mock gateway. Unscripted operations return an empty reply,
    /// which goes through the same fallback rules as the real gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the raw reply text for an operation.
    pub fn with_reply(mut self, operation: MockOperation, reply: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config)
            .replies
            .insert(operation, reply.into());
        self
    }

    pub fn with_ocr_response(self, text: impl Into<String>) -> Self {
        self.with_reply(MockOperation::Ocr, text)
    }

    /// Script the note reply as a JSON value.
    pub fn with_note_response(self, note: JsonValue) -> Self {
        self.with_reply(MockOperation::StructuredNote, note.to_string())
    }

    /// Script the note reply as raw text, which may be invalid JSON.
    pub fn with_raw_note_response(self, raw: impl Into<String>) -> Self {
        self.with_reply(MockOperation::StructuredNote, raw)
    }

    pub fn with_answer(self, answer: impl Into<String>) -> Self {
        self.with_reply(MockOperation::Question, answer)
    }

    pub fn with_analysis(self, analysis: impl Into<String>) -> Self {
        self.with_reply(MockOperation::Analysis, analysis)
    }

    /// Make an operation fail with the given underlying cause.
    pub fn failing(mut self, operation: MockOperation, cause: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config)
            .failures
            .insert(operation, cause.into());
        self
    }

    /// Script a reply for calls whose input or instruction equals `key`.
    pub fn with_reply_for(
        mut self,
        operation: MockOperation,
        key: impl Into<String>,
        reply: impl Into<String>,
    ) -> Self {
        Arc::make_mut(&mut self.config)
            .mapped_replies
            .insert((operation, key.into()), reply.into());
        self
    }

    /// Fail calls whose input or instruction equals `key`.
    pub fn failing_for(
        mut self,
        operation: MockOperation,
        key: impl Into<String>,
        cause: impl Into<String>,
    ) -> Self {
        Arc::make_mut(&mut self.config)
            .mapped_failures
            .insert((operation, key.into()), cause.into());
        self
    }

    /// Behave as if no API key were configured.
    pub fn without_api_key(mut self) -> Self {
        Arc::make_mut(&mut self.config).missing_api_key = true;
        self
    }

    /// Set simulated latency for all operations.
    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        Arc::make_mut(&mut self.config).latency_ms = latency_ms;
        self
    }

    /// Get all logged calls for assertion.
    pub fn get_calls(&self) -> Vec<MockCall> {
        self.call_log.lock().unwrap().clone()
    }

    /// Clear the call log.
    pub fn clear_calls(&self) {
        self.call_log.lock().unwrap().clear()
    }

    /// Number of calls made to one operation.
    pub fn call_count(&self, operation: MockOperation) -> usize {
        self.call_log
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.operation == operation)
            .count()
    }

    /// Total number of calls across all operations.
    pub fn total_calls(&self) -> usize {
        self.call_log.lock().unwrap().len()
    }

    fn log_call(
        &self,
        operation: MockOperation,
        input: &str,
        instruction: &str,
        settings: &GenerationSettings,
    ) {
        self.call_log.lock().unwrap().push(MockCall {
            operation,
            input: input.to_string(),
            instruction: instruction.to_string(),
            model: settings.model.clone(),
            max_tokens: settings.max_tokens,
            timestamp: std::time::Instant::now(),
        });
    }

    async fn simulate_latency(&self) {
        if self.config.latency_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.latency_ms)).await;
        }
    }

    /// Resolve one call: missing key, injected failure, or scripted reply.
    async fn respond(
        &self,
        operation: MockOperation,
        input: &str,
        instruction: &str,
        settings: &GenerationSettings,
    ) -> Result<String> {
        if self.config.missing_api_key {
            return Err(Error::Config(defaults::MSG_NO_API_KEY.to_string()));
        }

        self.log_call(operation, input, instruction, settings);
        self.simulate_latency().await;

        let lookup = |map: &HashMap<(MockOperation, String), String>| {
            map.get(&(operation, input.to_string()))
                .or_else(|| map.get(&(operation, instruction.to_string())))
                .cloned()
        };

        let cause = lookup(&self.config.mapped_failures)
            .or_else(|| self.config.failures.get(&operation).cloned());
        if let Some(cause) = cause {
            // Q&A surfaces the cause; the others report a fixed message
            let message = match operation {
                MockOperation::Question if !cause.is_empty() => cause.as_str(),
                _ => operation.failure_message(),
            };
            return Err(Error::Gateway(message.to_string()));
        }

        Ok(lookup(&self.config.mapped_replies)
            .or_else(|| self.config.replies.get(&operation).cloned())
            .unwrap_or_default())
    }
}

#[async_trait]
impl ModelGateway for MockGateway {
    async fn perform_ocr(
        &self,
        base64_payload: &str,
        mime_type: &str,
        settings: &GenerationSettings,
    ) -> Result<String> {
        self.respond(MockOperation::Ocr, base64_payload, mime_type, settings)
            .await
            .map(|text| or_fallback(text, FALLBACK_OCR))
    }

    async fn generate_structured_note(
        &self,
        text: &str,
        instruction_prompt: &str,
        settings: &GenerationSettings,
    ) -> Result<JsonValue> {
        let reply = self
            .respond(
                MockOperation::StructuredNote,
                text,
                instruction_prompt,
                settings,
            )
            .await?;
        parse_note_reply(&reply)
    }

    async fn ask_question(
        &self,
        document_text: &str,
        question: &str,
        settings: &GenerationSettings,
    ) -> Result<String> {
        self.respond(MockOperation::Question, document_text, question, settings)
            .await
            .map(|text| or_fallback(text, FALLBACK_QNA))
    }

    async fn analyze_text(
        &self,
        text: &str,
        instruction_prompt: &str,
        settings: &GenerationSettings,
    ) -> Result<String> {
        self.respond(MockOperation::Analysis, text, instruction_prompt, settings)
            .await
            .map(|text| or_fallback(text, FALLBACK_ANALYSIS))
    }
}
