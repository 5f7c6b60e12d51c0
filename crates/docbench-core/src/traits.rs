//! Core traits for docbench abstractions.
//!
//! The workbench talks to the remote model only through [`ModelGateway`],
//! so sessions can be driven by the real HTTP gateway or a scripted mock.

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::error::Result;
use crate::models::GenerationSettings;

// =============================================================================
// MODEL GATEWAY
// =============================================================================

/// Single-shot request/response façade over a hosted generative model.
///
/// None of the operations retry or cache. On failure they return one
/// human-readable error for that operation.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Transcribe the text in a base64-encoded image or PDF.
    async fn perform_ocr(
        &self,
        base64_payload: &str,
        mime_type: &str,
        settings: &GenerationSettings,
    ) -> Result<String>;

    /// Ask for a structured note as a JSON object.
    ///
    /// Fails with `Error::InvalidFormat` when the reply is not valid JSON.
    async fn generate_structured_note(
        &self,
        text: &str,
        instruction_prompt: &str,
        settings: &GenerationSettings,
    ) -> Result<JsonValue>;

    /// Answer a free-form question about `document_text`.
    async fn ask_question(
        &self,
        document_text: &str,
        question: &str,
        settings: &GenerationSettings,
    ) -> Result<String>;

    /// Run a free-form analysis instruction over `text`.
    async fn analyze_text(
        &self,
        text: &str,
        instruction_prompt: &str,
        settings: &GenerationSettings,
    ) -> Result<String>;
}
