//! Centralized default constants for docbench.
//!
//! Model names, token budgets, prompts, and the user-facing messages that
//! more than one crate needs to agree on live here.

// =============================================================================
// MODELS
// =============================================================================

/// Default model for every gateway call.
pub const MODEL: &str = "gemini-2.5-flash";

/// Output token budget for OCR, agent analysis, and structured notes.
pub const MAX_TOKENS: u32 = 12_000;

/// Output token budget for document Q&A.
pub const QNA_MAX_TOKENS: u32 = 1024;

/// A selectable model variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelOption {
    pub id: &'static str,
    pub display_name: &'static str,
}

/// Interchangeable model variants offered by the workbench.
pub const MODEL_CATALOG: &[ModelOption] = &[
    ModelOption {
        id: "gemini-2.5-flash",
        display_name: "Gemini 2.5 Flash",
    },
    ModelOption {
        id: "gemini-2.5-flash-lite-latest",
        display_name: "Gemini 2.5 Flash Lite",
    },
    ModelOption {
        id: "gemini-3-pro-preview",
        display_name: "Gemini 3.0 Pro",
    },
];

/// Look up a model's display name; unknown ids are shown verbatim.
pub fn model_display_name(id: &str) -> &str {
    MODEL_CATALOG
        .iter()
        .find(|m| m.id == id)
        .map(|m| m.display_name)
        .unwrap_or(id)
}

// =============================================================================
// GATEWAY
// =============================================================================

/// Generative Language API root.
pub const GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Environment variables consulted for the API key, in order.
pub const ENV_API_KEY: &str = "API_KEY";
pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";

/// Sampling temperature for document Q&A.
pub const QNA_TEMPERATURE: f32 = 0.7;

/// Sampling temperature for agent analysis.
pub const ANALYSIS_TEMPERATURE: f32 = 0.5;

// =============================================================================
// INGESTION
// =============================================================================

/// Id prefix of the single pasted pseudo-document.
pub const PASTE_ID_PREFIX: &str = "paste-";

/// Display name of the pasted pseudo-document.
pub const PASTE_NAME: &str = "Pasted Text";

/// Pasted text at or below this many characters is ignored.
pub const PASTE_MIN_CHARS: usize = 10;

/// Separator used when concatenating document contents.
pub const COMBINED_TEXT_SEPARATOR: &str = "\n\n";

// =============================================================================
// WORD FREQUENCY
// =============================================================================

/// Number of terms returned by word-frequency analysis.
pub const WORD_FREQUENCY_LIMIT: usize = 20;

/// Tokens at or below this many characters are discarded.
pub const WORD_MIN_EXCLUSIVE_LEN: usize = 3;

// =============================================================================
// PROMPTS
// =============================================================================

/// Instruction sent alongside the inline image/PDF payload for OCR.
pub const OCR_PROMPT: &str = "You are a precise OCR transcription expert. Transcribe the text from the image word-for-word, including punctuation.
    - If there are tables, output them as Markdown tables.
    - Do not describe the image, only output the text found within it.
    - Language: Detect automatically (English or Traditional Chinese).";

/// Default instruction for structured note generation.
pub const SMART_NOTE_PROMPT: &str = r#"You are an expert FDA regulatory document analyst. Analyze the following text and return a JSON object with the following structure:
    {
        "formattedText": "Clean, well-structured Markdown version of the text with headers, bullets, etc.",
        "entities": "A Markdown table with columns: #, Entity, Context/Description. Extract top 20 key entities (Drugs, Organizations, Dates, Regulations).",
        "mindGraph": {
            "nodes": [{"id": "Concept1", "label": "Concept 1", "val": 10}, ...],
            "links": [{"source": "Concept1", "target": "Concept2", "value": 5}, ...]
        },
        "keywords": ["Key1", "Key2", "Key3", ...],
        "questions": "A list of 20 deep, exploratory follow-up questions based on the text."
    }

    Ensure the JSON is valid. For the mindGraph, extract 10-15 core concepts and their relationships. 'val' in nodes represents importance (5-20), 'value' in links represents strength (1-10).
    "#;

/// Default instruction for agent analysis of OCR output.
pub const AGENT_ANALYSIS_PROMPT: &str = "Please analyze the provided text.
1. Create a concise summary of the document.
2. Extract the top 20 most important entities (such as Drugs, Companies, Regulations, Dates, Medical Terms).
3. Present these entities in a Markdown table with the following columns: Entity, Type, Context/Description.

Ensure the output is in clean Markdown format.
";

// =============================================================================
// MESSAGES
// =============================================================================

pub const MSG_NO_API_KEY: &str = "Please enter your Gemini API Key in settings.";
pub const MSG_OCR_FAILED: &str =
    "Failed to perform OCR. Please check your API Key and file content.";
pub const MSG_NOTE_FAILED: &str = "Failed to generate Smart Note.";
pub const MSG_QNA_FAILED: &str = "Failed to get answer from AI.";
pub const MSG_ANALYSIS_FAILED: &str = "Failed to analyze text.";
pub const MSG_INVALID_JSON: &str = "Invalid JSON format. Please correct it before updating.";

pub const FALLBACK_OCR: &str = "No text detected.";
pub const FALLBACK_QNA: &str = "No response generated.";
pub const FALLBACK_ANALYSIS: &str = "No analysis generated.";
