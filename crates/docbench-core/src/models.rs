//! Core data models for docbench.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::defaults;

// =============================================================================
// DOCUMENT TYPES
// =============================================================================

/// Kind of an ingested document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Text,
    Image,
    Pdf,
}

impl DocumentKind {
    /// Whether documents of this kind carry a base64 payload instead of text.
    pub fn is_binary(self) -> bool {
        matches!(self, Self::Image | Self::Pdf)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Pdf => "pdf",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An uploaded or pasted document.
///
/// Text documents are created with `content` set and no payload. Image and
/// PDF documents are created with an empty `content` and the original bytes
/// in `base64`; OCR or a manual edit fills `content` later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentFile {
    pub id: String,
    pub name: String,
    pub kind: DocumentKind,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base64: Option<String>,
    /// Declared media type of the payload, for image/pdf documents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl DocumentFile {
    /// Create a text document.
    pub fn text(id: impl Into<String>, name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: DocumentKind::Text,
            content: content.into(),
            base64: None,
            mime_type: None,
            timestamp: Utc::now(),
        }
    }

    /// Create an image or PDF document holding a base64 payload.
    pub fn binary(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: DocumentKind,
        base64: impl Into<String>,
        mime_type: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            content: String::new(),
            base64: Some(base64.into()),
            mime_type,
            timestamp: Utc::now(),
        }
    }

    /// Whether OCR can run on this document.
    pub fn is_ocr_candidate(&self) -> bool {
        self.kind.is_binary()
    }

    pub fn is_pasted(&self) -> bool {
        self.id.starts_with(defaults::PASTE_ID_PREFIX)
    }

    /// Media type sent with the payload to the OCR call.
    pub fn payload_mime_type(&self) -> &str {
        match self.kind {
            DocumentKind::Pdf => "application/pdf",
            DocumentKind::Image => self
                .mime_type
                .as_deref()
                .filter(|m| m.starts_with("image/"))
                .unwrap_or("image/png"),
            DocumentKind::Text => self.mime_type.as_deref().unwrap_or("text/plain"),
        }
    }

    /// Rebuild a `data:` URL for previewing the original payload.
    pub fn data_url(&self) -> Option<String> {
        self.base64
            .as_ref()
            .map(|b64| format!("data:{};base64,{}", self.payload_mime_type(), b64))
    }
}

/// Partial update applied to a stored document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentPatch {
    pub name: Option<String>,
    pub content: Option<String>,
}

impl DocumentPatch {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub(crate) fn apply(self, doc: &mut DocumentFile) {
        if let Some(name) = self.name {
            doc.name = name;
        }
        if let Some(content) = self.content {
            doc.content = content;
        }
    }
}

// =============================================================================
// GATEWAY TYPES
// =============================================================================

/// Model and output budget for a single gateway call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationSettings {
    pub model: String,
    pub max_tokens: u32,
}

impl GenerationSettings {
    pub fn new(model: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            model: model.into(),
            max_tokens,
        }
    }

    /// Defaults for document Q&A.
    pub fn qna() -> Self {
        Self::new(defaults::MODEL, defaults::QNA_MAX_TOKENS)
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self::new(defaults::MODEL, defaults::MAX_TOKENS)
    }
}

/// One bar of the word-frequency chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordFrequency {
    pub name: String,
    pub value: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_kind_serde() {
        assert_eq!(
            serde_json::to_string(&DocumentKind::Pdf).unwrap(),
            "\"pdf\""
        );
        let kind: DocumentKind = serde_json::from_str("\"image\"").unwrap();
        assert_eq!(kind, DocumentKind::Image);
    }

    #[test]
    fn test_text_document_population() {
        let doc = DocumentFile::text("1", "a.txt", "hello");
        assert_eq!(doc.content, "hello");
        assert!(doc.base64.is_none());
        assert!(!doc.is_ocr_candidate());
    }

    #[test]
    fn test_binary_document_population() {
        let doc = DocumentFile::binary("1", "scan.pdf", DocumentKind::Pdf, "JVBERi0=", None);
        assert!(doc.content.is_empty());
        assert_eq!(doc.base64.as_deref(), Some("JVBERi0="));
        assert!(doc.is_ocr_candidate());
    }

    #[test]
    fn test_payload_mime_type() {
        let pdf = DocumentFile::binary("1", "a.pdf", DocumentKind::Pdf, "x", None);
        assert_eq!(pdf.payload_mime_type(), "application/pdf");

        let png = DocumentFile::binary("2", "a.png", DocumentKind::Image, "x", None);
        assert_eq!(png.payload_mime_type(), "image/png");

        let jpeg = DocumentFile::binary(
            "3",
            "a.jpg",
            DocumentKind::Image,
            "x",
            Some("image/jpeg".to_string()),
        );
        assert_eq!(jpeg.payload_mime_type(), "image/jpeg");
    }

    #[test]
    fn test_data_url() {
        let png = DocumentFile::binary("2", "a.png", DocumentKind::Image, "QUJD", None);
        assert_eq!(png.data_url().unwrap(), "data:image/png;base64,QUJD");
        assert!(DocumentFile::text("1", "a", "b").data_url().is_none());
    }

    #[test]
    fn test_patch_applies_only_set_fields() {
        let mut doc = DocumentFile::text("1", "a.txt", "old");
        DocumentPatch::content("new").apply(&mut doc);
        assert_eq!(doc.content, "new");
        assert_eq!(doc.name, "a.txt");

        DocumentPatch::name("b.txt").apply(&mut doc);
        assert_eq!(doc.name, "b.txt");
        assert_eq!(doc.content, "new");
    }

    #[test]
    fn test_generation_settings_defaults() {
        let s = GenerationSettings::default();
        assert_eq!(s.model, "gemini-2.5-flash");
        assert_eq!(s.max_tokens, 12_000);
        assert_eq!(GenerationSettings::qna().max_tokens, 1024);
    }
}
