//! OCR and agent-analysis panel.

use std::time::Instant;

use tracing::{debug, info};

use docbench_core::defaults;
use docbench_core::logging::SUBSYSTEM_WORKBENCH;
use docbench_core::{
    DocumentFile, DocumentPatch, DocumentStore, Error, GenerationSettings, ModelGateway, Result,
};

use crate::panels::Pending;
use crate::workbench::Workbench;

pub const MSG_NO_OCR_DOCUMENT: &str = "Please select an image or PDF document first.";
pub const MSG_NO_OCR_TEXT: &str = "No text content available. Run OCR first.";
pub const MSG_OCR_DONE: &str = "OCR completed successfully.";
pub const MSG_ANALYSIS_DONE: &str = "Analysis completed successfully.";

/// State of the OCR tab.
#[derive(Debug, Clone)]
pub struct OcrPanel {
    pub ocr: GenerationSettings,
    pub agent: GenerationSettings,
    pub agent_prompt: String,
    selected: Option<String>,
    agent_result: String,
    processing: bool,
    analyzing: bool,
}

impl Default for OcrPanel {
    fn default() -> Self {
        Self {
            ocr: GenerationSettings::default(),
            agent: GenerationSettings::default(),
            agent_prompt: defaults::AGENT_ANALYSIS_PROMPT.to_string(),
            selected: None,
            agent_result: String::new(),
            processing: false,
            analyzing: false,
        }
    }
}

impl OcrPanel {
    /// The active document: the explicit selection while it is still in
    /// the store, otherwise the first OCR candidate.
    pub fn selected<'a>(&self, store: &'a DocumentStore) -> Option<&'a DocumentFile> {
        self.selected
            .as_deref()
            .and_then(|id| store.get(id))
            .or_else(|| store.ocr_candidates().next())
    }

    pub fn selected_id<'a>(&self, store: &'a DocumentStore) -> Option<&'a str> {
        self.selected(store).map(|doc| doc.id.as_str())
    }

    pub fn agent_result(&self) -> &str {
        &self.agent_result
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn is_analyzing(&self) -> bool {
        self.analyzing
    }
}

impl<G: ModelGateway> Workbench<G> {
    /// Document the OCR tab currently works on.
    pub fn selected_document(&self) -> Option<&DocumentFile> {
        self.ocr.selected(&self.store)
    }

    /// Select the document the OCR tab works on.
    pub fn select(&mut self, id: &str) -> Result<()> {
        if self.store.get(id).is_none() {
            return self.fail(Error::NotFound(id.to_string()));
        }
        self.ocr.selected = Some(id.to_string());
        Ok(())
    }

    /// Transcribe the selected image or PDF into its `content`.
    pub async fn run_ocr(&mut self) -> Result<String> {
        let target = self.selected_document().and_then(|doc| {
            doc.base64
                .clone()
                .map(|b64| (doc.id.clone(), b64, doc.payload_mime_type().to_string()))
        });
        let Some((id, payload, mime_type)) = target else {
            return self.fail(Error::Precondition(MSG_NO_OCR_DOCUMENT.to_string()));
        };

        debug!(
            subsystem = SUBSYSTEM_WORKBENCH,
            op = "run_ocr",
            doc_id = %id,
            mime_type = %mime_type,
            "Starting OCR"
        );
        let start = Instant::now();
        let result = {
            let _pending = Pending::start(&mut self.ocr.processing);
            self.gateway
                .perform_ocr(&payload, &mime_type, &self.ocr.ocr)
                .await
        };

        let text = self.track(result)?;
        let updated = self
            .store
            .update(&id, DocumentPatch::content(text.clone()))
            .map(|_| ());
        self.track(updated)?;

        info!(
            subsystem = SUBSYSTEM_WORKBENCH,
            op = "run_ocr",
            doc_id = %id,
            response_len = text.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "OCR complete"
        );
        self.succeed(MSG_OCR_DONE);
        Ok(text)
    }

    /// Run the agent prompt over the selected document's text.
    pub async fn run_agent_analysis(&mut self) -> Result<String> {
        let content = self
            .selected_document()
            .map(|doc| doc.content.clone())
            .filter(|c| !c.is_empty());
        let Some(content) = content else {
            return self.fail(Error::Precondition(MSG_NO_OCR_TEXT.to_string()));
        };

        let start = Instant::now();
        let result = {
            let _pending = Pending::start(&mut self.ocr.analyzing);
            self.gateway
                .analyze_text(&content, &self.ocr.agent_prompt, &self.ocr.agent)
                .await
        };

        let analysis = self.track(result)?;
        info!(
            subsystem = SUBSYSTEM_WORKBENCH,
            op = "run_agent_analysis",
            prompt_len = content.len(),
            response_len = analysis.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Agent analysis complete"
        );
        self.ocr.agent_result = analysis.clone();
        self.succeed(MSG_ANALYSIS_DONE);
        Ok(analysis)
    }
}
