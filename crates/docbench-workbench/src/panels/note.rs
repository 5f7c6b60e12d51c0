//! Smart note panel: structured note generation and the raw JSON editor.

use std::time::Instant;

use tracing::{debug, info};

use docbench_core::defaults;
use docbench_core::logging::SUBSYSTEM_WORKBENCH;
use docbench_core::{
    circular_layout, Error, GenerationSettings, GraphLayout, ModelGateway, NoteFields, Result,
    StructuredNote,
};

use crate::panels::Pending;
use crate::workbench::Workbench;

pub const MSG_NO_INPUT: &str = "No text provided. Please paste text or upload a file.";
pub const MSG_NO_NOTE: &str = "Generate a note before editing its JSON.";
pub const MSG_NOTE_DONE: &str = "Smart Note generated successfully.";

/// State of the smart note tab.
#[derive(Debug, Clone)]
pub struct NotePanel {
    pub settings: GenerationSettings,
    pub prompt: String,
    input_text: String,
    input_file_name: Option<String>,
    note: Option<StructuredNote>,
    raw_json: String,
    loading: bool,
}

impl Default for NotePanel {
    fn default() -> Self {
        Self {
            settings: GenerationSettings::default(),
            prompt: defaults::SMART_NOTE_PROMPT.to_string(),
            input_text: String::new(),
            input_file_name: None,
            note: None,
            raw_json: String::new(),
            loading: false,
        }
    }
}

impl NotePanel {
    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn set_input_text(&mut self, text: impl Into<String>) {
        self.input_text = text.into();
        self.input_file_name = None;
    }

    /// Use an uploaded file's text as the input.
    pub fn load_input_file(&mut self, name: &str, data: &[u8]) {
        self.input_text = String::from_utf8_lossy(data).into_owned();
        self.input_file_name = Some(name.to_string());
    }

    pub fn input_file_name(&self) -> Option<&str> {
        self.input_file_name.as_deref()
    }

    pub fn note(&self) -> Option<&StructuredNote> {
        self.note.as_ref()
    }

    /// Pretty-printed JSON of the last applied note.
    pub fn raw_json(&self) -> &str {
        &self.raw_json
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Mind-graph positions for the current note.
    pub fn layout(&self) -> Option<GraphLayout> {
        self.note.as_ref().map(|n| circular_layout(&n.mind_graph))
    }
}

impl<G: ModelGateway> Workbench<G> {
    /// Seed the note input with every document's combined text.
    pub fn use_documents_as_note_input(&mut self) {
        let text = self.store.combined_text();
        self.note.set_input_text(text);
    }

    /// Generate a structured note from the input text, replacing any
    /// previous note.
    pub async fn generate_note(&mut self) -> Result<&StructuredNote> {
        if self.note.input_text.trim().is_empty() {
            return self.fail(Error::Precondition(MSG_NO_INPUT.to_string()));
        }

        let start = Instant::now();
        let result = {
            let _pending = Pending::start(&mut self.note.loading);
            self.gateway
                .generate_structured_note(
                    &self.note.input_text,
                    &self.note.prompt,
                    &self.note.settings,
                )
                .await
        };

        let value = self.track(result)?;
        let note = StructuredNote::from_value(&value, self.note.input_text.clone());
        info!(
            subsystem = SUBSYSTEM_WORKBENCH,
            op = "generate_note",
            note_id = %note.id,
            node_count = note.mind_graph.nodes.len(),
            keyword_count = note.keywords.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Smart note generated"
        );

        self.note.raw_json = serde_json::to_string_pretty(&value)?;
        self.succeed(MSG_NOTE_DONE);
        Ok(&*self.note.note.insert(note))
    }

    /// Replace the note's fields with hand-edited JSON.
    ///
    /// Invalid JSON leaves the note and the stored raw text untouched.
    pub fn apply_raw_json(&mut self, raw: &str) -> Result<&StructuredNote> {
        if self.note.note.is_none() {
            return self.fail(Error::Precondition(MSG_NO_NOTE.to_string()));
        }
        let fields = match NoteFields::from_json_str(raw) {
            Ok(fields) => fields,
            Err(err) => return self.fail(err),
        };

        debug!(
            subsystem = SUBSYSTEM_WORKBENCH,
            op = "apply_raw_json",
            node_count = fields.mind_graph.nodes.len(),
            "Applying edited note"
        );
        self.note.raw_json = raw.to_string();
        let note = self
            .note
            .note
            .as_mut()
            .ok_or_else(|| Error::Precondition(MSG_NO_NOTE.to_string()))?;
        note.apply_fields(fields);
        Ok(&*note)
    }
}
