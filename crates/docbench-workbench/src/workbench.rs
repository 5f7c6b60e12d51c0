//! Session state and the operations that do not call the model.

use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use docbench_core::logging::SUBSYSTEM_WORKBENCH;
use docbench_core::{
    random_theme_index, top_words, Appearance, DocumentFile, DocumentStore, Error, Language,
    ModelGateway, ResolvedStyle, Result, Strings, Theme, WordFrequency, FLOWER_THEMES,
};
use docbench_inference::GeminiGateway;

use crate::panels::{NotePanel, OcrPanel, QnaPanel};

/// Top-level tab of the workbench.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveTab {
    #[default]
    Docs,
    Ocr,
    Qna,
    WordGraph,
    SmartNote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Error,
    Success,
}

/// Transient message shown to the user until dismissed or replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// One user session: documents, appearance, per-tab panels, and the
/// gateway every model call goes through.
///
/// Operations check their preconditions before any network call. A failed
/// operation sets an error notice and leaves previously stored state intact.
pub struct Workbench<G: ModelGateway> {
    pub(crate) gateway: G,
    pub(crate) store: DocumentStore,
    pub(crate) appearance: Appearance,
    pub(crate) active_tab: ActiveTab,
    pub(crate) notice: Option<Notice>,
    pub(crate) ocr: OcrPanel,
    pub(crate) qna: QnaPanel,
    pub(crate) note: NotePanel,
}

impl Workbench<GeminiGateway> {
    /// Build a session over the Gemini gateway, loading `.env` first.
    pub fn from_env() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => info!(
                subsystem = SUBSYSTEM_WORKBENCH,
                path = %path.display(),
                "Loaded environment file"
            ),
            Err(e) if e.not_found() => {}
            Err(e) => warn!(
                subsystem = SUBSYSTEM_WORKBENCH,
                error = %e,
                "Failed to load environment file"
            ),
        }
        Ok(Self::new(GeminiGateway::from_env()?))
    }
}

impl<G: ModelGateway> Workbench<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            store: DocumentStore::new(),
            appearance: Appearance::default(),
            active_tab: ActiveTab::default(),
            notice: None,
            ocr: OcrPanel::default(),
            qna: QnaPanel::default(),
            note: NotePanel::default(),
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn documents(&self) -> &[DocumentFile] {
        self.store.as_slice()
    }

    /// Every document's text, joined with a blank line.
    pub fn combined_text(&self) -> String {
        self.store.combined_text()
    }

    pub fn active_tab(&self) -> ActiveTab {
        self.active_tab
    }

    pub fn set_active_tab(&mut self, tab: ActiveTab) {
        self.active_tab = tab;
    }

    pub fn ocr_panel(&self) -> &OcrPanel {
        &self.ocr
    }

    pub fn ocr_panel_mut(&mut self) -> &mut OcrPanel {
        &mut self.ocr
    }

    pub fn qna_panel(&self) -> &QnaPanel {
        &self.qna
    }

    pub fn qna_panel_mut(&mut self) -> &mut QnaPanel {
        &mut self.qna
    }

    pub fn note_panel(&self) -> &NotePanel {
        &self.note
    }

    pub fn note_panel_mut(&mut self) -> &mut NotePanel {
        &mut self.note
    }

    // =========================================================================
    // DOCUMENTS
    // =========================================================================

    /// Add an uploaded file. Returns the new document id.
    pub fn upload(&mut self, name: &str, declared_mime: &str, data: &[u8]) -> Result<String> {
        let result = self.store.add_file(name, declared_mime, data);
        self.track(result)
    }

    /// Add a file from the local filesystem. Returns the new document id.
    pub fn upload_path(&mut self, path: impl AsRef<Path>) -> Result<String> {
        let result = self.store.add_path(path.as_ref());
        self.track(result)
    }

    /// Replace the pasted document with `text`.
    ///
    /// Returns the new document id, or `None` when the text is too short to
    /// count as a paste.
    pub fn paste(&mut self, text: &str) -> Option<String> {
        self.store.set_pasted_text(text).map(|doc| doc.id.clone())
    }

    pub fn remove_document(&mut self, id: &str) -> Result<DocumentFile> {
        let result = self.store.remove(id);
        self.track(result)
    }

    /// Word frequencies over every document's text, for the word graph.
    pub fn word_frequencies(&self) -> Vec<WordFrequency> {
        top_words(
            &self.store.combined_text(),
            docbench_core::defaults::WORD_FREQUENCY_LIMIT,
        )
    }

    // =========================================================================
    // APPEARANCE
    // =========================================================================

    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    pub fn theme(&self) -> &'static Theme {
        self.appearance.theme()
    }

    /// Select a theme by catalog index.
    pub fn set_theme(&mut self, index: usize) -> Result<&'static Theme> {
        if index >= FLOWER_THEMES.len() {
            return self.fail(Error::Precondition(format!(
                "Theme index {} is out of range",
                index
            )));
        }
        self.appearance.theme_index = index;
        Ok(self.appearance.theme())
    }

    /// Pick a uniformly random theme, as the selection wheel does.
    pub fn spin_theme_wheel<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &'static Theme {
        self.appearance.theme_index = random_theme_index(rng);
        info!(
            subsystem = SUBSYSTEM_WORKBENCH,
            op = "spin_theme_wheel",
            theme = self.appearance.theme().name,
            "Theme selected"
        );
        self.appearance.theme()
    }

    /// Flip dark mode. Returns the new setting.
    pub fn toggle_dark_mode(&mut self) -> bool {
        self.appearance.dark_mode = !self.appearance.dark_mode;
        self.appearance.dark_mode
    }

    pub fn set_language(&mut self, language: Language) {
        self.appearance.language = language;
    }

    pub fn strings(&self) -> &'static Strings {
        self.appearance.strings()
    }

    pub fn style(&self) -> ResolvedStyle {
        self.appearance.style()
    }

    // =========================================================================
    // NOTICES
    // =========================================================================

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub(crate) fn succeed(&mut self, text: &str) {
        self.notice = Some(Notice::success(text));
    }

    /// Record `err` as the current notice and return it.
    pub(crate) fn fail<T>(&mut self, err: Error) -> Result<T> {
        warn!(
            subsystem = SUBSYSTEM_WORKBENCH,
            local = err.is_local(),
            error = %err,
            "Operation failed"
        );
        self.notice = Some(Notice::error(err.to_string()));
        Err(err)
    }

    pub(crate) fn track<T>(&mut self, result: Result<T>) -> Result<T> {
        match result {
            Ok(value) => Ok(value),
            Err(err) => self.fail(err),
        }
    }
}
