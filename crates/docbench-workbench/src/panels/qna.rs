//! Document Q&A panel.

use std::time::Instant;

use tracing::info;

use docbench_core::logging::SUBSYSTEM_WORKBENCH;
use docbench_core::{Error, GenerationSettings, ModelGateway, Result};

use crate::panels::Pending;
use crate::workbench::Workbench;

pub const MSG_NO_CONTENT: &str =
    "No document content available. Please upload and process documents first.";
pub const MSG_EMPTY_QUESTION: &str = "Please enter a question.";

/// State of the Q&A tab.
#[derive(Debug, Clone)]
pub struct QnaPanel {
    pub settings: GenerationSettings,
    answer: String,
    loading: bool,
}

impl Default for QnaPanel {
    fn default() -> Self {
        Self {
            settings: GenerationSettings::qna(),
            answer: String::new(),
            loading: false,
        }
    }
}

impl QnaPanel {
    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

impl<G: ModelGateway> Workbench<G> {
    /// Ask a question about every document's combined text.
    pub async fn ask(&mut self, question: &str) -> Result<String> {
        let combined = self.store.combined_text();
        if combined.is_empty() {
            return self.fail(Error::Precondition(MSG_NO_CONTENT.to_string()));
        }
        if question.trim().is_empty() {
            return self.fail(Error::Precondition(MSG_EMPTY_QUESTION.to_string()));
        }

        let start = Instant::now();
        self.qna.answer.clear();
        let result = {
            let _pending = Pending::start(&mut self.qna.loading);
            self.gateway
                .ask_question(&combined, question, &self.qna.settings)
                .await
        };

        let answer = self.track(result)?;
        info!(
            subsystem = SUBSYSTEM_WORKBENCH,
            op = "ask",
            prompt_len = combined.len(),
            response_len = answer.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Question answered"
        );
        self.qna.answer = answer.clone();
        Ok(answer)
    }
}
