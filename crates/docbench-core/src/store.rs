//! In-memory ordered collection of uploaded and pasted documents.

use std::path::Path;

use tracing::{debug, info};

use crate::defaults;
use crate::error::{Error, Result};
use crate::ingest;
use crate::logging::SUBSYSTEM_CORE;
use crate::models::{DocumentFile, DocumentPatch};

/// Ordered document store. Insertion order is preserved across every
/// mutation; removal never reorders the remaining records.
#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    docs: Vec<DocumentFile>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an already-built document.
    pub fn add(&mut self, doc: DocumentFile) -> &DocumentFile {
        info!(
            subsystem = SUBSYSTEM_CORE,
            component = "store",
            op = "add",
            doc_id = %doc.id,
            doc_kind = %doc.kind,
            doc_count = self.docs.len() + 1,
            "Document added"
        );
        self.docs.push(doc);
        &self.docs[self.docs.len() - 1]
    }

    /// Ingest raw file bytes and append the resulting document.
    pub fn add_file(&mut self, name: &str, declared_mime: &str, data: &[u8]) -> Result<String> {
        let doc = ingest::ingest_bytes(name, declared_mime, data)?;
        Ok(self.add(doc).id.clone())
    }

    /// Read a local file and append the resulting document.
    pub fn add_path(&mut self, path: &Path) -> Result<String> {
        let doc = ingest::ingest_path(path)?;
        Ok(self.add(doc).id.clone())
    }

    /// Apply a partial update to the document with `id`.
    pub fn update(&mut self, id: &str, patch: DocumentPatch) -> Result<&DocumentFile> {
        let doc = self
            .docs
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        patch.apply(doc);
        debug!(
            subsystem = SUBSYSTEM_CORE,
            component = "store",
            op = "update",
            doc_id = %id,
            "Document updated"
        );
        Ok(doc)
    }

    /// Replace the record whose id matches `doc.id`.
    pub fn replace(&mut self, doc: DocumentFile) -> Result<()> {
        let slot = self
            .docs
            .iter_mut()
            .find(|d| d.id == doc.id)
            .ok_or_else(|| Error::NotFound(doc.id.clone()))?;
        *slot = doc;
        Ok(())
    }

    /// Remove exactly the document with `id`.
    pub fn remove(&mut self, id: &str) -> Result<DocumentFile> {
        let idx = self
            .docs
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        let doc = self.docs.remove(idx);
        info!(
            subsystem = SUBSYSTEM_CORE,
            component = "store",
            op = "remove",
            doc_id = %id,
            doc_count = self.docs.len(),
            "Document removed"
        );
        Ok(doc)
    }

    /// Replace the pasted pseudo-document with `text`.
    ///
    /// Text of [`defaults::PASTE_MIN_CHARS`] characters or fewer is ignored.
    /// Otherwise every existing `paste-` document is dropped and a fresh one
    /// is appended, so there is at most one at any time.
    pub fn set_pasted_text(&mut self, text: &str) -> Option<&DocumentFile> {
        if text.chars().count() <= defaults::PASTE_MIN_CHARS {
            return None;
        }
        self.docs.retain(|d| !d.is_pasted());
        let doc = DocumentFile::text(ingest::new_paste_id(), defaults::PASTE_NAME, text);
        Some(self.add(doc))
    }

    pub fn get(&self, id: &str) -> Option<&DocumentFile> {
        self.docs.iter().find(|d| d.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DocumentFile> {
        self.docs.iter()
    }

    pub fn as_slice(&self) -> &[DocumentFile] {
        &self.docs
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Documents OCR can run on (images and PDFs), in store order.
    pub fn ocr_candidates(&self) -> impl Iterator<Item = &DocumentFile> {
        self.docs.iter().filter(|d| d.is_ocr_candidate())
    }

    /// Every document's text, joined with a blank line.
    pub fn combined_text(&self) -> String {
        self.docs
            .iter()
            .map(|d| d.content.as_str())
            .collect::<Vec<_>>()
            .join(defaults::COMBINED_TEXT_SEPARATOR)
    }
}
