//! Document ingestion: turning local files and data URLs into [`DocumentFile`]s.
//!
//! Classification is layered:
//! 1. A declared `image/*` or `application/pdf` type is trusted.
//! 2. A declared text type, or a text extension, is read as text whatever
//!    its first bytes look like.
//! 3. Magic bytes (via `infer`) identify images and PDFs declared as something
//!    generic, and reject other binary formats.
//! 4. Everything else is read as text, decoded as lossy UTF-8.

use std::path::Path;

use base64::Engine;
use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::defaults;
use crate::error::{Error, Result};
use crate::logging::SUBSYSTEM_CORE;
use crate::models::{DocumentFile, DocumentKind};

/// Extensions read as text by the upload dialogs.
pub const TEXT_EXTENSIONS: &[&str] = &["txt", "md", "csv", "json"];

/// Fresh id for an uploaded document: millisecond timestamp plus random bits.
pub fn new_document_id() -> String {
    Uuid::now_v7().to_string()
}

/// Fresh id for the pasted pseudo-document.
pub fn new_paste_id() -> String {
    format!(
        "{}{}",
        defaults::PASTE_ID_PREFIX,
        Utc::now().timestamp_millis()
    )
}

/// Result of classifying an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub kind: DocumentKind,
    pub mime_type: String,
}

/// Decide the kind of an upload from its declared type, name, and bytes.
pub fn classify(name: &str, declared_mime: &str, data: &[u8]) -> Result<Classification> {
    let declared = declared_mime.trim().to_lowercase();

    if declared.starts_with("image/") {
        return Ok(Classification {
            kind: DocumentKind::Image,
            mime_type: declared,
        });
    }
    if declared == "application/pdf" {
        return Ok(Classification {
            kind: DocumentKind::Pdf,
            mime_type: declared,
        });
    }

    let text_mime = extension(name)
        .and_then(text_mime_from_extension)
        .map(str::to_string)
        .or_else(|| is_text_like(&declared).then(|| declared.clone()));
    if let Some(mime_type) = text_mime {
        return Ok(Classification {
            kind: DocumentKind::Text,
            mime_type,
        });
    }

    if let Some(detected) = infer::get(data) {
        let mime = detected.mime_type();
        if mime.starts_with("image/") {
            return Ok(Classification {
                kind: DocumentKind::Image,
                mime_type: mime.to_string(),
            });
        }
        if mime == "application/pdf" {
            return Ok(Classification {
                kind: DocumentKind::Pdf,
                mime_type: mime.to_string(),
            });
        }
        if detected.matcher_type() != infer::MatcherType::Text {
            return Err(Error::UnsupportedFileType(mime.to_string()));
        }
    }

    Ok(Classification {
        kind: DocumentKind::Text,
        mime_type: "text/plain".to_string(),
    })
}

/// Build a document from raw bytes with a fresh id.
pub fn ingest_bytes(name: &str, declared_mime: &str, data: &[u8]) -> Result<DocumentFile> {
    let name = display_name(name);
    let class = classify(&name, declared_mime, data)?;

    let doc = match class.kind {
        DocumentKind::Text => DocumentFile::text(
            new_document_id(),
            name,
            String::from_utf8_lossy(data).into_owned(),
        ),
        kind => DocumentFile::binary(
            new_document_id(),
            name,
            kind,
            base64::engine::general_purpose::STANDARD.encode(data),
            Some(class.mime_type),
        ),
    };

    debug!(
        subsystem = SUBSYSTEM_CORE,
        component = "ingest",
        op = "ingest_bytes",
        doc_id = %doc.id,
        doc_kind = %doc.kind,
        size_bytes = data.len(),
        "Ingested document"
    );
    Ok(doc)
}

/// Read a local file and build a document from it.
///
/// The extension supplies the declared type for text formats; images and
/// PDFs are recognised by their magic bytes.
pub fn ingest_path(path: &Path) -> Result<DocumentFile> {
    let data = std::fs::read(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let declared = extension(&name)
        .and_then(text_mime_from_extension)
        .unwrap_or("application/octet-stream");
    ingest_bytes(&name, declared, &data)
}

/// Build a document from a `data:<mime>;base64,<payload>` URL.
///
/// Binary kinds store the payload with the scheme prefix stripped; text
/// kinds store the decoded text.
pub fn ingest_data_url(name: &str, url: &str) -> Result<DocumentFile> {
    let (mime, payload) = split_data_url(url)?;
    let data = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| Error::InvalidFormat(format!("Invalid base64 payload: {}", e)))?;

    let name = display_name(name);
    let class = classify(&name, mime, &data)?;
    let doc = match class.kind {
        DocumentKind::Text => DocumentFile::text(
            new_document_id(),
            name,
            String::from_utf8_lossy(&data).into_owned(),
        ),
        kind => DocumentFile::binary(
            new_document_id(),
            name,
            kind,
            payload,
            Some(class.mime_type),
        ),
    };
    Ok(doc)
}

/// Split a base64 data URL into its media type and payload.
pub fn split_data_url(url: &str) -> Result<(&str, &str)> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| Error::InvalidFormat("Not a data URL".to_string()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| Error::InvalidFormat("Data URL has no payload".to_string()))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| Error::InvalidFormat("Data URL is not base64 encoded".to_string()))?;
    Ok((mime, payload))
}

/// Strip the `data:...,` prefix from a data URL, leaving the raw payload.
/// Input without a prefix is returned unchanged.
pub fn strip_data_url_prefix(url: &str) -> &str {
    match url.strip_prefix("data:").and_then(|r| r.split_once(',')) {
        Some((_, payload)) => payload,
        None => url,
    }
}

fn display_name(name: &str) -> String {
    name.rsplit(['/', '\\']).next().unwrap_or(name).to_string()
}

fn extension(name: &str) -> Option<&str> {
    let (_, ext) = name.rsplit_once('.')?;
    Some(ext)
}

fn text_mime_from_extension(ext: &str) -> Option<&'static str> {
    match ext.to_lowercase().as_str() {
        "txt" => Some("text/plain"),
        "md" | "markdown" => Some("text/markdown"),
        "csv" => Some("text/csv"),
        "json" => Some("application/json"),
        _ => None,
    }
}

fn is_text_like(mime: &str) -> bool {
    mime.starts_with("text/")
        || matches!(
            mime,
            "application/json" | "application/xml" | "application/yaml"
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
    const PDF_MAGIC: &[u8] = b"%PDF-1.7\n%\xE2\xE3\xCF\xD3\n";
    const ZIP_MAGIC: &[u8] = &[b'P', b'K', 0x03, 0x04, 0x14, 0, 0, 0, 0, 0];

    #[test]
    fn test_classify_declared_image() {
        let c = classify("photo.jpg", "image/jpeg", b"not really").unwrap();
        assert_eq!(c.kind, DocumentKind::Image);
        assert_eq!(c.mime_type, "image/jpeg");
    }

    #[test]
    fn test_classify_declared_pdf() {
        let c = classify("scan.pdf", "application/pdf", b"").unwrap();
        assert_eq!(c.kind, DocumentKind::Pdf);
    }

    #[test]
    fn test_classify_magic_bytes_override_generic_declaration() {
        let c = classify("upload", "application/octet-stream", PNG_MAGIC).unwrap();
        assert_eq!(c.kind, DocumentKind::Image);
        assert_eq!(c.mime_type, "image/png");

        let c = classify("upload", "", PDF_MAGIC).unwrap();
        assert_eq!(c.kind, DocumentKind::Pdf);
    }

    #[test]
    fn test_classify_rejects_other_binaries() {
        let err = classify("archive.zip", "application/zip", ZIP_MAGIC).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFileType(m) if m == "application/zip"));
    }

    #[test]
    fn test_classify_text_extensions() {
        for (name, mime) in [
            ("notes.txt", "text/plain"),
            ("README.md", "text/markdown"),
            ("table.csv", "text/csv"),
            ("data.json", "application/json"),
        ] {
            let c = classify(name, "", b"hello").unwrap();
            assert_eq!(c.kind, DocumentKind::Text, "{}", name);
            assert_eq!(c.mime_type, mime, "{}", name);
        }
    }

    #[test]
    fn test_declared_text_ignores_binary_signatures() {
        for data in [
            &b"BMW quarterly results beat forecasts"[..],
            &b"MZ is the initials of the author"[..],
            &b"ID3 tags are stored at the start of the file"[..],
        ] {
            let doc = ingest_bytes("memo.txt", "text/plain", data).unwrap();
            assert_eq!(doc.kind, DocumentKind::Text);
            assert_eq!(doc.content.as_bytes(), data);
            assert!(doc.base64.is_none());
        }

        let c = classify("upload", "text/csv", b"BM,12,34").unwrap();
        assert_eq!(c.kind, DocumentKind::Text);
        assert_eq!(c.mime_type, "text/csv");
    }

    #[test]
    fn test_ingest_path_text_extension_wins_over_signature() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "MZ meeting notes").unwrap();

        let doc = ingest_path(&path).unwrap();
        assert_eq!(doc.kind, DocumentKind::Text);
        assert_eq!(doc.content, "MZ meeting notes");
    }

    #[test]
    fn test_classify_unknown_falls_back_to_text() {
        let c = classify("mystery", "", b"plain words").unwrap();
        assert_eq!(c.kind, DocumentKind::Text);
        assert_eq!(c.mime_type, "text/plain");
    }

    #[test]
    fn test_ingest_text_populates_content() {
        let doc = ingest_bytes("notes.txt", "text/plain", b"Hello world").unwrap();
        assert_eq!(doc.kind, DocumentKind::Text);
        assert_eq!(doc.content, "Hello world");
        assert!(doc.base64.is_none());
    }

    #[test]
    fn test_ingest_text_is_lossy_utf8() {
        let doc = ingest_bytes("bad.txt", "text/plain", &[b'o', b'k', 0xFF]).unwrap();
        assert!(doc.content.starts_with("ok"));
        assert!(doc.content.contains('\u{FFFD}'));
    }

    #[test]
    fn test_ingest_image_populates_base64() {
        let doc = ingest_bytes("a.png", "image/png", PNG_MAGIC).unwrap();
        assert_eq!(doc.kind, DocumentKind::Image);
        assert!(doc.content.is_empty());
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(doc.base64.unwrap())
            .unwrap();
        assert_eq!(decoded, PNG_MAGIC);
    }

    #[test]
    fn test_ingest_pdf_populates_base64() {
        let doc = ingest_bytes("a.pdf", "application/pdf", PDF_MAGIC).unwrap();
        assert_eq!(doc.kind, DocumentKind::Pdf);
        assert!(doc.content.is_empty());
        assert!(doc.base64.is_some());
        assert_eq!(doc.payload_mime_type(), "application/pdf");
    }

    #[test]
    fn test_ingest_strips_path_from_name() {
        let doc = ingest_bytes("/tmp/dir/notes.txt", "text/plain", b"x").unwrap();
        assert_eq!(doc.name, "notes.txt");
    }

    #[test]
    fn test_ids_are_unique() {
        let a = ingest_bytes("a.txt", "text/plain", b"x").unwrap();
        let b = ingest_bytes("a.txt", "text/plain", b"x").unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_paste_id_prefix() {
        assert!(new_paste_id().starts_with("paste-"));
    }

    #[test]
    fn test_ingest_path_reads_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memo.md");
        std::fs::write(&path, "# Title\nBody").unwrap();

        let doc = ingest_path(&path).unwrap();
        assert_eq!(doc.name, "memo.md");
        assert_eq!(doc.kind, DocumentKind::Text);
        assert_eq!(doc.content, "# Title\nBody");
    }

    #[test]
    fn test_ingest_path_detects_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.png");
        std::fs::write(&path, PNG_MAGIC).unwrap();

        let doc = ingest_path(&path).unwrap();
        assert_eq!(doc.kind, DocumentKind::Image);
        assert_eq!(doc.mime_type.as_deref(), Some("image/png"));
    }

    #[test]
    fn test_ingest_path_missing_file() {
        let err = ingest_path(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_split_data_url() {
        let (mime, payload) = split_data_url("data:image/png;base64,QUJD").unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(payload, "QUJD");

        assert!(split_data_url("http://example.com").is_err());
        assert!(split_data_url("data:image/png,QUJD").is_err());
    }

    #[test]
    fn test_strip_data_url_prefix() {
        assert_eq!(strip_data_url_prefix("data:image/png;base64,QUJD"), "QUJD");
        assert_eq!(strip_data_url_prefix("QUJD"), "QUJD");
    }

    #[test]
    fn test_ingest_data_url_image_keeps_payload() {
        let payload = base64::engine::general_purpose::STANDARD.encode(PNG_MAGIC);
        let url = format!("data:image/png;base64,{}", payload);
        let doc = ingest_data_url("a.png", &url).unwrap();
        assert_eq!(doc.kind, DocumentKind::Image);
        assert_eq!(doc.base64.as_deref(), Some(payload.as_str()));
    }

    #[test]
    fn test_ingest_data_url_text_decodes() {
        let doc = ingest_data_url("a.txt", "data:text/plain;base64,aGVsbG8=").unwrap();
        assert_eq!(doc.kind, DocumentKind::Text);
        assert_eq!(doc.content, "hello");
    }

    #[test]
    fn test_ingest_data_url_bad_base64() {
        let err = ingest_data_url("a.txt", "data:text/plain;base64,@@@").unwrap_err();
        assert!(matches!(err, Error::InvalidFormat(_)));
    }
}
