//! Text extraction — turns an uploaded résumé into plain text for the engine.
//!
//! Emptiness is not checked here; the engine rejects blank text.

use std::path::Path;

use crate::errors::AppError;

/// Supported upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Doc,
    Text,
}

impl DocumentKind {
    /// Canonical dot-prefixed extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => ".pdf",
            Self::Docx => ".docx",
            Self::Doc => ".doc",
            Self::Text => ".txt",
        }
    }

    /// Accepts "pdf", ".PDF" and friends.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "doc" => Some(Self::Doc),
            "txt" => Some(Self::Text),
            _ => None,
        }
    }

    pub fn from_mime(mime: &str) -> Option<Self> {
        // drop parameters such as "; charset=utf-8"
        let essence = mime.split(';').next().unwrap_or_default().trim();
        match essence.to_lowercase().as_str() {
            "application/pdf" => Some(Self::Pdf),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Some(Self::Docx)
            }
            "application/msword" => Some(Self::Doc),
            "text/plain" => Some(Self::Text),
            _ => None,
        }
    }

    /// Resolves by file extension first, then by MIME type.
    pub fn resolve(file_name: &str, content_type: Option<&str>) -> Result<Self, AppError> {
        let extension = extension_of(file_name);
        extension
            .as_deref()
            .and_then(Self::from_extension)
            .or_else(|| content_type.and_then(Self::from_mime))
            .ok_or_else(|| {
                AppError::UnsupportedFormat(format!(
                    "Unsupported file type: {}",
                    extension.as_deref().unwrap_or(file_name)
                ))
            })
    }
}

/// Lowercased extension with its leading dot, e.g. ".pdf".
pub fn extension_of(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
}

/// Extracts plain text from `bytes` according to `kind`. CPU-bound for PDFs;
/// call from a blocking context.
pub fn extract_text(bytes: &[u8], kind: DocumentKind) -> Result<String, AppError> {
    match kind {
        DocumentKind::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| AppError::Extraction(e.to_string())),
        DocumentKind::Text => Ok(String::from_utf8_lossy(strip_bom(bytes)).into_owned()),
        DocumentKind::Docx | DocumentKind::Doc => {
            String::from_utf8(strip_bom(bytes).to_vec()).map_err(|_| {
                AppError::UnsupportedFormat(
                    "DOCX/DOC files are not fully supported yet. Please convert to PDF or TXT format."
                        .to_string(),
                )
            })
        }
    }
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(DocumentKind::from_extension(".PDF"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_extension("txt"), Some(DocumentKind::Text));
        assert_eq!(DocumentKind::from_extension(".docx"), Some(DocumentKind::Docx));
        assert_eq!(DocumentKind::from_extension(".doc"), Some(DocumentKind::Doc));
        assert_eq!(DocumentKind::from_extension(".exe"), None);
    }

    #[test]
    fn test_kind_from_mime_ignores_parameters() {
        assert_eq!(
            DocumentKind::from_mime("text/plain; charset=utf-8"),
            Some(DocumentKind::Text)
        );
        assert_eq!(DocumentKind::from_mime("image/png"), None);
    }

    #[test]
    fn test_resolve_prefers_extension_then_mime() {
        assert_eq!(
            DocumentKind::resolve("cv.pdf", Some("text/plain")).unwrap(),
            DocumentKind::Pdf
        );
        assert_eq!(
            DocumentKind::resolve("resume", Some("application/msword")).unwrap(),
            DocumentKind::Doc
        );
    }

    #[test]
    fn test_resolve_unsupported() {
        let err = DocumentKind::resolve("photo.png", Some("image/png")).unwrap_err();
        assert!(matches!(err, AppError::UnsupportedFormat(ref m) if m == "Unsupported file type: .png"));
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("My Resume.Final.TXT").as_deref(), Some(".txt"));
        assert_eq!(extension_of("resume"), None);
    }

    #[test]
    fn test_plain_text_is_decoded_lossily() {
        let text = extract_text(b"Rust \xff engineer", DocumentKind::Text).unwrap();
        assert!(text.starts_with("Rust "));
        assert!(text.ends_with(" engineer"));
    }

    #[test]
    fn test_leading_byte_order_mark_is_stripped() {
        let text = extract_text(b"\xEF\xBB\xBFRust engineer", DocumentKind::Text).unwrap();
        assert_eq!(text, "Rust engineer");
        let doc = extract_text(b"\xEF\xBB\xBFPlain", DocumentKind::Doc).unwrap();
        assert_eq!(doc, "Plain");
        assert_eq!(extract_text(b"\xEF\xBB\xBF", DocumentKind::Text).unwrap(), "");
    }

    #[test]
    fn test_kind_extension_round_trips() {
        for kind in [DocumentKind::Pdf, DocumentKind::Docx, DocumentKind::Doc, DocumentKind::Text] {
            assert_eq!(DocumentKind::from_extension(kind.extension()), Some(kind));
        }
    }

    #[test]
    fn test_docx_binary_is_unsupported() {
        let err = extract_text(&[0x50, 0x4b, 0x03, 0x04, 0xff, 0xfe], DocumentKind::Docx)
            .unwrap_err();
        assert!(matches!(err, AppError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_doc_utf8_is_read_as_text() {
        let text = extract_text("Plain résumé".as_bytes(), DocumentKind::Doc).unwrap();
        assert_eq!(text, "Plain résumé");
    }

    #[test]
    fn test_garbage_pdf_fails_extraction() {
        let err = extract_text(b"not really a pdf", DocumentKind::Pdf).unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }
}
