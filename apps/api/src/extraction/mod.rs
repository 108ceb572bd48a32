//! Text extraction from uploaded resumes.
//!
//! PDF and Word documents are reduced to plain text before prompting. No
//! page or paragraph level recovery is attempted: a corrupt file fails the
//! whole extraction.

mod docx;
mod pdf;

#[cfg(test)]
pub(crate) use docx::tests::docx_with_paragraphs;

use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Carries the offending extension (empty when the name has none).
    #[error("unsupported file format '{0}'")]
    UnsupportedFormat(String),

    #[error("{0}")]
    ExtractionFailed(String),
}

/// An uploaded file as received from the client.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content: Bytes,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
        }
    }

    /// Lowercased extension including the leading dot, e.g. `.pdf`.
    pub fn extension(&self) -> String {
        match self.file_name.rfind('.') {
            Some(idx) => self.file_name[idx..].to_lowercase(),
            None => String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Word,
}

impl DocumentKind {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            ".pdf" => Some(DocumentKind::Pdf),
            ".docx" | ".doc" => Some(DocumentKind::Word),
            _ => None,
        }
    }
}

/// Extracts plain text from an uploaded PDF or Word document.
///
/// PDF pages are concatenated without separators; Word paragraphs are each
/// followed by a newline. A PDF without a text layer yields an empty string.
pub fn extract_text(file: &UploadedFile) -> Result<String, ExtractionError> {
    let ext = file.extension();
    let kind = DocumentKind::from_extension(&ext)
        .ok_or_else(|| ExtractionError::UnsupportedFormat(ext.clone()))?;

    match kind {
        DocumentKind::Pdf => pdf::extract_pdf_text(&file.content),
        DocumentKind::Word => docx::extract_word_text(&file.content),
    }
}

/// Runs `extract_text` on the blocking pool. A panic inside a document
/// reader is reported as `ExtractionFailed`.
pub async fn extract_text_blocking(file: UploadedFile) -> Result<String, ExtractionError> {
    tokio::task::spawn_blocking(move || extract_text(&file))
        .await
        .map_err(|e| ExtractionError::ExtractionFailed(format!("document reader crashed: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_is_lowercased_with_dot() {
        assert_eq!(UploadedFile::new("CV.PDF", Vec::new()).extension(), ".pdf");
        assert_eq!(UploadedFile::new("resume.final.docx", Vec::new()).extension(), ".docx");
        assert_eq!(UploadedFile::new("resume", Vec::new()).extension(), "");
    }

    #[test]
    fn test_document_kind_from_extension() {
        assert_eq!(DocumentKind::from_extension(".pdf"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_extension(".docx"), Some(DocumentKind::Word));
        assert_eq!(DocumentKind::from_extension(".doc"), Some(DocumentKind::Word));
        assert_eq!(DocumentKind::from_extension(".txt"), None);
    }

    #[test]
    fn test_unsupported_format_carries_extension() {
        let file = UploadedFile::new("resume.txt", b"plain text".to_vec());
        match extract_text(&file) {
            Err(ExtractionError::UnsupportedFormat(ext)) => assert_eq!(ext, ".txt"),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_word_document_paragraphs_end_with_newline() {
        let file = UploadedFile::new(
            "resume.docx",
            docx::tests::docx_with_paragraphs(&["Hello", "World"]),
        );
        assert_eq!(extract_text(&file).unwrap(), "Hello\nWorld\n");
    }

    #[test]
    fn test_corrupt_pdf_is_extraction_failure() {
        let file = UploadedFile::new("resume.pdf", b"definitely not a pdf".to_vec());
        assert!(matches!(
            extract_text(&file),
            Err(ExtractionError::ExtractionFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_blocking_extraction_reports_unsupported_format() {
        let file = UploadedFile::new("resume.rtf", b"{\\rtf1}".to_vec());
        let err = extract_text_blocking(file).await.unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedFormat(ext) if ext == ".rtf"));
    }
}
