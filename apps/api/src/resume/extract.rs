//! PDF text extraction for uploaded resumes.
//!
//! Uploads are parsed from memory. The file type is decided by the `%PDF-`
//! magic bytes, not by the client-supplied name or content type.

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, info};

const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("the uploaded file is empty")]
    Empty,

    #[error("the uploaded file is not a PDF document")]
    NotPdf,

    #[error("{0}")]
    Extraction(String),

    #[error("the PDF contains no extractable text (is it a scanned image?)")]
    NoText,
}

/// A resume file received from the form.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Returns true when `bytes` starts with the PDF header (leading whitespace allowed).
pub fn looks_like_pdf(bytes: &[u8]) -> bool {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    bytes[start..].starts_with(PDF_MAGIC)
}

/// Extracts the text of every page, in page order, and trims the result.
pub fn extract_text_from_pdf(bytes: &[u8]) -> Result<String, PdfError> {
    if bytes.is_empty() {
        return Err(PdfError::Empty);
    }
    if !looks_like_pdf(bytes) {
        return Err(PdfError::NotPdf);
    }

    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| PdfError::Extraction(e.to_string()))?;

    let text = text.trim();
    if text.is_empty() {
        return Err(PdfError::NoText);
    }
    Ok(text.to_string())
}

/// Runs extraction on the blocking pool. A panic inside the PDF parser is
/// reported as an extraction error instead of tearing down the request task.
pub async fn extract_resume_text(upload: &ResumeUpload) -> Result<String, PdfError> {
    debug!(
        "Extracting resume text from '{}' ({} bytes, content type {:?})",
        upload.file_name,
        upload.data.len(),
        upload.content_type
    );

    let data = upload.data.clone();
    let text = tokio::task::spawn_blocking(move || extract_text_from_pdf(&data))
        .await
        .map_err(|e| {
            if e.is_panic() {
                PdfError::Extraction("the PDF parser could not read this document".to_string())
            } else {
                PdfError::Extraction(e.to_string())
            }
        })??;

    info!(
        "Extracted {} characters from '{}'",
        text.chars().count(),
        upload.file_name
    );
    Ok(text)
}
