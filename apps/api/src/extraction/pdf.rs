//! PDF text extraction. `pdf-extract` is synchronous and CPU-bound, so
//! uploads are spooled to a temp file and read inside `spawn_blocking`.

use std::io::Write;
use std::path::Path;

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not extract text: {0}")]
    Extract(String),

    #[error("PDF contains no extractable text")]
    Empty,

    #[error("PDF worker failed: {0}")]
    Task(String),
}

/// Extracts and trims all text from the PDF at `path`.
pub fn read_pdf(path: &Path) -> Result<String, PdfError> {
    let text = pdf_extract::extract_text(path).map_err(|e| PdfError::Extract(e.to_string()))?;
    let text = text.trim();
    if text.is_empty() {
        return Err(PdfError::Empty);
    }
    debug!("Extracted {} chars from {}", text.len(), path.display());
    Ok(text.to_string())
}

/// Extracts text from an uploaded PDF held in memory.
pub async fn read_pdf_upload(bytes: Bytes) -> Result<String, PdfError> {
    if bytes.is_empty() {
        return Err(PdfError::Empty);
    }

    tokio::task::spawn_blocking(move || {
        let mut file = tempfile::Builder::new()
            .prefix("resume-")
            .suffix(".pdf")
            .tempfile()?;
        file.write_all(&bytes)?;
        file.flush()?;
        read_pdf(file.path())
    })
    .await
    .map_err(|e| PdfError::Task(e.to_string()))?
}
