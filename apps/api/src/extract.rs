//! Text Extractor — uploaded PDF bytes to plain text.

use bytes::Bytes;
use tracing::info;

use crate::errors::AppError;

/// Extracts text from a PDF. Runs on the blocking pool; extractor errors
/// and extractor panics both surface as `AppError::Extraction`.
pub async fn extract_pdf_text(bytes: Bytes) -> Result<String, AppError> {
    if bytes.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }

    let size = bytes.len();
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| AppError::Extraction(format!("PDF extractor aborted: {e}")))?
        .map_err(|e| AppError::Extraction(format!("PDF extraction error: {e}")))?;

    info!("Extracted {} chars from {} byte PDF", text.chars().count(), size);
    Ok(text)
}
