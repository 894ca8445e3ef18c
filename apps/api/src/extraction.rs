//! Résumé text extraction.
//!
//! The match engine only sees plain text. `DocumentExtractor` turns an uploaded
//! file into that text; `AppState` carries it as `Arc<dyn DocumentExtractor>`.

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;

/// An uploaded résumé as received from the multipart body.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentKind {
    Pdf,
    PlainText,
}

impl UploadedDocument {
    /// Content type wins; the file extension is the fallback.
    fn kind(&self) -> Option<DocumentKind> {
        let content_type = self
            .content_type
            .as_deref()
            .map(|ct| ct.split(';').next().unwrap_or(ct).trim().to_ascii_lowercase());
        match content_type.as_deref() {
            Some("application/pdf") => return Some(DocumentKind::Pdf),
            Some("text/plain") => return Some(DocumentKind::PlainText),
            _ => {}
        }

        let extension = self
            .file_name
            .as_deref()
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("pdf") => Some(DocumentKind::Pdf),
            Some("txt") => Some(DocumentKind::PlainText),
            _ => None,
        }
    }
}

#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    async fn extract_text(&self, document: UploadedDocument) -> Result<String, AppError>;
}

/// Handles PDF and UTF-8 plain text.
pub struct DefaultExtractor;

#[async_trait]
impl DocumentExtractor for DefaultExtractor {
    async fn extract_text(&self, document: UploadedDocument) -> Result<String, AppError> {
        let kind = document.kind().ok_or_else(|| {
            AppError::Extraction(format!(
                "unsupported document type: {}",
                document
                    .content_type
                    .as_deref()
                    .or(document.file_name.as_deref())
                    .unwrap_or("unknown")
            ))
        })?;

        let text = match kind {
            DocumentKind::PlainText => String::from_utf8(document.data.to_vec())
                .map_err(|_| AppError::Extraction("text file is not valid UTF-8".to_string()))?,
            DocumentKind::Pdf => {
                // PDF parsing is CPU-bound; keep it off the async executor.
                let data = document.data.clone();
                tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
                    .await
                    .map_err(|e| {
                        // pdf-extract panics on some malformed files.
                        if e.is_panic() {
                            AppError::Extraction("could not read PDF".to_string())
                        } else {
                            AppError::Internal(anyhow::anyhow!(
                                "spawn_blocking failed in PDF extraction: {e}"
                            ))
                        }
                    })?
                    .map_err(|e| AppError::Extraction(format!("could not read PDF: {e}")))?
            }
        };

        debug!(
            kind = ?kind,
            bytes = document.data.len(),
            chars = text.chars().count(),
            "Extracted resume text"
        );
        Ok(text)
    }
}
