//! Document text extraction, dispatched on file extension.

mod docx;

use std::fmt;
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Txt,
}

impl DocumentFormat {
    /// Resolves the format from a path's extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self, ExtractError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            "txt" => Ok(DocumentFormat::Txt),
            _ => Err(ExtractError::Unsupported(ext)),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DocumentFormat::Pdf => "PDF",
            DocumentFormat::Docx => "DOCX",
            DocumentFormat::Txt => "text",
        })
    }
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported document format '{0}' (expected .pdf, .docx or .txt)")]
    Unsupported(String),

    #[error("{format} document could not be read: {reason}")]
    Corrupt {
        format: DocumentFormat,
        reason: String,
    },

    #[error("{0} document contains no extractable text")]
    Empty(DocumentFormat),

    #[error("failed to read document: {0}")]
    Io(#[from] std::io::Error),
}

/// Extracts plain text from the document at `path`.
pub fn extract_text(path: &Path) -> Result<String, ExtractError> {
    let format = DocumentFormat::from_path(path)?;
    let bytes = std::fs::read(path)?;

    let text = match format {
        DocumentFormat::Pdf => extract_pdf(&bytes)?,
        DocumentFormat::Docx => docx::extract(&bytes).map_err(|reason| ExtractError::Corrupt {
            format,
            reason,
        })?,
        DocumentFormat::Txt => String::from_utf8_lossy(&bytes).into_owned(),
    };

    if text.trim().is_empty() {
        return Err(ExtractError::Empty(format));
    }
    Ok(text)
}

fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    // pdf-extract panics on some malformed inputs instead of returning an error.
    let result = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes));
    match result {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(ExtractError::Corrupt {
            format: DocumentFormat::Pdf,
            reason: e.to_string(),
        }),
        Err(_) => Err(ExtractError::Corrupt {
            format: DocumentFormat::Pdf,
            reason: "document structure is malformed".to_string(),
        }),
    }
}
