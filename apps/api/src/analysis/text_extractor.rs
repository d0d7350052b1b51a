//! Text Extractor: turns an uploaded document into normalized plain text.
//!
//! Extraction order is not significant downstream (keywords are a bag of
//! terms), so multi-column PDFs only need to yield all of their text.

use std::panic::{self, AssertUnwindSafe};

use unicode_normalization::UnicodeNormalization;

use crate::errors::ExtractError;
use crate::models::document::{Document, ExtractedText};

/// PDF readers accept the header anywhere in the first KiB.
const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_HEADER_WINDOW: usize = 1024;

/// Document formats the extractor can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    PlainText,
}

impl DocumentKind {
    /// Resolves the kind from the declared media type, falling back to the
    /// file extension when nothing useful was declared.
    pub fn detect(media_type: Option<&str>, file_name: Option<&str>) -> Result<Self, ExtractError> {
        let essence = media_type
            .map(|m| m.split(';').next().unwrap_or("").trim().to_ascii_lowercase())
            .filter(|m| !m.is_empty());

        match essence.as_deref() {
            Some("application/pdf") | Some("application/x-pdf") => Ok(DocumentKind::Pdf),
            Some("text/plain") => Ok(DocumentKind::PlainText),
            None | Some("application/octet-stream") => Self::from_file_name(file_name)
                .ok_or_else(|| {
                    ExtractError::UnsupportedFormat(
                        essence.clone().unwrap_or_else(|| "unknown".to_string()),
                    )
                }),
            Some(other) => Err(ExtractError::UnsupportedFormat(other.to_string())),
        }
    }

    fn from_file_name(file_name: Option<&str>) -> Option<Self> {
        let (_, extension) = file_name?.rsplit_once('.')?;
        match extension.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "txt" => Some(DocumentKind::PlainText),
            _ => None,
        }
    }
}

/// Extracts and normalizes the text of a document. Pure; never touches disk.
pub fn extract(document: &Document) -> Result<ExtractedText, ExtractError> {
    let kind = DocumentKind::detect(document.media_type.as_deref(), document.file_name.as_deref())?;

    let raw = match kind {
        DocumentKind::Pdf => extract_pdf(&document.bytes)?,
        DocumentKind::PlainText => std::str::from_utf8(&document.bytes)
            .map_err(|e| ExtractError::CorruptDocument(format!("invalid UTF-8: {e}")))?
            .to_string(),
    };

    let text = normalize(&raw);
    if text.is_blank() {
        return Err(ExtractError::EmptyContent);
    }
    Ok(text)
}

fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    let header = &bytes[..bytes.len().min(PDF_HEADER_WINDOW)];
    if !header.windows(PDF_MAGIC.len()).any(|w| w == PDF_MAGIC) {
        return Err(ExtractError::CorruptDocument(
            "missing %PDF- header".to_string(),
        ));
    }

    // pdf-extract panics on some malformed inputs instead of returning an error.
    match panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes))) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(ExtractError::CorruptDocument(e.to_string())),
        Err(_) => Err(ExtractError::CorruptDocument(
            "PDF parser aborted".to_string(),
        )),
    }
}

/// Unicode-folds (NFKC), lowercases, strips control and zero-width
/// characters, straightens typographic apostrophes and collapses whitespace
/// runs to a single space.
pub fn normalize(raw: &str) -> ExtractedText {
    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;

    for c in raw.nfkc() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if c.is_control() || is_invisible(c) {
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        match c {
            '\u{2018}' | '\u{2019}' => out.push('\''),
            _ => out.extend(c.to_lowercase()),
        }
    }

    ExtractedText::from_normalized(out)
}

fn is_invisible(c: char) -> bool {
    matches!(
        c,
        '\u{00AD}' | '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{2060}' | '\u{FEFF}'
    )
}
