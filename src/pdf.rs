use regex::Regex;
use std::any::Any;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Uploads above this size are refused.
pub const MAX_PDF_BYTES: u64 = 5 * 1024 * 1024;
/// Characters of document text sent to the quiz generator.
pub const MAX_PROMPT_CHARS: usize = 60_000;

lazy_static::lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Only PDF files are allowed: {0}")]
    NotPdf(PathBuf),
    #[error("PDF is larger than 5MB ({0} bytes)")]
    TooLarge(u64),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not extract text: {0}")]
    Extract(String),
    #[error("PDF contains no extractable text")]
    NoText,
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Sorted list of the PDFs directly inside `dir`.
pub fn get_pdf_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    if dir.is_dir()
        && let Ok(entries) = fs::read_dir(dir)
    {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_file() && has_pdf_extension(&path) {
                files.push(path);
            }
        }
    }

    files.sort();
    files
}

pub fn validate_pdf(path: &Path) -> Result<(), PdfError> {
    if !has_pdf_extension(path) {
        return Err(PdfError::NotPdf(path.to_path_buf()));
    }
    let size = fs::metadata(path)?.len();
    if size > MAX_PDF_BYTES {
        return Err(PdfError::TooLarge(size));
    }
    Ok(())
}

/// Collapse whitespace runs and cap the length for the prompt.
pub fn normalize_text(raw: &str) -> String {
    let collapsed = WHITESPACE.replace_all(raw.trim(), " ");
    collapsed.chars().take(MAX_PROMPT_CHARS).collect()
}

pub fn extract_text(path: &Path) -> Result<String, PdfError> {
    validate_pdf(path)?;
    // pdf-extract panics on some fonts and encodings instead of erroring.
    let raw = panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text(path)))
        .map_err(|payload| PdfError::Extract(panic_message(payload.as_ref())))?
        .map_err(|e| PdfError::Extract(e.to_string()))?;
    let text = normalize_text(&raw);
    if text.is_empty() {
        return Err(PdfError::NoText);
    }
    crate::logger::log(&format!(
        "Extracted {} characters from {}",
        text.chars().count(),
        path.display()
    ));
    Ok(text)
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown cause".to_string());
    format!("extractor crashed: {}", detail)
}

/// Display name for a PDF path, also used as the session identifier.
pub fn file_label(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
