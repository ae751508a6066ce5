use crate::ai::{ModelConfig, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_PDF_DIR: &str = "pdfs";
pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub pdf_dir: PathBuf,
    pub model: ModelConfig,
    pub addr: SocketAddr,
}

impl AppConfig {
    /// Read `PDF_STUDY_DIR`, `PDF_STUDY_MODEL` and `PDF_STUDY_ADDR`.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let pdf_dir = lookup("PDF_STUDY_DIR").unwrap_or_else(|| DEFAULT_PDF_DIR.to_string());
        let model = lookup("PDF_STUDY_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let addr = lookup("PDF_STUDY_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr
            .parse()
            .map_err(|e| format!("Invalid PDF_STUDY_ADDR '{}': {}", addr, e))?;

        Ok(Self {
            pdf_dir: PathBuf::from(pdf_dir),
            model: ModelConfig {
                model,
                temperature: Some(DEFAULT_TEMPERATURE),
                max_tokens: Some(DEFAULT_MAX_TOKENS),
            },
            addr,
        })
    }
}
