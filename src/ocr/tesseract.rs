//! Tesseract OCR engine.
//!
//! The guaranteed fallback: runs the system `tesseract` binary on a
//! binarized page image. Lower accuracy than the cloud engine but no
//! network or credential requirements.

use std::path::Path;
use std::process::Command;

use async_trait::async_trait;
use tracing::debug;

use super::engine::{EngineKind, OcrEngine, OcrError};
use super::page::Page;
use super::preprocess;

/// Local OCR engine backed by the Tesseract system binary.
pub struct TesseractEngine {
    language: String,
}

impl TesseractEngine {
    /// Create a new Tesseract engine with the default language.
    pub fn new() -> Self {
        Self {
            language: "eng".to_string(),
        }
    }

    /// Set the Tesseract language.
    pub fn with_language(mut self, lang: &str) -> Self {
        self.language = lang.to_string();
        self
    }

    /// Run Tesseract on an image file.
    fn run_tesseract(&self, image_path: &Path) -> Result<String, OcrError> {
        let output = Command::new("tesseract")
            .arg(image_path)
            .arg("stdout")
            .args(["-l", &self.language])
            .output();

        match output {
            Ok(output) => {
                if output.status.success() {
                    Ok(String::from_utf8_lossy(&output.stdout).to_string())
                } else {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    Err(OcrError::Failed(format!("tesseract failed: {}", stderr)))
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(OcrError::Unavailable(
                "tesseract not found (install tesseract-ocr)".to_string(),
            )),
            Err(e) => Err(OcrError::Io(e)),
        }
    }
}

impl Default for TesseractEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OcrEngine for TesseractEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::Tesseract
    }

    fn is_available(&self) -> bool {
        which::which("tesseract").is_ok()
    }

    fn availability_hint(&self) -> String {
        if which::which("tesseract").is_err() {
            "Tesseract not installed. Install with: apt install tesseract-ocr".to_string()
        } else {
            format!("Tesseract is available (language: {})", self.language)
        }
    }

    async fn recognize_page(&self, page: &Page) -> Result<String, OcrError> {
        let binarized = preprocess::binarize(&page.data)?;

        let temp_dir = tempfile::TempDir::new()?;
        let image_path = temp_dir.path().join(format!("page-{}.png", page.number));
        binarized
            .save(&image_path)
            .map_err(|e| OcrError::Failed(format!("failed to write binarized page: {}", e)))?;

        debug!(page = page.number, "running tesseract on binarized page");
        self.run_tesseract(&image_path)
    }
}
