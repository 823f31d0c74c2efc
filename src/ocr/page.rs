//! Source documents and page rasterization.

use std::path::PathBuf;
use std::process::Command;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tempfile::TempDir;
use tracing::debug;

use super::engine::OcrError;

/// Declared kind of an ingested document.
///
/// The pipeline performs no file-type sniffing; the caller states what it
/// is handing over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Multi-page paginated document.
    Pdf,
    /// Single image.
    Image,
}

/// An ingested claim document: opaque bytes plus declared kind.
/// Immutable once constructed; the pipeline only reads it.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub bytes: Vec<u8>,
    pub kind: DocumentKind,
}

impl SourceDocument {
    pub fn new(bytes: Vec<u8>, kind: DocumentKind) -> Self {
        Self { bytes, kind }
    }

    pub fn pdf(bytes: Vec<u8>) -> Self {
        Self::new(bytes, DocumentKind::Pdf)
    }

    pub fn image(bytes: Vec<u8>) -> Self {
        Self::new(bytes, DocumentKind::Image)
    }

    /// SHA-256 hash of the document content.
    pub fn content_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.bytes);
        hex::encode(hasher.finalize())
    }
}

/// One rasterized page image.
///
/// Pages exist only for the duration of recognition; their order within
/// the source document decides the order of the concatenated raw text.
#[derive(Debug, Clone)]
pub struct Page {
    /// 1-based page number within the source document.
    pub number: u32,
    /// Encoded image bytes: PNG for rasterized PDF pages, the original
    /// full-fidelity bytes for single-image documents.
    pub data: Vec<u8>,
}

/// Rasterize a document into its ordered page images.
///
/// PDFs go through pdftoppm at the given DPI; a single-image document
/// becomes one page holding the original bytes. Any rasterization
/// failure is a decode error for the whole document.
pub fn paginate(doc: &SourceDocument, dpi: u32) -> Result<Vec<Page>, OcrError> {
    match doc.kind {
        DocumentKind::Image => Ok(vec![Page {
            number: 1,
            data: doc.bytes.clone(),
        }]),
        DocumentKind::Pdf => rasterize_pdf(&doc.bytes, dpi),
    }
}

fn rasterize_pdf(bytes: &[u8], dpi: u32) -> Result<Vec<Page>, OcrError> {
    let temp_dir = TempDir::new()?;
    let pdf_path = temp_dir.path().join("input.pdf");
    std::fs::write(&pdf_path, bytes)?;

    let status = Command::new("pdftoppm")
        .args(["-png", "-r", &dpi.to_string()])
        .arg(&pdf_path)
        .arg(temp_dir.path().join("page"))
        .status();

    match status {
        Ok(s) if s.success() => {}
        Ok(_) => {
            return Err(OcrError::Decode(
                "pdftoppm failed to rasterize PDF".to_string(),
            ))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(OcrError::Decode(
                "pdftoppm not found (install poppler-utils)".to_string(),
            ))
        }
        Err(e) => return Err(OcrError::Io(e)),
    }

    // pdftoppm names output page-01.png, page-02.png etc.; lexical sort
    // restores page order because the numbers are zero-padded.
    let mut images: Vec<PathBuf> = std::fs::read_dir(temp_dir.path())?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().map(|ext| ext == "png").unwrap_or(false))
        .collect();
    images.sort();

    if images.is_empty() {
        return Err(OcrError::Decode(
            "no page images produced from PDF".to_string(),
        ));
    }

    debug!(pages = images.len(), dpi, "rasterized PDF");

    images
        .iter()
        .enumerate()
        .map(|(i, path)| {
            Ok(Page {
                number: i as u32 + 1,
                data: std::fs::read(path)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_document_is_single_page() {
        let doc = SourceDocument::image(vec![1, 2, 3]);
        let pages = paginate(&doc, 300).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].number, 1);
        assert_eq!(pages[0].data, vec![1, 2, 3]);
    }

    #[test]
    fn test_content_hash_is_stable() {
        let a = SourceDocument::image(b"claim form".to_vec());
        let b = SourceDocument::pdf(b"claim form".to_vec());
        // Hash covers content only, not the declared kind.
        assert_eq!(a.content_hash(), b.content_hash());
        assert_eq!(a.content_hash().len(), 64);
    }
}
