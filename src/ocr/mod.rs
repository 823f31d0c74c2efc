//! Text recognition for claim documents.
//!
//! Recognition runs as a cascade over two engines:
//! - Google Cloud Vision document-text-detection (primary, higher
//!   accuracy, gated on an API key)
//! - Tesseract OCR via the system binary (fallback, always available,
//!   fed Otsu-binarized page images)
//!
//! PDF documents are rasterized to page images with pdftoppm (Poppler)
//! before recognition; single-image documents pass through as one page.
//! Page order is preserved in the concatenated output regardless of which
//! engine produced it.

mod cascade;
mod engine;
mod page;
mod preprocess;
mod tesseract;
mod vision;

pub use cascade::RecognitionCascade;
pub use engine::{EngineKind, OcrEngine, OcrError};
pub use page::{paginate, DocumentKind, Page, SourceDocument};
pub use preprocess::binarize;
pub use tesseract::TesseractEngine;
pub use vision::VisionEngine;
