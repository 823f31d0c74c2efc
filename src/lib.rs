//! Forest-rights claim document digitization.
//!
//! Turns scanned claim forms (PDFs or single images) into structured
//! claim records:
//! - a recognition cascade that tries Cloud Vision first and falls back
//!   to local Tesseract OCR, preserving page order either way
//! - Otsu binarization of page images ahead of the fallback engine
//! - label-anchored regex fields plus named-entity heuristics for the
//!   fields the labels missed
//! - an exact raw-text duplicate gate against the claim store

pub mod config;
pub mod dedupe;
pub mod error;
pub mod extract;
pub mod models;
pub mod ocr;
pub mod pipeline;
pub mod store;

pub use error::DigitizeError;
pub use models::ClaimRecord;
pub use ocr::{DocumentKind, SourceDocument};
pub use pipeline::Digitizer;
