//! Page image preprocessing for the local engine.
//!
//! The cloud engine always receives original full-fidelity bytes; only
//! the Tesseract path goes through this stage.

use image::GrayImage;
use imageproc::contrast::{otsu_level, threshold, ThresholdType};

use super::engine::OcrError;

/// Binarize an encoded page image for text recognition.
///
/// Decodes the image, converts it to 8-bit grayscale, selects a global
/// bi-modal threshold with Otsu's method and applies binary thresholding,
/// producing a two-level foreground/background image. Deterministic for
/// identical input pixels.
pub fn binarize(data: &[u8]) -> Result<GrayImage, OcrError> {
    let img = image::load_from_memory(data).map_err(|e| OcrError::Decode(e.to_string()))?;
    let gray = img.to_luma8();
    let level = otsu_level(&gray);
    Ok(threshold(&gray, level, ThresholdType::Binary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode_png(img: &GrayImage) -> Vec<u8> {
        let mut buf = Vec::new();
        image::DynamicImage::ImageLuma8(img.clone())
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_binarize_produces_two_levels() {
        // Dark "text" band on a light background.
        let img = GrayImage::from_fn(8, 8, |_, y| {
            if y < 2 {
                image::Luma([20u8])
            } else {
                image::Luma([230u8])
            }
        });
        let binary = binarize(&encode_png(&img)).unwrap();
        assert!(binary.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
        // Both levels survive thresholding.
        assert!(binary.pixels().any(|p| p.0[0] == 0));
        assert!(binary.pixels().any(|p| p.0[0] == 255));
    }

    #[test]
    fn test_binarize_is_deterministic() {
        let img = GrayImage::from_fn(6, 6, |x, y| image::Luma([(x * 40 + y * 3) as u8]));
        let data = encode_png(&img);
        assert_eq!(binarize(&data).unwrap(), binarize(&data).unwrap());
    }

    #[test]
    fn test_undecodable_input_is_decode_error() {
        let err = binarize(b"not an image").unwrap_err();
        assert!(matches!(err, OcrError::Decode(_)));
    }
}
