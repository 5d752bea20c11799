//! End-to-end helpers bridging `image` crate buffers into the pipeline.

use crate::{core, rectify};
use pagescan_core::{GrayImage, GrayImageView, RgbaImageView};
use pagescan_detect::{QuadDetection, QuadDetector, QuadDetectorParams};
use pagescan_rectify::{EnhanceParams, RectifyParams};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by the high-level facade helpers.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    #[error("invalid grayscale image buffer length (expected {expected} bytes, got {got})")]
    InvalidGrayBuffer { expected: usize, got: usize },

    #[error("invalid grayscale image dimensions (width={width}, height={height})")]
    InvalidGrayDimensions { width: u32, height: u32 },
}

/// Settings for a full scan pass: detection, rectification, enhancement.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct ScanPageParams {
    #[serde(default)]
    pub detector: QuadDetectorParams,
    #[serde(default)]
    pub rectify: RectifyParams,
    #[serde(default)]
    pub enhance: EnhanceParams,
}

/// Everything a scan pass produces. `rectified` and `enhanced` are absent
/// when no quadrilateral was found; the edge map is always present.
#[derive(Clone, Debug)]
pub struct ScanOutcome {
    pub detection: QuadDetection,
    pub rectified: Option<core::RgbaImage>,
    pub enhanced: Option<GrayImage>,
}

/// Convert an `image::GrayImage` into the lightweight `pagescan-core` view type.
pub fn gray_view(img: &::image::GrayImage) -> GrayImageView<'_> {
    GrayImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Convert an `image::RgbaImage` into the lightweight `pagescan-core` view type.
pub fn rgba_view(img: &::image::RgbaImage) -> RgbaImageView<'_> {
    RgbaImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Convert a pipeline gray buffer back into an `image::GrayImage`.
pub fn to_image_gray(img: &GrayImage) -> Option<::image::GrayImage> {
    ::image::GrayImage::from_raw(img.width as u32, img.height as u32, img.data.clone())
}

/// Convert a pipeline RGBA buffer back into an `image::RgbaImage`.
pub fn to_image_rgba(img: &core::RgbaImage) -> Option<::image::RgbaImage> {
    ::image::RgbaImage::from_raw(img.width as u32, img.height as u32, img.data.clone())
}

/// Run quadrilateral detection on a grayscale image.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(img, params), fields(width = img.width(), height = img.height()))
)]
pub fn detect_document(img: &::image::GrayImage, params: &QuadDetectorParams) -> QuadDetection {
    let detector = QuadDetector::new(*params);
    detector.detect(&gray_view(img))
}

/// Detection from a raw grayscale buffer, validating its shape first.
pub fn detect_document_from_gray_u8(
    width: u32,
    height: u32,
    pixels: &[u8],
    params: &QuadDetectorParams,
) -> Result<QuadDetection, ScanError> {
    let img = gray_image_from_slice(width, height, pixels)?;
    Ok(detect_document(&img, params))
}

/// Run the whole pipeline on one frame: detect, rectify, enhance.
///
/// Detection runs on the luma channel; rectification resamples the RGBA
/// frame so color survives into the rectified output, and enhancement
/// binarizes that for OCR-grade contrast.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(img, params), fields(width = img.width(), height = img.height()))
)]
pub fn scan_page(img: &::image::DynamicImage, params: &ScanPageParams) -> ScanOutcome {
    let gray = img.to_luma8();
    let detection = detect_document(&gray, &params.detector);

    let Some(found) = detection.detection.as_ref() else {
        return ScanOutcome {
            detection,
            rectified: None,
            enhanced: None,
        };
    };

    let rgba = img.to_rgba8();
    let rectified = rectify::rectify_rgba(&rgba_view(&rgba), &found.quad, &params.rectify);
    let enhanced = rectify::enhance_sharpness_rgba(&rectified.view(), &params.enhance);

    ScanOutcome {
        detection,
        rectified: Some(rectified),
        enhanced: Some(enhanced),
    }
}

/// Build an `image::GrayImage` from a raw grayscale buffer.
pub fn gray_image_from_slice(
    width: u32,
    height: u32,
    pixels: &[u8],
) -> Result<::image::GrayImage, ScanError> {
    let w = usize::try_from(width).ok();
    let h = usize::try_from(height).ok();
    let Some((w, h)) = w.zip(h) else {
        return Err(ScanError::InvalidGrayDimensions { width, height });
    };
    let Some(expected) = w.checked_mul(h) else {
        return Err(ScanError::InvalidGrayDimensions { width, height });
    };
    if pixels.len() != expected {
        return Err(ScanError::InvalidGrayBuffer {
            expected,
            got: pixels.len(),
        });
    }
    ::image::GrayImage::from_raw(width, height, pixels.to_vec())
        .ok_or(ScanError::InvalidGrayDimensions { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagescan_detect::QuadDetectorParams;

    #[test]
    fn slice_length_is_validated() {
        let err = gray_image_from_slice(4, 4, &[0u8; 15]).expect_err("short buffer");
        assert!(matches!(
            err,
            ScanError::InvalidGrayBuffer {
                expected: 16,
                got: 15
            }
        ));
    }

    #[test]
    fn detect_from_raw_buffer_runs() {
        let mut pixels = vec![0u8; 64 * 64];
        for y in 10..50 {
            for x in 10..50 {
                pixels[y * 64 + x] = 255;
            }
        }
        let out = detect_document_from_gray_u8(64, 64, &pixels, &QuadDetectorParams::default())
            .expect("valid buffer");
        assert!(out.detection.is_some());
    }

    #[test]
    fn scan_page_produces_all_outputs_on_detection() {
        let mut gray = ::image::GrayImage::new(120, 120);
        for y in 15..105 {
            for x in 20..100 {
                gray.put_pixel(x, y, ::image::Luma([255]));
            }
        }
        let dynimg = ::image::DynamicImage::ImageLuma8(gray);
        let outcome = scan_page(&dynimg, &ScanPageParams::default());
        assert!(outcome.detection.detection.is_some());
        let rectified = outcome.rectified.expect("rectified");
        let enhanced = outcome.enhanced.expect("enhanced");
        assert!((rectified.width as i32 - 80).abs() <= 2);
        assert!((rectified.height as i32 - 90).abs() <= 2);
        assert_eq!(enhanced.width, rectified.width);
    }

    #[test]
    fn scan_page_on_blank_frame_has_no_outputs() {
        let dynimg = ::image::DynamicImage::ImageLuma8(::image::GrayImage::new(64, 64));
        let outcome = scan_page(&dynimg, &ScanPageParams::default());
        assert!(outcome.detection.detection.is_none());
        assert!(outcome.rectified.is_none());
        assert!(outcome.enhanced.is_none());
    }
}
