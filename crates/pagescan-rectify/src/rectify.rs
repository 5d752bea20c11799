//! Map a detected quadrilateral onto an axis-aligned rectangle.

use nalgebra::Point2;
use pagescan_core::{
    homography_from_4pt, warp_perspective_gray, warp_perspective_rgba, GrayImage, GrayImageView,
    RgbaImage, RgbaImageView,
};
use pagescan_detect::DocumentQuad;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Rectification settings.
///
/// Caller contract: whenever the detection ran on a frame of a different
/// size than the frame being rectified, `scale_ratio` must hold the ratio
/// that downscaled the detection frame (detected coordinates are divided
/// by it before use). Omitting it in that situation produces a shifted
/// rectification that cannot be detected at runtime.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct RectifyParams {
    pub scale_ratio: Option<f32>,
}

/// Fitting ratio that scales `actual` to fit inside `desired`, preserving
/// aspect. Pure; the smaller of the two per-axis ratios wins.
pub fn fit_ratio(actual: (u32, u32), desired: (u32, u32)) -> f32 {
    let rx = desired.0 as f32 / actual.0 as f32;
    let ry = desired.1 as f32 / actual.1 as f32;
    rx.min(ry)
}

struct TargetRect {
    src: [Point2<f32>; 4],
    dst: [Point2<f32>; 4],
    width: usize,
    height: usize,
}

/// Target rectangle from the quad's edge lengths: each dimension is the
/// longer of its two opposing edges, so no content is squeezed.
fn target_rect(quad: &DocumentQuad, params: &RectifyParams) -> Option<TargetRect> {
    let quad = match params.scale_ratio {
        Some(r) if r > 0.0 => quad.unscaled(r),
        Some(r) => {
            log::warn!("ignoring non-positive scale ratio {}", r);
            *quad
        }
        None => *quad,
    };

    let [tl, tr, br, bl] = quad.corners();
    let width = (tr - tl).norm().max((br - bl).norm());
    let height = (bl - tl).norm().max((br - tr).norm());

    let w = width.round() as isize;
    let h = height.round() as isize;
    if w < 1 || h < 1 {
        return None;
    }
    let (w, h) = (w as usize, h as usize);

    Some(TargetRect {
        src: [tl, tr, br, bl],
        dst: [
            Point2::new(0.0, 0.0),
            Point2::new(width - 1.0, 0.0),
            Point2::new(width - 1.0, height - 1.0),
            Point2::new(0.0, height - 1.0),
        ],
        width: w,
        height: h,
    })
}

/// Rectify a grayscale frame through the quad's perspective transform.
///
/// Degenerate geometry (zero-size target, unsolvable correspondence) falls
/// back to an unmodified copy of the source rather than failing; the next
/// frame gets another chance.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(src, quad, params), fields(width = src.width, height = src.height))
)]
pub fn rectify_gray(
    src: &GrayImageView<'_>,
    quad: &DocumentQuad,
    params: &RectifyParams,
) -> GrayImage {
    let Some(rect) = target_rect(quad, params) else {
        log::warn!("degenerate quad, returning source copy");
        return GrayImage {
            width: src.width,
            height: src.height,
            data: src.data.to_vec(),
        };
    };

    // warp samples destination pixels through the inverse mapping
    let Some(h_src_from_dst) = homography_from_4pt(&rect.dst, &rect.src) else {
        log::warn!("homography solve failed, returning source copy");
        return GrayImage {
            width: src.width,
            height: src.height,
            data: src.data.to_vec(),
        };
    };

    warp_perspective_gray(src, h_src_from_dst, rect.width, rect.height)
}

/// RGBA variant of [`rectify_gray`].
pub fn rectify_rgba(
    src: &RgbaImageView<'_>,
    quad: &DocumentQuad,
    params: &RectifyParams,
) -> RgbaImage {
    let Some(rect) = target_rect(quad, params) else {
        log::warn!("degenerate quad, returning source copy");
        return RgbaImage {
            width: src.width,
            height: src.height,
            data: src.data.to_vec(),
        };
    };

    let Some(h_src_from_dst) = homography_from_4pt(&rect.dst, &rect.src) else {
        log::warn!("homography solve failed, returning source copy");
        return RgbaImage {
            width: src.width,
            height: src.height,
            data: src.data.to_vec(),
        };
    };

    warp_perspective_rgba(src, h_src_from_dst, rect.width, rect.height)
}
