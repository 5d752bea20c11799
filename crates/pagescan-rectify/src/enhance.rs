//! Legibility post-processing: blur plus locally adaptive binarization.

use pagescan_core::{rgba_to_gray, GrayImage, GrayImageView, RgbaImageView};
use serde::{Deserialize, Serialize};

/// Sharpness enhancement settings.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct EnhanceParams {
    /// Pre-threshold Gaussian kernel side length, odd.
    pub blur_kernel: usize,
    /// Adaptive threshold neighborhood side length, odd. 11 suits full
    /// resolution scans; 3 is the fast low-resolution setting.
    pub block_size: usize,
    /// Constant subtracted from the local weighted mean.
    pub threshold_c: f32,
}

impl Default for EnhanceParams {
    fn default() -> Self {
        Self {
            blur_kernel: 7,
            block_size: 11,
            threshold_c: 2.0,
        }
    }
}

/// Binarize a grayscale image for print-like text contrast.
///
/// Each pixel is compared against the Gaussian-weighted mean of its
/// `block_size` neighborhood minus `threshold_c`; above goes white, the
/// rest black. Applying the enhancer to its own output changes little,
/// the result being near-binary already.
pub fn enhance_sharpness(src: &GrayImageView<'_>, params: &EnhanceParams) -> GrayImage {
    let blurred = gaussian_blur_f32(src, params.blur_kernel);
    adaptive_threshold_gaussian(
        &blurred,
        src.width,
        src.height,
        params.block_size,
        params.threshold_c,
    )
}

/// RGBA convenience wrapper: converts to gray first.
pub fn enhance_sharpness_rgba(src: &RgbaImageView<'_>, params: &EnhanceParams) -> GrayImage {
    let gray = rgba_to_gray(src);
    enhance_sharpness(&gray.view(), params)
}

fn gaussian_kernel(ksize: usize) -> Vec<f32> {
    let sigma = 0.3 * ((ksize as f32 - 1.0) * 0.5 - 1.0) + 0.8;
    let half = (ksize / 2) as i32;
    let denom = 2.0 * sigma * sigma;
    let mut kernel = Vec::with_capacity(ksize);
    let mut sum = 0.0f32;
    for i in -half..=half {
        let v = (-(i * i) as f32 / denom).exp();
        kernel.push(v);
        sum += v;
    }
    for v in &mut kernel {
        *v /= sum;
    }
    kernel
}

#[inline]
fn clamp_index(i: i32, len: usize) -> usize {
    i.clamp(0, len as i32 - 1) as usize
}

fn separable_blur(data: &[f32], w: usize, h: usize, kernel: &[f32]) -> Vec<f32> {
    let half = (kernel.len() / 2) as i32;

    let mut tmp = vec![0.0f32; w * h];
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0.0f32;
            for (k, &kv) in kernel.iter().enumerate() {
                let xi = clamp_index(x as i32 + k as i32 - half, w);
                acc += data[y * w + xi] * kv;
            }
            tmp[y * w + x] = acc;
        }
    }

    let mut out = vec![0.0f32; w * h];
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0.0f32;
            for (k, &kv) in kernel.iter().enumerate() {
                let yi = clamp_index(y as i32 + k as i32 - half, h);
                acc += tmp[yi * w + x] * kv;
            }
            out[y * w + x] = acc;
        }
    }
    out
}

fn gaussian_blur_f32(src: &GrayImageView<'_>, ksize: usize) -> Vec<f32> {
    let data: Vec<f32> = src.data.iter().map(|&v| v as f32).collect();
    if ksize < 2 {
        return data;
    }
    separable_blur(&data, src.width, src.height, &gaussian_kernel(ksize))
}

fn adaptive_threshold_gaussian(
    data: &[f32],
    w: usize,
    h: usize,
    block_size: usize,
    c: f32,
) -> GrayImage {
    // the local weighted mean is itself a Gaussian blur over the block
    let means = separable_blur(data, w, h, &gaussian_kernel(block_size));

    let mut out = vec![0u8; w * h];
    for i in 0..w * h {
        out[i] = if data[i] > means[i] - c { 255 } else { 0 };
    }

    GrayImage {
        width: w,
        height: h,
        data: out,
    }
}
