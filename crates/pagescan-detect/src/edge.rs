//! Edge extraction: Gaussian smoothing followed by Canny.

use crate::params::EdgeParams;
use pagescan_core::{GrayImage, GrayImageView};

/// Extract a binary edge map (0/255) from a grayscale frame.
///
/// The output has the same spatial dimensions as the input. A flat frame
/// produces an all-zero map; there is no failure path.
pub fn detect_edges(src: &GrayImageView<'_>, params: &EdgeParams) -> GrayImage {
    let blurred = gaussian_blur(src, params.blur_kernel, params.blur_sigma);
    canny(
        &blurred.view(),
        params.low_threshold,
        params.high_threshold,
    )
}

/// Default sigma for a given odd kernel size, matching the common
/// `0.3 * ((k - 1) * 0.5 - 1) + 0.8` convention.
#[inline]
fn sigma_for_kernel(ksize: usize) -> f32 {
    0.3 * ((ksize as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

fn gaussian_kernel(ksize: usize, sigma: f32) -> Vec<f32> {
    let sigma = if sigma > 0.0 {
        sigma
    } else {
        sigma_for_kernel(ksize)
    };
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

/// Separable Gaussian blur with border replication.
pub(crate) fn gaussian_blur(src: &GrayImageView<'_>, ksize: usize, sigma: f32) -> GrayImage {
    let (w, h) = (src.width, src.height);
    if w == 0 || h == 0 || ksize < 2 {
        return GrayImage {
            width: w,
            height: h,
            data: src.data.to_vec(),
        };
    }

    let kernel = gaussian_kernel(ksize, sigma);
    let half = (ksize / 2) as i32;

    // horizontal pass
    let mut tmp = vec![0.0f32; w * h];
    for y in 0..h {
        let row = &src.data[y * w..(y + 1) * w];
        for x in 0..w {
            let mut acc = 0.0f32;
            for (k, &kv) in kernel.iter().enumerate() {
                let xi = clamp_index(x as i32 + k as i32 - half, w);
                acc += row[xi] as f32 * kv;
            }
            tmp[y * w + x] = acc;
        }
    }

    // vertical pass
    let mut out = vec![0u8; w * h];
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0.0f32;
            for (k, &kv) in kernel.iter().enumerate() {
                let yi = clamp_index(y as i32 + k as i32 - half, h);
                acc += tmp[yi * w + x] * kv;
            }
            out[y * w + x] = acc.round().clamp(0.0, 255.0) as u8;
        }
    }

    GrayImage {
        width: w,
        height: h,
        data: out,
    }
}

/// Canny edge detector: Sobel gradients, direction-quantized non-maximum
/// suppression, dual-threshold hysteresis. Magnitude uses the L1 norm, so
/// the usual 100/200 thresholds apply on an 8-bit intensity scale.
pub(crate) fn canny(src: &GrayImageView<'_>, low: f32, high: f32) -> GrayImage {
    let (w, h) = (src.width, src.height);
    let mut edges = GrayImage::new(w, h);
    if w < 3 || h < 3 {
        return edges;
    }

    let px = |x: i32, y: i32| -> f32 {
        let xi = clamp_index(x, w);
        let yi = clamp_index(y, h);
        src.data[yi * w + xi] as f32
    };

    let mut gx = vec![0.0f32; w * h];
    let mut gy = vec![0.0f32; w * h];
    let mut mag = vec![0.0f32; w * h];

    for y in 0..h as i32 {
        for x in 0..w as i32 {
            let sx = (px(x + 1, y - 1) + 2.0 * px(x + 1, y) + px(x + 1, y + 1))
                - (px(x - 1, y - 1) + 2.0 * px(x - 1, y) + px(x - 1, y + 1));
            let sy = (px(x - 1, y + 1) + 2.0 * px(x, y + 1) + px(x + 1, y + 1))
                - (px(x - 1, y - 1) + 2.0 * px(x, y - 1) + px(x + 1, y - 1));
            let i = y as usize * w + x as usize;
            gx[i] = sx;
            gy[i] = sy;
            mag[i] = sx.abs() + sy.abs();
        }
    }

    // non-maximum suppression along the quantized gradient direction
    let mut thin = vec![0.0f32; w * h];
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let i = y * w + x;
            let m = mag[i];
            if m <= 0.0 {
                continue;
            }
            let angle = gy[i].atan2(gx[i]).to_degrees();
            let angle = if angle < 0.0 { angle + 180.0 } else { angle };
            let (a, b) = if !(22.5..157.5).contains(&angle) {
                (mag[i - 1], mag[i + 1])
            } else if angle < 67.5 {
                (mag[i - w - 1], mag[i + w + 1])
            } else if angle < 112.5 {
                (mag[i - w], mag[i + w])
            } else {
                (mag[i - w + 1], mag[i + w - 1])
            };
            if m >= a && m >= b {
                thin[i] = m;
            }
        }
    }

    // hysteresis: strong pixels seed a flood fill through weak neighbors
    let mut stack = Vec::new();
    for i in 0..w * h {
        if thin[i] >= high && edges.data[i] == 0 {
            edges.data[i] = 255;
            stack.push(i);
            while let Some(j) = stack.pop() {
                let (jx, jy) = (j % w, j / w);
                for dy in -1i32..=1 {
                    for dx in -1i32..=1 {
                        let nx = jx as i32 + dx;
                        let ny = jy as i32 + dy;
                        if nx < 0 || ny < 0 || nx >= w as i32 || ny >= h as i32 {
                            continue;
                        }
                        let n = ny as usize * w + nx as usize;
                        if edges.data[n] == 0 && thin[n] >= low {
                            edges.data[n] = 255;
                            stack.push(n);
                        }
                    }
                }
            }
        }
    }

    edges
}
