//! Perspective rectification of a detected document quadrilateral and
//! post-processing for legibility.

mod enhance;
mod rectify;

pub use enhance::{enhance_sharpness, enhance_sharpness_rgba, EnhanceParams};
pub use rectify::{fit_ratio, rectify_gray, rectify_rgba, RectifyParams};
