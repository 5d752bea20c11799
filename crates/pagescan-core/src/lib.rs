//! Core types and utilities for document scanning.
//!
//! This crate is intentionally small and purely pixel/geometric. It does
//! *not* depend on any concrete detector or external image type.

mod homography;
mod image;
mod logger;

pub use homography::{
    homography_from_4pt, warp_perspective_gray, warp_perspective_rgba, Homography,
};
pub use image::{
    rgba_to_gray, sample_bilinear, sample_bilinear_rgba, sample_bilinear_u8, GrayImage,
    GrayImageView, RgbaImage, RgbaImageView,
};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
