//! High-level facade crate for the `pagescan-*` workspace.
//!
//! This crate provides:
//! - stable, convenient re-exports of the underlying pipeline crates
//! - (feature-gated) end-to-end helpers running detection, rectification
//!   and enhancement on `image` crate buffers
//! - the scan-loop state model for periodic live detection
//!
//! ## Quickstart
//!
//! ```no_run
//! use pagescan::detect;
//! use pagescan::ScanPageParams;
//! use image::ImageReader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = ImageReader::open("page.png")?.decode()?;
//! let outcome = detect::scan_page(&img, &ScanPageParams::default());
//! println!("detected: {}", outcome.detection.detection.is_some());
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `pagescan::core`: image buffers, bilinear sampling, homographies.
//! - `pagescan::quad`: edge extraction, contours, corner classification,
//!   the quadrilateral detector.
//! - `pagescan::rectify`: perspective rectification and the sharpness
//!   enhancer.
//! - `pagescan::detect` (feature `image`): end-to-end helpers from
//!   `image::DynamicImage` / `image::GrayImage`.
//! - `pagescan::scan`: periodic detection loop state (running flag,
//!   last-known detection, cadence).

pub use pagescan_core as core;
pub use pagescan_detect as quad;
pub use pagescan_rectify as rectify;

pub use pagescan_detect::{
    Detection, DocumentQuad, QuadDetection, QuadDetector, QuadDetectorParams, VertexPolicy,
};
pub use pagescan_rectify::{EnhanceParams, RectifyParams};

pub mod scan;

#[cfg(feature = "image")]
pub mod detect;

#[cfg(feature = "image")]
pub use detect::ScanPageParams;
