use crate::corners::DocumentQuad;
use nalgebra::Point2;
use pagescan_core::GrayImage;
use serde::{Deserialize, Serialize};

/// A classified document quadrilateral and the polygon it came from.
///
/// Coordinates are frame-space pixels of the frame the detection ran on;
/// reuse on a differently-sized frame requires a scale correction
/// (see `pagescan-rectify`).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Detection {
    /// Approximated source polygon, as produced by the contour search.
    pub polygon: Vec<Point2<f32>>,
    /// The four classified corners.
    pub quad: DocumentQuad,
}

/// Output of one detection pass.
///
/// The edge map is a secondary result kept for diagnostic display; it is
/// always produced, whether or not a quadrilateral was found.
#[derive(Clone, Debug)]
pub struct QuadDetection {
    pub edges: GrayImage,
    /// `None` is the distinguished "no detection" outcome, not an error.
    pub detection: Option<Detection>,
}
