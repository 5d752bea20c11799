//! Document quadrilateral detection.
//!
//! The pipeline runs edge extraction (Gaussian blur + Canny), contour
//! tracing, per-contour polygon approximation and corner classification,
//! and returns the first contour (largest enclosed area first) whose
//! approximation classifies into four named corners.

mod approx;
mod contour;
mod corners;
mod detector;
mod edge;
mod error;
mod params;
mod result;

pub use approx::{approximate_polygon, perimeter};
pub use contour::{find_contours, Contour};
pub use corners::{classify_corners, CornerRole, DocumentQuad};
pub use detector::QuadDetector;
pub use edge::detect_edges;
pub use error::ContourRejection;
pub use params::{EdgeParams, QuadDetectorParams, VertexPolicy};
pub use result::{Detection, QuadDetection};
