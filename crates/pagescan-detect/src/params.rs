use serde::{Deserialize, Serialize};

/// Edge extraction parameters.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct EdgeParams {
    /// Gaussian smoothing kernel side length, odd.
    pub blur_kernel: usize,
    /// Smoothing sigma; `<= 0` derives it from the kernel size.
    pub blur_sigma: f32,
    /// Canny hysteresis low threshold (8-bit intensity scale).
    pub low_threshold: f32,
    /// Canny hysteresis high threshold.
    pub high_threshold: f32,
}

impl Default for EdgeParams {
    fn default() -> Self {
        Self {
            blur_kernel: 5,
            blur_sigma: 0.0,
            low_threshold: 100.0,
            high_threshold: 200.0,
        }
    }
}

/// How a candidate polygon's vertex count is matched against the four
/// corner roles. Both behaviors exist in deployed scanners; the default
/// tolerates extra vertices left over by coarse approximation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum VertexPolicy {
    /// Accept polygons with four or more vertices, classify the first four.
    #[default]
    FirstFour,
    /// Accept only polygons with exactly four vertices.
    ExactlyFour,
}

/// Configuration for [`QuadDetector`](crate::QuadDetector).
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct QuadDetectorParams {
    #[serde(default)]
    pub edge: EdgeParams,
    /// Polygon approximation tolerance as a fraction of contour perimeter.
    pub tolerance_factor: f32,
    #[serde(default)]
    pub vertex_policy: VertexPolicy,
}

impl Default for QuadDetectorParams {
    fn default() -> Self {
        Self {
            edge: EdgeParams::default(),
            tolerance_factor: 0.02,
            vertex_policy: VertexPolicy::default(),
        }
    }
}
