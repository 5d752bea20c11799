//! Contour-search orchestration.

use crate::approx::{approximate_polygon, perimeter};
use crate::contour::{find_contours, Contour};
use crate::corners::classify_corners;
use crate::edge::detect_edges;
use crate::error::ContourRejection;
use crate::params::{QuadDetectorParams, VertexPolicy};
use crate::result::{Detection, QuadDetection};
use pagescan_core::GrayImageView;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Finds the largest classifiable document quadrilateral in a frame.
pub struct QuadDetector {
    params: QuadDetectorParams,
}

impl QuadDetector {
    pub fn new(params: QuadDetectorParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &QuadDetectorParams {
        &self.params
    }

    /// Run one detection pass over a grayscale frame.
    ///
    /// Candidate contours are tried in descending enclosed-area order; the
    /// first one whose approximation classifies into four corners wins.
    /// The edge map is always returned alongside the (possibly absent)
    /// detection.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, frame), fields(width = frame.width, height = frame.height))
    )]
    pub fn detect(&self, frame: &GrayImageView<'_>) -> QuadDetection {
        let edges = detect_edges(frame, &self.params.edge);

        let mut contours = find_contours(&edges.view());
        if contours.is_empty() {
            log::debug!("no contours in edge map");
            return QuadDetection {
                edges,
                detection: None,
            };
        }

        contours.sort_by(|a, b| {
            b.area
                .partial_cmp(&a.area)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let detection = contours
            .iter()
            .find_map(|c| match self.try_contour(c) {
                Ok(detection) => Some(detection),
                Err(reject) => {
                    log::debug!("contour (area {:.0}) rejected: {}", c.area, reject);
                    None
                }
            });

        if detection.is_none() {
            log::debug!("no classifiable quadrilateral in {} contours", contours.len());
        }

        QuadDetection { edges, detection }
    }

    fn try_contour(&self, contour: &Contour) -> Result<Detection, ContourRejection> {
        let epsilon = self.params.tolerance_factor * perimeter(&contour.points);
        let polygon = approximate_polygon(&contour.points, epsilon);

        if polygon.len() < 4 {
            return Err(ContourRejection::InsufficientVertices { got: polygon.len() });
        }
        if self.params.vertex_policy == VertexPolicy::ExactlyFour && polygon.len() != 4 {
            return Err(ContourRejection::NotQuadrilateral { got: polygon.len() });
        }

        let four: [_; 4] = [polygon[0], polygon[1], polygon[2], polygon[3]];
        let quad = classify_corners(&four)?;

        Ok(Detection { polygon, quad })
    }
}
