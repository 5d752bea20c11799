//! Corner classification: assign four points to named corner roles.

use crate::error::ContourRejection;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Named corner of a document quadrilateral, document-reading order.
/// Image coordinates, +Y down.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum CornerRole {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

/// Four points bound to corner roles. Construction only succeeds when
/// every role resolves to exactly one distinct input point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DocumentQuad {
    pub top_left: Point2<f32>,
    pub top_right: Point2<f32>,
    pub bottom_right: Point2<f32>,
    pub bottom_left: Point2<f32>,
}

impl DocumentQuad {
    /// Corners in reading order: tl, tr, br, bl (clockwise).
    #[inline]
    pub fn corners(&self) -> [Point2<f32>; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    #[inline]
    pub fn corner(&self, role: CornerRole) -> Point2<f32> {
        match role {
            CornerRole::TopLeft => self.top_left,
            CornerRole::TopRight => self.top_right,
            CornerRole::BottomRight => self.bottom_right,
            CornerRole::BottomLeft => self.bottom_left,
        }
    }

    /// Scale every corner by `1 / ratio`, reprojecting coordinates from a
    /// downscaled detection frame onto the full-resolution frame.
    pub fn unscaled(&self, ratio: f32) -> Self {
        let f = 1.0 / ratio;
        Self {
            top_left: self.top_left * f,
            top_right: self.top_right * f,
            bottom_right: self.bottom_right * f,
            bottom_left: self.bottom_left * f,
        }
    }
}

/// Classify four points into corner roles by bounding-box quadrant.
///
/// The bounding box over the points is split at its midpoints into four
/// closed quadrants; each quadrant must contain exactly one point. This is
/// a geometric heuristic, not a convex-hull corner detector: a point on a
/// midline, or a non-convex quad, can fail spuriously. That is accepted;
/// the caller moves on to the next candidate contour.
pub fn classify_corners(points: &[Point2<f32>; 4]) -> Result<DocumentQuad, ContourRejection> {
    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    let mid_x = (min_x + max_x) / 2.0;
    let mid_y = (min_y + max_y) / 2.0;

    let one_in = |x0: f32, y0: f32, x1: f32, y1: f32, role: CornerRole| {
        let mut found = None;
        let mut matches = 0usize;
        for p in points {
            if p.x >= x0 && p.x <= x1 && p.y >= y0 && p.y <= y1 {
                matches += 1;
                found = Some(*p);
            }
        }
        match (matches, found) {
            (1, Some(p)) => Ok(p),
            _ => Err(ContourRejection::AmbiguousCorner {
                quadrant: role,
                matches,
            }),
        }
    };

    Ok(DocumentQuad {
        top_left: one_in(min_x, min_y, mid_x, mid_y, CornerRole::TopLeft)?,
        top_right: one_in(mid_x, min_y, max_x, mid_y, CornerRole::TopRight)?,
        bottom_right: one_in(mid_x, mid_y, max_x, max_y, CornerRole::BottomRight)?,
        bottom_left: one_in(min_x, mid_y, mid_x, max_y, CornerRole::BottomLeft)?,
    })
}
