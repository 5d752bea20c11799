use crate::corners::CornerRole;

/// Why a candidate contour was rejected during the search.
///
/// Every variant is local and non-fatal: the detector logs it and moves on
/// to the next contour, and an exhausted search is a plain "no detection",
/// never an error.
#[derive(thiserror::Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContourRejection {
    #[error("approximated polygon has {got} vertices, need at least 4")]
    InsufficientVertices { got: usize },
    #[error("approximated polygon has {got} vertices, need exactly 4")]
    NotQuadrilateral { got: usize },
    #[error("{matches} points in the {quadrant:?} quadrant, need exactly 1")]
    AmbiguousCorner { quadrant: CornerRole, matches: usize },
}
