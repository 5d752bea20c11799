//! Contour tracing over a binary edge map.
//!
//! Moore-neighbor border following with a flat list topology: every traced
//! border is returned as its own contour, no parent/child nesting. Runs of
//! collinear boundary pixels are collapsed to their endpoints (simple chain
//! approximation); the enclosed area is computed once from the raw pixel
//! ring, before any collapsing.

use nalgebra::Point2;
use pagescan_core::GrayImageView;

/// A traced boundary curve and its enclosed area.
#[derive(Clone, Debug)]
pub struct Contour {
    /// Chain-approximated boundary points, sub-pixel type but pixel-grid values.
    pub points: Vec<Point2<f32>>,
    /// Absolute shoelace area of the raw traced ring. Ranking key only;
    /// never recomputed after polygon approximation.
    pub area: f64,
}

// clockwise in image coordinates (y down), starting east
const DIRS: [(i32, i32); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Trace all borders in a binary map (non-zero = foreground).
///
/// A map with no foreground yields an empty vec; there is no failure mode.
pub fn find_contours(map: &GrayImageView<'_>) -> Vec<Contour> {
    let (w, h) = (map.width, map.height);
    let mut visited = vec![false; w * h];
    let mut out = Vec::new();

    let fg = |x: i32, y: i32| -> bool {
        x >= 0 && y >= 0 && x < w as i32 && y < h as i32 && map.data[y as usize * w + x as usize] > 0
    };

    for y in 0..h as i32 {
        for x in 0..w as i32 {
            if !fg(x, y) || visited[y as usize * w + x as usize] {
                continue;
            }
            // border start: entered from a background pixel on the left
            if fg(x - 1, y) {
                continue;
            }

            let ring = trace_border(map, (x, y), &fg);
            for &(px, py) in &ring {
                visited[py as usize * w + px as usize] = true;
            }

            let area = shoelace_area(&ring);
            let points = collapse_collinear(&ring);
            out.push(Contour { points, area });
        }
    }

    out
}

fn trace_border(
    map: &GrayImageView<'_>,
    start: (i32, i32),
    fg: &dyn Fn(i32, i32) -> bool,
) -> Vec<(i32, i32)> {
    let mut ring = vec![start];
    let mut cur = start;
    // pretend we arrived moving east, so the sweep begins just past the
    // background pixel we scanned in from
    let mut dir = 0usize;
    let max_steps = 4 * map.width * map.height;

    while ring.len() < max_steps {
        let mut next = None;
        for k in 0..8 {
            let d = (dir + 6 + k) % 8;
            let n = (cur.0 + DIRS[d].0, cur.1 + DIRS[d].1);
            if fg(n.0, n.1) {
                next = Some((n, d));
                break;
            }
        }
        let Some((n, d)) = next else {
            break; // isolated pixel
        };
        if n == start {
            break;
        }
        ring.push(n);
        cur = n;
        dir = d;
    }

    ring
}

fn shoelace_area(ring: &[(i32, i32)]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let mut acc = 0i64;
    for i in 0..ring.len() {
        let (x0, y0) = ring[i];
        let (x1, y1) = ring[(i + 1) % ring.len()];
        acc += x0 as i64 * y1 as i64 - x1 as i64 * y0 as i64;
    }
    (acc.abs() as f64) / 2.0
}

/// Drop interior points of straight 8-connected runs, keeping endpoints.
fn collapse_collinear(ring: &[(i32, i32)]) -> Vec<Point2<f32>> {
    let n = ring.len();
    if n <= 2 {
        return ring
            .iter()
            .map(|&(x, y)| Point2::new(x as f32, y as f32))
            .collect();
    }

    let mut out = Vec::new();
    for i in 0..n {
        let prev = ring[(i + n - 1) % n];
        let cur = ring[i];
        let next = ring[(i + 1) % n];
        let din = (cur.0 - prev.0, cur.1 - prev.1);
        let dout = (next.0 - cur.0, next.1 - cur.1);
        if din != dout {
            out.push(Point2::new(cur.0 as f32, cur.1 as f32));
        }
    }

    if out.is_empty() {
        // fully straight out-and-back ring; keep the two endpoints
        out.push(Point2::new(ring[0].0 as f32, ring[0].1 as f32));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagescan_core::GrayImage;

    fn hollow_rect(w: usize, h: usize, x0: usize, y0: usize, x1: usize, y1: usize) -> GrayImage {
        let mut img = GrayImage::new(w, h);
        for x in x0..=x1 {
            img.data[y0 * w + x] = 255;
            img.data[y1 * w + x] = 255;
        }
        for y in y0..=y1 {
            img.data[y * w + x0] = 255;
            img.data[y * w + x1] = 255;
        }
        img
    }

    #[test]
    fn empty_map_yields_no_contours() {
        let img = GrayImage::new(16, 16);
        assert!(find_contours(&img.view()).is_empty());
    }

    #[test]
    fn rectangle_outline_traces_one_ring_with_area() {
        let img = hollow_rect(40, 40, 5, 5, 30, 25);
        let contours = find_contours(&img.view());
        assert_eq!(contours.len(), 1);

        let c = &contours[0];
        // chain approximation keeps corners only
        assert_eq!(c.points.len(), 4);
        let expected = (30.0 - 5.0) * (25.0 - 5.0);
        assert!(
            (c.area - expected).abs() <= expected * 0.05,
            "area {} far from {}",
            c.area,
            expected
        );
    }

    #[test]
    fn nested_rectangles_trace_separately() {
        let mut img = hollow_rect(60, 60, 2, 2, 55, 55);
        let inner = hollow_rect(60, 60, 20, 20, 35, 35);
        for (dst, src) in img.data.iter_mut().zip(inner.data.iter()) {
            *dst |= *src;
        }
        let contours = find_contours(&img.view());
        assert_eq!(contours.len(), 2);
        let mut areas: Vec<f64> = contours.iter().map(|c| c.area).collect();
        areas.sort_by(|a, b| a.partial_cmp(b).expect("finite"));
        assert!(areas[1] > areas[0] * 4.0);
    }

    #[test]
    fn open_curve_has_near_zero_area() {
        let mut img = GrayImage::new(20, 20);
        for x in 3..17 {
            img.data[10 * 20 + x] = 255;
        }
        let contours = find_contours(&img.view());
        assert_eq!(contours.len(), 1);
        assert!(contours[0].area < 1.0);
    }
}
