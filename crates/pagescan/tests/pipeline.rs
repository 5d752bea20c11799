//! End-to-end pipeline tests on synthetic frames.

use nalgebra::Point2;
use pagescan::detect::{gray_view, scan_page};
use pagescan::quad::{classify_corners, QuadDetector};
use pagescan::rectify::{rectify_gray, RectifyParams};
use pagescan::{DocumentQuad, QuadDetectorParams, ScanPageParams};
use pagescan_core::GrayImage;

fn gray_frame(w: u32, h: u32) -> image::GrayImage {
    image::GrayImage::new(w, h)
}

fn fill_rect(img: &mut image::GrayImage, x0: u32, y0: u32, x1: u32, y1: u32, v: u8) {
    for y in y0..=y1 {
        for x in x0..=x1 {
            img.put_pixel(x, y, image::Luma([v]));
        }
    }
}

#[test]
fn single_white_quad_detects_named_corners() {
    // corners at (10,10), (210,10), (210,310), (10,310)
    let mut img = gray_frame(260, 360);
    fill_rect(&mut img, 10, 10, 210, 310, 255);

    let detector = QuadDetector::new(QuadDetectorParams::default());
    let out = detector.detect(&gray_view(&img));
    let det = out.detection.expect("detection");

    let expect = [
        (10.0f32, 10.0f32),
        (210.0, 10.0),
        (210.0, 310.0),
        (10.0, 310.0),
    ];
    for (corner, (ex, ey)) in det.quad.corners().iter().zip(expect) {
        assert!(
            (corner.x - ex).abs() <= 3.0 && (corner.y - ey).abs() <= 3.0,
            "corner {:?} expected near ({},{})",
            corner,
            ex,
            ey
        );
    }
}

#[test]
fn all_black_frame_reports_no_detection() {
    let img = gray_frame(200, 200);
    let detector = QuadDetector::new(QuadDetectorParams::default());
    let out = detector.detect(&gray_view(&img));
    assert!(out.detection.is_none());
    assert!(out.edges.data.iter().all(|&v| v == 0));
}

#[test]
fn nested_rectangles_resolve_to_the_larger() {
    let mut img = gray_frame(300, 300);
    fill_rect(&mut img, 20, 20, 280, 280, 255);
    fill_rect(&mut img, 100, 100, 200, 200, 0);

    let detector = QuadDetector::new(QuadDetectorParams::default());
    let det = detector
        .detect(&gray_view(&img))
        .detection
        .expect("detection");

    assert!(det.quad.top_left.x < 30.0);
    assert!(det.quad.bottom_right.x > 270.0);
}

#[test]
fn duplicate_corner_point_is_rejected() {
    let pts = [
        Point2::new(0.0f32, 0.0),
        Point2::new(100.0, 0.0),
        Point2::new(100.0, 0.0),
        Point2::new(0.0, 100.0),
    ];
    assert!(classify_corners(&pts).is_err());
}

#[test]
fn rectifying_an_axis_aligned_quad_preserves_size() {
    let mut src = GrayImage::new(240, 240);
    for y in 0..240 {
        for x in 0..240 {
            src.data[y * 240 + x] = ((x + y) % 250) as u8;
        }
    }
    let quad = DocumentQuad {
        top_left: Point2::new(40.0, 30.0),
        top_right: Point2::new(139.0, 30.0),
        bottom_right: Point2::new(139.0, 179.0),
        bottom_left: Point2::new(40.0, 179.0),
    };
    let out = rectify_gray(&src.view(), &quad, &RectifyParams::default());
    assert!((out.width as i32 - 99).abs() <= 1);
    assert!((out.height as i32 - 149).abs() <= 1);

    let mid = out.data[(out.height / 2) * out.width + out.width / 2] as i32;
    let want = src.data[(30 + out.height / 2) * 240 + 40 + out.width / 2] as i32;
    assert!((mid - want).abs() <= 2);
}

#[test]
fn full_scan_produces_ocr_ready_binary_page() {
    let mut img = gray_frame(320, 240);
    // light page with dark print lines
    fill_rect(&mut img, 40, 30, 280, 210, 230);
    for line in 0..4 {
        let y = 60 + line * 40;
        fill_rect(&mut img, 60, y, 260, y + 3, 20);
    }

    let outcome = scan_page(
        &image::DynamicImage::ImageLuma8(img),
        &ScanPageParams::default(),
    );
    let enhanced = outcome.enhanced.expect("enhanced output");

    assert!(enhanced.data.iter().all(|&v| v == 0 || v == 255));
    let black = enhanced.data.iter().filter(|&&v| v == 0).count();
    assert!(black > 0, "print lines should binarize to black");
    assert!(black < enhanced.data.len() / 2);
}
