//! CLI smoke tests.

use assert_cmd::Command;
use predicates::prelude::*;

fn write_test_page(dir: &std::path::Path) -> std::path::PathBuf {
    let mut img = image::GrayImage::new(200, 260);
    for y in 20..240 {
        for x in 25..175 {
            img.put_pixel(x, y, image::Luma([240]));
        }
    }
    let path = dir.join("page.png");
    img.save(&path).expect("write test page");
    path
}

#[test]
fn scans_a_page_and_writes_outputs() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_test_page(dir.path());
    let out_dir = dir.path().join("out");

    Command::cargo_bin("pagescan")
        .expect("binary")
        .arg(&input)
        .arg("--out-dir")
        .arg(&out_dir)
        .arg("--edges")
        .assert()
        .success()
        .stdout(predicate::str::contains("document at"));

    assert!(out_dir.join("page_edges.png").is_file());
    assert!(out_dir.join("page_rectified.png").is_file());
    assert!(out_dir.join("page_enhanced.png").is_file());
}

#[test]
fn reports_no_detection_on_blank_input() {
    let dir = tempfile::tempdir().expect("tempdir");
    let img = image::GrayImage::new(64, 64);
    let path = dir.path().join("blank.png");
    img.save(&path).expect("write blank");

    Command::cargo_bin("pagescan")
        .expect("binary")
        .arg(&path)
        .arg("--out-dir")
        .arg(dir.path().join("out"))
        .assert()
        .success()
        .stdout(predicate::str::contains("no document detected"));
}

#[test]
fn rejects_missing_input() {
    let dir = tempfile::tempdir().expect("tempdir");
    Command::cargo_bin("pagescan")
        .expect("binary")
        .arg(dir.path().join("nope.png"))
        .assert()
        .failure();
}
