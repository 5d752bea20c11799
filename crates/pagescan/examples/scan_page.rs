use image::ImageReader;
use pagescan::detect::{scan_page, to_image_gray};
use pagescan::ScanPageParams;

#[cfg(feature = "tracing")]
use pagescan_core::init_tracing;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing")]
    init_tracing();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("Usage: scan_page <image_path>");
        return Ok(());
    };

    let img = ImageReader::open(path)?.decode()?;
    let outcome = scan_page(&img, &ScanPageParams::default());

    match outcome.detection.detection.as_ref() {
        Some(found) => {
            let [tl, tr, br, bl] = found.quad.corners();
            println!(
                "document: tl=({:.1},{:.1}) tr=({:.1},{:.1}) br=({:.1},{:.1}) bl=({:.1},{:.1})",
                tl.x, tl.y, tr.x, tr.y, br.x, br.y, bl.x, bl.y
            );
        }
        None => println!("no document detected"),
    }

    if let Some(enhanced) = outcome.enhanced.as_ref() {
        if let Some(img) = to_image_gray(enhanced) {
            img.save("enhanced.png")?;
            println!("wrote enhanced.png");
        }
    }

    Ok(())
}
