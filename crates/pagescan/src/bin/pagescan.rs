use std::fs;
use std::path::PathBuf;

use clap::Parser;
use image::ImageReader;
use log::LevelFilter;
use pagescan::detect::{scan_page, to_image_gray, to_image_rgba};
use pagescan::ScanPageParams;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Detect a document in an image, rectify it and enhance it for reading."
)]
struct Cli {
    /// Input image (any format the `image` crate decodes)
    input: PathBuf,

    /// Directory for the output PNGs
    #[arg(long, default_value = "scan-out")]
    out_dir: PathBuf,

    /// Also write the diagnostic edge map
    #[arg(long)]
    edges: bool,

    /// JSON file with pipeline parameters (see `ScanPageParams`)
    #[arg(long)]
    params: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    pagescan::core::init_with_level(level)?;

    let params: ScanPageParams = match &cli.params {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => ScanPageParams::default(),
    };

    let img = ImageReader::open(&cli.input)?.decode()?;
    let outcome = scan_page(&img, &params);

    fs::create_dir_all(&cli.out_dir)?;
    let stem = cli
        .input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("scan");

    if cli.edges {
        let path = cli.out_dir.join(format!("{stem}_edges.png"));
        to_image_gray(&outcome.detection.edges)
            .ok_or("edge map buffer mismatch")?
            .save(&path)?;
        log::info!("wrote {}", path.display());
    }

    let Some(found) = outcome.detection.detection.as_ref() else {
        println!("no document detected");
        return Ok(());
    };

    let [tl, tr, br, bl] = found.quad.corners();
    println!(
        "document at tl=({:.0},{:.0}) tr=({:.0},{:.0}) br=({:.0},{:.0}) bl=({:.0},{:.0})",
        tl.x, tl.y, tr.x, tr.y, br.x, br.y, bl.x, bl.y
    );

    if let Some(rectified) = outcome.rectified.as_ref() {
        let path = cli.out_dir.join(format!("{stem}_rectified.png"));
        to_image_rgba(rectified)
            .ok_or("rectified buffer mismatch")?
            .save(&path)?;
        log::info!("wrote {}", path.display());
    }

    if let Some(enhanced) = outcome.enhanced.as_ref() {
        let path = cli.out_dir.join(format!("{stem}_enhanced.png"));
        to_image_gray(enhanced)
            .ok_or("enhanced buffer mismatch")?
            .save(&path)?;
        log::info!("wrote {}", path.display());
    }

    Ok(())
}
