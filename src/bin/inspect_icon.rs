use anyhow::{Context, Result};
use ext_icon_gen::inspect::inspect;

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "icons/icon128.png".to_string());

    let img = image::open(&path)
        .with_context(|| format!("Failed to open {path}"))?
        .to_rgba8();
    let report = inspect(&img);

    println!("Checking icon: {}", path);
    println!("Image dimensions: {}x{}", report.width, report.height);
    println!("Corners transparent: {}", report.corners_transparent);
    println!("Center opaque: {}", report.center_opaque);
    match report.ink_bounds {
        Some((left, top, right, bottom)) => {
            println!("Ink bounds: x={left}..={right}, y={top}..={bottom}")
        }
        None => println!("Ink bounds: none (image is empty)"),
    }

    let ok = report.width == report.height
        && report.corners_transparent
        && report.center_opaque
        && report.within_margin();
    if ok {
        println!("✓ Icon looks right");
    } else {
        println!("⚠ Icon does not match the expected layout");
    }
    Ok(())
}
