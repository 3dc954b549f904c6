use crate::bitmap_font;
use crate::canvas::{blend_mask, draw_ellipse, Bounds};
use crate::font::FontChoice;
use crate::manifest::ManifestIcons;
use anyhow::{bail, Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    ColorType, ImageEncoder, Rgba, RgbaImage,
};
use std::{
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

pub const DEFAULT_SIZES: [u32; 4] = [16, 32, 48, 128];
pub const DEFAULT_OUTPUT_DIR: &str = "icons";
pub const DEFAULT_LETTER: char = 'G';
pub const DEFAULT_FONT_PATH: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf";
pub const DEFAULT_FILL: Rgba<u8> = Rgba([0, 123, 255, 255]);
pub const DEFAULT_OUTLINE: Rgba<u8> = Rgba([0, 100, 200, 255]);
pub const DEFAULT_OUTLINE_WIDTH: u32 = 2;
pub const DEFAULT_TEXT_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Everything that determines the generated icons. Fixed for a run.
#[derive(Debug, Clone)]
pub struct IconConfig {
    pub sizes: Vec<u32>,
    pub output: PathBuf,
    pub letter: char,
    pub font_path: PathBuf,
    pub fill: Rgba<u8>,
    pub outline: Rgba<u8>,
    pub outline_width: u32,
    pub text_color: Rgba<u8>,
    pub manifest: bool,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_SIZES.to_vec(),
            output: PathBuf::from(DEFAULT_OUTPUT_DIR),
            letter: DEFAULT_LETTER,
            font_path: PathBuf::from(DEFAULT_FONT_PATH),
            fill: DEFAULT_FILL,
            outline: DEFAULT_OUTLINE,
            outline_width: DEFAULT_OUTLINE_WIDTH,
            text_color: DEFAULT_TEXT_COLOR,
            manifest: false,
        }
    }
}

impl IconConfig {
    /// Reject configurations that would fail halfway through a run.
    pub fn validate(&self) -> Result<()> {
        if self.sizes.is_empty() {
            bail!("At least one icon size is required");
        }
        if let Some(size) = self.sizes.iter().find(|&&size| size == 0) {
            bail!("Icon size must be positive, got {size}");
        }
        if !bitmap_font::supports(self.letter) {
            bail!(
                "Icon letter must be an ASCII letter or digit, got {:?}",
                self.letter
            );
        }
        Ok(())
    }
}

/// A PNG written by [`generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedIcon {
    pub size: u32,
    pub path: PathBuf,
}

pub fn icon_file_name(size: u32) -> String {
    format!("icon{size}.png")
}

/// Render and write one icon per configured size, in order.
pub fn generate(config: &IconConfig) -> Result<Vec<GeneratedIcon>> {
    config.validate()?;

    // Ensure the output directory exists
    create_dir_all(&config.output).with_context(|| {
        format!(
            "Can't create output directory {}",
            config.output.display()
        )
    })?;

    let font = FontChoice::select(&config.font_path, config.letter);
    tracing::info!(
        sizes = ?config.sizes,
        output = %config.output.display(),
        fallback_font = font.is_fallback(),
        "generating icons"
    );

    let mut generated = Vec::with_capacity(config.sizes.len());
    for &size in &config.sizes {
        let icon = render_icon(size, config, &font);
        let path = config.output.join(icon_file_name(size));
        save_png(&icon, &path)?;
        println!("✓ Generated {} ({size}x{size})", path.display());

        generated.push(GeneratedIcon { size, path });
    }

    if config.manifest {
        let mut manifest = ManifestIcons::new();
        for icon in &generated {
            manifest.add_icon(icon.size, &icon.path);
        }
        manifest.write(&config.output)?;
    }

    Ok(generated)
}

/// Draw a single icon of `size` pixels: a circle inset by `size / 8` with the
/// configured letter centered on it.
///
/// The glyph's ink bounding box is what gets centered, not the text origin,
/// so side bearings and the gap above the ascender don't shift the letter.
pub fn render_icon(size: u32, config: &IconConfig, font: &FontChoice) -> RgbaImage {
    // Fully transparent canvas
    let mut img = RgbaImage::from_pixel(size, size, Rgba([0, 0, 0, 0]));

    let margin = (size / 8) as i64;
    let center = (size / 2) as i64;
    let far = size as i64 - margin;
    draw_ellipse(
        &mut img,
        Bounds::new(margin, margin, far, far),
        config.fill,
        config.outline,
        config.outline_width,
    );

    let glyph = font.rasterize(config.letter, size / 3);
    if !glyph.is_empty() {
        let x = center - (glyph.width / 2) as i64;
        let y = center - (glyph.height / 2) as i64;
        tracing::trace!(size, x, y, w = glyph.width, h = glyph.height, "placing glyph");
        blend_mask(&mut img, &glyph, x, y, config.text_color);
    }

    img
}

fn save_png(img: &RgbaImage, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create PNG file {}", path.display()))?;
    let mut out_file = BufWriter::new(file);
    write_png(img.as_raw(), &mut out_file, img.width())
        .with_context(|| format!("Failed to write PNG {}", path.display()))?;
    out_file.flush()?;
    Ok(())
}

// Encode square RGBA data as PNG with compression
fn write_png<W: Write>(image_data: &[u8], w: W, size: u32) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(image_data, size, size, ColorType::Rgba8)?;
    Ok(())
}
