//! Raster primitives drawn directly into an `RgbaImage`.

use crate::font::GlyphMask;
use image::{Rgba, RgbaImage};

/// Inclusive pixel bounding box, `x0..=x1` by `y0..=y1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x0: i64,
    pub y0: i64,
    pub x1: i64,
    pub y1: i64,
}

impl Bounds {
    pub fn new(x0: i64, y0: i64, x1: i64, y1: i64) -> Self {
        Self { x0, y0, x1, y1 }
    }
}

/// Draw a filled ellipse inscribed in `bounds`, with an outline of `width`
/// pixels drawn inside the box. Pixels are overwritten, not blended, and
/// anything outside the image is clipped.
pub fn draw_ellipse(
    img: &mut RgbaImage,
    bounds: Bounds,
    fill: Rgba<u8>,
    outline: Rgba<u8>,
    width: u32,
) {
    if bounds.x1 < bounds.x0 || bounds.y1 < bounds.y0 {
        return;
    }

    // Continuous box [x0, x1 + 1) so the last pixel column is covered
    let cx = (bounds.x0 + bounds.x1 + 1) as f64 / 2.0;
    let cy = (bounds.y0 + bounds.y1 + 1) as f64 / 2.0;
    let rx = (bounds.x1 + 1 - bounds.x0) as f64 / 2.0;
    let ry = (bounds.y1 + 1 - bounds.y0) as f64 / 2.0;
    let inner_rx = rx - width as f64;
    let inner_ry = ry - width as f64;

    let x_start = bounds.x0.max(0);
    let y_start = bounds.y0.max(0);
    let x_end = bounds.x1.min(img.width() as i64 - 1);
    let y_end = bounds.y1.min(img.height() as i64 - 1);

    for y in y_start..=y_end {
        for x in x_start..=x_end {
            let px = x as f64 + 0.5;
            let py = y as f64 + 0.5;
            if !inside(px - cx, py - cy, rx, ry) {
                continue;
            }
            let in_fill =
                inner_rx > 0.0 && inner_ry > 0.0 && inside(px - cx, py - cy, inner_rx, inner_ry);
            let color = if in_fill {
                fill
            } else {
                outline
            };
            img.put_pixel(x as u32, y as u32, color);
        }
    }
}

fn inside(dx: f64, dy: f64, rx: f64, ry: f64) -> bool {
    (dx * dx) / (rx * rx) + (dy * dy) / (ry * ry) <= 1.0
}

/// Composite `color`, weighted by the mask coverage, over the image with its
/// top-left corner at (`x`, `y`).
pub fn blend_mask(img: &mut RgbaImage, mask: &GlyphMask, x: i64, y: i64, color: Rgba<u8>) {
    for my in 0..mask.height {
        for mx in 0..mask.width {
            let coverage = mask.get(mx, my);
            if coverage <= 0.0 {
                continue;
            }
            let tx = x + mx as i64;
            let ty = y + my as i64;
            if tx < 0 || ty < 0 || tx >= img.width() as i64 || ty >= img.height() as i64 {
                continue;
            }
            let dst = img.get_pixel_mut(tx as u32, ty as u32);
            *dst = over(color, coverage, *dst);
        }
    }
}

/// Porter-Duff "over" of `src` at `coverage` onto `dst`, straight alpha.
fn over(src: Rgba<u8>, coverage: f32, dst: Rgba<u8>) -> Rgba<u8> {
    let sa = src[3] as f32 / 255.0 * coverage;
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let channel = |i: usize| {
        let c = (src[i] as f32 * sa + dst[i] as f32 * da * (1.0 - sa)) / out_a;
        c.round().clamp(0.0, 255.0) as u8
    };
    Rgba([
        channel(0),
        channel(1),
        channel(2),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLUE: Rgba<u8> = Rgba([0, 123, 255, 255]);
    const DARK: Rgba<u8> = Rgba([0, 100, 200, 255]);

    #[test]
    fn ellipse_stays_inside_bounds() {
        let mut img = RgbaImage::new(16, 16);
        draw_ellipse(&mut img, Bounds::new(2, 2, 14, 14), BLUE, DARK, 2);

        for (x, y, p) in img.enumerate_pixels() {
            if p[3] != 0 {
                assert!((2..=14).contains(&x) && (2..=14).contains(&y), "({x}, {y})");
            }
        }
        assert_eq!(*img.get_pixel(8, 8), BLUE);
        assert_eq!(*img.get_pixel(8, 2), DARK);
        assert_eq!(img.get_pixel(0, 0)[3], 0);
    }

    #[test]
    fn ellipse_is_clipped_to_image() {
        let mut img = RgbaImage::new(1, 1);
        draw_ellipse(&mut img, Bounds::new(0, 0, 1, 1), BLUE, DARK, 2);
        assert_eq!(img.get_pixel(0, 0)[3], 255);
    }

    #[test]
    fn full_coverage_replaces_color() {
        assert_eq!(over(Rgba([255, 255, 255, 255]), 1.0, BLUE), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn partial_coverage_over_transparent_keeps_color() {
        let p = over(Rgba([255, 255, 255, 255]), 0.5, Rgba([0, 0, 0, 0]));
        assert_eq!(p, Rgba([255, 255, 255, 128]));
    }
}
