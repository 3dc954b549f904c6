//! Pixel checks for generated icons, shared by the `inspect_icon` binary and
//! the test suite.

use image::RgbaImage;

/// What an icon looks like from the outside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconReport {
    pub width: u32,
    pub height: u32,
    /// All four corner pixels have alpha 0
    pub corners_transparent: bool,
    /// The pixel at (`width / 2`, `height / 2`) has alpha 255
    pub center_opaque: bool,
    /// Inclusive `(left, top, right, bottom)` of all non-transparent pixels
    pub ink_bounds: Option<(u32, u32, u32, u32)>,
}

impl IconReport {
    /// Whether all ink lies within the `size / 8` margin box.
    pub fn within_margin(&self) -> bool {
        let margin = self.width / 8;
        let far = self.width - margin;
        match self.ink_bounds {
            Some((left, top, right, bottom)) => {
                left >= margin && top >= margin && right <= far && bottom <= far
            }
            None => true,
        }
    }
}

pub fn inspect(img: &RgbaImage) -> IconReport {
    let (width, height) = img.dimensions();
    let alpha = |x: u32, y: u32| img.get_pixel(x, y)[3];

    let corners_transparent = width > 0
        && height > 0
        && [(0, 0), (width - 1, 0), (0, height - 1), (width - 1, height - 1)]
            .iter()
            .all(|&(x, y)| alpha(x, y) == 0);
    let center_opaque = width > 0 && height > 0 && alpha(width / 2, height / 2) == 255;

    let mut ink_bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, pixel) in img.enumerate_pixels() {
        if pixel[3] == 0 {
            continue;
        }
        ink_bounds = Some(match ink_bounds {
            None => (x, y, x, y),
            Some((l, t, r, b)) => (l.min(x), t.min(y), r.max(x), b.max(y)),
        });
    }

    IconReport {
        width,
        height,
        corners_transparent,
        center_opaque,
        ink_bounds,
    }
}
