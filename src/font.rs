//! Font selection for the icon glyph.
//!
//! The preferred font is a TrueType file on disk. Any problem loading it is
//! captured as a [`FontError`] and turned into [`FontChoice::Fallback`], which
//! draws with the built-in bitmap font instead.

use crate::bitmap_font;
use rusttype::{point, Font, Scale};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why the preferred font could not be used.
#[derive(Debug, Error)]
pub enum FontError {
    #[error("failed to read font file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a valid TrueType/OpenType font", .path.display())]
    Parse { path: PathBuf },

    #[error("font has no glyph for {0:?}")]
    MissingGlyph(char),
}

/// A TrueType font that is known to contain the glyph we draw.
pub struct TrueTypeFont {
    font: Font<'static>,
    path: PathBuf,
}

impl std::fmt::Debug for TrueTypeFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrueTypeFont")
            .field("path", &self.path)
            .finish()
    }
}

impl TrueTypeFont {
    pub fn load(path: &Path, letter: char) -> Result<Self, FontError> {
        let data = std::fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let font = Font::try_from_vec(data).ok_or_else(|| FontError::Parse {
            path: path.to_path_buf(),
        })?;

        // Glyph id 0 is .notdef
        if font.glyph(letter).id().0 == 0 {
            return Err(FontError::MissingGlyph(letter));
        }

        Ok(Self {
            font,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `font_size` is the em size in pixels. rusttype scales by line height
    /// (ascent - descent), so convert first.
    fn em_scale(&self, font_size: u32) -> Scale {
        let vm = self.font.v_metrics_unscaled();
        let units_per_em = self.font.units_per_em().max(1) as f32;
        Scale::uniform(font_size as f32 * (vm.ascent - vm.descent) / units_per_em)
    }

    fn rasterize(&self, letter: char, font_size: u32) -> GlyphMask {
        let scale = self.em_scale(font_size);
        let ascent = self.font.v_metrics(scale).ascent;
        let mut text = [0u8; 4];
        let glyph = match self
            .font
            .layout(letter.encode_utf8(&mut text), scale, point(0.0, ascent))
            .next()
        {
            Some(glyph) => glyph,
            None => return GlyphMask::empty(),
        };
        let Some(bbox) = glyph.pixel_bounding_box() else {
            return GlyphMask::empty();
        };

        let width = bbox.width().max(0) as u32;
        let height = bbox.height().max(0) as u32;
        let mut mask = GlyphMask::new(width, height);
        glyph.draw(|x, y, v| mask.set(x, y, v));
        mask.trim()
    }
}

/// Outcome of font selection: either the preferred font loaded, or the
/// built-in bitmap font is used and `reason` says why.
#[derive(Debug)]
pub enum FontChoice {
    Preferred(TrueTypeFont),
    Fallback { reason: FontError },
}

impl FontChoice {
    /// Try the preferred font at `path`; fall back on any failure.
    pub fn select(path: &Path, letter: char) -> Self {
        match TrueTypeFont::load(path, letter) {
            Ok(font) => {
                tracing::debug!(path = %font.path().display(), "using preferred font");
                FontChoice::Preferred(font)
            }
            Err(reason) => {
                tracing::debug!(error = %reason, "preferred font unavailable, using built-in font");
                FontChoice::Fallback { reason }
            }
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, FontChoice::Fallback { .. })
    }

    /// Rasterize `letter` at `font_size` pixels into a tight coverage mask.
    pub fn rasterize(&self, letter: char, font_size: u32) -> GlyphMask {
        if font_size == 0 {
            return GlyphMask::empty();
        }
        match self {
            FontChoice::Preferred(font) => font.rasterize(letter, font_size),
            FontChoice::Fallback { .. } => rasterize_bitmap(letter, font_size),
        }
    }
}

fn rasterize_bitmap(letter: char, font_size: u32) -> GlyphMask {
    let Some(rows) = bitmap_font::glyph_rows(letter) else {
        return GlyphMask::empty();
    };
    let scale = bitmap_font::scale_for(font_size);
    let mut mask = GlyphMask::new(
        bitmap_font::GLYPH_WIDTH * scale,
        bitmap_font::GLYPH_HEIGHT * scale,
    );
    for y in 0..mask.height {
        for x in 0..mask.width {
            if bitmap_font::is_set(rows, x / scale, y / scale) {
                mask.set(x, y, 1.0);
            }
        }
    }
    mask.trim()
}

/// Per-pixel glyph coverage in `[0, 1]`, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphMask {
    pub width: u32,
    pub height: u32,
    pub coverage: Vec<f32>,
}

impl GlyphMask {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            coverage: vec![0.0; width as usize * height as usize],
        }
    }

    pub fn empty() -> Self {
        Self::new(0, 0)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn get(&self, x: u32, y: u32) -> f32 {
        if x >= self.width || y >= self.height {
            return 0.0;
        }
        self.coverage[self.index(x, y)]
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    fn set(&mut self, x: u32, y: u32, v: f32) {
        if x < self.width && y < self.height {
            let i = self.index(x, y);
            self.coverage[i] = v.clamp(0.0, 1.0);
        }
    }

    /// Crop to the inked area so width/height are the rendered ink box.
    fn trim(self) -> Self {
        let inked = |x: u32, y: u32| self.get(x, y) > 0.0;
        let rows: Vec<u32> = (0..self.height)
            .filter(|&y| (0..self.width).any(|x| inked(x, y)))
            .collect();
        let cols: Vec<u32> = (0..self.width)
            .filter(|&x| (0..self.height).any(|y| inked(x, y)))
            .collect();
        let (Some(&top), Some(&bottom), Some(&left), Some(&right)) =
            (rows.first(), rows.last(), cols.first(), cols.last())
        else {
            return Self::empty();
        };

        let mut trimmed = Self::new(right - left + 1, bottom - top + 1);
        for y in 0..trimmed.height {
            for x in 0..trimmed.width {
                trimmed.set(x, y, self.get(x + left, y + top));
            }
        }
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitmap_g_scales_with_font_size() {
        let small = rasterize_bitmap('G', 5);
        assert_eq!((small.width, small.height), (5, 7));

        let large = rasterize_bitmap('G', 42);
        assert_eq!((large.width, large.height), (30, 42));
        assert_eq!(large.get(0, 0), 0.0);
        assert_eq!(large.get(6, 0), 1.0);
    }

    #[test]
    fn trim_drops_blank_border() {
        // 'I' leaves the outer columns blank
        let mask = rasterize_bitmap('I', 7);
        assert_eq!((mask.width, mask.height), (3, 7));
    }

    #[test]
    fn mask_index_does_not_wrap_in_u32() {
        let mask = GlyphMask {
            width: 70_000,
            height: 2,
            coverage: Vec::new(),
        };
        assert_eq!(mask.index(5, 1), 70_005);
        assert_eq!(mask.index(69_999, 70_000), 4_900_069_999);
    }

    #[test]
    fn zero_font_size_draws_nothing() {
        let choice = FontChoice::Fallback {
            reason: FontError::MissingGlyph('G'),
        };
        assert!(choice.rasterize('G', 0).is_empty());
    }
}
