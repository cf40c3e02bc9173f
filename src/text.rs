//! Text measurement and rasterization.
//!
//! The [`TextRenderer`] trait is the seam between the geometry-only fitting
//! pass and actual glyph rasterization. The production implementation is
//! [`FontRenderer`] — `rusttype` over an owned font byte buffer, so one
//! fetched font is re-instantiated at any number of sizes without touching
//! the collaborator again. Tests swap in a mock with deterministic metrics.
//!
//! Coordinates handed to [`TextRenderer::draw`] are the top-left corner of
//! the text box; the baseline conversion is the renderer's business.

use image::{Rgba, RgbaImage};
use rusttype::{Font, Scale, point};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FontError {
    #[error("font data could not be parsed")]
    Parse,
}

/// Width and height of a rendered string at some size, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextExtent {
    pub width: f32,
    pub height: f32,
}

/// Measurement and drawing of single-line strings.
pub trait TextRenderer {
    /// Bounding-box extent of `text` at `size` points.
    fn measure(&self, text: &str, size: f32) -> TextExtent;

    /// Characters in `text` the font has no glyph for (whitespace excluded).
    fn missing_glyphs(&self, text: &str) -> Vec<char>;

    /// Draw `text` with its box's top-left corner at `origin`, alpha-blending
    /// glyph coverage with `color` onto `canvas`.
    fn draw(&self, canvas: &mut RgbaImage, text: &str, size: f32, origin: (f32, f32), color: Rgba<u8>);
}

/// `rusttype`-backed renderer over an owned, immutable font buffer.
pub struct FontRenderer {
    font: Font<'static>,
}

impl FontRenderer {
    /// Parse raw font bytes (TTF/OTF). The buffer is owned for the life of
    /// the renderer; sizes are applied per call, never re-fetched.
    pub fn new(bytes: Vec<u8>) -> Result<Self, FontError> {
        let font = Font::try_from_vec(bytes).ok_or(FontError::Parse)?;
        Ok(Self { font })
    }
}

impl TextRenderer for FontRenderer {
    fn measure(&self, text: &str, size: f32) -> TextExtent {
        if text.is_empty() {
            return TextExtent { width: 0.0, height: 0.0 };
        }
        let scale = Scale::uniform(size);
        let v_metrics = self.font.v_metrics(scale);

        let mut caret = 0.0f32;
        let mut max_x = 0.0f32;
        for glyph in self.font.layout(text, scale, point(0.0, v_metrics.ascent)) {
            if let Some(bb) = glyph.pixel_bounding_box() {
                max_x = max_x.max(bb.max.x as f32);
            }
            caret = glyph.position().x + glyph.unpositioned().h_metrics().advance_width;
        }
        TextExtent {
            width: max_x.max(caret),
            height: v_metrics.ascent - v_metrics.descent,
        }
    }

    fn missing_glyphs(&self, text: &str) -> Vec<char> {
        text.chars()
            .filter(|c| !c.is_whitespace())
            .filter(|c| self.font.glyph(*c).id().0 == 0)
            .collect()
    }

    fn draw(&self, canvas: &mut RgbaImage, text: &str, size: f32, origin: (f32, f32), color: Rgba<u8>) {
        let scale = Scale::uniform(size);
        let v_metrics = self.font.v_metrics(scale);
        // origin is the box's top-left; rusttype positions by baseline
        let start = point(origin.0, origin.1 + v_metrics.ascent);

        for glyph in self.font.layout(text, scale, start) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let px = gx as i32 + bb.min.x;
                let py = gy as i32 + bb.min.y;
                if px < 0 || py < 0 {
                    return;
                }
                let (px, py) = (px as u32, py as u32);
                if px >= canvas.width() || py >= canvas.height() {
                    return;
                }
                blend_pixel(canvas.get_pixel_mut(px, py), color, coverage);
            });
        }
    }
}

/// Source-over blend of `color` scaled by `coverage` onto `dst`, preserving
/// the destination's alpha channel so overlays stay transparent where
/// nothing was drawn.
fn blend_pixel(dst: &mut Rgba<u8>, color: Rgba<u8>, coverage: f32) {
    let sa = coverage.clamp(0.0, 1.0) * (color.0[3] as f32 / 255.0);
    if sa <= 0.0 {
        return;
    }
    let da = dst.0[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return;
    }
    for i in 0..3 {
        let sc = color.0[i] as f32;
        let dc = dst.0[i] as f32;
        dst.0[i] = ((sc * sa + dc * da * (1.0 - sa)) / out_a).round() as u8;
    }
    dst.0[3] = (out_a * 255.0).round() as u8;
}
