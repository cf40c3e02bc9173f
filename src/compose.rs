//! Compositing: draw fitted text and the watermark onto the photo.
//!
//! Text is never drawn straight onto the photo. Everything goes onto a
//! transparent overlay of the same size, which is alpha-composited over the
//! base as the last step. Each greeting/blessing line gets the day's accent
//! fill over a solid dark outline stroke — the outline is a legibility
//! requirement against arbitrary photo backgrounds, not decoration. The
//! watermark is drawn small, semi-transparent, and bottom-right anchored,
//! independent of the fitting pass.
//!
//! [`prepare_base`] normalizes an arbitrary decoded photo to the post canvas:
//! resize to fill the target aspect, then center-crop the overshoot.

use std::io::Cursor;

use image::{DynamicImage, Rgba, RgbaImage, imageops};
use thiserror::Error;

use crate::content::Rgb;
use crate::fitting::placement_box;
use crate::layout::TextPlacement;
use crate::text::TextRenderer;

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Outline stroke width around the main text, in pixels. The stroke extends
/// the drawn area beyond the measured box, so the fitting pass reserves this
/// rim too.
pub const STROKE_WIDTH: i32 = 2;

/// Solid dark outline behind the accent fill.
const STROKE_COLOR: Rgba<u8> = Rgba([25, 25, 25, 255]);

/// Watermark styling: small, light, semi-transparent, dark-edged.
const WATERMARK_SIZE: f32 = 16.0;
const WATERMARK_MARGIN: f32 = 16.0;
const WATERMARK_FILL: Rgba<u8> = Rgba([255, 255, 255, 176]);
const WATERMARK_STROKE: Rgba<u8> = Rgba([0, 0, 0, 128]);

/// Normalize a decoded photo to the post canvas: resize so the image fills
/// `target` completely, then center-crop the dimension that overshoots.
pub fn prepare_base(photo: DynamicImage, target: (u32, u32)) -> RgbaImage {
    let (tgt_w, tgt_h) = target;
    let src = photo.to_rgba8();
    let (src_w, src_h) = (src.width(), src.height());

    let src_aspect = src_w as f64 / src_h as f64;
    let tgt_aspect = tgt_w as f64 / tgt_h as f64;
    let (fill_w, fill_h) = if src_aspect > tgt_aspect {
        // source is wider: height matches, width overshoots
        ((tgt_h as f64 * src_aspect).round() as u32, tgt_h)
    } else {
        (tgt_w, (tgt_w as f64 / src_aspect).round() as u32)
    };

    let resized = imageops::resize(&src, fill_w, fill_h, imageops::FilterType::Lanczos3);
    let left = (fill_w - tgt_w) / 2;
    let top = (fill_h - tgt_h) / 2;
    imageops::crop_imm(&resized, left, top, tgt_w, tgt_h).to_image()
}

/// Render all placements plus the watermark over `base`. The output has the
/// same dimensions as the input; `base` itself is untouched.
pub fn compose(
    base: &RgbaImage,
    placements: &[TextPlacement],
    fill: Rgb,
    renderer: &dyn TextRenderer,
    size: u32,
    watermark: &str,
) -> RgbaImage {
    let (width, height) = (base.width(), base.height());
    let mut overlay = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]));

    let fill = Rgba([fill.0, fill.1, fill.2, 255]);
    for placement in placements {
        let origin = placement_box(renderer, placement, size).min;
        draw_outlined(
            &mut overlay,
            renderer,
            &placement.text,
            size as f32,
            origin,
            fill,
            STROKE_COLOR,
        );
    }

    if !watermark.is_empty() {
        let extent = renderer.measure(watermark, WATERMARK_SIZE);
        let origin = (
            width as f32 - WATERMARK_MARGIN - extent.width,
            height as f32 - WATERMARK_MARGIN - extent.height,
        );
        draw_outlined(
            &mut overlay,
            renderer,
            watermark,
            WATERMARK_SIZE,
            origin,
            WATERMARK_FILL,
            WATERMARK_STROKE,
        );
    }

    let mut out = base.clone();
    imageops::overlay(&mut out, &overlay, 0, 0);
    out
}

/// Stroke pass then fill pass. The stroke is the same string drawn at every
/// offset within the stroke radius, so the fill sits on a solid rim.
fn draw_outlined(
    canvas: &mut RgbaImage,
    renderer: &dyn TextRenderer,
    text: &str,
    size: f32,
    origin: (f32, f32),
    fill: Rgba<u8>,
    stroke: Rgba<u8>,
) {
    for dy in -STROKE_WIDTH..=STROKE_WIDTH {
        for dx in -STROKE_WIDTH..=STROKE_WIDTH {
            if dx == 0 && dy == 0 {
                continue;
            }
            renderer.draw(canvas, text, size, (origin.0 + dx as f32, origin.1 + dy as f32), stroke);
        }
    }
    renderer.draw(canvas, text, size, origin, fill);
}

/// Encode the final image as PNG with the alpha channel preserved.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>, ComposeError> {
    let mut buf = Vec::new();
    DynamicImage::ImageRgba8(img.clone())
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutTemplate;
    use crate::text::tests::MockRenderer;

    fn base(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba([10, 20, 30, 255]))
    }

    #[test]
    fn output_dimensions_match_base() {
        let renderer = MockRenderer::new();
        let placements = LayoutTemplate::CenteredStacked.resolve("สวัสดี", "ขอให้", 640, 480);
        let out = compose(&base(640, 480), &placements, Rgb(247, 225, 27), &renderer, 40, "@arunsawat");
        assert_eq!((out.width(), out.height()), (640, 480));
    }

    #[test]
    fn base_image_is_not_mutated() {
        let renderer = MockRenderer::new();
        let b = base(200, 200);
        let placements = LayoutTemplate::CenteredStacked.resolve("a", "b", 200, 200);
        let _ = compose(&b, &placements, Rgb(255, 0, 0), &renderer, 20, "wm");
        assert!(b.pixels().all(|p| *p == Rgba([10, 20, 30, 255])));
    }

    #[test]
    fn text_region_is_painted_over_photo() {
        let renderer = MockRenderer::new();
        let placements = LayoutTemplate::CenteredStacked.resolve("abcd", "ef", 400, 400);
        let out = compose(&base(400, 400), &placements, Rgb(255, 0, 0), &renderer, 40, "");
        // centered-stacked first slot: anchor (200, 40), box 80px wide, 40 tall
        let inside = out.get_pixel(200, 60);
        assert_ne!(*inside, Rgba([10, 20, 30, 255]));
        // far corner untouched
        assert_eq!(*out.get_pixel(0, 399), Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn fill_pass_is_drawn_last_over_the_stroke() {
        let renderer = MockRenderer::new();
        let placements = LayoutTemplate::CenteredStacked.resolve("a", "b", 300, 300);
        let _ = compose(&base(300, 300), &placements, Rgb(1, 2, 3), &renderer, 24, "");
        let draws = renderer.recorded();
        // per placement: (2*2+1)^2 - 1 stroke passes, then one fill pass
        let per_placement = (2 * STROKE_WIDTH as usize + 1).pow(2);
        assert_eq!(draws.len(), 2 * per_placement);
        assert_eq!(draws[per_placement - 1].color, [1, 2, 3, 255]);
        assert_eq!(draws[per_placement - 1].origin.1, draws[0].origin.1 + STROKE_WIDTH as f32);
    }

    #[test]
    fn watermark_is_bottom_right_and_semi_transparent() {
        let renderer = MockRenderer::new();
        let placements = LayoutTemplate::CenteredStacked.resolve("a", "b", 500, 500);
        let _ = compose(&base(500, 500), &placements, Rgb(9, 9, 9), &renderer, 24, "@bot");
        let draws = renderer.recorded();
        let wm = draws.last().unwrap();
        assert_eq!(wm.text, "@bot");
        assert_eq!(wm.color, [255, 255, 255, 176]);
        // 4 chars * 16/2 = 32 wide, 16 tall, inset 16 from each edge
        assert_eq!(wm.origin, (500.0 - 16.0 - 32.0, 500.0 - 16.0 - 16.0));
    }

    #[test]
    fn prepare_base_resizes_and_crops_to_target() {
        let photo = DynamicImage::ImageRgba8(base(1600, 900));
        let out = prepare_base(photo, (800, 800));
        assert_eq!((out.width(), out.height()), (800, 800));

        let tall = DynamicImage::ImageRgba8(base(400, 1000));
        let out = prepare_base(tall, (600, 400));
        assert_eq!((out.width(), out.height()), (600, 400));
    }

    #[test]
    fn encode_png_roundtrips() {
        let img = base(32, 16);
        let bytes = encode_png(&img).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!((decoded.width(), decoded.height()), (32, 16));
        assert_eq!(*decoded.get_pixel(5, 5), Rgba([10, 20, 30, 255]));
    }
}
