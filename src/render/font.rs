//! Text for plot labels, rasterized with `rusttype` from an embedded font.

use crate::error::{PlanError, PlanResult};
use image::{Rgba, RgbaImage};
use rusttype::{point as rt_point, Font, Scale};

/// DejaVu Sans Bold; license in `builtin_font.LICENSE`.
const BUILTIN_FONT: &[u8] = include_bytes!("builtin_font.ttf");

/// Draws strings into an `RgbaImage`. Sizes are pixel heights.
pub struct TextRenderer {
    font: Font<'static>,
}

impl TextRenderer {
    /// Renderer backed by the embedded font.
    pub fn builtin() -> PlanResult<Self> {
        Self::from_bytes(BUILTIN_FONT)
    }

    pub fn from_bytes(font_data: &'static [u8]) -> PlanResult<Self> {
        let font = Font::try_from_bytes(font_data).ok_or(PlanError::InvalidFont)?;
        Ok(TextRenderer { font })
    }

    /// Horizontal advance of the whole string.
    pub fn text_width(&self, text: &str, px: f32) -> u32 {
        self.font
            .layout(text, Scale::uniform(px), rt_point(0.0, 0.0))
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0)
            .ceil() as u32
    }

    /// Ascent plus descent at `px`.
    pub fn line_height(&self, px: f32) -> u32 {
        let v = self.font.v_metrics(Scale::uniform(px));
        (v.ascent - v.descent).ceil() as u32
    }

    /// Draws `text` with the top of its line box at (`x`, `y`), alpha-blended
    /// over what is already there.
    pub fn draw_text(&self, img: &mut RgbaImage, x: i32, y: i32, text: &str, px: f32, color: Rgba<u8>) {
        let scale = Scale::uniform(px);
        let baseline = y as f32 + self.font.v_metrics(scale).ascent;
        for glyph in self.font.layout(text, scale, rt_point(x as f32, baseline)) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, v| {
                let ix = gx as i32 + bb.min.x;
                let iy = gy as i32 + bb.min.y;
                if ix >= 0 && iy >= 0 && (ix as u32) < img.width() && (iy as u32) < img.height() {
                    let under = *img.get_pixel(ix as u32, iy as u32);
                    img.put_pixel(ix as u32, iy as u32, blend(under, color, v));
                }
            });
        }
    }

    /// Draws `text` centered on (`cx`, `cy`).
    pub fn draw_text_centered(
        &self,
        img: &mut RgbaImage,
        cx: i32,
        cy: i32,
        text: &str,
        px: f32,
        color: Rgba<u8>,
    ) {
        let x = cx - self.text_width(text, px) as i32 / 2;
        let y = cy - self.line_height(px) as i32 / 2;
        self.draw_text(img, x, y, text, px, color);
    }
}

fn blend(bg: Rgba<u8>, fg: Rgba<u8>, alpha: f32) -> Rgba<u8> {
    let mix = |b: u8, f: u8| ((1.0 - alpha) * b as f32 + alpha * f as f32).round() as u8;
    Rgba([
        mix(bg[0], fg[0]),
        mix(bg[1], fg[1]),
        mix(bg[2], fg[2]),
        mix(bg[3], fg[3]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    #[test]
    fn builtin_font_loads_and_measures() {
        let text = TextRenderer::builtin().unwrap();
        assert_eq!(text.text_width("", 20.0), 0);
        let one = text.text_width("8", 20.0);
        let four = text.text_width("8888", 20.0);
        assert!(one > 0);
        assert!(four > 3 * one);
        assert!(text.line_height(20.0) >= 20);
        assert!(text.text_width("GOAL", 40.0) > text.text_width("GOAL", 20.0));
    }

    #[test]
    fn garbage_font_data_is_rejected() {
        assert!(matches!(
            TextRenderer::from_bytes(b"not a font"),
            Err(PlanError::InvalidFont)
        ));
    }

    #[test]
    fn draws_ink_inside_the_image_only() {
        let text = TextRenderer::builtin().unwrap();
        let mut img = RgbaImage::from_pixel(40, 30, WHITE);
        text.draw_text(&mut img, 2, 2, "T", 24.0, BLACK);
        assert!(img.pixels().any(|p| p[0] < 64));

        // Partially off-canvas text must not panic.
        let mut img = RgbaImage::from_pixel(10, 10, WHITE);
        text.draw_text(&mut img, -6, 4, "GOAL", 20.0, BLACK);
    }

    #[test]
    fn blend_interpolates() {
        assert_eq!(blend(WHITE, BLACK, 0.0), WHITE);
        assert_eq!(blend(WHITE, BLACK, 1.0), BLACK);
        assert_eq!(blend(WHITE, BLACK, 0.5)[0], 128);
    }
}
