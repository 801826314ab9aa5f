use ab_glyph::{FontVec, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_hollow_ellipse_mut, draw_text_mut, text_size};

use crate::caption::{CaptionBox, GlyphMetrics};
use crate::error::LgtmError;
use crate::geometry::BlockedRegion;

/// Text and colors of the caption.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionStyle {
    pub text: String,
    pub fill: Rgba<u8>,
    pub stroke: Rgba<u8>,
    /// Outline thickness in pixels; 0 disables the outline.
    pub stroke_width: u32,
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            text: "LGTM".to_string(),
            fill: Rgba([255, 255, 255, 255]),
            stroke: Rgba([0, 0, 0, 255]),
            stroke_width: 3,
        }
    }
}

/// Draws a caption into an image.
///
/// Implement this to use a different text engine than [`GlyphRenderer`].
pub trait CaptionRenderer {
    fn draw(&self, image: &mut RgbaImage, caption: &CaptionBox, style: &CaptionStyle);
}

/// Caption renderer built on `ab_glyph` outlines and `imageproc` drawing.
pub struct GlyphRenderer {
    font: FontVec,
}

impl GlyphRenderer {
    /// Load a TrueType or OpenType font.
    pub fn new(font_data: Vec<u8>) -> Result<Self, LgtmError> {
        let font =
            FontVec::try_from_vec(font_data).map_err(|e| LgtmError::FontError(e.to_string()))?;
        Ok(Self { font })
    }

    /// Load a font file from disk.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, LgtmError> {
        let path = path.as_ref();
        let data = std::fs::read(path)
            .map_err(|e| LgtmError::FontError(format!("{}: {e}", path.display())))?;
        Self::new(data)
    }

    /// Measure `text` in this font, normalized to font size 1.
    pub fn metrics(&self, text: &str) -> Option<GlyphMetrics> {
        const PROBE: f32 = 100.0;
        let (w, h) = text_size(PxScale::from(PROBE), &self.font, text);
        if w == 0 || h == 0 {
            return None;
        }
        Some(GlyphMetrics {
            width: w as f64 / PROBE as f64,
            height: h as f64 / PROBE as f64,
        })
    }
}

impl CaptionRenderer for GlyphRenderer {
    fn draw(&self, image: &mut RgbaImage, caption: &CaptionBox, style: &CaptionStyle) {
        if style.text.is_empty() || caption.font_size <= 0.0 {
            return;
        }
        let scale = PxScale::from(caption.font_size as f32);
        let (text_w, text_h) = text_size(scale, &self.font, &style.text);

        // Center the measured text inside the box; offset_y is the bottom edge.
        let x = (caption.offset_x + (caption.width - text_w as f64) / 2.0).round() as i32;
        let top = caption.offset_y - caption.height;
        let y = (top + (caption.height - text_h as f64) / 2.0).round() as i32;

        let r = style.stroke_width as i32;
        for dy in -r..=r {
            for dx in -r..=r {
                if (dx, dy) == (0, 0) || dx * dx + dy * dy > r * r {
                    continue;
                }
                draw_text_mut(
                    image,
                    style.stroke,
                    x + dx,
                    y + dy,
                    scale,
                    &self.font,
                    &style.text,
                );
            }
        }
        draw_text_mut(image, style.fill, x, y, scale, &self.font, &style.text);
    }
}

/// Draw an ellipse inscribed in each blocked region.
pub fn outline_faces(image: &mut RgbaImage, regions: &[BlockedRegion], color: Rgba<u8>) {
    for region in regions {
        let rx = (region.maxx - region.minx) / 2;
        let ry = (region.maxy - region.miny) / 2;
        let center = ((region.minx + rx) as i32, (region.miny + ry) as i32);
        draw_hollow_ellipse_mut(image, center, rx as i32, ry as i32, color);
    }
}

/// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (the `#` is optional).
pub fn parse_hex_color(s: &str) -> Option<Rgba<u8>> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => {
            let mut out = [0u8, 0, 0, 255];
            for (i, c) in hex.chars().enumerate() {
                let v = c.to_digit(16)? as u8;
                out[i] = v * 17;
            }
            Some(Rgba(out))
        }
        6 => Some(Rgba([channel(0)?, channel(2)?, channel(4)?, 255])),
        8 => Some(Rgba([channel(0)?, channel(2)?, channel(4)?, channel(6)?])),
        _ => None,
    }
}
