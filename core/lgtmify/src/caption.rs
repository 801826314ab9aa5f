use crate::geometry::{BlockedRegion, FreeRect};
use crate::placement::find_placement;

/// Size of the caption text when rendered at font size 1.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlyphMetrics {
    pub width: f64,
    pub height: f64,
}

impl GlyphMetrics {
    /// Metrics of the string "LGTM".
    pub const LGTM: GlyphMetrics = GlyphMetrics {
        width: 0.85,
        height: 0.26,
    };

    /// Height-to-width ratio of the text.
    pub fn aspect(&self) -> f64 {
        self.height / self.width
    }
}

impl Default for GlyphMetrics {
    fn default() -> Self {
        Self::LGTM
    }
}

/// Where and how large to draw the caption.
///
/// `offset_x` is the left edge and `offset_y` the baseline (bottom edge) of
/// the text, in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CaptionBox {
    pub width: f64,
    pub height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub font_size: f64,
}

impl CaptionBox {
    /// Shrink and shift the box so it lies inside a `width` × `height` canvas.
    ///
    /// The font size shrinks with the box height.
    pub fn clamp_to(mut self, width: u32, height: u32) -> Self {
        let (canvas_w, canvas_h) = (width as f64, height as f64);

        if self.height > canvas_h && self.height > 0.0 {
            self.font_size *= canvas_h / self.height;
            self.height = canvas_h;
        }
        self.width = self.width.min(canvas_w);
        self.offset_x = self.offset_x.clamp(0.0, canvas_w - self.width);
        self.offset_y = self.offset_y.clamp(self.height, canvas_h);
        self
    }

    /// Whether the box lies inside a `width` × `height` canvas.
    pub fn fits(&self, width: u32, height: u32) -> bool {
        const EPS: f64 = 1e-9;
        self.offset_x >= -EPS
            && self.offset_x + self.width <= width as f64 + EPS
            && self.offset_y - self.height >= -EPS
            && self.offset_y <= height as f64 + EPS
    }
}

/// Fit the caption into `rect`, or into the whole canvas if `rect` is empty.
///
/// When the rectangle is taller than the text's aspect, the text spans the
/// full width and is centered vertically. Otherwise it spans the full height
/// and is centered horizontally.
pub fn caption_box(rect: &FreeRect, width: u32, height: u32, metrics: &GlyphMetrics) -> CaptionBox {
    let rect = if rect.is_empty() {
        FreeRect::full_canvas(width, height)
    } else {
        *rect
    };
    let (rect_w, rect_h) = (rect.width as f64, rect.height as f64);
    let aspect = metrics.aspect();

    if aspect < rect_h / rect_w {
        let caption_h = aspect * rect_w;
        CaptionBox {
            width: rect_w,
            height: caption_h,
            offset_x: rect.minx as f64,
            offset_y: rect.maxy as f64 - rect_h / 2.0 + caption_h / 2.0,
            font_size: caption_h / metrics.width,
        }
    } else {
        let caption_w = metrics.width * rect_h / metrics.height;
        CaptionBox {
            width: caption_w,
            height: rect_h,
            offset_x: rect.maxx as f64 - rect_w / 2.0 - caption_w / 2.0,
            offset_y: rect.maxy as f64,
            font_size: rect_h / metrics.width,
        }
    }
}

/// Caption box for the default "LGTM" text, kept inside the canvas.
pub fn place_caption(width: u32, height: u32, regions: &[BlockedRegion]) -> CaptionBox {
    let rect = find_placement(width, height, regions);
    caption_box(&rect, width, height, &GlyphMetrics::LGTM).clamp_to(width, height)
}
