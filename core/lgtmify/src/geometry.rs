use crate::error::LgtmError;
use crate::face_detector::FaceBounds;

/// A region of the canvas the caption must not cover, usually a detected face.
///
/// Bounds are inclusive pixel coordinates, origin top-left. A cell at zero-based
/// `(x, y)` is covered when `minx <= x + 1 <= maxx` and `miny <= y + 1 <= maxy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockedRegion {
    /// Left bound (pixels).
    pub minx: u32,
    /// Right bound (pixels, inclusive).
    pub maxx: u32,
    /// Top bound (pixels).
    pub miny: u32,
    /// Bottom bound (pixels, inclusive).
    pub maxy: u32,
}

impl BlockedRegion {
    /// Create a region, swapping bounds given in the wrong order.
    pub fn new(minx: u32, maxx: u32, miny: u32, maxy: u32) -> Self {
        Self {
            minx: minx.min(maxx),
            maxx: minx.max(maxx),
            miny: miny.min(maxy),
            maxy: miny.max(maxy),
        }
    }

    /// Check that the region lies within a `width` × `height` canvas.
    pub fn validate(&self, width: u32, height: u32) -> Result<(), LgtmError> {
        if self.minx > self.maxx || self.miny > self.maxy || self.maxx > width || self.maxy > height
        {
            return Err(LgtmError::InvalidRegion {
                minx: self.minx,
                maxx: self.maxx,
                miny: self.miny,
                maxy: self.maxy,
                width,
                height,
            });
        }
        Ok(())
    }

    /// Convert a detector bounding box into a region clamped to the canvas.
    ///
    /// Detectors report boxes that can start at negative coordinates or run
    /// past the image edge; those are cut back to `[0, width] × [0, height]`.
    pub fn from_face(face: &FaceBounds, width: u32, height: u32) -> Self {
        let clamp = |v: f64, limit: u32| v.max(0.0).min(limit as f64) as u32;
        Self::new(
            clamp(face.x.floor(), width),
            clamp((face.x + face.width).ceil(), width),
            clamp(face.y.floor(), height),
            clamp((face.y + face.height).ceil(), height),
        )
    }

    /// Whether the zero-based cell `(x, y)` falls inside this region.
    #[inline]
    pub fn covers(&self, x: u32, y: u32) -> bool {
        let (ox, oy) = (x + 1, y + 1);
        oy >= self.miny && oy <= self.maxy && ox >= self.minx && ox <= self.maxx
    }
}

/// An axis-aligned, unblocked rectangle of grid cells.
///
/// Bounds are zero-based and half-open: the rectangle spans cells
/// `minx..maxx` horizontally and `miny..maxy` vertically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FreeRect {
    pub minx: u32,
    pub maxx: u32,
    pub miny: u32,
    pub maxy: u32,
    pub width: u32,
    pub height: u32,
    /// `width * height`.
    pub area: u64,
}

impl FreeRect {
    /// Zero-area placeholder returned when nothing usable was found.
    pub const EMPTY: FreeRect = FreeRect {
        minx: 0,
        maxx: 0,
        miny: 0,
        maxy: 0,
        width: 0,
        height: 0,
        area: 0,
    };

    /// Rectangle with its bottom edge on `maxy` spanning columns `minx..maxx`.
    pub fn from_bottom(minx: u32, maxx: u32, maxy: u32, height: u32) -> Self {
        let width = maxx - minx;
        Self {
            minx,
            maxx,
            miny: maxy - height,
            maxy,
            width,
            height,
            area: width as u64 * height as u64,
        }
    }

    /// The whole canvas.
    pub fn full_canvas(width: u32, height: u32) -> Self {
        Self::from_bottom(0, width, height, height)
    }

    pub fn is_empty(&self) -> bool {
        self.area == 0
    }

    /// Caption text is wide; a rectangle taller than it is wide cannot hold it.
    pub fn is_landscape(&self) -> bool {
        self.width >= self.height
    }
}
