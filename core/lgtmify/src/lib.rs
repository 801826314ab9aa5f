//! Put an "LGTM" caption on a photo without covering anyone's face.
//!
//! Faces become blocked regions on an occupancy grid; the largest free
//! rectangle that is at least as wide as it is tall receives the caption.
//!
//! # Example
//!
//! ```no_run
//! use lgtmify::{GlyphRenderer, Lgtmify};
//!
//! let raw_bytes = std::fs::read("photo.jpg").unwrap();
//! let renderer = GlyphRenderer::from_file("DejaVuSans-Bold.ttf").unwrap();
//! let result = Lgtmify::new(raw_bytes)
//!     .unwrap()
//!     .render(&renderer)
//!     .unwrap();
//! std::fs::write("lgtm-photo.jpg", &result.data).unwrap();
//! ```
//!
//! The placement core works on plain geometry and needs no image at all:
//!
//! ```
//! use lgtmify::{place_caption, BlockedRegion};
//!
//! let caption = place_caption(100, 100, &[BlockedRegion::new(40, 60, 40, 60)]);
//! assert!(caption.offset_y - caption.height >= 60.0);
//! ```

/// Caption box geometry derived from the free rectangle.
pub mod caption;
mod error;
/// Face detection traits and data types.
pub mod face_detector;
/// Blocked regions and free rectangles.
pub mod geometry;
/// Binary occupancy grid.
pub mod grid;
/// Free-run histograms over the occupancy grid.
pub mod histogram;
mod pipeline;
/// Largest free rectangle search.
pub mod placement;
/// Caption and face-outline drawing.
pub mod render;
#[cfg(feature = "rustface")]
/// SeetaFace-based face detector backend.
pub mod rustface_backend;

use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgba};

pub use caption::{caption_box, place_caption, CaptionBox, GlyphMetrics};
/// Error type returned by lgtmify operations.
pub use error::LgtmError;
/// Face detection trait and face bounding-box type.
pub use face_detector::{FaceBounds, FaceDetector};
pub use geometry::{BlockedRegion, FreeRect};
pub use placement::find_placement;
pub use render::{CaptionRenderer, CaptionStyle, GlyphRenderer};
#[cfg(feature = "rustface")]
/// Detector that runs a SeetaFace frontal model.
pub use rustface_backend::RustfaceDetector;

/// Prefix of the output file name.
pub const OUTPUT_PREFIX: &str = "lgtm-";

/// Where the caption goes on a given image.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    /// Width of the source image in pixels.
    pub width: u32,

    /// Height of the source image in pixels.
    pub height: u32,

    /// Regions the caption avoids (detected faces or caller-provided).
    pub regions: Vec<BlockedRegion>,

    /// Largest free landscape rectangle, or [`FreeRect::EMPTY`] if none.
    pub rect: FreeRect,

    /// Final caption geometry.
    pub caption: CaptionBox,
}

/// Result of a render operation.
#[derive(Debug, Clone)]
pub struct LgtmImage {
    /// Encoded image bytes, same format as the input.
    pub data: Vec<u8>,

    /// The output format used.
    pub format: ImageFormat,

    /// Width of the output image in pixels.
    pub width: u32,

    /// Height of the output image in pixels.
    pub height: u32,

    /// The placement the caption was drawn at.
    pub placement: Placement,
}

/// Builder for captioning a photo.
///
/// Validates the input format on construction; decoding, face detection,
/// placement and drawing happen in [`Lgtmify::place`] and [`Lgtmify::render`].
pub struct Lgtmify {
    input: Vec<u8>,
    style: CaptionStyle,
    metrics: GlyphMetrics,
    clamp: bool,
    outline: Option<Rgba<u8>>,
    /// Regions given by the caller. When set, the detector is not run.
    regions: Option<Vec<BlockedRegion>>,
    detector: Option<Box<dyn FaceDetector>>,
}

impl Lgtmify {
    /// Create a new captioner from raw image bytes (JPEG, PNG, WebP, GIF or BMP).
    pub fn new(input: Vec<u8>) -> Result<Self, LgtmError> {
        pipeline::detect_format(&input)?;

        Ok(Self {
            input,
            style: CaptionStyle::default(),
            metrics: GlyphMetrics::LGTM,
            clamp: true,
            outline: None,
            regions: None,
            detector: None,
        })
    }

    /// Set the caption text (default: "LGTM").
    ///
    /// Placement uses [`Lgtmify::glyph_metrics`]; set them too when the text
    /// is not "LGTM".
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.style.text = text.into();
        self
    }

    /// Replace the whole caption style (text, fill, stroke).
    pub fn style(mut self, style: CaptionStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the size of the caption text at font size 1 (default: "LGTM" metrics).
    pub fn glyph_metrics(mut self, metrics: GlyphMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Keep the caption box inside the image (default: true).
    pub fn clamp(mut self, enable: bool) -> Self {
        self.clamp = enable;
        self
    }

    /// Draw an ellipse around every blocked region in `color`.
    pub fn outline_faces(mut self, color: Rgba<u8>) -> Self {
        self.outline = Some(color);
        self
    }

    /// Use these regions instead of running face detection.
    pub fn blocked_regions(mut self, regions: Vec<BlockedRegion>) -> Self {
        self.regions = Some(regions);
        self
    }

    /// Provide a face detector implementation.
    ///
    /// Without a detector (and without [`Lgtmify::blocked_regions`]) the
    /// whole image counts as free.
    ///
    /// ```no_run
    /// use lgtmify::{FaceBounds, FaceDetector, Lgtmify};
    ///
    /// struct MyDetector;
    /// impl FaceDetector for MyDetector {
    ///     fn detect(&self, gray: &[u8], width: u32, height: u32) -> Vec<FaceBounds> {
    ///         // Your detection logic here
    ///         vec![]
    ///     }
    /// }
    ///
    /// let bytes = std::fs::read("photo.jpg").unwrap();
    /// let placement = Lgtmify::new(bytes).unwrap()
    ///     .face_detector(Box::new(MyDetector))
    ///     .place().unwrap();
    /// ```
    pub fn face_detector(mut self, detector: Box<dyn FaceDetector>) -> Self {
        self.detector = Some(detector);
        self
    }

    /// Decode the image, find the blocked regions and place the caption.
    pub fn place(&self) -> Result<Placement, LgtmError> {
        let decoded = pipeline::decode_image(&self.input)?;
        pipeline::place_pipeline(
            &decoded,
            self.regions.as_deref(),
            self.detector.as_deref(),
            &self.metrics,
            self.clamp,
        )
    }

    /// Place the caption, draw it and encode the result in the input's format.
    pub fn render(&self, renderer: &dyn CaptionRenderer) -> Result<LgtmImage, LgtmError> {
        let format = pipeline::detect_format(&self.input)?;
        let decoded = pipeline::decode_image(&self.input)?;
        let placement = pipeline::place_pipeline(
            &decoded,
            self.regions.as_deref(),
            self.detector.as_deref(),
            &self.metrics,
            self.clamp,
        )?;

        let canvas =
            pipeline::render_pipeline(&decoded, &placement, renderer, &self.style, self.outline);
        let (width, height) = (canvas.width(), canvas.height());
        let data = pipeline::encode_image(canvas, format)?;

        Ok(LgtmImage {
            data,
            format,
            width,
            height,
            placement,
        })
    }
}

/// Name of the captioned copy of `input`: its file name prefixed with `lgtm-`.
pub fn output_file_name(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    PathBuf::from(format!("{OUTPUT_PREFIX}{name}"))
}
