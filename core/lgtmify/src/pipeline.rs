use std::io::Cursor;

use image::{DynamicImage, ImageFormat, RgbaImage};
use log::{debug, warn};

use crate::caption::{caption_box, CaptionBox, GlyphMetrics};
use crate::error::LgtmError;
use crate::face_detector::FaceDetector;
use crate::geometry::BlockedRegion;
use crate::placement::find_placement;
use crate::render::{outline_faces, CaptionRenderer, CaptionStyle};
use crate::Placement;

/// Decode input bytes into a `DynamicImage`.
pub(crate) fn decode_image(input: &[u8]) -> Result<DynamicImage, LgtmError> {
    image::load_from_memory(input).map_err(|e| LgtmError::DecodeError(e.to_string()))
}

/// Detect the input image format from the raw bytes.
pub(crate) fn detect_format(input: &[u8]) -> Result<ImageFormat, LgtmError> {
    image::guess_format(input).map_err(|e| LgtmError::DecodeError(e.to_string()))
}

/// Run the detector on a grayscale copy and turn every face into a region.
pub(crate) fn detect_regions(
    image: &DynamicImage,
    detector: &dyn FaceDetector,
) -> Vec<BlockedRegion> {
    let gray = image.to_luma8();
    let (width, height) = (gray.width(), gray.height());
    let faces = detector.detect(gray.as_raw(), width, height);
    debug!("detector found {} face(s)", faces.len());
    faces
        .iter()
        .map(|face| BlockedRegion::from_face(face, width, height))
        .collect()
}

/// Encode in `format`, dropping the alpha channel for formats without one.
pub(crate) fn encode_image(image: RgbaImage, format: ImageFormat) -> Result<Vec<u8>, LgtmError> {
    let image = match format {
        ImageFormat::Jpeg | ImageFormat::Bmp => {
            DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(image).to_rgb8())
        }
        _ => DynamicImage::ImageRgba8(image),
    };
    let mut buffer = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buffer), format)
        .map_err(|e| match e {
            image::ImageError::Unsupported(_) => LgtmError::UnsupportedFormat,
            other => LgtmError::EncodeError(other.to_string()),
        })?;
    Ok(buffer)
}

/// Decode → find regions → place the caption.
pub(crate) fn place_pipeline(
    image: &DynamicImage,
    regions: Option<&[BlockedRegion]>,
    detector: Option<&dyn FaceDetector>,
    metrics: &GlyphMetrics,
    clamp: bool,
) -> Result<Placement, LgtmError> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(LgtmError::ZeroDimensions);
    }

    let regions = match (regions, detector) {
        (Some(given), _) => {
            for region in given {
                region.validate(width, height)?;
            }
            given.to_vec()
        }
        (None, Some(detector)) => detect_regions(image, detector),
        (None, None) => {
            warn!("no face detector configured, the caption may cover faces");
            Vec::new()
        }
    };

    let rect = find_placement(width, height, &regions);
    let mut caption: CaptionBox = caption_box(&rect, width, height, metrics);
    if clamp {
        caption = caption.clamp_to(width, height);
    }
    debug!("caption box {caption:?}");

    Ok(Placement {
        width,
        height,
        regions,
        rect,
        caption,
    })
}

/// Draw the caption (and optional face outlines) onto a copy of `image`.
pub(crate) fn render_pipeline(
    image: &DynamicImage,
    placement: &Placement,
    renderer: &dyn CaptionRenderer,
    style: &CaptionStyle,
    outline: Option<image::Rgba<u8>>,
) -> RgbaImage {
    let mut canvas = image.to_rgba8();
    if let Some(color) = outline {
        outline_faces(&mut canvas, &placement.regions, color);
    }
    renderer.draw(&mut canvas, &placement.caption, style);
    canvas
}
