use image::codecs::png::PngEncoder;
use image::{ImageEncoder, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use lgtmify::{
    BlockedRegion, CaptionBox, CaptionRenderer, CaptionStyle, FaceBounds, FaceDetector, FreeRect,
    GlyphMetrics, LgtmError, Lgtmify,
};

fn make_test_png(width: u32, height: u32) -> Vec<u8> {
    let mut img = RgbImage::new(width, height);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        *pixel = Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            128,
        ]);
    }
    let mut buffer = Vec::new();
    PngEncoder::new(&mut buffer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
    buffer
}

fn make_test_jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([90, 120, 200]));
    let mut buffer = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut std::io::Cursor::new(&mut buffer), ImageFormat::Jpeg)
        .unwrap();
    buffer
}

/// Mock face detector for integration tests.
struct MockDetector {
    faces: Vec<FaceBounds>,
}

impl MockDetector {
    fn with_face(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            faces: vec![FaceBounds {
                x,
                y,
                width,
                height,
                confidence: 10.0,
            }],
        }
    }
}

impl FaceDetector for MockDetector {
    fn detect(&self, _gray: &[u8], _width: u32, _height: u32) -> Vec<FaceBounds> {
        self.faces.clone()
    }
}

/// Records the caption box it was asked to draw.
#[derive(Default)]
struct RecordingRenderer {
    calls: std::sync::Mutex<Vec<(CaptionBox, String)>>,
}

impl CaptionRenderer for RecordingRenderer {
    fn draw(&self, _image: &mut RgbaImage, caption: &CaptionBox, style: &CaptionStyle) {
        self.calls
            .lock()
            .unwrap()
            .push((*caption, style.text.clone()));
    }
}

fn overlaps(caption: &CaptionBox, region: &BlockedRegion) -> bool {
    let (left, right) = (caption.offset_x, caption.offset_x + caption.width);
    let (top, bottom) = (caption.offset_y - caption.height, caption.offset_y);
    // Region covers zero-based cells minx-1..maxx, miny-1..maxy.
    let (rl, rr) = (region.minx.saturating_sub(1) as f64, region.maxx as f64);
    let (rt, rb) = (region.miny.saturating_sub(1) as f64, region.maxy as f64);
    left < rr && rl < right && top < rb && rt < bottom
}

#[test]
fn no_faces_uses_full_canvas() {
    let placement = Lgtmify::new(make_test_png(100, 50))
        .unwrap()
        .place()
        .unwrap();

    assert_eq!(placement.rect, FreeRect::full_canvas(100, 50));
    // 50 / 100 is taller than the LGTM aspect, so the text spans the full width.
    assert!((placement.caption.width - 100.0).abs() < 1e-9);
    assert!(placement.caption.fits(100, 50));
}

#[test]
fn detected_face_is_avoided() {
    let detector = MockDetector::with_face(40.0, 40.0, 20.0, 20.0);
    let placement = Lgtmify::new(make_test_png(100, 100))
        .unwrap()
        .face_detector(Box::new(detector))
        .place()
        .unwrap();

    assert_eq!(placement.regions, vec![BlockedRegion::new(40, 60, 40, 60)]);
    assert_eq!(placement.rect.area, 4000);
    assert!(placement.rect.is_landscape());
    assert!(!overlaps(&placement.caption, &placement.regions[0]));
}

#[test]
fn face_outside_canvas_is_clamped() {
    let detector = MockDetector::with_face(-20.0, -20.0, 60.0, 60.0);
    let placement = Lgtmify::new(make_test_png(80, 80))
        .unwrap()
        .face_detector(Box::new(detector))
        .place()
        .unwrap();

    assert_eq!(placement.regions, vec![BlockedRegion::new(0, 40, 0, 40)]);
    assert!(!overlaps(&placement.caption, &placement.regions[0]));
}

#[test]
fn explicit_regions_skip_detection() {
    let detector = MockDetector::with_face(0.0, 0.0, 100.0, 100.0);
    let placement = Lgtmify::new(make_test_png(100, 100))
        .unwrap()
        .face_detector(Box::new(detector))
        .blocked_regions(vec![BlockedRegion::new(0, 100, 1, 10)])
        .place()
        .unwrap();

    assert_eq!(placement.regions.len(), 1);
    assert_eq!((placement.rect.miny, placement.rect.maxy), (10, 100));
}

#[test]
fn face_band_across_full_width() {
    let placement = Lgtmify::new(make_test_png(200, 120))
        .unwrap()
        .blocked_regions(vec![BlockedRegion::new(0, 200, 31, 50)])
        .place()
        .unwrap();

    // Band covers zero-based rows 30..=49: 30 rows above, 70 below.
    assert_eq!(
        (placement.rect.minx, placement.rect.maxx),
        (0, 200),
        "{:?}",
        placement.rect
    );
    assert_eq!((placement.rect.miny, placement.rect.maxy), (50, 120));
}

#[test]
fn fully_covered_image_falls_back_to_canvas() {
    let detector = MockDetector::with_face(0.0, 0.0, 60.0, 40.0);
    let placement = Lgtmify::new(make_test_png(60, 40))
        .unwrap()
        .face_detector(Box::new(detector))
        .place()
        .unwrap();

    assert!(placement.rect.is_empty());
    let expected = lgtmify::caption_box(&FreeRect::full_canvas(60, 40), 60, 40, &GlyphMetrics::LGTM);
    assert_eq!(placement.caption, expected);
}

#[test]
fn render_passes_caption_to_renderer() {
    let renderer = RecordingRenderer::default();
    let result = Lgtmify::new(make_test_png(100, 100))
        .unwrap()
        .text("SHIP IT")
        .blocked_regions(vec![BlockedRegion::new(40, 60, 40, 60)])
        .render(&renderer)
        .unwrap();

    let calls = renderer.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, result.placement.caption);
    assert_eq!(calls[0].1, "SHIP IT");
}

#[test]
fn render_jpeg_input_produces_jpeg() {
    let result = Lgtmify::new(make_test_jpeg(64, 48))
        .unwrap()
        .render(&RecordingRenderer::default())
        .unwrap();

    assert_eq!(result.format, ImageFormat::Jpeg);
    assert_eq!(result.data[0], 0xFF);
    assert_eq!(result.data[1], 0xD8);
    assert_eq!((result.width, result.height), (64, 48));
}

#[test]
fn outline_is_drawn_around_regions() {
    let red = Rgba([255, 0, 0, 255]);
    let result = Lgtmify::new(make_test_png(60, 60))
        .unwrap()
        .blocked_regions(vec![BlockedRegion::new(10, 30, 10, 30)])
        .outline_faces(red)
        .render(&RecordingRenderer::default())
        .unwrap();

    let out = image::load_from_memory(&result.data).unwrap().to_rgba8();
    assert_eq!(*out.get_pixel(10, 20), red);
}

#[test]
fn clamp_can_be_disabled() {
    let png = make_test_png(100, 50);
    let clamped = Lgtmify::new(png.clone()).unwrap().place().unwrap();
    let raw = Lgtmify::new(png).unwrap().clamp(false).place().unwrap();
    // A fitting box is unaffected by clamping.
    assert_eq!(clamped.caption, raw.caption);
}

#[test]
fn custom_glyph_metrics_change_the_box() {
    let wide = GlyphMetrics {
        width: 4.0,
        height: 1.0,
    };
    let placement = Lgtmify::new(make_test_png(100, 50))
        .unwrap()
        .glyph_metrics(wide)
        .place()
        .unwrap();

    assert!((placement.caption.height - 25.0).abs() < 1e-9);
}

#[test]
fn invalid_input_is_rejected() {
    assert!(matches!(
        Lgtmify::new(b"definitely not an image".to_vec()),
        Err(LgtmError::DecodeError(_))
    ));
}

#[test]
fn output_name_follows_input() {
    let path = std::path::Path::new("photos/Lenna.png");
    assert_eq!(
        lgtmify::output_file_name(path),
        std::path::PathBuf::from("lgtm-Lenna.png")
    );
}
