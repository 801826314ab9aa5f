use image::Rgba;
use lgtmify::render::parse_hex_color;
use serde::Deserialize;
use wasm_bindgen::prelude::*;

/// Options for captioning, passed as a JavaScript object.
///
/// All fields are optional. Without `faces` the whole image is treated as
/// free; face detection is left to the JavaScript side.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CaptionOptions {
    pub text: Option<String>,
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<u32>,
    pub faces: Option<Vec<lgtmify::BlockedRegion>>,
    pub outline_faces: Option<String>,
    pub clamp: Option<bool>,
    pub glyph_metrics: Option<lgtmify::GlyphMetrics>,
}

/// Create a JS `Error` with a `code` property.
fn make_error(code: &str, message: &str) -> JsValue {
    let err = js_sys::Error::new(message);
    let _ = js_sys::Reflect::set(&err, &"code".into(), &JsValue::from_str(code));
    JsValue::from(err)
}

/// Convert an `LgtmError` into a JS `Error` with a machine-readable `code` property.
fn to_js_error(e: lgtmify::LgtmError) -> JsValue {
    let code = match &e {
        lgtmify::LgtmError::DecodeError(_) => "DECODE_ERROR",
        lgtmify::LgtmError::UnsupportedFormat => "UNSUPPORTED_FORMAT",
        lgtmify::LgtmError::ZeroDimensions => "ZERO_DIMENSIONS",
        lgtmify::LgtmError::EncodeError(_) => "ENCODE_ERROR",
        lgtmify::LgtmError::FontError(_) => "FONT_ERROR",
        lgtmify::LgtmError::InvalidRegion { .. } => "INVALID_REGION",
    };
    make_error(code, &e.to_string())
}

fn parse_options(options: JsValue) -> Result<CaptionOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        Ok(CaptionOptions::default())
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| make_error("INVALID_OPTIONS", &format!("invalid options: {e}")))
    }
}

fn parse_color(value: &str) -> Result<Rgba<u8>, JsValue> {
    parse_hex_color(value)
        .ok_or_else(|| make_error("INVALID_OPTIONS", &format!("invalid color: {value}")))
}

/// Apply parsed `CaptionOptions` to an `Lgtmify` builder.
fn apply_options(
    mut lgtm: lgtmify::Lgtmify,
    opts: CaptionOptions,
) -> Result<lgtmify::Lgtmify, JsValue> {
    let mut style = lgtmify::CaptionStyle::default();
    if let Some(text) = opts.text {
        style.text = text;
    }
    if let Some(ref fill) = opts.fill {
        style.fill = parse_color(fill)?;
    }
    if let Some(ref stroke) = opts.stroke {
        style.stroke = parse_color(stroke)?;
    }
    if let Some(width) = opts.stroke_width {
        style.stroke_width = width;
    }
    lgtm = lgtm.style(style);

    if let Some(faces) = opts.faces {
        lgtm = lgtm.blocked_regions(faces);
    }
    if let Some(ref color) = opts.outline_faces {
        lgtm = lgtm.outline_faces(parse_color(color)?);
    }
    if let Some(clamp) = opts.clamp {
        lgtm = lgtm.clamp(clamp);
    }
    if let Some(metrics) = opts.glyph_metrics {
        lgtm = lgtm.glyph_metrics(metrics);
    }
    Ok(lgtm)
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| make_error("SERIALIZE_ERROR", &e.to_string()))
}

/// Find where the caption goes on a `width` × `height` canvas.
///
/// @param width - Canvas width in pixels
/// @param height - Canvas height in pixels
/// @param faces - Optional array of `{ minx, maxx, miny, maxy }` regions
/// @returns `{ width, height, regions, rect, caption }`
#[wasm_bindgen(js_name = "placeCaption")]
pub fn place_caption(width: u32, height: u32, faces: JsValue) -> Result<JsValue, JsValue> {
    if width == 0 || height == 0 {
        return Err(to_js_error(lgtmify::LgtmError::ZeroDimensions));
    }
    let regions: Vec<lgtmify::BlockedRegion> = if faces.is_undefined() || faces.is_null() {
        Vec::new()
    } else {
        serde_wasm_bindgen::from_value(faces)
            .map_err(|e| make_error("INVALID_OPTIONS", &format!("invalid faces: {e}")))?
    };
    for region in &regions {
        region.validate(width, height).map_err(to_js_error)?;
    }

    let rect = lgtmify::find_placement(width, height, &regions);
    let caption = lgtmify::caption_box(&rect, width, height, &lgtmify::GlyphMetrics::LGTM)
        .clamp_to(width, height);

    to_js(&lgtmify::Placement {
        width,
        height,
        regions,
        rect,
        caption,
    })
}

/// Draw the caption onto an image.
///
/// @param input - Raw image bytes (JPEG, PNG, WebP, GIF or BMP)
/// @param font - TrueType/OpenType font bytes
/// @param options - Optional object with fields: text, fill, stroke,
///   strokeWidth, faces, outlineFaces, clamp, glyphMetrics
/// @returns `{ data, width, height, placement }`, `data` in the input's format
#[wasm_bindgen(js_name = "lgtmify")]
pub fn render_caption(
    input: Vec<u8>,
    font: Vec<u8>,
    options: JsValue,
) -> Result<JsValue, JsValue> {
    let opts = parse_options(options)?;

    let renderer = lgtmify::GlyphRenderer::new(font).map_err(to_js_error)?;
    let lgtm = lgtmify::Lgtmify::new(input).map_err(to_js_error)?;
    let lgtm = apply_options(lgtm, opts)?;

    let result = lgtm.render(&renderer).map_err(to_js_error)?;

    let obj = js_sys::Object::new();
    let data = js_sys::Uint8Array::from(&result.data[..]);
    js_sys::Reflect::set(&obj, &"data".into(), &data)?;
    js_sys::Reflect::set(&obj, &"width".into(), &JsValue::from(result.width))?;
    js_sys::Reflect::set(&obj, &"height".into(), &JsValue::from(result.height))?;
    js_sys::Reflect::set(&obj, &"placement".into(), &to_js(&result.placement)?)?;

    Ok(JsValue::from(obj))
}
