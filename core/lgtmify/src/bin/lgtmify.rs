//! Caption a photo with "LGTM" without covering faces.
//!
//! # Usage
//!
//! ```bash
//! # Face detection with a SeetaFace model (needs the `rustface` feature)
//! lgtmify photo.jpg --font DejaVuSans-Bold.ttf --model seeta_fd_frontal_v1.0.bin
//!
//! # Known face boxes, x,y,width,height
//! lgtmify photo.jpg --font DejaVuSans-Bold.ttf --face 120,80,64,64
//!
//! # Only print where the caption would go
//! lgtmify photo.jpg --face 120,80,64,64 --json
//! ```

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use lgtmify::render::parse_hex_color;
use lgtmify::{BlockedRegion, CaptionStyle, GlyphMetrics, GlyphRenderer, Lgtmify};
use log::info;

#[derive(Parser, Debug)]
#[command(name = "lgtmify")]
#[command(version, about, long_about = None)]
struct Args {
    /// Input image (JPEG, PNG, WebP, GIF or BMP)
    input: PathBuf,

    /// TrueType/OpenType font used to draw the caption
    #[arg(short, long)]
    font: Option<PathBuf>,

    /// Caption text
    #[arg(short, long, default_value = "LGTM")]
    text: String,

    /// Output file (default: lgtm-<input file name> in the current directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// SeetaFace frontal model for face detection
    #[cfg(feature = "rustface")]
    #[arg(short, long)]
    model: Option<PathBuf>,

    /// Face box as x,y,width,height (repeatable); disables detection
    #[arg(long = "face", value_parser = parse_face)]
    faces: Vec<BlockedRegion>,

    /// Fill color
    #[arg(long, default_value = "#ffffff")]
    fill: String,

    /// Stroke color
    #[arg(long, default_value = "#000000")]
    stroke: String,

    /// Stroke width in pixels
    #[arg(long, default_value = "3")]
    stroke_width: u32,

    /// Draw an ellipse around each face
    #[arg(long)]
    outline_faces: bool,

    /// Allow the caption box to leave the image
    #[arg(long)]
    no_clamp: bool,

    /// Print the placement as JSON instead of writing an image
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn parse_face(s: &str) -> Result<BlockedRegion, String> {
    let parts: Vec<u32> = s
        .split(',')
        .map(|p| p.trim().parse::<u32>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("invalid face box {s:?}: {e}"))?;
    match parts.as_slice() {
        [x, y, w, h] => Ok(BlockedRegion::new(
            *x,
            x.saturating_add(*w),
            *y,
            y.saturating_add(*h),
        )),
        _ => Err(format!("face box {s:?} needs x,y,width,height")),
    }
}

#[cfg(feature = "rustface")]
fn with_detector(lgtm: Lgtmify, args: &Args) -> Result<Lgtmify> {
    match &args.model {
        Some(model) => {
            let detector = lgtmify::RustfaceDetector::from_file(model)?;
            Ok(lgtm.face_detector(Box::new(detector)))
        }
        None => Ok(lgtm),
    }
}

#[cfg(not(feature = "rustface"))]
fn with_detector(lgtm: Lgtmify, _args: &Args) -> Result<Lgtmify> {
    Ok(lgtm)
}

fn color(s: &str) -> Result<image::Rgba<u8>> {
    parse_hex_color(s).ok_or_else(|| anyhow!("invalid color {s:?}"))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let input = std::fs::read(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    let renderer = match &args.font {
        Some(path) => Some(GlyphRenderer::from_file(path)?),
        None => None,
    };
    let metrics = match &renderer {
        Some(r) if args.text != "LGTM" => r.metrics(&args.text).unwrap_or_default(),
        _ => GlyphMetrics::LGTM,
    };

    let style = CaptionStyle {
        text: args.text.clone(),
        fill: color(&args.fill)?,
        stroke: color(&args.stroke)?,
        stroke_width: args.stroke_width,
    };

    let mut lgtm = Lgtmify::new(input)?
        .style(style)
        .glyph_metrics(metrics)
        .clamp(!args.no_clamp);
    if args.outline_faces {
        lgtm = lgtm.outline_faces(image::Rgba([255, 0, 0, 255]));
    }
    if !args.faces.is_empty() {
        lgtm = lgtm.blocked_regions(args.faces.clone());
    }
    let lgtm = with_detector(lgtm, &args)?;

    if args.json {
        let placement = lgtm.place()?;
        println!("{}", serde_json::to_string_pretty(&placement)?);
        return Ok(());
    }

    let Some(renderer) = renderer else {
        bail!("--font is required to draw the caption (or use --json)");
    };
    let result = lgtm.render(&renderer)?;

    let output = args
        .output
        .unwrap_or_else(|| lgtmify::output_file_name(&args.input));
    std::fs::write(&output, &result.data)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!(
        "caption at ({:.1}, {:.1}) size {:.1}x{:.1}, font {:.1}",
        result.placement.caption.offset_x,
        result.placement.caption.offset_y,
        result.placement.caption.width,
        result.placement.caption.height,
        result.placement.caption.font_size
    );
    println!("{}", output.display());
    Ok(())
}
