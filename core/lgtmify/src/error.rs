use thiserror::Error;

#[derive(Debug, Error)]
pub enum LgtmError {
    #[error("failed to decode image: {0}")]
    DecodeError(String),

    #[error("unsupported image format")]
    UnsupportedFormat,

    #[error("image dimensions are zero")]
    ZeroDimensions,

    #[error("failed to encode image: {0}")]
    EncodeError(String),

    #[error("failed to load font: {0}")]
    FontError(String),

    #[error(
        "blocked region x {minx}..={maxx}, y {miny}..={maxy} does not fit a {width}x{height} canvas"
    )]
    InvalidRegion {
        minx: u32,
        maxx: u32,
        miny: u32,
        maxy: u32,
        width: u32,
        height: u32,
    },
}
