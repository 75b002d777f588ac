/*!
    Error types for the framescale crate ecosystem.
*/

/**
    Error type for the framescale crate ecosystem.

    Every failure class a conversion can hit is a distinct variant, so a
    pipeline driver can branch per class: skip a frame on a size mismatch,
    reset the converter on an engine failure, abort on a geometry bug.
    All variants are recoverable; the converter that returned one remains
    usable for subsequent calls with corrected parameters.
*/
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An empty input or output buffer was supplied.
    #[error("input and output buffers must be non-empty")]
    InvalidBuffer,

    /// Zero width or height was requested.
    #[error("invalid frame geometry {width}x{height}")]
    InvalidGeometry { width: u32, height: u32 },

    /// The input buffer is not exactly the size the input format requires.
    #[error("input buffer size mismatch: required {expected}, available {actual}")]
    InputSizeMismatch { expected: usize, actual: usize },

    /// The output buffer is smaller than the output format requires.
    #[error("output buffer undersized: required {required}, available {available}")]
    OutputUndersized { required: usize, available: usize },

    /// A source image's width differs from the requested width.
    #[error("source image width differs: image {image}, requested {requested}")]
    WidthMismatch { image: u32, requested: u32 },

    /// A source image's height differs from the requested height.
    #[error("source image height differs: image {image}, requested {requested}")]
    HeightMismatch { image: u32, requested: u32 },

    /// A defaults-based conversion was invoked before `set_defaults`.
    #[error("conversion defaults are not set")]
    DefaultsNotSet,

    /// The engine failed to build a conversion context.
    #[error("failed building conversion context: {0}")]
    Context(String),

    /// The engine rejected the input buffer binding.
    #[error("failed binding input frame: {0}")]
    InputBinding(String),

    /// The engine rejected the output buffer binding.
    #[error("failed binding output frame: {0}")]
    OutputBinding(String),

    /// The scale transform itself failed.
    #[error("scale conversion failed: {0}")]
    Scale(String),
}

/**
    Result type alias for the framescale crate ecosystem.
*/
pub type Result<T> = std::result::Result<T, Error>;
