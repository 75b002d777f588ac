/*!
    The engine capability surface.
*/

use framescale_types::{PixelFormat, Result};

use crate::FrameDescriptor;

/**
    Scaling algorithm for pixel conversion and resizing.
*/
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScaleAlgorithm {
    /// Nearest neighbor - fastest, lowest quality.
    Nearest,
    /// Approximated bilinear interpolation - the per-frame conversion
    /// default.
    #[default]
    FastBilinear,
    /// Full bilinear interpolation.
    Bilinear,
}

/**
    Everything a conversion context is built for: source and destination
    geometry, formats, and the scaling algorithm. A context is only valid
    for the exact spec it was built from.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ContextSpec {
    pub src_width: u32,
    pub src_height: u32,
    pub src_format: PixelFormat,
    pub dst_width: u32,
    pub dst_height: u32,
    pub dst_format: PixelFormat,
    pub algorithm: ScaleAlgorithm,
}

/**
    The scaling/conversion engine capability.

    Implementations are stateless between calls; all per-tuple state lives
    in the associated `Context`, which the caller owns and passes back in.
    `supports_input`/`supports_output` are advisory only; an engine may
    still convert a format it does not advertise, through internal
    fallback paths.
*/
pub trait ScaleEngine {
    /// Engine state for converting one fixed [`ContextSpec`] efficiently.
    type Context;

    /// Whether the engine natively reads frames of this format.
    fn supports_input(&self, format: PixelFormat) -> bool;

    /// Whether the engine natively produces frames of this format.
    fn supports_output(&self, format: PixelFormat) -> bool;

    /**
        Build a context for `spec`, reusing whatever is salvageable from a
        previous context. The previous context is consumed either way.
    */
    fn rebuild_context(
        &self,
        prev: Option<Self::Context>,
        spec: ContextSpec,
    ) -> Result<Self::Context>;

    /**
        Run the transform from bound input planes to bound output planes.

        `rows` is the number of source rows to consume and must cover the
        full source height of the context's spec.
    */
    fn scale(
        &self,
        context: &mut Self::Context,
        src: &FrameDescriptor,
        src_data: &[u8],
        dst: &FrameDescriptor,
        dst_data: &mut [u8],
        rows: u32,
    ) -> Result<()>;
}
