/*!
    Captured frame types.
*/

use crate::{ColourModel, PixelFormat, SubpixelOrder};

/**
    Read-only view of a captured image's geometry and raw bytes.

    This is the boundary with the capture side of the pipeline: converters
    only ever read width, height and the byte buffer, and never retain the
    frame beyond a single call.
*/
pub trait FrameImage {
    /// Frame width in pixels.
    fn width(&self) -> u32;

    /// Frame height in pixels.
    fn height(&self) -> u32;

    /// Raw pixel bytes.
    fn buffer(&self) -> &[u8];

    /// Byte length of the raw buffer.
    fn buffer_size(&self) -> usize {
        self.buffer().len()
    }
}

/**
    A raw frame as produced by a capture source.

    Contains packed pixel data described by a colour model and subpixel
    order rather than an engine pixel format, since capture hardware
    speaks in channel layouts. [`pixel_format`](CapturedFrame::pixel_format)
    derives the engine format on demand.
*/
#[derive(Clone, Debug)]
pub struct CapturedFrame {
    /// Raw pixel data.
    pub data: Vec<u8>,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Coarse channel layout.
    pub colour: ColourModel,
    /// Byte ordering within a pixel.
    pub order: SubpixelOrder,
}

impl CapturedFrame {
    /**
        Create a new captured frame.
    */
    pub fn new(
        data: Vec<u8>,
        width: u32,
        height: u32,
        colour: ColourModel,
        order: SubpixelOrder,
    ) -> Self {
        Self {
            data,
            width,
            height,
            colour,
            order,
        }
    }

    /**
        The engine pixel format this frame's bytes are laid out in.
    */
    pub fn pixel_format(&self) -> PixelFormat {
        PixelFormat::from_colour(self.colour, self.order)
    }

    /**
        The byte size this frame's geometry and format require.
    */
    pub fn expected_data_len(&self) -> usize {
        self.pixel_format().buffer_size(self.width, self.height)
    }
}

impl FrameImage for CapturedFrame {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn buffer(&self) -> &[u8] {
        &self.data
    }
}
