/*!
    Frame descriptors: binding caller buffers to a pixel layout.
*/

use std::fmt;

use framescale_types::PixelFormat;

/**
    Binding of a raw byte buffer's layout to a pixel format and geometry.

    A converter allocates its two descriptor shells once and rebinds them
    to the caller's buffers on every conversion call; the buffers
    themselves are borrowed only for the duration of that call. All engine
    formats are packed single-plane, so the layout is a single stride.
*/
#[derive(Debug, Default)]
pub struct FrameDescriptor {
    bound: Option<Binding>,
}

#[derive(Clone, Copy, Debug)]
struct Binding {
    format: PixelFormat,
    width: u32,
    height: u32,
    stride: usize,
}

/**
    Why a buffer could not be bound to a descriptor.
*/
#[derive(Clone, Copy, Debug)]
pub struct BindRejection {
    pub required: usize,
    pub available: usize,
}

impl fmt::Display for BindRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "buffer holds {} bytes, layout requires {}",
            self.available, self.required
        )
    }
}

impl FrameDescriptor {
    /**
        Create an unbound descriptor shell.
    */
    pub fn new() -> Self {
        Self::default()
    }

    /**
        Bind a buffer of `buffer_len` bytes to the given format and
        geometry, replacing any previous binding.

        Fails if the buffer cannot hold one full frame of the layout; the
        previous binding is cleared either way.
    */
    pub fn bind(
        &mut self,
        format: PixelFormat,
        width: u32,
        height: u32,
        buffer_len: usize,
    ) -> Result<(), BindRejection> {
        self.bound = None;

        let stride = width as usize * format.bytes_per_pixel();
        let required = stride * height as usize;
        if buffer_len < required {
            return Err(BindRejection {
                required,
                available: buffer_len,
            });
        }

        self.bound = Some(Binding {
            format,
            width,
            height,
            stride,
        });
        Ok(())
    }

    /// Pixel format of the current binding, if bound.
    pub fn format(&self) -> Option<PixelFormat> {
        self.bound.map(|b| b.format)
    }

    /// Width of the current binding in pixels, if bound.
    pub fn width(&self) -> Option<u32> {
        self.bound.map(|b| b.width)
    }

    /// Height of the current binding in pixels, if bound.
    pub fn height(&self) -> Option<u32> {
        self.bound.map(|b| b.height)
    }

    /// Row stride of the current binding in bytes, if bound.
    pub fn stride(&self) -> Option<usize> {
        self.bound.map(|b| b.stride)
    }

    /// True once `bind` has succeeded.
    pub fn is_bound(&self) -> bool {
        self.bound.is_some()
    }
}
