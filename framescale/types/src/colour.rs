/*!
    Internal colour description of captured frames.

    Capture sources describe their pixel layout in two parts: a coarse
    channel layout ([`ColourModel`]) and the byte ordering of those channels
    within a pixel ([`SubpixelOrder`]). The pair maps onto the scaling
    engine's canonical [`PixelFormat`](crate::PixelFormat).
*/

/**
    Coarse channel layout of a captured frame.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColourModel {
    /// Three 8-bit channels, 24bpp.
    Rgb24,
    /// Three 8-bit channels plus alpha, 32bpp.
    Rgb32,
    /// Single 8-bit luminance channel.
    Gray8,
}

/**
    Byte ordering of channels within a pixel.

    Only meaningful together with a [`ColourModel`]; a grayscale frame has
    no subpixel order and uses [`SubpixelOrder::None`].
*/
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SubpixelOrder {
    /// No ordering (single-channel formats).
    #[default]
    None,
    /// R, G, B.
    Rgb,
    /// B, G, R.
    Bgr,
    /// R, G, B, A.
    Rgba,
    /// B, G, R, A.
    Bgra,
    /// A, R, G, B.
    Argb,
    /// A, B, G, R.
    Abgr,
}

impl ColourModel {
    /**
        Returns the number of bytes per pixel for this model.
    */
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Rgb24 => 3,
            Self::Rgb32 => 4,
            Self::Gray8 => 1,
        }
    }
}
