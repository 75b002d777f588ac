/*!
    Engine pixel formats and the colour-model mapping onto them.
*/

use crate::{ColourModel, SubpixelOrder};

/**
    Pixel formats the scaling engine converts between.

    All formats here are packed single-plane layouts: the set a raw
    capture pipeline actually produces and consumes. Planar video formats
    stay on the decoder side of the pipeline and never reach this core.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Packed RGB, 24bpp.
    Rgb24,
    /// Packed BGR, 24bpp.
    Bgr24,
    /// Packed RGBA, 32bpp.
    Rgba,
    /// Packed BGRA, 32bpp.
    Bgra,
    /// Packed ARGB, 32bpp.
    Argb,
    /// Packed ABGR, 32bpp.
    Abgr,
    /// Grayscale, 8bpp.
    Gray8,
}

impl PixelFormat {
    /// Every format the engine knows about.
    pub const ALL: [PixelFormat; 7] = [
        Self::Rgb24,
        Self::Bgr24,
        Self::Rgba,
        Self::Bgra,
        Self::Argb,
        Self::Abgr,
        Self::Gray8,
    ];

    /**
        Returns the number of bytes per pixel.
    */
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Rgb24 | Self::Bgr24 => 3,
            Self::Rgba | Self::Bgra | Self::Argb | Self::Abgr => 4,
            Self::Gray8 => 1,
        }
    }

    /**
        Exact byte size of a frame of this format at the given geometry.

        Pure function of format and geometry; validation against caller
        buffers happens in the converter, not here.
    */
    pub const fn buffer_size(self, width: u32, height: u32) -> usize {
        width as usize * height as usize * self.bytes_per_pixel()
    }

    /**
        Returns true if this format carries an alpha channel.
    */
    pub const fn has_alpha(self) -> bool {
        matches!(self, Self::Rgba | Self::Bgra | Self::Argb | Self::Abgr)
    }

    /**
        Map an internal (colour model, subpixel order) pair to the engine
        pixel format.

        Unlisted orders fall back to the model's natural ordering: RGB for
        24-bit, RGBA for 32-bit. Grayscale ignores the order entirely. The
        mapping is total; both enums are closed, so there is no
        unrecognized-input failure mode.
    */
    pub fn from_colour(colour: ColourModel, order: SubpixelOrder) -> PixelFormat {
        tracing::debug!(?colour, ?order, "mapping colour model to pixel format");

        match colour {
            ColourModel::Rgb24 => match order {
                SubpixelOrder::Bgr => Self::Bgr24,
                _ => Self::Rgb24,
            },
            ColourModel::Rgb32 => match order {
                SubpixelOrder::Argb => Self::Argb,
                SubpixelOrder::Abgr => Self::Abgr,
                SubpixelOrder::Bgra => Self::Bgra,
                _ => Self::Rgba,
            },
            ColourModel::Gray8 => Self::Gray8,
        }
    }
}
