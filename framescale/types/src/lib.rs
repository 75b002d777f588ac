/*!
    Shared types for the framescale crate ecosystem.

    This crate defines the vocabulary that crosses crate boundaries: pixel
    formats and the colour-model mapping onto them, the captured-frame
    abstraction, timestamp rescaling, and the error taxonomy. It has no
    dependency on any scaling engine, so consumers can depend on it without
    pulling in conversion machinery.
*/

mod colour;
mod error;
mod format;
mod frame;
mod rational;

pub use colour::{ColourModel, SubpixelOrder};
pub use error::{Error, Result};
pub use format::PixelFormat;
pub use frame::{CapturedFrame, FrameImage};
pub use rational::{DeltaRescaler, Rational};
