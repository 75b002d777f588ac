/*!
    Raw-frame pixel format conversion for the framescale crate ecosystem.

    This is the crate a capture pipeline talks to: one [`FrameConverter`]
    per conversion path, fed one raw frame per call. The converter
    validates the caller's buffers, keeps the engine's conversion context
    cached across calls with identical parameters, and rebuilds it only
    when the (width, height, input format, output format) tuple changes;
    context construction is the expensive part, per-frame scaling is not.

    # Example

    ```
    use framescale_convert::FrameConverter;
    use framescale_types::PixelFormat;

    framescale_engine::init();

    let mut converter = FrameConverter::default();
    converter.set_defaults(PixelFormat::Rgb24, PixelFormat::Gray8, 64, 48);

    let rgb = vec![0u8; PixelFormat::Rgb24.buffer_size(64, 48)];
    let mut gray = vec![0u8; PixelFormat::Gray8.buffer_size(64, 48)];
    converter.convert_defaults(&rgb, &mut gray)?;
    # Ok::<(), framescale_types::Error>(())
    ```

    A converter is single-threaded by construction: every conversion takes
    `&mut self`. Run one converter per camera/stream; independent instances
    share nothing beyond the process-wide [`framescale_engine::init`].
*/

mod converter;

pub use converter::FrameConverter;

pub use framescale_engine::{ScaleAlgorithm, ScaleEngine, SoftwareEngine};
pub use framescale_types::{Error, PixelFormat, Result};
