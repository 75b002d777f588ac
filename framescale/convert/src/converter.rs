/*!
    The frame converter.
*/

use framescale_engine::{ContextSpec, FrameDescriptor, ScaleAlgorithm, ScaleEngine, SoftwareEngine};
use framescale_types::{Error, FrameImage, PixelFormat, Result};

/// Stored parameters for the defaults-based conversion calls.
#[derive(Clone, Copy, Debug)]
struct Defaults {
    input_format: PixelFormat,
    output_format: PixelFormat,
    width: u32,
    height: u32,
}

/**
    Converts raw frames between pixel formats.

    One converter per conversion pipeline. The engine's conversion context
    is created lazily on the first call and cached; it is rebuilt only when
    the (width, height, input format, output format) tuple changes, so the
    steady-state per-frame path does no context work at all.

    Input and output buffers are borrowed for the duration of a call only;
    the converter rebinds its frame descriptors to fresh buffers on every
    call and never retains them.
*/
pub struct FrameConverter<E: ScaleEngine = SoftwareEngine> {
    engine: E,
    defaults: Option<Defaults>,
    input_desc: FrameDescriptor,
    output_desc: FrameDescriptor,
    context: Option<(ContextSpec, E::Context)>,
}

impl Default for FrameConverter<SoftwareEngine> {
    fn default() -> Self {
        Self::new(SoftwareEngine::new())
    }
}

impl<E: ScaleEngine> FrameConverter<E> {
    /**
        Create a converter backed by the given engine.
    */
    pub fn new(engine: E) -> Self {
        tracing::debug!("frame converter created");
        Self {
            engine,
            defaults: None,
            input_desc: FrameDescriptor::new(),
            output_desc: FrameDescriptor::new(),
            context: None,
        }
    }

    /// The engine this converter runs on.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// True once `set_defaults` has been called.
    pub fn has_defaults(&self) -> bool {
        self.defaults.is_some()
    }

    /**
        Store default conversion parameters for the `*_defaults` calls.

        No validation happens here; the stored values are validated by the
        conversion call that eventually uses them, exactly like explicitly
        passed parameters. Always succeeds; calling again replaces the
        previous defaults.
    */
    pub fn set_defaults(
        &mut self,
        input_format: PixelFormat,
        output_format: PixelFormat,
        width: u32,
        height: u32,
    ) {
        self.defaults = Some(Defaults {
            input_format,
            output_format,
            width,
            height,
        });
    }

    /**
        Convert one raw frame from `in_buffer` into `out_buffer`.

        The input buffer must be exactly the size `input_format` requires
        at the given geometry. The output buffer must be at least the size
        `output_format` requires, since callers may over-allocate for padding.
        On success the output buffer holds the converted frame and the
        conversion context stays cached for the next call.

        Every failure class gets its own [`Error`] variant so the pipeline
        driver can decide per class whether to skip the frame, reset the
        converter, or stop the stream. All failures leave the converter
        usable.
    */
    pub fn convert(
        &mut self,
        in_buffer: &[u8],
        out_buffer: &mut [u8],
        input_format: PixelFormat,
        output_format: PixelFormat,
        width: u32,
        height: u32,
    ) -> Result<()> {
        if in_buffer.is_empty() || out_buffer.is_empty() {
            tracing::error!("empty input or output buffer");
            return Err(Error::InvalidBuffer);
        }

        if width == 0 || height == 0 {
            tracing::error!(width, height, "invalid frame geometry");
            return Err(Error::InvalidGeometry { width, height });
        }

        // Advisory only: the engine may still convert through an internal
        // fallback path, so an unsupported endpoint is not a rejection.
        if !self.engine.supports_input(input_format) {
            tracing::warn!(?input_format, "engine does not support the input format");
        }
        if !self.engine.supports_output(output_format) {
            tracing::warn!(?output_format, "engine does not support the output format");
        }

        let expected = input_format.buffer_size(width, height);
        if in_buffer.len() != expected {
            tracing::error!(
                expected,
                actual = in_buffer.len(),
                "input buffer size does not match the input format"
            );
            return Err(Error::InputSizeMismatch {
                expected,
                actual: in_buffer.len(),
            });
        }

        let required = output_format.buffer_size(width, height);
        if out_buffer.len() < required {
            tracing::error!(
                required,
                available = out_buffer.len(),
                "output buffer is undersized for the output format"
            );
            return Err(Error::OutputUndersized {
                required,
                available: out_buffer.len(),
            });
        }

        let spec = ContextSpec {
            src_width: width,
            src_height: height,
            src_format: input_format,
            dst_width: width,
            dst_height: height,
            dst_format: output_format,
            algorithm: ScaleAlgorithm::FastBilinear,
        };

        let cached = matches!(&self.context, Some((current, _)) if *current == spec);
        if !cached {
            let prev = self.context.take().map(|(_, ctx)| ctx);
            match self.engine.rebuild_context(prev, spec) {
                Ok(ctx) => self.context = Some((spec, ctx)),
                Err(e) => {
                    tracing::error!(error = %e, "failed getting conversion context");
                    return Err(e);
                }
            }
        }

        self.input_desc
            .bind(input_format, width, height, in_buffer.len())
            .map_err(|rejection| {
                tracing::error!(%rejection, "failed binding input frame");
                Error::InputBinding(rejection.to_string())
            })?;
        self.output_desc
            .bind(output_format, width, height, out_buffer.len())
            .map_err(|rejection| {
                tracing::error!(%rejection, "failed binding output frame");
                Error::OutputBinding(rejection.to_string())
            })?;

        let Some((_, context)) = self.context.as_mut() else {
            return Err(Error::Context("conversion context missing".into()));
        };
        self.engine
            .scale(
                context,
                &self.input_desc,
                in_buffer,
                &self.output_desc,
                out_buffer,
                height,
            )
            .inspect_err(|e| tracing::error!(error = %e, "scale conversion failed"))
    }

    /**
        Convert a captured image into `out_buffer`.

        The image's own geometry must exactly match the requested one;
        width and height mismatches are reported as distinct errors. The
        image's buffer then goes through [`convert`](Self::convert)
        unchanged.
    */
    pub fn convert_image<I: FrameImage + ?Sized>(
        &mut self,
        image: &I,
        out_buffer: &mut [u8],
        input_format: PixelFormat,
        output_format: PixelFormat,
        width: u32,
        height: u32,
    ) -> Result<()> {
        if image.width() != width {
            tracing::error!(
                image = image.width(),
                requested = width,
                "source image width differs"
            );
            return Err(Error::WidthMismatch {
                image: image.width(),
                requested: width,
            });
        }

        if image.height() != height {
            tracing::error!(
                image = image.height(),
                requested = height,
                "source image height differs"
            );
            return Err(Error::HeightMismatch {
                image: image.height(),
                requested: height,
            });
        }

        self.convert(
            image.buffer(),
            out_buffer,
            input_format,
            output_format,
            width,
            height,
        )
    }

    /**
        Convert one raw frame using the stored defaults.

        Fails with [`Error::DefaultsNotSet`] unless
        [`set_defaults`](Self::set_defaults) has been called.
    */
    pub fn convert_defaults(&mut self, in_buffer: &[u8], out_buffer: &mut [u8]) -> Result<()> {
        let Some(defaults) = self.defaults else {
            tracing::error!("defaults are not set");
            return Err(Error::DefaultsNotSet);
        };

        self.convert(
            in_buffer,
            out_buffer,
            defaults.input_format,
            defaults.output_format,
            defaults.width,
            defaults.height,
        )
    }

    /**
        Convert a captured image using the stored defaults.
    */
    pub fn convert_image_defaults<I: FrameImage + ?Sized>(
        &mut self,
        image: &I,
        out_buffer: &mut [u8],
    ) -> Result<()> {
        let Some(defaults) = self.defaults else {
            tracing::error!("defaults are not set");
            return Err(Error::DefaultsNotSet);
        };

        self.convert_image(
            image,
            out_buffer,
            defaults.input_format,
            defaults.output_format,
            defaults.width,
            defaults.height,
        )
    }
}

impl<E: ScaleEngine> std::fmt::Debug for FrameConverter<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameConverter")
            .field("defaults", &self.defaults)
            .field("context_cached", &self.context.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use framescale_types::CapturedFrame;
    use framescale_types::{ColourModel, SubpixelOrder};

    use super::*;

    /// Engine double that counts context rebuilds and scale runs.
    struct FakeEngine {
        supports: bool,
        fail_context: Cell<bool>,
        fail_scale: bool,
        rebuilds: Cell<usize>,
        scales: Cell<usize>,
    }

    impl Default for FakeEngine {
        fn default() -> Self {
            Self {
                supports: true,
                fail_context: Cell::new(false),
                fail_scale: false,
                rebuilds: Cell::new(0),
                scales: Cell::new(0),
            }
        }
    }

    impl ScaleEngine for FakeEngine {
        type Context = u32;

        fn supports_input(&self, _format: PixelFormat) -> bool {
            self.supports
        }

        fn supports_output(&self, _format: PixelFormat) -> bool {
            self.supports
        }

        fn rebuild_context(&self, prev: Option<u32>, _spec: ContextSpec) -> Result<u32> {
            if self.fail_context.get() {
                return Err(Error::Context("fake engine refusal".into()));
            }
            self.rebuilds.set(self.rebuilds.get() + 1);
            Ok(prev.unwrap_or(0) + 1)
        }

        fn scale(
            &self,
            _context: &mut u32,
            _src: &FrameDescriptor,
            _src_data: &[u8],
            _dst: &FrameDescriptor,
            _dst_data: &mut [u8],
            _rows: u32,
        ) -> Result<()> {
            if self.fail_scale {
                return Err(Error::Scale("fake engine failure".into()));
            }
            self.scales.set(self.scales.get() + 1);
            Ok(())
        }
    }

    const IN: PixelFormat = PixelFormat::Rgb24;
    const OUT: PixelFormat = PixelFormat::Gray8;

    fn fake_converter() -> FrameConverter<FakeEngine> {
        FrameConverter::new(FakeEngine::default())
    }

    #[test]
    fn empty_buffer_is_rejected_before_engine_calls() {
        let mut c = fake_converter();
        let mut out = [0u8; 4];

        let err = c.convert(&[], &mut out, IN, OUT, 2, 2).unwrap_err();
        assert!(matches!(err, Error::InvalidBuffer));

        let err = c.convert(&[0; 12], &mut [], IN, OUT, 2, 2).unwrap_err();
        assert!(matches!(err, Error::InvalidBuffer));

        assert_eq!(c.engine().rebuilds.get(), 0);
        assert_eq!(c.engine().scales.get(), 0);
    }

    #[test]
    fn zero_geometry_is_rejected_before_size_checks() {
        let mut c = fake_converter();
        let mut out = [0u8; 4];

        let err = c.convert(&[0; 12], &mut out, IN, OUT, 0, 2).unwrap_err();
        assert!(matches!(err, Error::InvalidGeometry { width: 0, .. }));

        let err = c.convert(&[0; 12], &mut out, IN, OUT, 2, 0).unwrap_err();
        assert!(matches!(err, Error::InvalidGeometry { height: 0, .. }));

        assert_eq!(c.engine().rebuilds.get(), 0);
        assert_eq!(c.engine().scales.get(), 0);
    }

    #[test]
    fn input_size_must_match_exactly() {
        let mut c = fake_converter();
        let mut out = [0u8; 4];

        // 2x2 RGB24 requires exactly 12 bytes; one short and one long both
        // fail, exact succeeds.
        let err = c.convert(&[0; 11], &mut out, IN, OUT, 2, 2).unwrap_err();
        assert!(matches!(
            err,
            Error::InputSizeMismatch {
                expected: 12,
                actual: 11
            }
        ));

        let err = c.convert(&[0; 13], &mut out, IN, OUT, 2, 2).unwrap_err();
        assert!(matches!(err, Error::InputSizeMismatch { .. }));
        assert_eq!(c.engine().scales.get(), 0);

        c.convert(&[0; 12], &mut out, IN, OUT, 2, 2).unwrap();
        assert_eq!(c.engine().scales.get(), 1);
    }

    #[test]
    fn output_buffer_may_be_oversized_but_not_undersized() {
        let mut c = fake_converter();

        let err = c
            .convert(&[0; 12], &mut [0u8; 3], IN, OUT, 2, 2)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::OutputUndersized {
                required: 4,
                available: 3
            }
        ));
        assert_eq!(c.engine().scales.get(), 0);

        c.convert(&[0; 12], &mut [0u8; 4], IN, OUT, 2, 2).unwrap();
        c.convert(&[0; 12], &mut [0u8; 64], IN, OUT, 2, 2).unwrap();
        assert_eq!(c.engine().scales.get(), 2);
    }

    #[test]
    fn context_is_cached_across_identical_calls() {
        let mut c = fake_converter();
        let mut out = [0u8; 4];

        c.convert(&[0; 12], &mut out, IN, OUT, 2, 2).unwrap();
        c.convert(&[0; 12], &mut out, IN, OUT, 2, 2).unwrap();
        assert_eq!(c.engine().rebuilds.get(), 1);
        assert_eq!(c.engine().scales.get(), 2);
    }

    #[test]
    fn any_tuple_change_rebuilds_exactly_once() {
        let mut c = fake_converter();

        c.convert(&[0; 12], &mut [0u8; 4], IN, OUT, 2, 2).unwrap();
        assert_eq!(c.engine().rebuilds.get(), 1);

        // Width change.
        c.convert(&[0; 24], &mut [0u8; 8], IN, OUT, 4, 2).unwrap();
        assert_eq!(c.engine().rebuilds.get(), 2);

        // Height change.
        c.convert(&[0; 48], &mut [0u8; 16], IN, OUT, 4, 4).unwrap();
        assert_eq!(c.engine().rebuilds.get(), 3);

        // Input format change.
        c.convert(&[0; 64], &mut [0u8; 16], PixelFormat::Bgra, OUT, 4, 4)
            .unwrap();
        assert_eq!(c.engine().rebuilds.get(), 4);

        // Output format change.
        c.convert(
            &[0; 64],
            &mut [0u8; 48],
            PixelFormat::Bgra,
            PixelFormat::Rgb24,
            4,
            4,
        )
        .unwrap();
        assert_eq!(c.engine().rebuilds.get(), 5);

        // And back to steady state: no further rebuilds.
        c.convert(
            &[0; 64],
            &mut [0u8; 48],
            PixelFormat::Bgra,
            PixelFormat::Rgb24,
            4,
            4,
        )
        .unwrap();
        assert_eq!(c.engine().rebuilds.get(), 5);
    }

    #[test]
    fn context_failure_is_recoverable() {
        let mut c = fake_converter();
        let mut out = [0u8; 4];

        c.engine().fail_context.set(true);
        let err = c.convert(&[0; 12], &mut out, IN, OUT, 2, 2).unwrap_err();
        assert!(matches!(err, Error::Context(_)));

        c.engine().fail_context.set(false);
        c.convert(&[0; 12], &mut out, IN, OUT, 2, 2).unwrap();
        assert_eq!(c.engine().scales.get(), 1);
    }

    #[test]
    fn scale_failure_keeps_converter_usable() {
        let mut c = FrameConverter::new(FakeEngine {
            fail_scale: true,
            ..FakeEngine::default()
        });
        let mut out = [0u8; 4];

        let err = c.convert(&[0; 12], &mut out, IN, OUT, 2, 2).unwrap_err();
        assert!(matches!(err, Error::Scale(_)));

        // The context built fine and stays cached for the next attempt.
        assert_eq!(c.engine().rebuilds.get(), 1);
        let err = c.convert(&[0; 12], &mut out, IN, OUT, 2, 2).unwrap_err();
        assert!(matches!(err, Error::Scale(_)));
        assert_eq!(c.engine().rebuilds.get(), 1);
    }

    #[test]
    fn unsupported_formats_are_advisory_only() {
        let mut c = FrameConverter::new(FakeEngine {
            supports: false,
            ..FakeEngine::default()
        });
        let mut out = [0u8; 4];

        // Conversion proceeds regardless of the advisory answer.
        c.convert(&[0; 12], &mut out, IN, OUT, 2, 2).unwrap();
        assert_eq!(c.engine().scales.get(), 1);
    }

    #[test]
    fn defaults_must_be_set_first() {
        let mut c = fake_converter();
        let mut out = [0u8; 4];

        let err = c.convert_defaults(&[0; 12], &mut out).unwrap_err();
        assert!(matches!(err, Error::DefaultsNotSet));

        let frame = CapturedFrame::new(
            vec![0; 12],
            2,
            2,
            ColourModel::Rgb24,
            SubpixelOrder::Rgb,
        );
        let err = c.convert_image_defaults(&frame, &mut out).unwrap_err();
        assert!(matches!(err, Error::DefaultsNotSet));

        assert_eq!(c.engine().rebuilds.get(), 0);
        assert_eq!(c.engine().scales.get(), 0);
        assert!(!c.has_defaults());
    }

    #[test]
    fn defaults_behave_like_explicit_parameters() {
        let input = [0x40u8; 12];
        let mut explicit_out = [0u8; 4];
        let mut defaults_out = [0u8; 4];

        let mut explicit = FrameConverter::default();
        explicit
            .convert(&input, &mut explicit_out, IN, OUT, 2, 2)
            .unwrap();

        let mut defaulted = FrameConverter::default();
        defaulted.set_defaults(IN, OUT, 2, 2);
        assert!(defaulted.has_defaults());
        defaulted
            .convert_defaults(&input, &mut defaults_out)
            .unwrap();

        assert_eq!(explicit_out, defaults_out);
    }

    #[test]
    fn image_geometry_must_match_exactly() {
        let mut c = fake_converter();
        let mut out = [0u8; 4];
        let frame = CapturedFrame::new(
            vec![0; 27],
            3,
            3,
            ColourModel::Rgb24,
            SubpixelOrder::Rgb,
        );

        let err = c.convert_image(&frame, &mut out, IN, OUT, 2, 3).unwrap_err();
        assert!(matches!(
            err,
            Error::WidthMismatch {
                image: 3,
                requested: 2
            }
        ));

        let err = c.convert_image(&frame, &mut out, IN, OUT, 3, 2).unwrap_err();
        assert!(matches!(
            err,
            Error::HeightMismatch {
                image: 3,
                requested: 2
            }
        ));

        // The buffer-based path was never reached.
        assert_eq!(c.engine().rebuilds.get(), 0);
        assert_eq!(c.engine().scales.get(), 0);
    }

    #[test]
    fn matching_image_delegates_to_buffer_path() {
        let mut c = fake_converter();
        let mut out = [0u8; 9];
        let frame = CapturedFrame::new(
            vec![0; 27],
            3,
            3,
            ColourModel::Rgb24,
            SubpixelOrder::Rgb,
        );

        c.convert_image(&frame, &mut out, IN, OUT, 3, 3).unwrap();
        assert_eq!(c.engine().scales.get(), 1);
    }
}
