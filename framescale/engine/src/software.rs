/*!
    Pure-Rust scaling engine.

    Converts between the packed engine formats and rescales geometry with
    nearest-neighbor or bilinear interpolation. Every [`PixelFormat`] is a
    native endpoint, so the advisory support queries always answer yes.
*/

use framescale_types::{Error, PixelFormat, Result};

use crate::{ContextSpec, FrameDescriptor, ScaleAlgorithm, ScaleEngine};

/**
    Engine state for one fixed conversion tuple.

    Owns the scratch frame used when a conversion changes both format and
    geometry. Rebuilding from a previous context keeps the scratch
    allocation alive so steady-state reconversion never reallocates.
*/
#[derive(Debug)]
pub struct SoftwareContext {
    spec: ContextSpec,
    scratch: Vec<u8>,
}

/**
    The in-process software scaling engine.
*/
#[derive(Clone, Copy, Debug, Default)]
pub struct SoftwareEngine;

impl SoftwareEngine {
    pub fn new() -> Self {
        Self
    }
}

impl ScaleEngine for SoftwareEngine {
    type Context = SoftwareContext;

    fn supports_input(&self, _format: PixelFormat) -> bool {
        true
    }

    fn supports_output(&self, _format: PixelFormat) -> bool {
        true
    }

    fn rebuild_context(
        &self,
        prev: Option<SoftwareContext>,
        spec: ContextSpec,
    ) -> Result<SoftwareContext> {
        if spec.src_width == 0 || spec.src_height == 0 || spec.dst_width == 0 || spec.dst_height == 0
        {
            return Err(Error::Context(format!(
                "zero dimension in context spec {spec:?}"
            )));
        }

        let mut scratch = prev.map(|c| c.scratch).unwrap_or_default();
        if spec.src_format != spec.dst_format
            && (spec.src_width != spec.dst_width || spec.src_height != spec.dst_height)
        {
            // Intermediate frame: destination format at source geometry.
            scratch.resize(spec.dst_format.buffer_size(spec.src_width, spec.src_height), 0);
        } else {
            scratch.clear();
        }

        Ok(SoftwareContext { spec, scratch })
    }

    fn scale(
        &self,
        context: &mut SoftwareContext,
        src: &FrameDescriptor,
        src_data: &[u8],
        dst: &FrameDescriptor,
        dst_data: &mut [u8],
        rows: u32,
    ) -> Result<()> {
        let spec = context.spec;

        if src.format() != Some(spec.src_format)
            || src.width() != Some(spec.src_width)
            || src.height() != Some(spec.src_height)
        {
            return Err(Error::Scale("input descriptor does not match context".into()));
        }
        if dst.format() != Some(spec.dst_format)
            || dst.width() != Some(spec.dst_width)
            || dst.height() != Some(spec.dst_height)
        {
            return Err(Error::Scale(
                "output descriptor does not match context".into(),
            ));
        }
        if rows != spec.src_height {
            return Err(Error::Scale(format!(
                "partial-frame scaling not supported: {rows} rows of {}",
                spec.src_height
            )));
        }

        let src_size = spec.src_format.buffer_size(spec.src_width, spec.src_height);
        let dst_size = spec.dst_format.buffer_size(spec.dst_width, spec.dst_height);
        if src_data.len() < src_size || dst_data.len() < dst_size {
            return Err(Error::Scale("bound buffer shorter than its layout".into()));
        }
        let src_data = &src_data[..src_size];
        let dst_data = &mut dst_data[..dst_size];

        let same_format = spec.src_format == spec.dst_format;
        let same_geometry = spec.src_width == spec.dst_width && spec.src_height == spec.dst_height;

        match (same_format, same_geometry) {
            (true, true) => dst_data.copy_from_slice(src_data),
            (false, true) => convert_pixels(
                spec.src_format,
                spec.dst_format,
                src_data,
                dst_data,
                spec.src_width as usize * spec.src_height as usize,
            ),
            (true, false) => scale_packed(
                src_data,
                spec.src_width as usize,
                spec.src_height as usize,
                dst_data,
                spec.dst_width as usize,
                spec.dst_height as usize,
                spec.src_format.bytes_per_pixel(),
                spec.algorithm,
            ),
            (false, false) => {
                convert_pixels(
                    spec.src_format,
                    spec.dst_format,
                    src_data,
                    &mut context.scratch,
                    spec.src_width as usize * spec.src_height as usize,
                );
                scale_packed(
                    &context.scratch,
                    spec.src_width as usize,
                    spec.src_height as usize,
                    dst_data,
                    spec.dst_width as usize,
                    spec.dst_height as usize,
                    spec.dst_format.bytes_per_pixel(),
                    spec.algorithm,
                );
            }
        }

        Ok(())
    }
}

/// Byte offsets of the R, G, B and alpha channels within one packed pixel.
#[derive(Clone, Copy)]
struct Channels {
    bpp: usize,
    r: usize,
    g: usize,
    b: usize,
    a: Option<usize>,
}

fn channels(format: PixelFormat) -> Option<Channels> {
    // Gray8 has no channel table and is handled separately.
    let c = match format {
        PixelFormat::Rgb24 => Channels { bpp: 3, r: 0, g: 1, b: 2, a: None },
        PixelFormat::Bgr24 => Channels { bpp: 3, r: 2, g: 1, b: 0, a: None },
        PixelFormat::Rgba => Channels { bpp: 4, r: 0, g: 1, b: 2, a: Some(3) },
        PixelFormat::Bgra => Channels { bpp: 4, r: 2, g: 1, b: 0, a: Some(3) },
        PixelFormat::Argb => Channels { bpp: 4, r: 1, g: 2, b: 3, a: Some(0) },
        PixelFormat::Abgr => Channels { bpp: 4, r: 3, g: 2, b: 1, a: Some(0) },
        PixelFormat::Gray8 => return None,
    };
    Some(c)
}

/// Integer BT.601 full-range luma.
#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((77 * r as u32 + 150 * g as u32 + 29 * b as u32) >> 8) as u8
}

fn convert_pixels(
    src_format: PixelFormat,
    dst_format: PixelFormat,
    src: &[u8],
    dst: &mut [u8],
    pixels: usize,
) {
    match (channels(src_format), channels(dst_format)) {
        (None, None) => dst[..pixels].copy_from_slice(&src[..pixels]),
        (None, Some(dc)) => {
            for i in 0..pixels {
                let y = src[i];
                let out = &mut dst[i * dc.bpp..(i + 1) * dc.bpp];
                out[dc.r] = y;
                out[dc.g] = y;
                out[dc.b] = y;
                if let Some(a) = dc.a {
                    out[a] = 255;
                }
            }
        }
        (Some(sc), None) => {
            for i in 0..pixels {
                let px = &src[i * sc.bpp..(i + 1) * sc.bpp];
                dst[i] = luma(px[sc.r], px[sc.g], px[sc.b]);
            }
        }
        (Some(sc), Some(dc)) => {
            for i in 0..pixels {
                let px = &src[i * sc.bpp..(i + 1) * sc.bpp];
                let out = &mut dst[i * dc.bpp..(i + 1) * dc.bpp];
                out[dc.r] = px[sc.r];
                out[dc.g] = px[sc.g];
                out[dc.b] = px[sc.b];
                if let Some(da) = dc.a {
                    out[da] = match sc.a {
                        Some(sa) => px[sa],
                        None => 255,
                    };
                }
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn scale_packed(
    input: &[u8],
    in_w: usize,
    in_h: usize,
    output: &mut [u8],
    out_w: usize,
    out_h: usize,
    bpp: usize,
    algorithm: ScaleAlgorithm,
) {
    match algorithm {
        ScaleAlgorithm::Nearest => {
            for out_y in 0..out_h {
                let in_y = (out_y * in_h / out_h).min(in_h - 1);

                for out_x in 0..out_w {
                    let in_x = (out_x * in_w / out_w).min(in_w - 1);

                    let src_offset = (in_y * in_w + in_x) * bpp;
                    let dst_offset = (out_y * out_w + out_x) * bpp;
                    output[dst_offset..dst_offset + bpp]
                        .copy_from_slice(&input[src_offset..src_offset + bpp]);
                }
            }
        }
        // The software kernels make no speed distinction between the two
        // bilinear modes.
        ScaleAlgorithm::FastBilinear | ScaleAlgorithm::Bilinear => {
            let x_ratio = (in_w as f32 - 1.0) / (out_w as f32).max(1.0);
            let y_ratio = (in_h as f32 - 1.0) / (out_h as f32).max(1.0);

            for out_y in 0..out_h {
                let src_y = out_y as f32 * y_ratio;
                let y0 = src_y.floor() as usize;
                let y1 = (y0 + 1).min(in_h - 1);
                let y_frac = src_y - y0 as f32;

                for out_x in 0..out_w {
                    let src_x = out_x as f32 * x_ratio;
                    let x0 = src_x.floor() as usize;
                    let x1 = (x0 + 1).min(in_w - 1);
                    let x_frac = src_x - x0 as f32;

                    for c in 0..bpp {
                        let p00 = input[(y0 * in_w + x0) * bpp + c] as f32;
                        let p10 = input[(y0 * in_w + x1) * bpp + c] as f32;
                        let p01 = input[(y1 * in_w + x0) * bpp + c] as f32;
                        let p11 = input[(y1 * in_w + x1) * bpp + c] as f32;

                        let top = p00 + x_frac * (p10 - p00);
                        let bottom = p01 + x_frac * (p11 - p01);
                        let value = top + y_frac * (bottom - top);

                        output[(out_y * out_w + out_x) * bpp + c] = value.round() as u8;
                    }
                }
            }
        }
    }
}
