use std::io::Cursor;

use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::{ImageBuffer, Rgb, RgbImage};

use crate::error::{OrchestratorError, OrchestratorResult};
use crate::types::image::ProjectiveTransform;

/// Coefficients `a..h` mapping an output pixel to the input image:
/// `x' = (a x + b y + c) / (g x + h y + 1)`, `y' = (d x + e y + f) / (g x + h y + 1)`
pub type PerspectiveCoefficients = [f64; 8];

/// Zoom relative to the viewport of the web application.
///
/// Zoom 1 fits the annotation image into the viewport, whatever the image resolution.
/// Halves are rounded away from zero and the result is never below 1.
pub fn effective_zoom(zoom: f64, (width, height): (u32, u32), viewport: (f64, f64)) -> u32 {
    let fit = (viewport.0 / f64::from(width.max(1))).min(viewport.1 / f64::from(height.max(1)));
    (zoom * fit).round().max(1.0) as u32
}

/// Zoom levels are positive finite multipliers of the viewport fit
pub fn validate_zoom(zoom: f64) -> OrchestratorResult<()> {
    if !(zoom.is_finite() && zoom > 0.0) {
        return Err(OrchestratorError::InvalidZoom(format!("zoom level must be a positive number, got {}", zoom)));
    }
    Ok(())
}

/// Size of the canvas rendered at effective zoom `factor`. The pixel count must fit in a `u32`.
pub fn canvas_size((width, height): (u32, u32), factor: u32) -> OrchestratorResult<(u32, u32)> {
    let too_large = || OrchestratorError::InvalidZoom(format!("{}x{} image at zoom {} is too large", width, height, factor));
    let canvas_width = width.checked_mul(factor).ok_or_else(too_large)?;
    let canvas_height = height.checked_mul(factor).ok_or_else(too_large)?;
    canvas_width.checked_mul(canvas_height).ok_or_else(too_large)?;
    Ok((canvas_width, canvas_height))
}

/// Scale the homogeneous transform so that the bottom-right entry is 1, compensate the
/// output grid being `zoom` times denser and keep the first eight entries.
pub fn normalize_transform(transform: &ProjectiveTransform, zoom: u32) -> OrchestratorResult<PerspectiveCoefficients> {
    if transform.iter().flatten().any(|v| !v.is_finite()) {
        return Err(OrchestratorError::InvalidTransform(format!("non-finite entry in {:?}", transform)));
    }
    let scale = transform[2][2];
    if scale == 0.0 {
        return Err(OrchestratorError::InvalidTransform(format!("bottom-right entry is zero in {:?}", transform)));
    }

    let zoom = f64::from(zoom);
    let mut coeffs = [0.0; 8];
    for (i, coeff) in coeffs.iter_mut().enumerate() {
        let (row, col) = (i / 3, i % 3);
        *coeff = transform[row][col] / scale;
        if col < 2 {
            *coeff /= zoom;
        }
    }
    Ok(coeffs)
}

/// Cubic convolution through `v1..v4` evaluated at `d` between `v2` and `v3`
fn cubic(v1: f64, v2: f64, v3: f64, v4: f64, d: f64) -> f64 {
    let p1 = v2;
    let p2 = -v1 + v3;
    let p3 = 2.0 * (v1 - v2) + v3 - v4;
    let p4 = -v1 + v2 - v3 + v4;
    p1 + d * (p2 + d * (p3 + d * p4))
}

fn sample_bicubic(src: &RgbImage, x: f64, y: f64) -> Option<Rgb<u8>> {
    let (width, height) = src.dimensions();
    if x < 0.0 || y < 0.0 || x >= f64::from(width) || y >= f64::from(height) {
        return None;
    }

    let (x, y) = (x - 0.5, y - 0.5);
    let (x0, y0) = (x.floor(), y.floor());
    let (dx, dy) = (x - x0, y - y0);
    let clip = |v: f64, size: u32| v.clamp(0.0, f64::from(size - 1)) as u32;
    let xs: [u32; 4] = std::array::from_fn(|i| clip(x0 + i as f64 - 1.0, width));
    let ys: [u32; 4] = std::array::from_fn(|i| clip(y0 + i as f64 - 1.0, height));

    let mut pixel = [0u8; 3];
    for (channel, value) in pixel.iter_mut().enumerate() {
        let rows: [f64; 4] = std::array::from_fn(|j| {
            let at = |i: usize| f64::from(src.get_pixel(xs[i], ys[j])[channel]);
            cubic(at(0), at(1), at(2), at(3), dx)
        });
        let v = cubic(rows[0], rows[1], rows[2], rows[3], dy);
        *value = v.clamp(0.0, 255.0) as u8;
    }
    Some(Rgb(pixel))
}

/// Resample `src` onto a `width` x `height` canvas. Pixels mapped outside `src` are black.
pub fn warp_perspective(src: &RgbImage, coeffs: &PerspectiveCoefficients, width: u32, height: u32) -> RgbImage {
    let [a, b, c, d, e, f, g, h] = *coeffs;
    ImageBuffer::from_fn(width, height, |x, y| {
        let (xo, yo) = (f64::from(x) + 0.5, f64::from(y) + 0.5);
        let w = g * xo + h * yo + 1.0;
        if w == 0.0 {
            return Rgb([0, 0, 0]);
        }
        let xi = (a * xo + b * yo + c) / w;
        let yi = (d * xo + e * yo + f) / w;
        sample_bicubic(src, xi, yi).unwrap_or(Rgb([0, 0, 0]))
    })
}

pub fn encode_jpeg(image: &RgbImage, quality: u8) -> OrchestratorResult<Bytes> {
    let mut buf = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buf, quality).encode_image(image)?;
    Ok(Bytes::from(buf.into_inner()))
}
