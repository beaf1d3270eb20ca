use crate::foundation::error::{RasterFxError, RasterFxResult};

/// Normalized 1D gaussian weights in Q16 fixed point (they sum to exactly `1 << 16`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct GaussianKernel {
    weights: Vec<u32>,
}

impl GaussianKernel {
    /// Kernel covering three standard deviations on each side, capped at `max_radius`.
    ///
    /// A zero `sigma` or a zero `max_radius` gives the identity kernel.
    pub(crate) fn for_sigma(sigma: f32, max_radius: u32) -> RasterFxResult<Self> {
        if !sigma.is_finite() || sigma < 0.0 {
            return Err(RasterFxError::validation(
                "blur std deviation must be finite and >= 0",
            ));
        }
        if sigma == 0.0 || max_radius == 0 {
            return Ok(Self {
                weights: vec![1 << 16],
            });
        }
        let radius = ((sigma * 3.0).ceil() as u32).clamp(1, max_radius);
        Self::build(radius, f64::from(sigma))
    }

    fn build(radius: u32, sigma: f64) -> RasterFxResult<Self> {
        let r = radius as i32;
        let denom = 2.0 * sigma * sigma;
        let weights_f: Vec<f64> = (-r..=r)
            .map(|i| {
                let x = f64::from(i);
                (-x * x / denom).exp()
            })
            .collect();
        let sum: f64 = weights_f.iter().sum();
        if sum <= 0.0 {
            return Err(RasterFxError::evaluation("gaussian kernel sum is zero"));
        }

        let mut weights: Vec<u32> = weights_f
            .iter()
            .map(|wf| ((wf / sum) * 65536.0).round().clamp(0.0, 65536.0) as u32)
            .collect();
        let acc: i64 = weights.iter().map(|&w| i64::from(w)).sum();
        let delta = 65536 - acc;
        if delta != 0 {
            let mid = weights.len() / 2;
            weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
        }
        Ok(Self { weights })
    }

    pub(crate) fn radius(&self) -> u32 {
        (self.weights.len() / 2) as u32
    }
}

/// Separable gaussian blur over a premultiplied RGBA8 plane; edges clamp.
pub(crate) fn blur_rgba8_premul(
    src: &[u8],
    dst: &mut [u8],
    width: u32,
    height: u32,
    kernel: &GaussianKernel,
) -> RasterFxResult<()> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| RasterFxError::evaluation("blur buffer size overflow"))?;
    if src.len() != expected_len || dst.len() != expected_len {
        return Err(RasterFxError::evaluation(
            "blur_rgba8_premul expects buffers matching width*height*4",
        ));
    }
    if kernel.radius() == 0 {
        dst.copy_from_slice(src);
        return Ok(());
    }

    let mut tmp = vec![0u8; expected_len];
    pass(src, &mut tmp, width, height, &kernel.weights, Axis::Horizontal);
    pass(&tmp, dst, width, height, &kernel.weights, Axis::Vertical);
    Ok(())
}

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

fn pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32], axis: Axis) {
    let radius = (k.len() / 2) as i32;
    let (w, h) = (width as i32, height as i32);
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let d = ki as i32 - radius;
                let (sx, sy) = match axis {
                    Axis::Horizontal => ((x + d).clamp(0, w - 1), y),
                    Axis::Vertical => (x, (y + d).clamp(0, h - 1)),
                };
                let idx = ((sy * w + sx) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    ((acc + 32768) >> 16).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/raster/blur.rs"]
mod tests;
