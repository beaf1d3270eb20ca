use crate::foundation::core::{Point32, Rect32};
use crate::foundation::error::{RasterFxError, RasterFxResult};
use crate::foundation::math::{mul_div255_u8, unit_to_u8};
use crate::transform::affine::Matrix;

/// One premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Borrowed premultiplied RGBA8 plane with validated dimensions.
pub struct Plane<T> {
    data: T,
    width: u32,
    height: u32,
}

impl<'a> Plane<&'a [u8]> {
    /// Read-only plane; fails unless `data` is exactly `width * height * 4` bytes.
    pub fn new(data: &'a [u8], width: u32, height: u32) -> RasterFxResult<Self> {
        check_len(data.len(), width, height)?;
        Ok(Self {
            data,
            width,
            height,
        })
    }
}

impl<'a> Plane<&'a mut [u8]> {
    /// Writable plane; fails unless `data` is exactly `width * height * 4` bytes.
    pub fn new_mut(data: &'a mut [u8], width: u32, height: u32) -> RasterFxResult<Self> {
        check_len(data.len(), width, height)?;
        Ok(Self {
            data,
            width,
            height,
        })
    }
}

fn check_len(len: usize, width: u32, height: u32) -> RasterFxResult<()> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| RasterFxError::evaluation("raster plane size overflow"))?;
    if len != expected {
        return Err(RasterFxError::evaluation(
            "raster plane expects data matching width*height*4",
        ));
    }
    Ok(())
}

fn px_at(data: &[u8], idx: usize) -> PremulRgba8 {
    [data[idx], data[idx + 1], data[idx + 2], data[idx + 3]]
}

/// Source-over of one premultiplied pixel, with `src` scaled by `opacity`.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let op = unit_to_u8(opacity);
    if op == 0 || src[3] == 0 {
        return dst;
    }

    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Per-pixel source-over of two equal-length planes.
pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> RasterFxResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(RasterFxError::evaluation(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Source-over `src` with its top-left corner at `(x, y)` in `dst`. Parts of `src` that fall
/// outside `dst` are dropped.
pub fn over_at_in_place(
    mut dst: Plane<&mut [u8]>,
    src: Plane<&[u8]>,
    x: i32,
    y: i32,
) -> RasterFxResult<()> {
    let (dw, dh) = (i64::from(dst.width), i64::from(dst.height));
    let (sw, sh) = (i64::from(src.width), i64::from(src.height));
    let (x, y) = (i64::from(x), i64::from(y));

    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + sw).min(dw);
    let y1 = (y + sh).min(dh);
    if x0 >= x1 || y0 >= y1 {
        return Ok(());
    }

    let span = ((x1 - x0) * 4) as usize;
    for dy in y0..y1 {
        let sy = dy - y;
        let d_start = ((dy * dw + x0) * 4) as usize;
        let s_start = ((sy * sw + (x0 - x)) * 4) as usize;
        over_in_place(
            &mut dst.data[d_start..d_start + span],
            &src.data[s_start..s_start + span],
            1.0,
        )?;
    }
    Ok(())
}

/// Source-over `src` through `transform` using nearest-neighbor inverse mapping of
/// destination pixel centers. Only destination pixels whose centers pass `coverage` are
/// touched. A singular transform draws nothing.
pub fn over_transformed_in_place(
    mut dst: Plane<&mut [u8]>,
    src: Plane<&[u8]>,
    transform: &Matrix,
    opacity: f32,
    coverage: &dyn Fn(f32, f32) -> bool,
) -> RasterFxResult<()> {
    let Some(inverse) = transform.inverted() else {
        return Ok(());
    };
    if unit_to_u8(opacity) == 0 {
        return Ok(());
    }

    let src_rect = Rect32::new(0.0, 0.0, src.width as f32, src.height as f32);
    let bounds = transform.transform_rectangle(src_rect);
    let x0 = bounds.left().floor().max(0.0) as u32;
    let y0 = bounds.top().floor().max(0.0) as u32;
    let x1 = (bounds.right().ceil().max(0.0) as u32).min(dst.width);
    let y1 = (bounds.bottom().ceil().max(0.0) as u32).min(dst.height);

    for y in y0..y1 {
        for x in x0..x1 {
            let (cx, cy) = (x as f32 + 0.5, y as f32 + 0.5);
            if !coverage(cx, cy) {
                continue;
            }
            let p = inverse.transform_point(Point32::new(cx, cy));
            let (sx, sy) = (p.x.floor(), p.y.floor());
            if sx < 0.0 || sy < 0.0 || sx >= src.width as f32 || sy >= src.height as f32 {
                continue;
            }
            let s_idx = ((sy as usize) * (src.width as usize) + (sx as usize)) * 4;
            let d_idx = ((y as usize) * (dst.width as usize) + (x as usize)) * 4;
            let out = over(px_at(&dst.data[..], d_idx), px_at(src.data, s_idx), opacity);
            dst.data[d_idx..d_idx + 4].copy_from_slice(&out);
        }
    }
    Ok(())
}

/// Source-over one `color` onto every pixel of `dst` whose center passes `coverage`.
pub fn fill_covered_in_place(
    mut dst: Plane<&mut [u8]>,
    color: PremulRgba8,
    coverage: &dyn Fn(f32, f32) -> bool,
) -> RasterFxResult<()> {
    if color[3] == 0 {
        return Ok(());
    }
    let width = dst.width as usize;
    for (i, px) in dst.data.chunks_exact_mut(4).enumerate() {
        let (cx, cy) = ((i % width) as f32 + 0.5, (i / width) as f32 + 0.5);
        if !coverage(cx, cy) {
            continue;
        }
        let out = over([px[0], px[1], px[2], px[3]], color, 1.0);
        px.copy_from_slice(&out);
    }
    Ok(())
}

/// Copies the alpha channel of `src` into `dst` with color channels zeroed.
pub fn alpha_only_into(dst: &mut [u8], src: &[u8]) -> RasterFxResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(RasterFxError::evaluation(
            "alpha_only_into expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        d.copy_from_slice(&[0, 0, 0, s[3]]);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/raster/composite.rs"]
mod tests;
