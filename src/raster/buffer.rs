use crate::foundation::error::{RasterFxError, RasterFxResult};
use crate::raster::composite;
use crate::transform::affine::Matrix;

/// Pixel surface owned by a rendering backend.
///
/// Pixels are premultiplied RGBA8, row-major and tightly packed (`width * height * 4` bytes).
/// Dimensions are fixed at allocation. Dropping a buffer releases its backing storage.
pub trait RasterBuffer: Sized {
    /// Allocates a fully transparent buffer.
    fn allocate(width: u32, height: u32) -> RasterFxResult<Self>;

    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Pixel bytes.
    fn pixels(&self) -> &[u8];

    /// Mutable pixel bytes.
    fn pixels_mut(&mut self) -> &mut [u8];

    /// Allocates a buffer of the same size holding a copy of these pixels.
    fn duplicate(&self) -> RasterFxResult<Self> {
        let mut out = Self::allocate(self.width(), self.height())?;
        out.pixels_mut().copy_from_slice(self.pixels());
        Ok(out)
    }

    /// Source-over `src` at integer offset `(x, y)`, unscaled, clipped to this buffer.
    fn draw_unscaled(&mut self, src: &Self, x: i32, y: i32) -> RasterFxResult<()> {
        let (dw, dh) = (self.width(), self.height());
        let (sw, sh) = (src.width(), src.height());
        composite::over_at_in_place(
            composite::Plane::new_mut(self.pixels_mut(), dw, dh)?,
            composite::Plane::new(src.pixels(), sw, sh)?,
            x,
            y,
        )
    }

    /// Source-over `src` mapped through `transform`, keeping only pixels accepted by
    /// `coverage` (called with destination pixel centers).
    fn draw_transformed(
        &mut self,
        src: &Self,
        transform: &Matrix,
        opacity: f32,
        coverage: &dyn Fn(f32, f32) -> bool,
    ) -> RasterFxResult<()> {
        let (dw, dh) = (self.width(), self.height());
        let (sw, sh) = (src.width(), src.height());
        composite::over_transformed_in_place(
            composite::Plane::new_mut(self.pixels_mut(), dw, dh)?,
            composite::Plane::new(src.pixels(), sw, sh)?,
            transform,
            opacity,
            coverage,
        )
    }
}

/// CPU raster buffer backed by a `vello_cpu` pixmap.
pub struct CpuBuffer {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
}

impl CpuBuffer {
    /// Wraps premultiplied RGBA8 bytes produced elsewhere (for example by a scene rasterizer).
    pub fn from_premul_rgba8(width: u32, height: u32, data: &[u8]) -> RasterFxResult<Self> {
        let mut out = Self::allocate(width, height)?;
        if data.len() != out.pixels().len() {
            return Err(RasterFxError::evaluation(
                "from_premul_rgba8 expects data matching width*height*4",
            ));
        }
        out.pixels_mut().copy_from_slice(data);
        Ok(out)
    }

    /// Buffer filled with one premultiplied color.
    pub fn filled(width: u32, height: u32, premul: [u8; 4]) -> RasterFxResult<Self> {
        let mut out = Self::allocate(width, height)?;
        for px in out.pixels_mut().chunks_exact_mut(4) {
            px.copy_from_slice(&premul);
        }
        Ok(out)
    }

    /// Backing pixmap.
    pub fn pixmap(&self) -> &vello_cpu::Pixmap {
        &self.pixmap
    }

    /// Unwraps into the backing pixmap.
    pub fn into_pixmap(self) -> vello_cpu::Pixmap {
        self.pixmap
    }

    /// Premultiplied pixel at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= u32::from(self.width) || y >= u32::from(self.height) {
            return None;
        }
        let idx = ((y as usize) * usize::from(self.width) + (x as usize)) * 4;
        let p = &self.pixels()[idx..idx + 4];
        Some([p[0], p[1], p[2], p[3]])
    }
}

impl RasterBuffer for CpuBuffer {
    fn allocate(width: u32, height: u32) -> RasterFxResult<Self> {
        if width == 0 || height == 0 {
            return Err(RasterFxError::allocation(width, height));
        }
        let w: u16 = width
            .try_into()
            .map_err(|_| RasterFxError::allocation(width, height))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| RasterFxError::allocation(width, height))?;
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        pixmap.data_as_u8_slice_mut().fill(0);
        Ok(Self {
            width: w,
            height: h,
            pixmap,
        })
    }

    fn width(&self) -> u32 {
        u32::from(self.width)
    }

    fn height(&self) -> u32 {
        u32::from(self.height)
    }

    fn pixels(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    fn pixels_mut(&mut self) -> &mut [u8] {
        self.pixmap.data_as_u8_slice_mut()
    }
}

impl std::fmt::Debug for CpuBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/buffer.rs"]
mod tests;
