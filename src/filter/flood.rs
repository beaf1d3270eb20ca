use crate::filter::primitive::{Process, ProcessCtx};
use crate::filter::store::{BufferName, NamedBufferStore};
use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{RasterFxError, RasterFxResult};
use crate::foundation::math::{mul_div255_u8, unit_to_u8};
use crate::raster::buffer::RasterBuffer;

/// `feFlood`: a solid color covering the filter region (the `SourceGraphic` extent).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Flood {
    /// Straight (non-premultiplied) RGBA.
    pub color: [u8; 4],
    /// `flood-opacity`, clamped to `[0, 1]` when applied.
    pub opacity: f32,
}

impl Default for Flood {
    fn default() -> Self {
        Self {
            color: [0, 0, 0, 255],
            opacity: 1.0,
        }
    }
}

impl Flood {
    /// Flood with a straight color and opacity.
    pub fn new(color: [u8; 4], opacity: f32) -> Self {
        Self { color, opacity }
    }

    /// Fill color with `opacity` folded into alpha, premultiplied.
    pub fn premultiplied(&self) -> Rgba8Premul {
        let [r, g, b, a] = self.color;
        let a = mul_div255_u8(u16::from(a), unit_to_u8(self.opacity));
        Rgba8Premul::from_straight_rgba(r, g, b, a)
    }
}

impl Process for Flood {
    fn element_name(&self) -> &'static str {
        "feFlood"
    }

    fn validate(&self) -> RasterFxResult<()> {
        if !self.opacity.is_finite() {
            return Err(RasterFxError::validation("feFlood opacity must be finite"));
        }
        Ok(())
    }

    fn inputs(&self, _effective_input: &BufferName) -> Vec<BufferName> {
        Vec::new()
    }

    fn process<S: RasterBuffer>(
        &self,
        ctx: &ProcessCtx<'_>,
        store: &NamedBufferStore<S>,
    ) -> RasterFxResult<S> {
        let region = ctx.fetch(store, &BufferName::source_graphic())?;
        let mut out = S::allocate(region.width(), region.height())?;
        let px = self.premultiplied().to_array();
        if px[3] != 0 {
            for d in out.pixels_mut().chunks_exact_mut(4) {
                d.copy_from_slice(&px);
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filter/flood.rs"]
mod tests;
