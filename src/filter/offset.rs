use crate::filter::primitive::{Process, ProcessCtx};
use crate::filter::store::{BufferName, NamedBufferStore};
use crate::foundation::error::{RasterFxError, RasterFxResult};
use crate::raster::buffer::RasterBuffer;

/// `feOffset`: shifts its input by a whole number of pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Offset {
    /// Horizontal shift in pixels.
    pub dx: f32,
    /// Vertical shift in pixels.
    pub dy: f32,
}

impl Offset {
    /// Offset by `(dx, dy)`.
    pub fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }
}

impl Process for Offset {
    fn element_name(&self) -> &'static str {
        "feOffset"
    }

    fn validate(&self) -> RasterFxResult<()> {
        if !self.dx.is_finite() || !self.dy.is_finite() {
            return Err(RasterFxError::validation("feOffset dx/dy must be finite"));
        }
        Ok(())
    }

    fn inputs(&self, effective_input: &BufferName) -> Vec<BufferName> {
        vec![effective_input.clone()]
    }

    fn process<S: RasterBuffer>(
        &self,
        ctx: &ProcessCtx<'_>,
        store: &NamedBufferStore<S>,
    ) -> RasterFxResult<S> {
        let src = ctx.fetch(store, ctx.effective_input)?;
        let mut out = S::allocate(src.width(), src.height())?;
        let dx = self.dx.round().clamp(i32::MIN as f32, i32::MAX as f32) as i32;
        let dy = self.dy.round().clamp(i32::MIN as f32, i32::MAX as f32) as i32;
        out.draw_unscaled(src, dx, dy)?;
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filter/offset.rs"]
mod tests;
