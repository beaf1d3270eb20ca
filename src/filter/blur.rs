use crate::filter::primitive::{Process, ProcessCtx};
use crate::filter::store::{BufferName, NamedBufferStore};
use crate::foundation::error::{RasterFxError, RasterFxResult};
use crate::raster::blur::{GaussianKernel, blur_rgba8_premul};
use crate::raster::buffer::RasterBuffer;

/// `feGaussianBlur` with an isotropic standard deviation in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GaussianBlur {
    /// Standard deviation in pixels; `0` copies the input.
    pub std_deviation: f32,
}

impl GaussianBlur {
    /// Blur with the given standard deviation.
    pub fn new(std_deviation: f32) -> Self {
        Self { std_deviation }
    }
}

impl Process for GaussianBlur {
    fn element_name(&self) -> &'static str {
        "feGaussianBlur"
    }

    fn validate(&self) -> RasterFxResult<()> {
        if !self.std_deviation.is_finite() || self.std_deviation < 0.0 {
            return Err(RasterFxError::validation(
                "feGaussianBlur stdDeviation must be finite and >= 0",
            ));
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
        let kernel = GaussianKernel::for_sigma(self.std_deviation, ctx.opts.max_blur_radius)?;
        let (w, h) = (src.width(), src.height());
        let mut out = S::allocate(w, h)?;
        blur_rgba8_premul(src.pixels(), out.pixels_mut(), w, h, &kernel)?;
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filter/blur.rs"]
mod tests;
