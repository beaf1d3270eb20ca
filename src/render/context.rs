use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

use crate::foundation::core::{Point32, Rect32, Rgba8Premul};
use crate::foundation::error::RasterFxResult;
use crate::raster::buffer::RasterBuffer;
use crate::raster::composite;
use crate::render::boundable::Boundable;
use crate::render::region::{CombineMode, Region};
use crate::transform::affine::{Matrix, MatrixOrder};

/// Reference axis for percentage lengths.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Axis {
    /// Resolves against the boundable width.
    Horizontal,
    /// Resolves against the boundable height.
    Vertical,
    /// Neither axis, e.g. a radius: resolves against `sqrt((w² + h²) / 2)`.
    #[default]
    Other,
}

/// Transform and clip captured by [`RenderContext::save`].
#[derive(Clone, Debug, PartialEq)]
struct SavedState {
    transform: Matrix,
    clip: Region,
}

/// Per-draw rendering state: current transform, clip and boundable stack.
///
/// Every drawing operation maps through the current transform and touches only destination
/// pixels whose centers lie inside the current clip.
pub struct RenderContext {
    width: u32,
    height: u32,
    transform: Matrix,
    clip: Region,
    boundables: Vec<Box<dyn Boundable>>,
    saved: Vec<SavedState>,
    variables: HashMap<String, serde_json::Value>,
}

impl RenderContext {
    /// Context for a `width` x `height` canvas with identity transform and full-canvas clip.
    pub fn new(width: u32, height: u32) -> Self {
        let mut ctx = Self {
            width,
            height,
            transform: Matrix::IDENTITY,
            clip: Region::empty(),
            boundables: Vec::new(),
            saved: Vec::new(),
            variables: HashMap::new(),
        };
        ctx.reset_clip();
        ctx
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(0, 0, width, height)`, the clip universe.
    pub fn canvas_rect(&self) -> Rect32 {
        Rect32::new(0.0, 0.0, self.width as f32, self.height as f32)
    }

    /// Makes `boundable` the reference box for percentage resolution.
    pub fn push_boundable(&mut self, boundable: impl Boundable + 'static) {
        self.boundables.push(Box::new(boundable));
    }

    /// Pops the innermost boundable.
    ///
    /// # Panics
    ///
    /// Panics when the stack is empty; every pop must pair with an earlier push.
    pub fn pop_boundable(&mut self) -> Box<dyn Boundable> {
        self.try_pop_boundable()
            .unwrap_or_else(|| panic!("pop_boundable called on an empty boundable stack"))
    }

    /// Pops the innermost boundable, or `None` when the stack is empty.
    pub fn try_pop_boundable(&mut self) -> Option<Box<dyn Boundable>> {
        self.boundables.pop()
    }

    /// The innermost boundable.
    ///
    /// # Panics
    ///
    /// Panics when the stack is empty.
    pub fn current_boundable(&self) -> &dyn Boundable {
        self.try_current_boundable()
            .unwrap_or_else(|| panic!("current_boundable called on an empty boundable stack"))
    }

    /// The innermost boundable, or `None` when the stack is empty.
    pub fn try_current_boundable(&self) -> Option<&dyn Boundable> {
        self.boundables.last().map(|b| &**b)
    }

    /// Number of pushed boundables.
    pub fn boundable_depth(&self) -> usize {
        self.boundables.len()
    }

    /// Resolves `percent` (50.0 = half) against the current boundable's size.
    ///
    /// # Panics
    ///
    /// Panics when no boundable has been pushed.
    pub fn resolve_percentage(&self, percent: f32, axis: Axis) -> f32 {
        let size = self.current_boundable().size();
        let reference = match axis {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
            Axis::Other => {
                let (w, h) = (f64::from(size.width), f64::from(size.height));
                ((w * w + h * h) / 2.0).sqrt() as f32
            }
        };
        percent / 100.0 * reference
    }

    /// Current clip region.
    pub fn clip(&self) -> &Region {
        &self.clip
    }

    /// Combines the current clip with `region`.
    pub fn set_clip(&mut self, region: &Region, mode: CombineMode) {
        self.clip = self.clip.combine(region, mode);
    }

    /// Restores the full-canvas clip.
    pub fn reset_clip(&mut self) {
        self.clip = Region::from_rect(self.canvas_rect());
    }

    /// Current transform.
    pub fn transform(&self) -> &Matrix {
        &self.transform
    }

    /// Replaces the current transform.
    pub fn set_transform(&mut self, transform: Matrix) {
        self.transform = transform;
    }

    /// Restores the identity transform.
    pub fn reset_transform(&mut self) {
        self.transform = Matrix::IDENTITY;
    }

    /// Composes a translation with the current transform.
    pub fn translate_transform(&mut self, dx: f32, dy: f32, order: MatrixOrder) {
        self.transform.translate(dx, dy, order);
    }

    /// Composes a rotation about the origin with the current transform.
    pub fn rotate_transform(&mut self, degrees: f32, order: MatrixOrder) {
        self.transform.rotate(degrees, order);
    }

    /// Composes a rotation about `pivot` with the current transform.
    pub fn rotate_transform_at(&mut self, degrees: f32, pivot: Point32, order: MatrixOrder) {
        self.transform.rotate_at(degrees, pivot, order);
    }

    /// Composes a scale with the current transform.
    pub fn scale_transform(&mut self, sx: f32, sy: f32, order: MatrixOrder) {
        self.transform.scale(sx, sy, order);
    }

    /// Composes `other` with the current transform.
    pub fn multiply_transform(&mut self, other: &Matrix, order: MatrixOrder) {
        self.transform.combine(other, order);
    }

    /// Pushes the current transform and clip.
    pub fn save(&mut self) {
        self.saved.push(SavedState {
            transform: self.transform,
            clip: self.clip.clone(),
        });
    }

    /// Pops the state pushed by the matching [`RenderContext::save`]. Returns `false`, leaving
    /// the state untouched, when nothing was saved.
    pub fn restore(&mut self) -> bool {
        let Some(state) = self.saved.pop() else {
            return false;
        };
        self.transform = state.transform;
        self.clip = state.clip;
        true
    }

    /// Number of unmatched [`RenderContext::save`] calls.
    pub fn save_depth(&self) -> usize {
        self.saved.len()
    }

    /// Value bound to `key` by an active [`RenderContext::using_context_variable`].
    pub fn context_variable(&self, key: &str) -> Option<&serde_json::Value> {
        self.variables.get(key)
    }

    /// Binds `key` to `value` until the returned guard drops, then restores whatever `key`
    /// held before. The guard dereferences to this context.
    pub fn using_context_variable(
        &mut self,
        key: impl Into<String>,
        value: serde_json::Value,
    ) -> ContextVariableGuard<'_> {
        let key = key.into();
        let previous = self.variables.insert(key.clone(), value);
        ContextVariableGuard {
            ctx: self,
            key,
            previous,
        }
    }

    /// Draws `source` onto `target` through the current transform, source-over, limited to
    /// destination pixels whose centers lie inside the current clip.
    #[tracing::instrument(skip(self, target, source), fields(clip_rects = self.clip.rects().len()))]
    pub fn composite<S: RasterBuffer>(
        &self,
        target: &mut S,
        source: &S,
        opacity: f32,
    ) -> RasterFxResult<()> {
        if self.clip.is_empty() {
            return Ok(());
        }
        let clip = &self.clip;
        target.draw_transformed(source, &self.transform, opacity, &|x, y| clip.contains(x, y))
    }

    /// Draws the `src` sub-rectangle of `source` scaled onto `dest` (user space), through the
    /// current transform and clip. Empty rectangles draw nothing.
    #[tracing::instrument(skip(self, target, source))]
    pub fn draw_image<S: RasterBuffer>(
        &self,
        target: &mut S,
        source: &S,
        dest: Rect32,
        src: Rect32,
    ) -> RasterFxResult<()> {
        if dest.is_empty() || src.is_empty() || self.clip.is_empty() {
            return Ok(());
        }
        let mut mapping = Matrix::translation(-src.x, -src.y);
        mapping
            .scale(dest.width / src.width, dest.height / src.height, MatrixOrder::Append)
            .translate(dest.x, dest.y, MatrixOrder::Append)
            .combine(&self.transform, MatrixOrder::Append);
        let Some(inverse) = mapping.inverted() else {
            return Ok(());
        };
        let clip = &self.clip;
        target.draw_transformed(source, &mapping, 1.0, &|x, y| {
            if !clip.contains(x, y) {
                return false;
            }
            let p = inverse.transform_point(Point32::new(x, y));
            src.contains(p.x, p.y)
        })
    }

    /// Draws `source` at its natural size with its top-left corner at `location` (truncated
    /// to whole units), through the current transform and clip.
    pub fn draw_image_unscaled<S: RasterBuffer>(
        &self,
        target: &mut S,
        source: &S,
        location: Point32,
    ) -> RasterFxResult<()> {
        if self.clip.is_empty() {
            return Ok(());
        }
        let mut mapping = Matrix::translation(location.x.trunc(), location.y.trunc());
        mapping.combine(&self.transform, MatrixOrder::Append);
        let clip = &self.clip;
        target.draw_transformed(source, &mapping, 1.0, &|x, y| clip.contains(x, y))
    }

    /// Source-over `color` across the whole clip, ignoring the transform.
    pub fn fill_background<S: RasterBuffer>(
        &self,
        target: &mut S,
        color: Rgba8Premul,
    ) -> RasterFxResult<()> {
        if self.clip.is_empty() {
            return Ok(());
        }
        let (w, h) = (target.width(), target.height());
        let clip = &self.clip;
        composite::fill_covered_in_place(
            composite::Plane::new_mut(target.pixels_mut(), w, h)?,
            color.to_array(),
            &|x, y| clip.contains(x, y),
        )
    }
}

/// Scoped binding created by [`RenderContext::using_context_variable`].
pub struct ContextVariableGuard<'a> {
    ctx: &'a mut RenderContext,
    key: String,
    previous: Option<serde_json::Value>,
}

impl Deref for ContextVariableGuard<'_> {
    type Target = RenderContext;

    fn deref(&self) -> &RenderContext {
        &*self.ctx
    }
}

impl DerefMut for ContextVariableGuard<'_> {
    fn deref_mut(&mut self) -> &mut RenderContext {
        &mut *self.ctx
    }
}

impl Drop for ContextVariableGuard<'_> {
    fn drop(&mut self) {
        match self.previous.take() {
            Some(value) => {
                self.ctx.variables.insert(self.key.clone(), value);
            }
            None => {
                self.ctx.variables.remove(&self.key);
            }
        }
    }
}

impl std::fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderContext")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("transform", &self.transform)
            .field("clip", &self.clip)
            .field("boundables", &self.boundables.len())
            .field("saved", &self.saved.len())
            .field("variables", &self.variables)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/context.rs"]
mod tests;
