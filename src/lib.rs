//! rasterfx is the CPU raster core of a vector-document renderer.
//!
//! It covers the pieces that sit between a document model and the output surface:
//!
//! 1. **Transform**: a single-precision affine [`Matrix`] with prepend/append composition,
//!    inversion and point/rectangle mapping.
//! 2. **Filter**: a [`FilterChain`] of [`FilterPrimitive`]s evaluated against a
//!    [`NamedBufferStore`] of premultiplied RGBA8 buffers (`SourceGraphic`, `result` names and
//!    implicit slots).
//! 3. **Render state**: a [`RenderContext`] holding the current transform, a rectilinear clip
//!    [`Region`] and a stack of [`Boundable`]s for percentage resolution, plus the final
//!    composite of a filter result onto the page.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Premultiplied RGBA8** end-to-end, row-major and tightly packed.
//! - **Single-threaded** evaluation; one store per filter invocation.
//! - **No subscriber installed**: the crate only emits `tracing` events.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod filter;
mod foundation;
mod raster;
mod render;
mod transform;

pub use config::EvalOpts;
pub use filter::blur::GaussianBlur;
pub use filter::chain::{FilterChain, InputResolver, ResolvedStep};
pub use filter::flood::Flood;
pub use filter::merge::{Merge, MergeNode};
pub use filter::offset::Offset;
pub use filter::parse::{PrimitiveDesc, parse_primitive};
pub use filter::primitive::{FilterPrimitive, PrimitiveKind, Process, ProcessCtx};
pub use filter::store::{
    BACKGROUND_ALPHA, BACKGROUND_IMAGE, BufferName, FILL_PAINT, NamedBufferStore, SOURCE_ALPHA,
    SOURCE_GRAPHIC, STROKE_PAINT,
};
pub use foundation::core::{Affine, Point32, Rect32, Rgba8Premul, Size32};
pub use foundation::error::{RasterFxError, RasterFxResult};
pub use raster::buffer::{CpuBuffer, RasterBuffer};
pub use raster::composite::{
    Plane, PremulRgba8, alpha_only_into, fill_covered_in_place, over, over_at_in_place,
    over_in_place, over_transformed_in_place,
};
pub use render::boundable::{Boundable, GenericBoundable};
pub use render::context::{Axis, ContextVariableGuard, RenderContext};
pub use render::region::{CombineMode, Region};
pub use transform::affine::{Matrix, MatrixOrder};
