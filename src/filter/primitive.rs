use crate::config::EvalOpts;
use crate::filter::blur::GaussianBlur;
use crate::filter::flood::Flood;
use crate::filter::merge::Merge;
use crate::filter::offset::Offset;
use crate::filter::store::{BufferName, NamedBufferStore};
use crate::foundation::error::{RasterFxError, RasterFxResult};
use crate::raster::buffer::RasterBuffer;

/// Per-invocation data handed to [`Process::process`].
pub struct ProcessCtx<'a> {
    /// Human-readable primitive label used in errors, e.g. `feMerge (primitive #1)`.
    pub label: &'a str,
    /// The primitive's effective input after chain resolution.
    pub effective_input: &'a BufferName,
    /// Options of the running chain.
    pub opts: &'a EvalOpts,
}

impl ProcessCtx<'_> {
    /// Looks up `name`, failing with a [`RasterFxError::MissingBuffer`] naming this primitive.
    pub fn fetch<'s, S: RasterBuffer>(
        &self,
        store: &'s NamedBufferStore<S>,
        name: &BufferName,
    ) -> RasterFxResult<&'s S> {
        store
            .get(name)
            .ok_or_else(|| RasterFxError::missing_buffer(self.label, name.clone()))
    }
}

/// One pipeline stage: reads named inputs and produces a single output buffer.
///
/// `process` only gets a shared borrow of the store; the chain writes the returned buffer
/// under the primitive's output name.
pub trait Process {
    /// Element name used in labels and logs (`feMerge`, `feOffset`, ...).
    fn element_name(&self) -> &'static str;

    /// Rejects parameter sets that cannot produce a meaningful image.
    fn validate(&self) -> RasterFxResult<()>;

    /// Buffers read by this stage, given its effective input.
    fn inputs(&self, effective_input: &BufferName) -> Vec<BufferName>;

    /// Produces the output buffer from the inputs in `store`.
    fn process<S: RasterBuffer>(
        &self,
        ctx: &ProcessCtx<'_>,
        store: &NamedBufferStore<S>,
    ) -> RasterFxResult<S>;
}

/// Closed set of supported primitive payloads.
#[derive(Clone, Debug, PartialEq)]
pub enum PrimitiveKind {
    /// `feMerge`
    Merge(Merge),
    /// `feOffset`
    Offset(Offset),
    /// `feFlood`
    Flood(Flood),
    /// `feGaussianBlur`
    GaussianBlur(GaussianBlur),
}

impl PrimitiveKind {
    fn as_process(&self) -> &dyn ProcessMeta {
        match self {
            Self::Merge(p) => p,
            Self::Offset(p) => p,
            Self::Flood(p) => p,
            Self::GaussianBlur(p) => p,
        }
    }
}

/// Object-safe half of [`Process`], for dispatch that does not touch buffers.
trait ProcessMeta {
    fn element_name(&self) -> &'static str;
    fn validate(&self) -> RasterFxResult<()>;
    fn inputs(&self, effective_input: &BufferName) -> Vec<BufferName>;
}

impl<T: Process> ProcessMeta for T {
    fn element_name(&self) -> &'static str {
        Process::element_name(self)
    }

    fn validate(&self) -> RasterFxResult<()> {
        Process::validate(self)
    }

    fn inputs(&self, effective_input: &BufferName) -> Vec<BufferName> {
        Process::inputs(self, effective_input)
    }
}

/// A filter primitive as declared by the document: `in` / `result` plus its payload.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterPrimitive {
    input: Option<String>,
    result: Option<String>,
    kind: PrimitiveKind,
}

impl FilterPrimitive {
    /// Primitive with no `in` and no `result`.
    pub fn new(kind: impl Into<PrimitiveKind>) -> Self {
        Self {
            input: None,
            result: None,
            kind: kind.into(),
        }
    }

    /// Sets `in`.
    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }

    /// Sets `result`.
    pub fn with_result(mut self, result: impl Into<String>) -> Self {
        self.result = Some(result.into());
        self
    }

    /// The declared `in` attribute, if any.
    pub fn input(&self) -> Option<&str> {
        self.input.as_deref()
    }

    /// The declared `result` attribute, if any.
    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    /// The payload.
    pub fn kind(&self) -> &PrimitiveKind {
        &self.kind
    }

    /// Element name of the payload.
    pub fn element_name(&self) -> &'static str {
        self.kind.as_process().element_name()
    }

    /// Label used in errors and logs for the primitive at chain position `index`.
    pub fn label(&self, index: usize) -> String {
        match &self.result {
            Some(r) => format!("{} (primitive #{index}, result '{r}')", self.element_name()),
            None => format!("{} (primitive #{index})", self.element_name()),
        }
    }

    /// Validates the payload.
    pub fn validate(&self) -> RasterFxResult<()> {
        self.kind.as_process().validate()
    }

    /// Buffers read given the effective input.
    pub fn inputs(&self, effective_input: &BufferName) -> Vec<BufferName> {
        self.kind.as_process().inputs(effective_input)
    }

    /// Runs the payload.
    pub fn process<S: RasterBuffer>(
        &self,
        ctx: &ProcessCtx<'_>,
        store: &NamedBufferStore<S>,
    ) -> RasterFxResult<S> {
        match &self.kind {
            PrimitiveKind::Merge(p) => p.process(ctx, store),
            PrimitiveKind::Offset(p) => p.process(ctx, store),
            PrimitiveKind::Flood(p) => p.process(ctx, store),
            PrimitiveKind::GaussianBlur(p) => p.process(ctx, store),
        }
    }
}

impl From<Merge> for PrimitiveKind {
    fn from(p: Merge) -> Self {
        Self::Merge(p)
    }
}

impl From<Offset> for PrimitiveKind {
    fn from(p: Offset) -> Self {
        Self::Offset(p)
    }
}

impl From<Flood> for PrimitiveKind {
    fn from(p: Flood) -> Self {
        Self::Flood(p)
    }
}

impl From<GaussianBlur> for PrimitiveKind {
    fn from(p: GaussianBlur) -> Self {
        Self::GaussianBlur(p)
    }
}
