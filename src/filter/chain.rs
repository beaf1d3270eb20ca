use crate::config::EvalOpts;
use crate::filter::primitive::{FilterPrimitive, ProcessCtx};
use crate::filter::store::{BufferName, NamedBufferStore};
use crate::foundation::error::{RasterFxError, RasterFxResult};
use crate::raster::buffer::RasterBuffer;

/// Accumulator for implicit input resolution across a chain.
///
/// A primitive without `in` reads the previous primitive's output (its `result`, or its
/// implicit slot), and the first primitive reads `SourceGraphic`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputResolver {
    previous_output: Option<BufferName>,
}

impl InputResolver {
    /// Resolver before the first primitive.
    pub fn new() -> Self {
        Self::default()
    }

    /// The buffer `primitive` reads: its `in`, else the previous output, else `SourceGraphic`.
    pub fn effective_input(&self, primitive: &FilterPrimitive) -> BufferName {
        match primitive.input() {
            Some(name) => BufferName::from(name),
            None => self
                .previous_output
                .clone()
                .unwrap_or_else(BufferName::source_graphic),
        }
    }

    /// Where the primitive at `index` writes its output.
    pub fn output_name(index: usize, primitive: &FilterPrimitive) -> BufferName {
        match primitive.result() {
            Some(name) => BufferName::from(name),
            None => BufferName::Implicit(index),
        }
    }

    /// Resolver state after a primitive wrote `output`.
    pub fn advance(self, output: BufferName) -> Self {
        Self {
            previous_output: Some(output),
        }
    }
}

/// Input/output names resolved for one primitive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedStep {
    /// Label used in logs and errors.
    pub label: String,
    /// Effective input.
    pub input: BufferName,
    /// Where the output is written.
    pub output: BufferName,
}

/// Ordered filter primitives evaluated against a [`NamedBufferStore`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterChain {
    primitives: Vec<FilterPrimitive>,
    opts: EvalOpts,
}

impl FilterChain {
    /// Validates every primitive; the first invalid one is reported by label.
    pub fn new(primitives: Vec<FilterPrimitive>) -> RasterFxResult<Self> {
        for (index, primitive) in primitives.iter().enumerate() {
            primitive.validate().map_err(|err| match err {
                RasterFxError::Validation(msg) => RasterFxError::validation(format!(
                    "{}: {msg}",
                    primitive.label(index)
                )),
                other => other,
            })?;
        }
        Ok(Self {
            primitives,
            opts: EvalOpts::default(),
        })
    }

    /// Replaces the evaluation options.
    pub fn with_opts(mut self, opts: EvalOpts) -> Self {
        self.opts = opts;
        self
    }

    /// Evaluation options.
    pub fn opts(&self) -> &EvalOpts {
        &self.opts
    }

    /// Primitives in evaluation order.
    pub fn primitives(&self) -> &[FilterPrimitive] {
        &self.primitives
    }

    /// Number of primitives.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Whether the chain has no primitives.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Resolves input and output names for every primitive without touching buffers.
    pub fn plan(&self) -> Vec<ResolvedStep> {
        let (steps, _) = self.primitives.iter().enumerate().fold(
            (Vec::with_capacity(self.primitives.len()), InputResolver::new()),
            |(mut steps, resolver), (index, primitive)| {
                let input = resolver.effective_input(primitive);
                let output = InputResolver::output_name(index, primitive);
                steps.push(ResolvedStep {
                    label: primitive.label(index),
                    input,
                    output: output.clone(),
                });
                (steps, resolver.advance(output))
            },
        );
        steps
    }

    /// Runs every primitive in order and returns the name of the final output.
    ///
    /// An empty chain returns `SourceGraphic`.
    #[tracing::instrument(skip(self, store), fields(primitives = self.primitives.len()))]
    pub fn evaluate<S: RasterBuffer>(
        &self,
        store: &mut NamedBufferStore<S>,
    ) -> RasterFxResult<BufferName> {
        let source = BufferName::source_graphic();
        let Some(sg) = store.get(&source) else {
            return Err(RasterFxError::missing_buffer("filter chain", source));
        };
        let max = self.opts.max_surface_dim;
        if sg.width() > max || sg.height() > max {
            return Err(RasterFxError::allocation(sg.width(), sg.height()));
        }

        let mut last = source;
        for (primitive, step) in self.primitives.iter().zip(self.plan()) {
            for name in primitive.inputs(&step.input) {
                let available = if self.opts.derive_alpha {
                    store.ensure(&name)?
                } else {
                    store.contains(&name)
                };
                if !available {
                    return Err(RasterFxError::missing_buffer(step.label, name));
                }
            }

            let ctx = ProcessCtx {
                label: &step.label,
                effective_input: &step.input,
                opts: &self.opts,
            };
            let out = primitive.process(&ctx, store)?;
            tracing::debug!(
                primitive = %step.label,
                input = %step.input,
                output = %step.output,
                width = out.width(),
                height = out.height(),
                "processed filter primitive"
            );
            store.insert(step.output.clone(), out);
            last = step.output;
        }
        Ok(last)
    }

    /// Evaluates against `store` and returns the final buffer; everything else in the store
    /// is released.
    #[tracing::instrument(skip(self, store))]
    pub fn run<S: RasterBuffer>(&self, mut store: NamedBufferStore<S>) -> RasterFxResult<S> {
        let name = self.evaluate(&mut store)?;
        store
            .remove(&name)
            .ok_or_else(|| RasterFxError::missing_buffer("filter chain", name))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filter/chain.rs"]
mod tests;
