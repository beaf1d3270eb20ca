use crate::filter::primitive::{Process, ProcessCtx};
use crate::filter::store::{BufferName, NamedBufferStore};
use crate::foundation::error::{RasterFxError, RasterFxResult};
use crate::raster::buffer::RasterBuffer;

/// One `feMergeNode`: an optional input name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MergeNode {
    input: Option<String>,
}

impl MergeNode {
    /// A node that reads the merge primitive's effective input.
    pub fn inherit() -> Self {
        Self::default()
    }

    /// A node that reads `input`.
    pub fn with_input(input: impl Into<String>) -> Self {
        Self {
            input: Some(input.into()),
        }
    }

    /// The node's `in`, if set.
    pub fn input(&self) -> Option<&str> {
        self.input.as_deref()
    }
}

/// Stacks its nodes' inputs with source-over, later nodes on top.
///
/// The output takes the size of the first node's input; other inputs are drawn unscaled at
/// the origin and clipped to it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Merge {
    nodes: Vec<MergeNode>,
}

impl Merge {
    /// Merge of `nodes`, bottom to top.
    pub fn new(nodes: Vec<MergeNode>) -> Self {
        Self { nodes }
    }

    /// Merge whose nodes all name their input explicitly.
    pub fn of<I, N>(inputs: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        Self::new(inputs.into_iter().map(MergeNode::with_input).collect())
    }

    /// Nodes, bottom to top.
    pub fn nodes(&self) -> &[MergeNode] {
        &self.nodes
    }

    fn node_inputs(&self, effective_input: &BufferName) -> Vec<BufferName> {
        self.nodes
            .iter()
            .map(|n| match n.input() {
                Some(name) => BufferName::from(name),
                None => effective_input.clone(),
            })
            .collect()
    }
}

impl Process for Merge {
    fn element_name(&self) -> &'static str {
        "feMerge"
    }

    fn validate(&self) -> RasterFxResult<()> {
        if self.nodes.is_empty() {
            return Err(RasterFxError::validation(
                "feMerge requires at least one feMergeNode",
            ));
        }
        Ok(())
    }

    fn inputs(&self, effective_input: &BufferName) -> Vec<BufferName> {
        self.node_inputs(effective_input)
    }

    fn process<S: RasterBuffer>(
        &self,
        ctx: &ProcessCtx<'_>,
        store: &NamedBufferStore<S>,
    ) -> RasterFxResult<S> {
        let inputs = self.node_inputs(ctx.effective_input);
        let Some(first) = inputs.first() else {
            return Err(RasterFxError::validation(format!(
                "{} has no merge nodes",
                ctx.label
            )));
        };

        let base = ctx.fetch(store, first)?;
        let mut out = S::allocate(base.width(), base.height())?;
        for name in &inputs {
            let layer = ctx.fetch(store, name)?;
            out.draw_unscaled(layer, 0, 0)?;
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filter/merge.rs"]
mod tests;
