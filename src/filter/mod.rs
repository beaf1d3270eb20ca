//! Named-buffer filter pipeline: store, primitives and chain evaluation.

pub(crate) mod blur;
pub(crate) mod chain;
pub(crate) mod flood;
pub(crate) mod merge;
pub(crate) mod offset;
pub(crate) mod parse;
pub(crate) mod primitive;
pub(crate) mod store;
