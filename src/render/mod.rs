//! Rendering state shared by transform and filter resolution.

pub(crate) mod boundable;
pub(crate) mod context;
pub(crate) mod region;
