//! Raster surfaces and the pixel kernels that operate on them.

pub(crate) mod blur;
pub(crate) mod buffer;
pub(crate) mod composite;
