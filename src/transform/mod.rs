//! Coordinate transforms.

pub(crate) mod affine;
