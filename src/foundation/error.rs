use crate::filter::store::BufferName;

/// Convenience result type used across rasterfx.
pub type RasterFxResult<T> = Result<T, RasterFxError>;

/// Top-level error taxonomy used by transform, raster and filter APIs.
#[derive(thiserror::Error, Debug)]
pub enum RasterFxError {
    /// Invalid primitive configuration or caller-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A primitive asked for a buffer name that is not in the store.
    #[error("missing buffer '{buffer}' required by {primitive}")]
    MissingBuffer {
        /// Label of the primitive that needed the buffer (kind and chain position).
        primitive: String,
        /// Name of the absent buffer.
        buffer: BufferName,
    },

    /// Errors while evaluating a filter chain or compositing buffers.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// The raster backend could not provide a surface of the requested size.
    #[error("allocation error: cannot allocate {width}x{height} raster buffer")]
    Allocation {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RasterFxError {
    /// Build a [`RasterFxError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RasterFxError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`RasterFxError::MissingBuffer`] value.
    pub fn missing_buffer(primitive: impl Into<String>, buffer: BufferName) -> Self {
        Self::MissingBuffer {
            primitive: primitive.into(),
            buffer,
        }
    }

    /// Build a [`RasterFxError::Allocation`] value.
    pub fn allocation(width: u32, height: u32) -> Self {
        Self::Allocation { width, height }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
