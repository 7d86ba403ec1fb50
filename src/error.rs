//! Errors raised while building collision shapes.

use thiserror::Error;

/// Failure to build or decompose a polygon shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// A polygon needs at least three vertices.
    #[error("polygon needs at least 3 vertices, got {count}")]
    TooFewVertices {
        /// Number of vertices supplied.
        count: usize,
    },
    /// An input coordinate was NaN or infinite.
    #[error("vertex {index} has a non-finite coordinate")]
    NonFiniteVertex {
        /// Position of the offending vertex in the input list.
        index: usize,
    },
    /// Ear clipping ran out of valid ears before covering the outline.
    ///
    /// Recoverable: the triangles emitted so far are still valid pieces.
    #[error("decomposition stopped after {emitted} of {expected} triangles")]
    IncompleteDecomposition {
        /// Triangles produced before clipping stalled.
        emitted: usize,
        /// Triangles a simple polygon of this size decomposes into.
        expected: usize,
    },
}

/// Checks the shared preconditions of every polygon constructor.
pub(crate) fn validate_outline(points: &[crate::math::Vec2]) -> Result<(), ShapeError> {
    if points.len() < 3 {
        return Err(ShapeError::TooFewVertices {
            count: points.len(),
        });
    }
    if let Some(index) = points.iter().position(|p| !p.is_finite()) {
        return Err(ShapeError::NonFiniteVertex { index });
    }
    Ok(())
}
