use crate::capture::SessionState;

/// Conditions reported by the boundary core
///
/// None of these are fatal. A refused operation leaves the session exactly as
/// it was before the call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BoundaryError {
    #[error("polygon needs at least {required} points, got {actual}")]
    DegeneratePolygon { required: usize, actual: usize },
    #[error("no points to average")]
    EmptyInput,
    #[error("cannot finish a boundary with {count} vertices (minimum 3)")]
    InsufficientVertices { count: usize },
    #[error("removing a vertex would leave {remaining} vertices (minimum 3)")]
    MinimumVertexViolation { remaining: usize },
    #[error("invalid coordinate ({latitude}, {longitude})")]
    InvalidCoordinate { latitude: f64, longitude: f64 },
    #[error("{operation} is not allowed while {state}")]
    InvalidState { operation: &'static str, state: SessionState },
    #[error("vertex {index} out of range (len={len})")]
    VertexIndexOutOfRange { index: usize, len: usize },
}
