use thiserror::Error;

use crate::graph::VertexId;

/// Failure taxonomy for the aggregation simulator. Every variant is fatal;
/// running out of the round budget is a reported outcome, not an error.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("malformed vertex input: {reason}")]
    MalformedInput { reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("vertex identity {identity} out of range (store holds {len} vertices)")]
    IndexOutOfRange { identity: VertexId, len: usize },

    // a violated graph invariant, e.g. a missing reciprocal edge
    #[error("inconsistent graph state: {reason}")]
    InconsistentState { reason: String },
}

pub type Result<T> = std::result::Result<T, SimError>;
