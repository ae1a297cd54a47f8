//! Construction-time error types.
//!
//! Per the propagation policy: malformed schemas and optimizer
//! misconfiguration abort construction and are surfaced here. Geometric
//! degeneracies and router failures are *not* represented as errors — they
//! are absorbed silently (empty gradients) or logged and skipped, per the
//! router module.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("duplicate node id: {0}")]
    DuplicateNodeId(String),

    #[error("duplicate edge id: {0}")]
    DuplicateEdgeId(String),

    #[error("node {node} references unknown child {child}")]
    UnknownChild { node: String, child: String },

    #[error("edge {edge} references unknown node {node}")]
    UnknownNode { edge: String, node: String },

    #[error("edge {edge} references unknown port {port} on node {node}")]
    UnknownPort {
        edge: String,
        node: String,
        port: String,
    },

    #[error("energy-adaptive optimizer decay must be <= 1.0, got {0}")]
    InvalidDecay(f64),

    #[error("energy-adaptive optimizer growth must be >= 1.0, got {0}")]
    InvalidGrowth(f64),

    #[error("energy-adaptive optimizer wait must be >= 0, got {0}")]
    InvalidWait(i64),

    #[error("scheduler range end ({end}) must be strictly greater than the previous end ({previous_end})")]
    NonMonotoneSchedule { previous_end: f64, end: f64 },
}

pub type LayoutResult<T> = Result<T, LayoutError>;
