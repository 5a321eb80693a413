//! # Flowchart Errors
//!
//! Every failure the compiler can report. Structural variants name the node
//! at which the invariant broke so the diagnostic points at the input.

use thiserror::Error;

/// Errors produced while building, sequencing, linking or flushing a flowchart
#[derive(Debug, Error)]
pub enum FlowchartError {
    /// The tree contributed no element to the call sequence
    #[error("empty call sequence: tree rooted at '{root}' contributes no node")]
    EmptySequence { root: String },

    /// A branch group holds a fork with no elements
    #[error("empty fork {fork} in branch group owned by '{owner}'")]
    EmptyFork { owner: String, fork: usize },

    /// Two branch groups follow each other with no node in between
    #[error(
        "branch group owned by '{head}' is directly followed by branch group owned by '{tail}'"
    )]
    AdjacentBranchGroups { head: String, tail: String },

    /// The deployment document has no predictor graph to draw
    #[error("deployment '{0}' has no predictors")]
    NoPredictors(String),

    /// The requested predictor index is out of range
    #[error("deployment '{deployment}' has {available} predictors, index {index} requested")]
    PredictorNotFound {
        deployment: String,
        index: usize,
        available: usize,
    },

    /// The deployment or config document could not be decoded
    #[error("failed to decode document: {0}")]
    Decode(#[from] serde_json::Error),

    /// The drawing surface rejected an instruction
    #[error("drawing surface error: {0}")]
    Surface(String),
}

pub type Result<T> = std::result::Result<T, FlowchartError>;
