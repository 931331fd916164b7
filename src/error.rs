//! Error taxonomy for the block extraction pipeline.

use thiserror::Error;

use crate::models::NodeId;

/// Errors surfaced by the core pipeline.
///
/// All operations here are deterministic pure functions over immutable
/// input, so there is no retry story: every variant is fatal for the
/// current dataset and propagates to the caller. No partial block set is
/// ever returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A way references a node id that is absent from the node table.
    /// This indicates malformed input and is never silently skipped.
    #[error("node {0} is referenced by a way but missing from the node table")]
    MissingNode(NodeId),

    /// A bounding box has zero (or inverted) range on one axis, which
    /// would make the linear projection divide by zero.
    #[error("degenerate {axis} range {min}..{max} in geographic bounds")]
    DegenerateBounds {
        axis: &'static str,
        min: f64,
        max: f64,
    },

    /// A superlinear stage was asked to process more items than the
    /// configured budget allows. Surfaced before the stage starts.
    #[error("{stage}: {actual} items exceed the configured budget of {budget}")]
    BudgetExceeded {
        stage: &'static str,
        actual: usize,
        budget: usize,
    },
}
