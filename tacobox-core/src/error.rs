//! Menu loading and validation errors.
use thiserror::Error;

/// Errors raised when a menu document violates its invariants.
#[derive(Debug, Error)]
pub enum MenuError {
    #[error("menu JSON could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("menu must declare at least one step")]
    NoSteps,
    #[error("catalog item id `{id}` is declared more than once")]
    DuplicateItem { id: String },
    #[error("step {position} has ordinal {found}, expected {expected}")]
    StepOrdinal {
        position: usize,
        expected: u32,
        found: u32,
    },
    #[error("step {ordinal} is bound to category `{category}` which has no catalog items")]
    UnboundCategory { ordinal: u32, category: String },
}
