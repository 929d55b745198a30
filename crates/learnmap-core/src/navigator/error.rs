use thiserror::Error;

/// Errors from structural navigation queries.
///
/// Plain prerequisite lookups never fail; they fall back instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigatorError {
    #[error("Knowledge point not found: {0}")]
    UnknownNode(String),

    #[error("Prerequisite cycle among: {}", .0.join(", "))]
    Cycle(Vec<String>),
}
