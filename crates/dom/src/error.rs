use thiserror::Error;

/// Failures raised by the host tree primitives.
///
/// These mirror the exceptions a browser DOM throws for the same misuse, so
/// callers layered on top (the element builder) can surface them unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("invalid character in name {0:?}")]
    InvalidCharacter(String),
    #[error("hierarchy request: {0}")]
    HierarchyRequest(&'static str),
    #[error("node is not a child of this parent")]
    NotFound,
    #[error("syntax error: {0}")]
    Syntax(String),
}
