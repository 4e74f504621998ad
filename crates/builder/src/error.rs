use dom::DomError;
use thiserror::Error;

/// Failures while constructing an element.
///
/// Attribute failures do not roll back: whatever was applied before the
/// failing key stays on the node.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("cannot create <{tag}>")]
    Construction {
        tag: String,
        #[source]
        source: DomError,
    },
    #[error("cannot apply attribute {key:?}")]
    Attribute {
        key: String,
        #[source]
        source: DomError,
    },
    #[error("cannot append child")]
    Child(#[source] DomError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RootError {
    #[error("no element with id {0:?}")]
    NotFound(String),
    #[error("cannot mount into #{id}")]
    Mount {
        id: String,
        #[source]
        source: DomError,
    },
}

/// A name outside the known tag set.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown tag {0:?}")]
pub struct UnknownTag(pub String);
