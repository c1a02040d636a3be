use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures reported by the containers and the analyzers built on them.
///
/// Every fallible operation checks its preconditions before mutating, so an
/// `Err` always leaves the container exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("element is already present")]
    DuplicateElement,
    #[error("element not found")]
    NotFound,
    #[error("no such key")]
    NoSuchKey,
    #[error("container is empty")]
    EmptyContainer,
}
