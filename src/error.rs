use thiserror::Error;

/// Errors signalled by view operations that cannot return an optional result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    /// `unsafe_get` was called with an index outside `[0, size)`.
    #[error("index {index} out of range for view of size {size}")]
    IndexOutOfRange { index: usize, size: usize },

    /// A must-succeed non-empty conversion was attempted on an empty source.
    #[error("cannot construct non-empty view from empty input")]
    EmptyInput,
}

pub type Result<T> = std::result::Result<T, ViewError>;
