//! Errors returned when reading trees back from text.

use thiserror::Error;

/// Failure to deserialize a [`BinaryTree`](crate::binary_tree::BinaryTree).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A token was neither `#` nor an integer.
    #[error("invalid value {token:?} at position {position}")]
    InvalidValue {
        /// The offending token.
        token: String,
        /// Index of the token in the comma separated input.
        position: usize,
    },
    /// Tokens were left over after a complete tree was read.
    #[error("trailing input starting at position {position}")]
    TrailingInput {
        /// Index of the first unread token.
        position: usize,
    },
}
