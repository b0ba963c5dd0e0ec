use thiserror::Error;

use super::{ValueType};

/// Errors raised when reading a [`Tuple`].
///
/// [`Tuple`]: super::Tuple
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TupleError {
    #[error("index {index} is out of bounds for a tuple of length {length}")]
    IndexOutOfBounds { index: usize, length: usize },
    #[error("expected a tuple of length {expected}, found length {length}")]
    LengthMismatch { expected: usize, length: usize },
    #[error("slot {index} holds a {found}, which cannot be read as {expected}")]
    TypeMismatch { index: usize, expected: ValueType, found: String },
}
