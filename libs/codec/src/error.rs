//! Error types for sequence decoding and encoding.

use thiserror::Error;

use crate::types::Key;

/// Errors that can occur when decoding or encoding identity sequences.
///
/// Parse failures inside a width-exact slice (a non-digit serial, an
/// impossible calendar date) are not errors: they leave the sequence
/// incomplete and surface through `Identity::is_valid`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The raw slice length does not match the sequence width.
    #[error("sequence expects width {expected}, got {actual}")]
    WidthMismatch { expected: usize, actual: usize },

    /// Encode was attempted while a declared key had no value.
    #[error("missing value for key '{key}'")]
    IncompleteValue { key: Key },

    /// A stored value's variant does not fit the sequence slot.
    #[error("value for key '{key}' does not fit this sequence kind")]
    ValueMismatch { key: Key },

    /// A number has more digits than the sequence width.
    #[error("value for key '{key}' does not fit in {width} digits")]
    Overflow { key: Key, width: usize },
}

impl CodecError {
    /// Returns true if this error indicates a width mismatch.
    pub fn is_width_mismatch(&self) -> bool {
        matches!(self, CodecError::WidthMismatch { .. })
    }

    /// Returns true if this error indicates a missing value.
    pub fn is_incomplete(&self) -> bool {
        matches!(self, CodecError::IncompleteValue { .. })
    }
}
