//! Range conversion errors.

/// Errors raised when a delta or position does not fit the text it refers to.
///
/// These are caller contract violations: a delta computed against one text
/// and converted against another, or an editor position outside the buffer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    #[error("Offset {offset} is past the end of a {len}-character text")]
    OffsetOutOfBounds { offset: usize, len: usize },

    #[error("Delta [{offset}, {offset}+{length}) does not fit a {len}-character text")]
    DeltaOutOfBounds {
        offset: usize,
        length: usize,
        len: usize,
    },

    #[error("Invalid position {line}:{column}")]
    InvalidPosition { line: usize, column: usize },
}
