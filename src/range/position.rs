//! Line/column positions and the conversion from flat deltas.
//!
//! Editors address text by 1-based line and column. A `LineIndex` records
//! where every line starts in a text so that flat character offsets convert to
//! positions and back. Lines are split on the text's line terminator, detected
//! once from its first occurrence (`\r\n` or `\n`, defaulting to `\n`), and each
//! line's length includes its terminator.

use std::fmt;

use super::delta::EditDelta;
use super::error::RangeError;

/// A 1-based line/column position.
///
/// Column `c` means `c - 1` characters precede the cursor on that line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineColumn {
    pub line: usize,
    pub column: usize,
}

impl LineColumn {
    /// Create a position, rejecting line or column 0.
    pub fn new(line: usize, column: usize) -> Result<Self, RangeError> {
        if line == 0 || column == 0 {
            return Err(RangeError::InvalidPosition { line, column });
        }
        Ok(Self { line, column })
    }

    /// Line 1, column 1.
    pub const fn start() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl fmt::Display for LineColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Line terminator convention of a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    /// Detect the terminator from its first occurrence in `text`.
    pub fn detect(text: &str) -> Self {
        match text.find('\n') {
            Some(pos) if text[..pos].ends_with('\r') => LineEnding::CrLf,
            _ => LineEnding::Lf,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }

    /// Terminator length in characters.
    pub fn char_len(&self) -> usize {
        self.as_str().len()
    }
}

/// Line start offsets of a text, in characters.
#[derive(Debug, Clone)]
pub struct LineIndex {
    starts: Vec<usize>,
    len: usize,
    ending: LineEnding,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let ending = LineEnding::detect(text);
        let mut starts = Vec::new();
        let mut offset = 0;
        for line in text.split(ending.as_str()) {
            starts.push(offset);
            offset += line.chars().count() + ending.char_len();
        }
        Self {
            starts,
            len: text.chars().count(),
            ending,
        }
    }

    /// Number of lines (a trailing terminator opens an empty last line).
    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// Text length in characters.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn ending(&self) -> LineEnding {
        self.ending
    }

    /// Position of a flat offset. An offset on a line boundary belongs to the
    /// following line; `offset == len` is the end-of-text position.
    pub fn position_of(&self, offset: usize) -> Result<LineColumn, RangeError> {
        if offset > self.len {
            return Err(RangeError::OffsetOutOfBounds {
                offset,
                len: self.len,
            });
        }
        let line = self.starts.partition_point(|&start| start <= offset);
        Ok(LineColumn {
            line,
            column: offset - self.starts[line - 1] + 1,
        })
    }

    /// Flat offset of a position. Inverse of [`position_of`](Self::position_of).
    pub fn offset_of(&self, pos: LineColumn) -> Result<usize, RangeError> {
        let invalid = RangeError::InvalidPosition {
            line: pos.line,
            column: pos.column,
        };
        if pos.line == 0 || pos.column == 0 || pos.line > self.starts.len() {
            return Err(invalid);
        }

        let offset = self.starts[pos.line - 1] + pos.column - 1;
        let line_end = match self.starts.get(pos.line) {
            Some(&next) => next,
            None => self.len,
        };
        if offset > line_end || offset > self.len {
            return Err(invalid);
        }
        Ok(offset)
    }
}

/// A delta expressed in editor coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionalEdit {
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: usize,
    pub end_column: usize,
    pub replacement: String,
}

impl PositionalEdit {
    pub fn start(&self) -> LineColumn {
        LineColumn {
            line: self.start_line,
            column: self.start_column,
        }
    }

    pub fn end(&self) -> LineColumn {
        LineColumn {
            line: self.end_line,
            column: self.end_column,
        }
    }
}

impl fmt::Display for PositionalEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{} <- {:?}",
            self.start(),
            self.end(),
            self.replacement
        )
    }
}

/// Convert a delta into line/column coordinates of `reference`, the text the
/// delta was computed against.
pub fn to_positional(delta: &EditDelta, reference: &str) -> Result<PositionalEdit, RangeError> {
    let index = LineIndex::new(reference);
    if delta.end() > index.len() {
        return Err(RangeError::DeltaOutOfBounds {
            offset: delta.offset,
            length: delta.length,
            len: index.len(),
        });
    }

    let start = index.position_of(delta.offset)?;
    let end = index.position_of(delta.end())?;
    Ok(PositionalEdit {
        start_line: start.line,
        start_column: start.column,
        end_line: end.line,
        end_column: end.column,
        replacement: delta.replacement.clone(),
    })
}
