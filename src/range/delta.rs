//! Single-range edit deltas.
//!
//! A delta replaces `length` characters starting at `offset` with
//! `replacement`. Replaying a recording turns every pair of consecutive
//! snapshots into one delta, so the editor receives a single edit per event
//! instead of a full-buffer rewrite.

use super::diff::{diff_chars, DiffSpan};
use super::error::RangeError;

/// A flat single-range replace operation, measured in characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDelta {
    /// Characters of the old text before the edited window
    pub offset: usize,
    /// Characters of the old text replaced by the edit
    pub length: usize,
    /// Text inserted in place of the window
    pub replacement: String,
}

impl EditDelta {
    pub fn new(offset: usize, length: usize, replacement: impl Into<String>) -> Self {
        Self {
            offset,
            length,
            replacement: replacement.into(),
        }
    }

    /// Exclusive end of the replaced window in the old text.
    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    pub fn is_insertion(&self) -> bool {
        self.length == 0
    }

    pub fn is_deletion(&self) -> bool {
        self.replacement.is_empty()
    }

    /// Splice the delta into `text`.
    pub fn apply(&self, text: &str) -> Result<String, RangeError> {
        let len = text.chars().count();
        if self.end() > len {
            return Err(RangeError::DeltaOutOfBounds {
                offset: self.offset,
                length: self.length,
                len,
            });
        }

        let mut out = String::with_capacity(text.len() + self.replacement.len());
        out.extend(text.chars().take(self.offset));
        out.push_str(&self.replacement);
        out.extend(text.chars().skip(self.end()));
        Ok(out)
    }
}

/// Compute the single-range delta turning `old` into `new`.
///
/// Returns `None` when the texts are identical. Callers must treat that as
/// "nothing to apply": there is no meaningful range for an unchanged text.
pub fn compute_delta(old: &str, new: &str) -> Option<EditDelta> {
    if old == new {
        return None;
    }
    reduce_spans(&diff_chars(old, new))
}

/// Collapse diff spans into one delta covering everything from the first to
/// the last changed span.
///
/// Equal spans before the first change become the offset. Equal spans between
/// changes are counted in `length` and repeated in `replacement`. Equal spans
/// after the last change are left untouched. Returns `None` when no span
/// changes anything.
pub fn reduce_spans(spans: &[DiffSpan]) -> Option<EditDelta> {
    let first = spans.iter().position(DiffSpan::is_change)?;
    let last = spans.iter().rposition(DiffSpan::is_change)?;

    let offset = spans[..first].iter().map(DiffSpan::char_len).sum();
    let mut length = 0;
    let mut replacement = String::new();

    for span in &spans[first..=last] {
        match span {
            DiffSpan::Equal(text) => {
                length += span.char_len();
                replacement.push_str(text);
            }
            DiffSpan::Removed(_) => length += span.char_len(),
            DiffSpan::Added(text) => replacement.push_str(text),
        }
    }

    Some(EditDelta {
        offset,
        length,
        replacement,
    })
}
