//! Snapshot-to-edit conversion.
//!
//! Turns a pair of full-text snapshots into the single edit an editor needs to
//! go from one to the other:
//!
//! - `diff`: character-level diff spans
//! - `delta`: reduction of the spans into one flat `EditDelta`
//! - `position`: flat offsets to 1-based line/column edits and back
//!
//! # Usage
//!
//! ```
//! use creplay::range::{compute_delta, to_positional};
//!
//! let old = "foo\nbar\nbaz";
//! let delta = compute_delta(old, "foo\nqux\nbaz").unwrap();
//! let edit = to_positional(&delta, old).unwrap();
//! assert_eq!((edit.start_line, edit.start_column), (2, 1));
//! assert_eq!(edit.replacement, "qux");
//! ```

mod delta;
mod diff;
mod error;
mod position;

pub use delta::{compute_delta, reduce_spans, EditDelta};
pub use diff::{diff_chars, DiffSpan};
pub use error::RangeError;
pub use position::{to_positional, LineColumn, LineEnding, LineIndex, PositionalEdit};
