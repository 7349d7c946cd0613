//! Property tests for snapshot-to-edit conversion.

use creplay::range::{compute_delta, to_positional, LineIndex};
use proptest::prelude::*;

fn snapshot() -> impl Strategy<Value = String> {
    "[ab é\n]{0,40}"
}

proptest! {
    #[test]
    fn delta_turns_old_into_new(old in snapshot(), new in snapshot()) {
        match compute_delta(&old, &new) {
            None => prop_assert_eq!(&old, &new),
            Some(delta) => prop_assert_eq!(delta.apply(&old).unwrap(), new),
        }
    }

    #[test]
    fn delta_is_tight(old in snapshot(), new in snapshot()) {
        if let Some(delta) = compute_delta(&old, &new) {
            let old_chars: Vec<char> = old.chars().collect();
            let new_chars: Vec<char> = new.chars().collect();
            // Text before the window is shared
            prop_assert!(old_chars[..delta.offset] == new_chars[..delta.offset]);
            prop_assert!(delta.end() <= old_chars.len());
        }
    }

    #[test]
    fn positional_edit_maps_back_to_delta(old in snapshot(), new in snapshot()) {
        if let Some(delta) = compute_delta(&old, &new) {
            let edit = to_positional(&delta, &old).unwrap();
            let index = LineIndex::new(&old);
            prop_assert_eq!(index.offset_of(edit.start()).unwrap(), delta.offset);
            prop_assert_eq!(index.offset_of(edit.end()).unwrap(), delta.end());
            prop_assert!(edit.start_line >= 1 && edit.start_column >= 1);
        }
    }
}
