//! Keyboard shortcuts.
//!
//! The bottom two keyboard rows play the role of a piano octave for root
//! notes, the digit row picks common sequences, and a few letters switch mode
//! and note size. Each key maps to the same [`Action`] the matching selector
//! would produce.

use super::actions::Action;
use super::props::{Mode, NoteSizeChoice};

/// Root note keys in pitch-class order, starting at C.
const ROOT_KEYS: [char; 12] = ['z', 's', 'x', 'd', 'c', 'v', 'g', 'b', 'h', 'n', 'j', 'm'];

/// Sequences on the digit keys `1`-`9` then `0`.
const SEQUENCE_KEYS: [(char, &str); 10] = [
    ('1', "Ionian / Major"),
    ('2', "Dorian"),
    ('3', "Phrygian"),
    ('4', "Lydian"),
    ('5', "Mixolydian"),
    ('6', "Aeolian / Minor"),
    ('7', "Locrian"),
    ('8', "Root"),
    ('9', "Chromatic"),
    ('0', "Blank"),
];

/// Action bound to a key, or `None` if the key is not a shortcut.
///
/// `key` is the logical key text as typed. Letters match in either case.
pub fn action_for_key(key: &str) -> Option<Action> {
    let mut chars = key.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    let c = c.to_ascii_lowercase();

    if let Some(root) = ROOT_KEYS.iter().position(|&k| k == c) {
        return Some(Action::ChangeRoot(root as u8));
    }
    if let Some((_, name)) = SEQUENCE_KEYS.iter().find(|(k, _)| *k == c) {
        return Some(Action::ChangeSequence(name.to_string()));
    }

    match c {
        // Octave C, one key past B
        ',' | '<' => Some(Action::ChangeRoot(0)),
        'p' => Some(Action::ChangeMode(Mode::Play)),
        'o' => Some(Action::ChangeMode(Mode::EditOne)),
        'i' => Some(Action::ChangeMode(Mode::EditAll)),
        'l' => Some(Action::ChangeNoteSize(NoteSizeChoice::Large)),
        'k' => Some(Action::ChangeNoteSize(NoteSizeChoice::Small)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sequences;

    #[test]
    fn test_root_keys() {
        assert_eq!(action_for_key("z"), Some(Action::ChangeRoot(0)));
        assert_eq!(action_for_key("S"), Some(Action::ChangeRoot(1)));
        assert_eq!(action_for_key("m"), Some(Action::ChangeRoot(11)));
        assert_eq!(action_for_key(","), Some(Action::ChangeRoot(0)));
        assert_eq!(action_for_key("<"), Some(Action::ChangeRoot(0)));
    }

    #[test]
    fn test_sequence_keys_name_real_sequences() {
        for (key, name) in SEQUENCE_KEYS {
            assert!(sequences::find(name).is_some(), "{}", name);
            assert_eq!(
                action_for_key(&key.to_string()),
                Some(Action::ChangeSequence(name.to_string()))
            );
        }
    }

    #[test]
    fn test_mode_and_size_keys() {
        assert_eq!(action_for_key("P"), Some(Action::ChangeMode(Mode::Play)));
        assert_eq!(action_for_key("o"), Some(Action::ChangeMode(Mode::EditOne)));
        assert_eq!(action_for_key("i"), Some(Action::ChangeMode(Mode::EditAll)));
        assert_eq!(
            action_for_key("l"),
            Some(Action::ChangeNoteSize(NoteSizeChoice::Large))
        );
        assert_eq!(
            action_for_key("K"),
            Some(Action::ChangeNoteSize(NoteSizeChoice::Small))
        );
    }

    #[test]
    fn test_unmatched_keys_are_ignored() {
        for key in ["q", "w", "", "Enter", "zz", "é", " "] {
            assert_eq!(action_for_key(key), None, "{:?}", key);
        }
    }
}
