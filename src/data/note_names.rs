//! Pitch-class names.

/// Display names of the 12 pitch classes, C = 0.
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C♯", "D", "D♯", "E", "F", "F♯", "G", "G♯", "A", "A♯", "B",
];

/// Flat spellings, accepted when parsing.
const FLAT_NAMES: [&str; 12] = [
    "C", "D♭", "D", "E♭", "E", "F", "G♭", "G", "A♭", "A", "B♭", "B",
];

/// Name of a pitch class. Any integer is taken mod 12.
pub fn name_from_index(index: u8) -> &'static str {
    NOTE_NAMES[(index % 12) as usize]
}

/// Pitch class of a note name.
///
/// Accepts sharp and flat spellings, with either the unicode accidentals or
/// their ASCII stand-ins (`#`, `b`). Returns `None` for anything else.
pub fn index_from_name(name: &str) -> Option<u8> {
    let mut chars = name.trim().chars();
    let head = chars.next()?;
    // Only the accidental is rewritten, so "B" stays a B and "Bb" becomes B♭.
    let tail: String = chars
        .map(|c| match c {
            '#' => '♯',
            'b' => '♭',
            other => other,
        })
        .collect();
    let normalized = format!("{}{}", head, tail);

    NOTE_NAMES
        .iter()
        .position(|n| *n == normalized)
        .or_else(|| FLAT_NAMES.iter().position(|n| *n == normalized))
        .map(|i| i as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_from_index_wraps() {
        assert_eq!(name_from_index(0), "C");
        assert_eq!(name_from_index(11), "B");
        assert_eq!(name_from_index(12), "C");
        assert_eq!(name_from_index(25), "C♯");
    }

    #[test]
    fn test_index_from_name_sharps_and_flats() {
        assert_eq!(index_from_name("C"), Some(0));
        assert_eq!(index_from_name("F♯"), Some(6));
        assert_eq!(index_from_name("G♭"), Some(6));
        assert_eq!(index_from_name("A#"), Some(10));
        assert_eq!(index_from_name("Bb"), Some(10));
        assert_eq!(index_from_name("B"), Some(11));
    }

    #[test]
    fn test_index_from_name_unknown() {
        assert_eq!(index_from_name("H"), None);
        assert_eq!(index_from_name(""), None);
    }

    #[test]
    fn test_round_trip_all_names() {
        for (i, name) in NOTE_NAMES.iter().enumerate() {
            assert_eq!(index_from_name(name), Some(i as u8));
        }
    }
}
