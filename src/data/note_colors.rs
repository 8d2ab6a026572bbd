//! Note color schemes, indexed by root-relative pitch class.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteColorsDef {
    pub name: &'static str,
    /// Hex colors (`#rrggbb`) for pitch classes 0-11 relative to the root.
    pub colors: [&'static str; 12],
}

impl NoteColorsDef {
    pub fn to_owned_colors(&self) -> [String; 12] {
        self.colors.map(str::to_string)
    }
}

/// All note color schemes in selector order. The first entry is the default.
pub static NOTE_COLORS: &[NoteColorsDef] = &[
    NoteColorsDef {
        name: "Root",
        colors: [
            "#e53935", "#9e9e9e", "#9e9e9e", "#9e9e9e", "#9e9e9e", "#9e9e9e",
            "#9e9e9e", "#9e9e9e", "#9e9e9e", "#9e9e9e", "#9e9e9e", "#9e9e9e",
        ],
    },
    NoteColorsDef {
        name: "Triad",
        colors: [
            "#e53935", "#9e9e9e", "#9e9e9e", "#1e88e5", "#1e88e5", "#9e9e9e",
            "#43a047", "#43a047", "#43a047", "#9e9e9e", "#9e9e9e", "#9e9e9e",
        ],
    },
    NoteColorsDef {
        name: "Seventh",
        colors: [
            "#e53935", "#9e9e9e", "#9e9e9e", "#1e88e5", "#1e88e5", "#9e9e9e",
            "#43a047", "#43a047", "#43a047", "#fb8c00", "#fb8c00", "#fb8c00",
        ],
    },
    NoteColorsDef {
        name: "Rainbow",
        colors: [
            "#e53935", "#f4511e", "#fb8c00", "#fdd835", "#c0ca33", "#43a047",
            "#00897b", "#00acc1", "#1e88e5", "#3949ab", "#8e24aa", "#d81b60",
        ],
    },
    NoteColorsDef {
        name: "Monochrome",
        colors: [
            "#424242", "#424242", "#424242", "#424242", "#424242", "#424242",
            "#424242", "#424242", "#424242", "#424242", "#424242", "#424242",
        ],
    },
];

pub fn default_colors() -> &'static NoteColorsDef {
    &NOTE_COLORS[0]
}

pub fn find(name: &str) -> Option<&'static NoteColorsDef> {
    NOTE_COLORS.iter().find(|c| c.name == name)
}

/// Name of the scheme whose colors equal `colors`, case-insensitively.
pub fn name_from_value(colors: &[String; 12]) -> Option<&'static str> {
    NOTE_COLORS
        .iter()
        .find(|def| {
            def.colors
                .iter()
                .zip(colors.iter())
                .all(|(a, b)| a.eq_ignore_ascii_case(b))
        })
        .map(|def| def.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_colors_are_hex() {
        for def in NOTE_COLORS {
            for c in def.colors {
                assert!(c.starts_with('#') && c.len() == 7, "{}: {}", def.name, c);
            }
        }
    }

    #[test]
    fn test_name_from_value() {
        let rainbow = find("Rainbow").unwrap().to_owned_colors();
        assert_eq!(name_from_value(&rainbow), Some("Rainbow"));

        let upper = rainbow.map(|c| c.to_uppercase());
        assert_eq!(name_from_value(&upper), Some("Rainbow"));

        let custom: [String; 12] = std::array::from_fn(|_| "#123456".to_string());
        assert_eq!(name_from_value(&custom), None);
    }
}
