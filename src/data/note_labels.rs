//! Label schemes: how each root-relative pitch class is displayed.

/// Placeholder replaced by the absolute MIDI note number when rendering.
pub const MIDI_PLACEHOLDER: &str = "<%MIDI%>";

/// A named notation convention with one display string per pitch class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelScheme {
    /// Name shown in the label selector.
    pub name: &'static str,
    /// Labels indexed by root-relative pitch class 0-11, or by absolute
    /// pitch class when `absolute` is set.
    pub labels: [&'static str; 12],
    /// Note names rather than intervals: indexed from C, not from the root.
    pub absolute: bool,
}

impl LabelScheme {
    /// An owned copy of the labels, safe to overwrite.
    pub fn to_owned_labels(&self) -> [String; 12] {
        self.labels.map(str::to_string)
    }

    /// Index into `labels` for a note given its absolute and root-relative
    /// pitch classes.
    pub fn index(&self, pitch_class: u8, degree: u8) -> usize {
        if self.absolute {
            (pitch_class % 12) as usize
        } else {
            (degree % 12) as usize
        }
    }
}

/// All label schemes in selector order.
pub static NOTE_LABELS: &[LabelScheme] = &[
    LabelScheme {
        name: "None",
        labels: ["", "", "", "", "", "", "", "", "", "", "", ""],
        absolute: false,
    },
    LabelScheme {
        name: "Pitch Class (♯)",
        labels: ["C", "C♯", "D", "D♯", "E", "F", "F♯", "G", "G♯", "A", "A♯", "B"],
        absolute: true,
    },
    LabelScheme {
        name: "Pitch Class (♭)",
        labels: ["C", "D♭", "D", "E♭", "E", "F", "G♭", "G", "A♭", "A", "B♭", "B"],
        absolute: true,
    },
    LabelScheme {
        name: "Quality",
        labels: ["P1", "m2", "M2", "m3", "M3", "P4", "d5", "P5", "m6", "M6", "m7", "M7"],
        absolute: false,
    },
    LabelScheme {
        name: "Relative",
        labels: ["1", "♭2", "2", "♭3", "3", "4", "♭5", "5", "♭6", "6", "♭7", "7"],
        absolute: false,
    },
    LabelScheme {
        name: "Extension",
        labels: ["1", "♭9", "9", "♭3", "3", "11", "♭5", "5", "♭13", "13", "♭7", "7"],
        absolute: false,
    },
    LabelScheme {
        name: "MIDI",
        labels: [MIDI_PLACEHOLDER; 12],
        absolute: false,
    },
    LabelScheme {
        name: "Integer",
        labels: ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11"],
        absolute: false,
    },
    LabelScheme {
        name: "Moveable Do",
        labels: ["Do", "Ra", "Re", "Me", "Mi", "Fa", "Fi", "Sol", "Le", "La", "Te", "Ti"],
        absolute: false,
    },
    LabelScheme {
        name: "Moveable La",
        labels: ["La", "Te", "Ti", "Do", "Di", "Re", "Me", "Mi", "Fa", "Fi", "Sol", "Si"],
        absolute: false,
    },
];

/// Look up a label scheme by name.
pub fn find(name: &str) -> Option<&'static LabelScheme> {
    NOTE_LABELS.iter().find(|scheme| scheme.name == name)
}
