//! Interval sequences (scales and chords) grouped by category.
//!
//! Each sequence is a list of root-relative pitch classes. A sequence may
//! carry label overrides: for a given label scheme, replacement strings for
//! specific pitch classes (e.g. Lydian shows its 6 as "♯4" rather than "♭5").

/// Replacement labels for one label scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelOverride {
    /// Name of the label scheme these overrides apply to.
    pub scheme: &'static str,
    /// (root-relative pitch class, label) pairs.
    pub labels: &'static [(u8, &'static str)],
}

/// A named scale or chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalSequence {
    pub name: &'static str,
    /// Root-relative pitch classes. May be empty; duplicates are allowed.
    pub sequence: &'static [u8],
    pub overrides: &'static [LabelOverride],
}

impl IntervalSequence {
    /// Overrides registered for a label scheme, if any.
    pub fn overrides_for(&self, scheme: &str) -> Option<&'static [(u8, &'static str)]> {
        self.overrides
            .iter()
            .find(|o| o.scheme == scheme)
            .map(|o| o.labels)
    }

    /// Whether a root-relative pitch class belongs to this sequence.
    pub fn contains(&self, degree: u8) -> bool {
        self.sequence.contains(&(degree % 12))
    }
}

/// A selector group of sequences.
#[derive(Debug, Clone, Copy)]
pub struct SequenceCategory {
    pub name: &'static str,
    pub sequences: &'static [IntervalSequence],
}

const fn seq(name: &'static str, sequence: &'static [u8]) -> IntervalSequence {
    IntervalSequence {
        name,
        sequence,
        overrides: &[],
    }
}

const fn seq_with(
    name: &'static str,
    sequence: &'static [u8],
    overrides: &'static [LabelOverride],
) -> IntervalSequence {
    IntervalSequence {
        name,
        sequence,
        overrides,
    }
}

const fn ov(scheme: &'static str, labels: &'static [(u8, &'static str)]) -> LabelOverride {
    LabelOverride { scheme, labels }
}

const NINTH: &[LabelOverride] = &[ov("Quality", &[(2, "M9")]), ov("Relative", &[(2, "9")])];

const SHARP_FIVE: &[LabelOverride] = &[
    ov("Quality", &[(8, "A5")]),
    ov("Relative", &[(8, "#5")]),
    ov("Extension", &[(8, "#5")]),
];

const AUGMENTED_SIXTH: &[LabelOverride] = &[
    ov("Quality", &[(10, "A6")]),
    ov("Relative", &[(10, "#6")]),
    ov("Extension", &[(10, "#13")]),
];

/// All sequences, grouped, in selector order.
pub static NOTE_SEQUENCES: &[SequenceCategory] = &[
    SequenceCategory {
        name: "Modes",
        sequences: &[
            seq("Ionian / Major", &[0, 2, 4, 5, 7, 9, 11]),
            seq("Dorian", &[0, 2, 3, 5, 7, 9, 10]),
            seq("Phrygian", &[0, 1, 3, 5, 7, 8, 10]),
            seq_with(
                "Lydian",
                &[0, 2, 4, 6, 7, 9, 11],
                &[
                    ov("Quality", &[(6, "A4")]),
                    ov("Relative", &[(6, "♯4")]),
                    ov("Extension", &[(6, "#11")]),
                ],
            ),
            seq("Mixolydian", &[0, 2, 4, 5, 7, 9, 10]),
            seq("Aeolian / Minor", &[0, 2, 3, 5, 7, 8, 10]),
            seq("Locrian", &[0, 1, 3, 5, 6, 8, 10]),
        ],
    },
    SequenceCategory {
        name: "Major",
        sequences: &[
            seq("M / Major", &[0, 4, 7]),
            seq("M6 / Major 6th", &[0, 4, 7, 9]),
            seq("M7 / Major 7th", &[0, 4, 7, 11]),
            seq_with("M9 / Major 9th", &[0, 2, 4, 7, 11], NINTH),
            seq_with("add9 / Major add 9", &[0, 2, 4, 7], NINTH),
            seq_with("6/9 / Major 6/9", &[0, 2, 4, 7, 9], NINTH),
        ],
    },
    SequenceCategory {
        name: "Minor",
        sequences: &[
            seq("m / Minor", &[0, 3, 7]),
            seq("m6 / Minor (maj)6th", &[0, 3, 7, 9]),
            seq("m7 / Minor 7th", &[0, 3, 7, 10]),
            seq_with("m9 / Minor 9th", &[0, 2, 3, 7, 10], NINTH),
            seq_with("m(add9) / Minor add 9", &[0, 2, 3, 7], NINTH),
            seq_with("m6/9 / Minor 6/9", &[0, 2, 3, 7, 9], NINTH),
        ],
    },
    SequenceCategory {
        name: "Dominant",
        sequences: &[
            seq("7 / Dominant 7th", &[0, 4, 7, 10]),
            seq_with("9 / Dominant 9th", &[0, 2, 4, 7, 10], NINTH),
        ],
    },
    SequenceCategory {
        name: "Pentatonic",
        sequences: &[
            seq("Major Pentatonic", &[0, 2, 4, 7, 9]),
            seq("Suspended Pentatonic", &[0, 2, 5, 7, 10]),
            seq("Blues Minor Pentatonic", &[0, 3, 5, 8, 10]),
            seq("Blues Major Pentatonic", &[0, 2, 5, 7, 9]),
            seq("Minor Pentatonic", &[0, 3, 5, 7, 10]),
            seq("Dominant Pentatonic", &[0, 2, 4, 7, 10]),
        ],
    },
    SequenceCategory {
        name: "Diminished",
        sequences: &[
            seq("dim / o / Diminished Triad", &[0, 3, 6]),
            seq_with(
                "dim7 / o7 / Diminished 7th",
                &[0, 3, 6, 9],
                &[
                    ov("Quality", &[(9, "d7")]),
                    ov("Relative", &[(9, "♭♭7")]),
                    ov("Extension", &[(9, "♭♭7")]),
                ],
            ),
            seq("m7♭5 / ø7 / Half-Diminished 7th", &[0, 3, 6, 10]),
            seq_with(
                "Whole-Half Diminished",
                &[0, 2, 3, 5, 6, 8, 9, 11],
                &[
                    ov("Quality", &[(8, "A5")]),
                    ov("Relative", &[(8, "♯5")]),
                    ov("Extension", &[(8, "♯5")]),
                ],
            ),
            seq_with(
                "Half-Whole / Dominant Diminished",
                &[0, 1, 3, 4, 6, 7, 9, 10],
                &[
                    ov("Quality", &[(3, "A2"), (6, "A4")]),
                    ov("Relative", &[(3, "♯2"), (6, "♯4")]),
                    ov("Extension", &[(3, "♯9"), (6, "♯11")]),
                ],
            ),
        ],
    },
    SequenceCategory {
        name: "Augmented",
        sequences: &[
            seq_with("aug / + / Augmented Triad", &[0, 4, 8], SHARP_FIVE),
            seq_with("It+6 / Italian 6th", &[0, 4, 10], AUGMENTED_SIXTH),
            seq_with("Fr+6 / French 6th", &[0, 4, 6, 10], AUGMENTED_SIXTH),
            seq_with("Ger+6 / German 6th", &[0, 4, 7, 10], AUGMENTED_SIXTH),
            seq_with("aug7 / +7 / 7#5 / Augmented Seventh", &[0, 4, 8, 10], SHARP_FIVE),
        ],
    },
    SequenceCategory {
        name: "Melodic Minor",
        sequences: &[
            seq("Melodic Minor", &[0, 2, 3, 5, 7, 9, 11]),
            seq("Phrygian ♮6 / Dorian ♭2", &[0, 1, 3, 5, 7, 9, 10]),
            seq("Lydian Augmented / Lydian ♯5", &[0, 2, 4, 6, 8, 9, 11]),
            seq("Lydian Dominant / Mixolydian ♯4", &[0, 2, 4, 6, 7, 9, 10]),
            seq("Mixolydian ♭6", &[0, 2, 4, 5, 7, 8, 10]),
            seq("Locrian ♮2 / Half Diminished", &[0, 2, 3, 5, 6, 8, 10]),
            seq("Super Locrian / Altered", &[0, 1, 3, 4, 6, 8, 10]),
        ],
    },
    SequenceCategory {
        name: "Harmonic Minor",
        sequences: &[
            seq("Harmonic Minor", &[0, 2, 3, 5, 7, 8, 11]),
            seq("Locrian ♯6", &[0, 1, 3, 5, 6, 9, 10]),
            seq("Ionian ♯5", &[0, 2, 4, 5, 8, 9, 11]),
            seq("Dorian ♯4", &[0, 2, 3, 6, 7, 9, 10]),
            seq("Phrygian Dominant", &[0, 1, 4, 5, 7, 8, 10]),
            seq("Lydian ♯2", &[0, 3, 4, 6, 7, 9, 11]),
            seq("Super Locrian ♭♭7", &[0, 1, 3, 4, 6, 8, 9]),
        ],
    },
    SequenceCategory {
        name: "Other",
        sequences: &[
            seq("Root", &[0]),
            seq("Chromatic", &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]),
            seq("Blank", &[]),
            seq("Root and 5th", &[0, 7]),
            seq("Blues", &[0, 3, 5, 6, 7, 10]),
            seq("Whole Tone", &[0, 2, 4, 6, 8, 10]),
        ],
    },
];

/// Iterate every sequence across all categories, in selector order.
pub fn all() -> impl Iterator<Item = &'static IntervalSequence> {
    NOTE_SEQUENCES.iter().flat_map(|c| c.sequences.iter())
}

/// Look up a sequence by name.
pub fn find(name: &str) -> Option<&'static IntervalSequence> {
    all().find(|s| s.name == name)
}
