//! Fretted instrument definitions.

/// Highest fret any instrument exposes.
pub const MAX_FRET: u8 = 24;

/// Instrument-specific defaults. Switching instrument replaces all of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstrumentDef {
    pub name: &'static str,
    /// Open-string MIDI notes, lowest string first.
    pub tuning: &'static [u8],
    pub from_fret: u8,
    pub to_fret: u8,
}

/// All instruments in selector order. The first entry is the default.
pub static INSTRUMENTS: &[InstrumentDef] = &[
    InstrumentDef {
        name: "Guitar",
        tuning: &[40, 45, 50, 55, 59, 64],
        from_fret: 0,
        to_fret: 12,
    },
    InstrumentDef {
        name: "Guitar (7 String)",
        tuning: &[35, 40, 45, 50, 55, 59, 64],
        from_fret: 0,
        to_fret: 12,
    },
    InstrumentDef {
        name: "Guitar (Drop D)",
        tuning: &[38, 45, 50, 55, 59, 64],
        from_fret: 0,
        to_fret: 12,
    },
    InstrumentDef {
        name: "Bass",
        tuning: &[28, 33, 38, 43],
        from_fret: 0,
        to_fret: 12,
    },
    InstrumentDef {
        name: "Bass (5 String)",
        tuning: &[23, 28, 33, 38, 43],
        from_fret: 0,
        to_fret: 12,
    },
    InstrumentDef {
        name: "Ukulele",
        tuning: &[67, 60, 64, 69],
        from_fret: 0,
        to_fret: 12,
    },
    InstrumentDef {
        name: "Mandolin",
        tuning: &[55, 62, 69, 76],
        from_fret: 0,
        to_fret: 12,
    },
    InstrumentDef {
        name: "Banjo",
        tuning: &[67, 50, 55, 59, 62],
        from_fret: 0,
        to_fret: 12,
    },
];

/// The default instrument.
pub fn default_instrument() -> &'static InstrumentDef {
    &INSTRUMENTS[0]
}

/// Look up an instrument by name.
pub fn find(name: &str) -> Option<&'static InstrumentDef> {
    INSTRUMENTS.iter().find(|i| i.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_guitar() {
        assert_eq!(default_instrument().name, "Guitar");
        assert_eq!(default_instrument().tuning.len(), 6);
    }

    #[test]
    fn test_ranges_valid() {
        for inst in INSTRUMENTS {
            assert!(inst.from_fret <= inst.to_fret, "{}", inst.name);
            assert!(inst.to_fret <= MAX_FRET, "{}", inst.name);
            assert!(!inst.tuning.is_empty());
            // Highest playable note must stay inside the MIDI range
            assert!(inst.tuning.iter().all(|&t| t as u16 + MAX_FRET as u16 <= 127));
        }
    }
}
