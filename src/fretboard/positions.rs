//! Fret position engine.
//!
//! Turns (root, sequence, label scheme, fret range, tuning) into the set of
//! fretboard cells and the label each one shows.

use crate::data::{instruments::MAX_FRET, note_labels, sequences, MIDI_PLACEHOLDER};
use super::props::{PitchClass, Props};

/// Labels for the given sequence and scheme, indexed by root-relative pitch class.
///
/// Starts from a copy of the scheme and replaces the entries the sequence
/// overrides for that scheme. The shared tables are never touched.
/// An unknown scheme falls back to the first one.
pub fn compute_active_labels(sequence_name: &str, label_scheme_name: &str) -> [String; 12] {
    let scheme = note_labels::find(label_scheme_name).unwrap_or_else(|| {
        tracing::warn!(label_scheme_name, "unknown label scheme, using first");
        &note_labels::NOTE_LABELS[0]
    });
    let mut labels = scheme.to_owned_labels();

    if let Some(overrides) = sequences::find(sequence_name).and_then(|s| s.overrides_for(scheme.name)) {
        for &(degree, label) in overrides {
            labels[(degree % 12) as usize] = label.to_string();
        }
    }

    labels
}

/// Clamp a fret number to the playable range.
pub fn clamp_fret(fret: u8) -> u8 {
    fret.min(MAX_FRET)
}

/// Set the lower bound. Raising it past `to` drags `to` along.
pub fn set_from_fret(to: u8, new_from: u8) -> (u8, u8) {
    let new_from = clamp_fret(new_from);
    (new_from, to.max(new_from))
}

/// Set the upper bound. Lowering it past `from` drags `from` along.
pub fn set_to_fret(from: u8, new_to: u8) -> (u8, u8) {
    let new_to = clamp_fret(new_to);
    (from.min(new_to), new_to)
}

/// Root-relative pitch class of an absolute note.
pub fn degree_of(midi_note: u8, root: PitchClass) -> u8 {
    ((midi_note % 12) + 12 - (root % 12)) % 12
}

/// One cell of the fretboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FretPosition {
    /// String index, lowest string first.
    pub string: usize,
    pub fret: u8,
    pub midi_note: u8,
    /// Absolute pitch class.
    pub pitch_class: PitchClass,
    /// Pitch class relative to the root note.
    pub degree: u8,
}

/// Every cell within the fret range, string by string.
pub fn fret_positions(props: &Props) -> Vec<FretPosition> {
    let (from, to) = (props.from_fret.min(props.to_fret), props.to_fret);
    props
        .tuning
        .iter()
        .enumerate()
        .flat_map(|(string, &open)| {
            (from..=to).map(move |fret| {
                let midi_note = open.saturating_add(fret).min(127);
                FretPosition {
                    string,
                    fret,
                    midi_note,
                    pitch_class: midi_note % 12,
                    degree: degree_of(midi_note, props.root_note),
                }
            })
        })
        .collect()
}

/// Cells whose pitch class belongs to the current sequence.
pub fn active_positions(props: &Props) -> Vec<FretPosition> {
    fret_positions(props)
        .into_iter()
        .filter(|p| props.sequence.contains(&p.degree))
        .collect()
}

/// Text shown on a cell, with the MIDI placeholder resolved.
///
/// Note-name schemes are read by absolute pitch class, interval schemes by
/// degree.
pub fn label_for(props: &Props, position: &FretPosition) -> String {
    let index = note_labels::find(&props.note_labels_name)
        .map_or(position.degree as usize, |scheme| {
            scheme.index(position.pitch_class, position.degree)
        });
    let label = &props.note_labels[index];
    if label.contains(MIDI_PLACEHOLDER) {
        label.replace(MIDI_PLACEHOLDER, &position.midi_note.to_string())
    } else {
        label.clone()
    }
}

/// Hex color of a cell.
pub fn color_for<'a>(props: &'a Props, position: &FretPosition) -> &'a str {
    &props.note_colors[position.degree as usize]
}
