//! Props reducer.
//!
//! Every control change is expressed as an [`Action`]. Applying an action
//! leaves [`Props`] fully consistent (sequence and labels are always updated
//! together) and reports how the grid has to re-render.

use crate::data::{color_themes, instruments, note_colors};
use super::positions::{compute_active_labels, set_from_fret, set_to_fret};
use super::props::{
    resolve_label_scheme_name, resolve_sequence_name, ColorTheme, Hand, Mode, NoteDuration,
    NoteSizeChoice, PitchClass, Props,
};

/// A change requested by a selector or a keyboard shortcut.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ChangeInstrument(String),
    ChangeRoot(PitchClass),
    ChangeSequence(String),
    ChangeFromFret(u8),
    ChangeToFret(u8),
    ChangeMode(Mode),
    ChangeHand(Hand),
    ChangeNoteLabels(String),
    ChangeNoteColors(String),
    ChangeNoteSize(NoteSizeChoice),
    ChangeNoteDuration(NoteDuration),
    ChangeColorTheme(String),
}

/// What the grid must do after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Render {
    /// Nothing visible changed.
    None,
    /// Redraw from props, keeping per-note edits.
    Update {
        /// Also set every note back to `note_sizes.first`.
        reset_sizes: bool,
    },
    /// Rebuild the grid, discarding per-note edits.
    Reset,
    /// Re-theme every child and the grid, then redraw.
    Restyle,
}

impl Props {
    /// Apply an action in place.
    ///
    /// Unknown names fall back to the first table entry, so a malformed
    /// selection never leaves props half-written.
    pub fn apply(&mut self, action: &Action) -> Render {
        match action {
            Action::ChangeInstrument(name) => {
                let instrument = instruments::find(name).unwrap_or_else(|| {
                    tracing::warn!(name = name.as_str(), "unknown instrument, using default");
                    instruments::default_instrument()
                });
                self.instrument_name = instrument.name.to_string();
                self.tuning = instrument.tuning.to_vec();
                self.from_fret = instrument.from_fret;
                self.to_fret = instrument.to_fret;
                Render::Reset
            }
            Action::ChangeRoot(root) => {
                self.root_note = root % 12;
                Render::Reset
            }
            Action::ChangeSequence(name) => {
                self.update_sequence_and_labels(name, &self.note_labels_name.clone());
                Render::Reset
            }
            Action::ChangeFromFret(fret) => {
                (self.from_fret, self.to_fret) = set_from_fret(self.to_fret, *fret);
                Render::Reset
            }
            Action::ChangeToFret(fret) => {
                (self.from_fret, self.to_fret) = set_to_fret(self.from_fret, *fret);
                Render::Reset
            }
            Action::ChangeMode(mode) => {
                self.mode = *mode;
                Render::None
            }
            Action::ChangeHand(hand) => {
                self.hand = *hand;
                Render::Update { reset_sizes: false }
            }
            Action::ChangeNoteLabels(name) => {
                self.update_sequence_and_labels(&self.sequence_name.clone(), name);
                Render::Update { reset_sizes: false }
            }
            Action::ChangeNoteColors(name) => {
                let colors = note_colors::find(name).unwrap_or_else(|| {
                    tracing::warn!(name = name.as_str(), "unknown note colors, using default");
                    note_colors::default_colors()
                });
                self.note_colors = colors.to_owned_colors();
                Render::Update { reset_sizes: false }
            }
            Action::ChangeNoteSize(choice) => {
                // Re-choosing the same option still lands here, resetting edited notes
                self.note_sizes = self.note_sizes.chosen(*choice);
                Render::Update { reset_sizes: true }
            }
            Action::ChangeNoteDuration(duration) => {
                self.note_duration = *duration;
                Render::Update { reset_sizes: false }
            }
            Action::ChangeColorTheme(name) => {
                let theme = color_themes::find(name).unwrap_or_else(|| {
                    tracing::warn!(name = name.as_str(), "unknown color theme, using default");
                    color_themes::default_theme()
                });
                self.color_theme = ColorTheme::from_def(theme);
                Render::Restyle
            }
        }
    }

    /// Set sequence and label scheme together, recomputing the merged labels.
    fn update_sequence_and_labels(&mut self, sequence_name: &str, label_scheme_name: &str) {
        let sequence_name = resolve_sequence_name(sequence_name);
        let label_scheme_name = resolve_label_scheme_name(label_scheme_name);

        self.sequence = crate::data::sequences::find(&sequence_name)
            .map(|s| s.sequence.to_vec())
            .unwrap_or_default();
        self.note_labels = compute_active_labels(&sequence_name, &label_scheme_name);
        self.sequence_name = sequence_name;
        self.note_labels_name = label_scheme_name;
    }
}
