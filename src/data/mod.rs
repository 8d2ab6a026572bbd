//! Static lookup tables
//!
//! Note names, interval sequences, label schemes, instruments, note colors
//! and color themes. All tables are immutable and live for the whole process;
//! consumers receive owned copies whenever they need something to work on.

pub mod color_themes;
pub mod instruments;
pub mod note_colors;
pub mod note_labels;
pub mod note_names;
pub mod sequences;

pub use color_themes::{ColorThemeDef, COLOR_THEMES};
pub use instruments::{InstrumentDef, INSTRUMENTS};
pub use note_colors::{NoteColorsDef, NOTE_COLORS};
pub use note_labels::{LabelScheme, MIDI_PLACEHOLDER, NOTE_LABELS};
pub use note_names::{index_from_name, name_from_index, NOTE_NAMES};
pub use sequences::{IntervalSequence, LabelOverride, SequenceCategory, NOTE_SEQUENCES};
