//! Engine module
//!
//! Sound output for played notes.
//! Handles cpal integration, polyphonic sine voices and optional MIDI output.

pub mod audio_engine;
pub mod channels;
pub mod commands;
pub mod midi_output;
pub mod voices;

pub use audio_engine::{AudioEngine, AudioError};
pub use channels::{channels, default_channels, EngineHandle, UiHandle, COMMAND_CAPACITY, EVENT_CAPACITY};
pub use commands::{EngineCommand, EngineEvent, VoiceKey};
pub use midi_output::{list_ports, MidiError, MidiOutput, NoteOffSchedule};
pub use voices::{midi_to_frequency, VoiceBank, MAX_VOICES};
