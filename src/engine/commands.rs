//! Engine Commands and Events
//!
//! Defines the messages that flow between the UI thread and the audio engine thread.
//! All types here must be Send + 'static for safe cross-thread communication.

/// Identifies a sounding voice so it can be stopped later.
/// Packed from the tool id and the fretboard cell.
pub type VoiceKey = u64;

/// Commands sent from the UI thread to the audio engine.
/// These are processed non-blocking in the audio callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineCommand {
    /// Start (or retrigger) a voice.
    NoteOn {
        key: VoiceKey,
        /// MIDI note number (0-127).
        note: u8,
        /// Seconds until the voice releases on its own, or `None` to hold until `NoteOff`.
        duration: Option<f32>,
    },

    /// Release every voice started with this key.
    NoteOff { key: VoiceKey },

    /// Release every voice.
    AllNotesOff,

    /// Master volume (0.0-1.0).
    SetVolume(f32),
}

/// Events sent from the audio engine to the UI thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineEvent {
    /// Audio processing started.
    Started,

    /// Number of voices currently producing sound.
    ActiveVoices(usize),
}
