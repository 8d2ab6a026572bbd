//! MIDI Output
//!
//! Mirrors played notes to an external MIDI port through midir. Timed notes
//! need a note-off later, so pending offs are kept in a small schedule that the
//! UI thread drives from its frame loop.

use std::time::{Duration, Instant};

use midir::{MidiOutput as MidirOutput, MidiOutputConnection};
use thiserror::Error;

use super::commands::VoiceKey;

const CLIENT_NAME: &str = "Fretboard Multitool";
const DEFAULT_VELOCITY: u8 = 100;

/// Error type for MIDI operations.
#[derive(Debug, Error)]
pub enum MidiError {
    #[error("MIDI init error: {0}")]
    InitError(String),
    #[error("No MIDI output ports available")]
    NoPorts,
    #[error("No MIDI output port matching {0:?}")]
    PortNotFound(String),
    #[error("MIDI connection error: {0}")]
    ConnectionError(String),
    #[error("MIDI send error: {0}")]
    SendError(String),
}

/// Note On message bytes. Channel is 0-15.
pub fn note_on_bytes(channel: u8, note: u8, velocity: u8) -> [u8; 3] {
    [0x90 | (channel & 0x0F), note & 0x7F, velocity & 0x7F]
}

/// Note Off message bytes. Channel is 0-15.
pub fn note_off_bytes(channel: u8, note: u8) -> [u8; 3] {
    [0x80 | (channel & 0x0F), note & 0x7F, 0]
}

/// "All Notes Off" controller message. Channel is 0-15.
pub fn all_notes_off_bytes(channel: u8) -> [u8; 3] {
    [0xB0 | (channel & 0x0F), 123, 0]
}

/// Notes waiting for their note-off.
#[derive(Debug, Default)]
pub struct NoteOffSchedule {
    /// (key, note, deadline). `None` waits for an explicit stop.
    pending: Vec<(VoiceKey, u8, Option<Instant>)>,
}

impl NoteOffSchedule {
    /// Track a started note. Returns the note a retrigger must end first.
    pub fn start(&mut self, key: VoiceKey, note: u8, duration: Option<Duration>, now: Instant) -> Option<u8> {
        let replaced = self.stop(key);
        self.pending.push((key, note, duration.map(|d| now + d)));
        replaced
    }

    /// Forget the note held under `key`, returning it.
    pub fn stop(&mut self, key: VoiceKey) -> Option<u8> {
        let index = self.pending.iter().position(|(k, _, _)| *k == key)?;
        Some(self.pending.remove(index).1)
    }

    /// Remove and return notes whose deadline has passed.
    pub fn due(&mut self, now: Instant) -> Vec<u8> {
        let mut notes = Vec::new();
        self.pending.retain(|&(_, note, deadline)| match deadline {
            Some(at) if at <= now => {
                notes.push(note);
                false
            }
            _ => true,
        });
        notes
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Names of all MIDI output ports.
pub fn list_ports() -> Result<Vec<String>, MidiError> {
    let midi_out = MidirOutput::new(CLIENT_NAME).map_err(|e| MidiError::InitError(e.to_string()))?;
    Ok(midi_out
        .ports()
        .iter()
        .map(|p| midi_out.port_name(p).unwrap_or_else(|_| "Unknown".to_string()))
        .collect())
}

/// Connection to one MIDI output port.
pub struct MidiOutput {
    connection: MidiOutputConnection,
    port_name: String,
    channel: u8,
    schedule: NoteOffSchedule,
}

impl MidiOutput {
    /// Connect to the first port whose name contains `port_filter`, or the
    /// first port when no filter is given.
    pub fn connect(port_filter: Option<&str>, channel: u8) -> Result<Self, MidiError> {
        let midi_out =
            MidirOutput::new(CLIENT_NAME).map_err(|e| MidiError::InitError(e.to_string()))?;

        let ports = midi_out.ports();
        if ports.is_empty() {
            return Err(MidiError::NoPorts);
        }

        let port = match port_filter {
            Some(filter) => ports
                .iter()
                .find(|p| {
                    midi_out
                        .port_name(p)
                        .map(|name| name.contains(filter))
                        .unwrap_or(false)
                })
                .ok_or_else(|| MidiError::PortNotFound(filter.to_string()))?,
            None => &ports[0],
        };
        let port_name = midi_out
            .port_name(port)
            .unwrap_or_else(|_| "Unknown".to_string());

        let connection = midi_out
            .connect(port, CLIENT_NAME)
            .map_err(|e| MidiError::ConnectionError(e.to_string()))?;

        tracing::info!(port = port_name.as_str(), channel, "MIDI output connected");
        Ok(Self {
            connection,
            port_name,
            channel: channel.min(15),
            schedule: NoteOffSchedule::default(),
        })
    }

    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    pub fn note_on(
        &mut self,
        key: VoiceKey,
        note: u8,
        duration: Option<Duration>,
        now: Instant,
    ) -> Result<(), MidiError> {
        if let Some(previous) = self.schedule.start(key, note, duration, now) {
            self.send(&note_off_bytes(self.channel, previous))?;
        }
        self.send(&note_on_bytes(self.channel, note, DEFAULT_VELOCITY))
    }

    pub fn note_off(&mut self, key: VoiceKey) -> Result<(), MidiError> {
        match self.schedule.stop(key) {
            Some(note) => self.send(&note_off_bytes(self.channel, note)),
            None => Ok(()),
        }
    }

    pub fn all_notes_off(&mut self) -> Result<(), MidiError> {
        self.schedule.clear();
        self.send(&all_notes_off_bytes(self.channel))
    }

    /// Whether any note is still sounding on the port.
    pub fn has_pending(&self) -> bool {
        !self.schedule.is_empty()
    }

    /// Send note-offs for timed notes that have run out.
    pub fn tick(&mut self, now: Instant) -> Result<(), MidiError> {
        for note in self.schedule.due(now) {
            self.send(&note_off_bytes(self.channel, note))?;
        }
        Ok(())
    }

    fn send(&mut self, message: &[u8]) -> Result<(), MidiError> {
        self.connection
            .send(message)
            .map_err(|e| MidiError::SendError(e.to_string()))
    }
}

impl Drop for MidiOutput {
    fn drop(&mut self) {
        let _ = self.all_notes_off();
    }
}
