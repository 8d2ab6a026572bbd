//! Polyphonic sine voices.
//!
//! A fixed pool of voices rendered in the audio callback. Nothing here
//! allocates after construction.

use std::f32::consts::TAU;

use super::commands::{EngineCommand, VoiceKey};

/// Maximum simultaneous voices. The quietest voice is stolen beyond this.
pub const MAX_VOICES: usize = 32;

const ATTACK_SECONDS: f32 = 0.005;
const RELEASE_SECONDS: f32 = 0.08;
/// Per-voice gain so a full chord stays below clipping.
const VOICE_GAIN: f32 = 0.15;

/// Equal-tempered frequency of a MIDI note, A4 = 440 Hz.
pub fn midi_to_frequency(note: u8) -> f32 {
    440.0 * 2f32.powf((note as f32 - 69.0) / 12.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Off,
    Attack,
    Sustain,
    Release,
}

#[derive(Debug, Clone, Copy)]
struct Voice {
    key: VoiceKey,
    phase_increment: f32,
    phase: f32,
    level: f32,
    stage: Stage,
    /// Samples left before releasing on its own.
    remaining: Option<u64>,
}

impl Voice {
    const OFF: Voice = Voice {
        key: 0,
        phase_increment: 0.0,
        phase: 0.0,
        level: 0.0,
        stage: Stage::Off,
        remaining: None,
    };

    fn is_active(&self) -> bool {
        self.stage != Stage::Off
    }
}

pub struct VoiceBank {
    voices: [Voice; MAX_VOICES],
    sample_rate: f32,
    volume: f32,
    attack_step: f32,
    release_step: f32,
}

impl VoiceBank {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            voices: [Voice::OFF; MAX_VOICES],
            sample_rate,
            volume: 1.0,
            attack_step: 1.0 / (ATTACK_SECONDS * sample_rate).max(1.0),
            release_step: 1.0 / (RELEASE_SECONDS * sample_rate).max(1.0),
        }
    }

    pub fn handle(&mut self, command: EngineCommand) {
        match command {
            EngineCommand::NoteOn { key, note, duration } => self.note_on(key, note, duration),
            EngineCommand::NoteOff { key } => self.note_off(key),
            EngineCommand::AllNotesOff => self.all_notes_off(),
            EngineCommand::SetVolume(volume) => self.volume = volume.clamp(0.0, 1.0),
        }
    }

    pub fn note_on(&mut self, key: VoiceKey, note: u8, duration: Option<f32>) {
        let slot = self
            .voices
            .iter()
            .position(|v| v.is_active() && v.key == key)
            .or_else(|| self.voices.iter().position(|v| !v.is_active()))
            .unwrap_or_else(|| self.quietest());

        let voice = &mut self.voices[slot];
        let retrigger = voice.is_active() && voice.key == key;
        voice.key = key;
        voice.phase_increment = midi_to_frequency(note) / self.sample_rate;
        if !retrigger {
            voice.phase = 0.0;
            voice.level = 0.0;
        }
        voice.stage = Stage::Attack;
        voice.remaining = duration.map(|s| (s.max(0.0) * self.sample_rate) as u64);
    }

    pub fn note_off(&mut self, key: VoiceKey) {
        for voice in self.voices.iter_mut().filter(|v| v.is_active() && v.key == key) {
            voice.stage = Stage::Release;
        }
    }

    pub fn all_notes_off(&mut self) {
        for voice in self.voices.iter_mut().filter(|v| v.is_active()) {
            voice.stage = Stage::Release;
        }
    }

    pub fn active_count(&self) -> usize {
        self.voices.iter().filter(|v| v.is_active()).count()
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    fn quietest(&self) -> usize {
        self.voices
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.level.total_cmp(&b.level))
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    /// Mix all voices into an interleaved buffer, overwriting it.
    pub fn render(&mut self, data: &mut [f32], channels: usize) {
        let channels = channels.max(1);
        for frame in data.chunks_mut(channels) {
            let mut mix = 0.0;
            for voice in self.voices.iter_mut().filter(|v| v.is_active()) {
                match voice.stage {
                    Stage::Attack => {
                        voice.level += self.attack_step;
                        if voice.level >= 1.0 {
                            voice.level = 1.0;
                            voice.stage = Stage::Sustain;
                        }
                    }
                    Stage::Release => {
                        voice.level -= self.release_step;
                        if voice.level <= 0.0 {
                            *voice = Voice::OFF;
                            continue;
                        }
                    }
                    Stage::Sustain | Stage::Off => {}
                }

                if let Some(remaining) = voice.remaining.as_mut() {
                    if *remaining == 0 {
                        voice.stage = Stage::Release;
                        voice.remaining = None;
                    } else {
                        *remaining -= 1;
                    }
                }

                mix += (voice.phase * TAU).sin() * voice.level * VOICE_GAIN;
                voice.phase += voice.phase_increment;
                if voice.phase >= 1.0 {
                    voice.phase -= 1.0;
                }
            }

            let sample = (mix * self.volume).clamp(-1.0, 1.0);
            for out in frame.iter_mut() {
                *out = sample;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: f32 = 48_000.0;

    fn render_seconds(bank: &mut VoiceBank, seconds: f32) -> Vec<f32> {
        let mut buffer = vec![0.0; (seconds * RATE) as usize * 2];
        bank.render(&mut buffer, 2);
        buffer
    }

    #[test]
    fn test_midi_to_frequency() {
        assert!((midi_to_frequency(69) - 440.0).abs() < 1e-3);
        assert!((midi_to_frequency(57) - 220.0).abs() < 1e-3);
        assert!((midi_to_frequency(60) - 261.63).abs() < 0.01);
    }

    #[test]
    fn test_silence_without_voices() {
        let mut bank = VoiceBank::new(RATE);
        let buffer = render_seconds(&mut bank, 0.01);
        assert!(buffer.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_note_sounds_and_releases() {
        let mut bank = VoiceBank::new(RATE);
        bank.handle(EngineCommand::NoteOn {
            key: 1,
            note: 69,
            duration: None,
        });
        let buffer = render_seconds(&mut bank, 0.05);
        assert!(buffer.iter().any(|&s| s.abs() > 0.05));
        assert_eq!(bank.active_count(), 1);

        bank.handle(EngineCommand::NoteOff { key: 1 });
        render_seconds(&mut bank, 0.2);
        assert_eq!(bank.active_count(), 0);
    }

    #[test]
    fn test_timed_note_ends_on_its_own() {
        let mut bank = VoiceBank::new(RATE);
        bank.note_on(1, 60, Some(0.1));
        render_seconds(&mut bank, 0.05);
        assert_eq!(bank.active_count(), 1);
        render_seconds(&mut bank, 0.3);
        assert_eq!(bank.active_count(), 0);
    }

    #[test]
    fn test_same_key_retriggers_one_voice() {
        let mut bank = VoiceBank::new(RATE);
        bank.note_on(5, 60, None);
        bank.note_on(5, 64, None);
        assert_eq!(bank.active_count(), 1);
    }

    #[test]
    fn test_voice_stealing() {
        let mut bank = VoiceBank::new(RATE);
        for key in 0..(MAX_VOICES as u64 + 4) {
            bank.note_on(key, 60, None);
        }
        assert_eq!(bank.active_count(), MAX_VOICES);
    }

    #[test]
    fn test_all_notes_off_and_volume() {
        let mut bank = VoiceBank::new(RATE);
        bank.note_on(1, 60, None);
        bank.note_on(2, 64, None);
        bank.handle(EngineCommand::SetVolume(2.0));
        assert_eq!(bank.volume(), 1.0);
        bank.handle(EngineCommand::AllNotesOff);
        render_seconds(&mut bank, 0.2);
        assert_eq!(bank.active_count(), 0);
    }
}
