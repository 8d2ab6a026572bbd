//! Audio Engine
//!
//! Manages the cpal audio stream and interfaces with system audio hardware.
//! The audio callback runs in a separate thread and must be real-time safe.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleRate, Stream, StreamConfig};
use thiserror::Error;

use super::channels::EngineHandle;
use super::commands::EngineEvent;
use super::voices::VoiceBank;

/// Errors that can occur during audio engine operation.
#[derive(Debug, Clone, Error)]
pub enum AudioError {
    #[error("No audio output device found")]
    NoOutputDevice,
    #[error("Failed to get device configuration: {0}")]
    ConfigurationFailed(String),
    #[error("Failed to create audio stream: {0}")]
    StreamCreationFailed(String),
    #[error("Failed to control audio playback: {0}")]
    StreamPlaybackFailed(String),
}

/// Owns the output stream. Dropping the engine stops playback.
pub struct AudioEngine {
    device: Device,
    config: StreamConfig,
    stream: Option<Stream>,
}

impl AudioEngine {
    /// Create a new AudioEngine using the default output device.
    pub fn new() -> Result<Self, AudioError> {
        let host = cpal::default_host();

        let device = host
            .default_output_device()
            .ok_or(AudioError::NoOutputDevice)?;

        let supported_config = device
            .default_output_config()
            .map_err(|e| AudioError::ConfigurationFailed(e.to_string()))?;

        let config = StreamConfig {
            channels: supported_config.channels(),
            sample_rate: SampleRate(supported_config.sample_rate().0),
            buffer_size: cpal::BufferSize::Default,
        };

        Ok(Self {
            device,
            config,
            stream: None,
        })
    }

    /// Get the name of the output device.
    pub fn device_name(&self) -> String {
        self.device.name().unwrap_or_else(|_| "Unknown".to_string())
    }

    /// Get the sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate.0
    }

    /// Get the number of output channels.
    pub fn channels(&self) -> u16 {
        self.config.channels
    }

    /// Start the stream, rendering voices driven by commands from `handle`.
    pub fn start(&mut self, mut handle: EngineHandle) -> Result<(), AudioError> {
        if self.stream.is_some() {
            return Ok(());
        }

        let channels = self.config.channels as usize;
        let mut voices = VoiceBank::new(self.config.sample_rate.0 as f32);
        let mut last_count = None;

        let stream = self
            .device
            .build_output_stream(
                &self.config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    // REAL-TIME SAFE: No allocations, no locks, no blocking
                    handle.process_commands(|cmd| voices.handle(cmd));
                    voices.render(data, channels);

                    if last_count.is_none() {
                        handle.send_event_lossy(EngineEvent::Started);
                    }
                    let count = voices.active_count();
                    if last_count != Some(count) {
                        handle.send_event_lossy(EngineEvent::ActiveVoices(count));
                        last_count = Some(count);
                    }
                },
                move |err| {
                    tracing::error!("audio stream error: {}", err);
                },
                None,
            )
            .map_err(|e| AudioError::StreamCreationFailed(e.to_string()))?;

        stream
            .play()
            .map_err(|e| AudioError::StreamPlaybackFailed(e.to_string()))?;

        tracing::info!(
            device = self.device_name().as_str(),
            sample_rate = self.sample_rate(),
            channels = self.channels(),
            "audio started"
        );
        self.stream = Some(stream);
        Ok(())
    }

    /// Stop the audio stream.
    pub fn stop(&mut self) -> Result<(), AudioError> {
        if let Some(stream) = self.stream.take() {
            stream
                .pause()
                .map_err(|e| AudioError::StreamPlaybackFailed(e.to_string()))?;
        }
        Ok(())
    }

    /// Check if the audio stream is currently running.
    pub fn is_running(&self) -> bool {
        self.stream.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_error_display() {
        let err = AudioError::NoOutputDevice;
        assert_eq!(err.to_string(), "No audio output device found");

        let err = AudioError::StreamCreationFailed("test error".to_string());
        assert!(err.to_string().contains("test error"));
    }

    // Opening a stream needs real audio hardware, so only the error
    // surface is covered here.
}
