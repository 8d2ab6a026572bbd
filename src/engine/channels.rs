//! Note command queue between the UI and the audio callback.
//!
//! Two rtrb SPSC rings: note commands flow to the callback and voice counts
//! flow back. Nothing on the engine side blocks or allocates.

use rtrb::{Consumer, Producer, RingBuffer};

use super::commands::{EngineCommand, EngineEvent};

/// Commands the UI may queue ahead of the callback.
pub const COMMAND_CAPACITY: usize = 1024;

/// Engine events waiting for the UI. Only the latest voice count matters.
pub const EVENT_CAPACITY: usize = 64;

/// A connected pair of handles with the given ring sizes.
pub fn channels(command_capacity: usize, event_capacity: usize) -> (UiHandle, EngineHandle) {
    let (command_tx, command_rx) = RingBuffer::new(command_capacity);
    let (event_tx, event_rx) = RingBuffer::new(event_capacity);
    (
        UiHandle {
            commands: command_tx,
            events: event_rx,
        },
        EngineHandle {
            commands: command_rx,
            events: event_tx,
        },
    )
}

pub fn default_channels() -> (UiHandle, EngineHandle) {
    channels(COMMAND_CAPACITY, EVENT_CAPACITY)
}

/// The UI end: sends commands, reads voice counts.
pub struct UiHandle {
    commands: Producer<EngineCommand>,
    events: Consumer<EngineEvent>,
}

impl UiHandle {
    /// Queue a command. A full ring hands it back.
    pub fn send_command(&mut self, command: EngineCommand) -> Result<(), EngineCommand> {
        self.commands
            .push(command)
            .map_err(|rtrb::PushError::Full(command)| command)
    }

    /// Queue a command, dropping it if the ring is full.
    pub fn send_command_lossy(&mut self, command: EngineCommand) {
        let _ = self.commands.push(command);
    }

    /// Drain pending events and return the newest voice count among them.
    pub fn latest_voice_count(&mut self) -> Option<usize> {
        let mut latest = None;
        while let Ok(event) = self.events.pop() {
            if let EngineEvent::ActiveVoices(count) = event {
                latest = Some(count);
            }
        }
        latest
    }
}

/// The callback end. Real-time safe.
pub struct EngineHandle {
    commands: Consumer<EngineCommand>,
    events: Producer<EngineEvent>,
}

impl EngineHandle {
    /// Hand every queued command to `handler`, oldest first.
    pub fn process_commands<F>(&mut self, mut handler: F)
    where
        F: FnMut(EngineCommand),
    {
        while let Ok(command) = self.commands.pop() {
            handler(command);
        }
    }

    /// Report to the UI, dropping the event if nobody is reading.
    pub fn send_event_lossy(&mut self, event: EngineEvent) {
        let _ = self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note_on(key: u64) -> EngineCommand {
        EngineCommand::NoteOn {
            key,
            note: 60,
            duration: None,
        }
    }

    fn collect(engine: &mut EngineHandle) -> Vec<EngineCommand> {
        let mut commands = Vec::new();
        engine.process_commands(|cmd| commands.push(cmd));
        commands
    }

    #[test]
    fn test_commands_arrive_in_order() {
        let (mut ui, mut engine) = default_channels();
        ui.send_command(note_on(1)).unwrap();
        ui.send_command(EngineCommand::NoteOff { key: 1 }).unwrap();
        ui.send_command(EngineCommand::AllNotesOff).unwrap();

        assert_eq!(
            collect(&mut engine),
            vec![
                note_on(1),
                EngineCommand::NoteOff { key: 1 },
                EngineCommand::AllNotesOff
            ]
        );
        assert!(collect(&mut engine).is_empty());
    }

    #[test]
    fn test_full_ring_returns_command() {
        let (mut ui, _engine) = channels(2, 2);
        ui.send_command(note_on(1)).unwrap();
        ui.send_command(note_on(2)).unwrap();
        assert_eq!(
            ui.send_command(EngineCommand::AllNotesOff),
            Err(EngineCommand::AllNotesOff)
        );
    }

    #[test]
    fn test_lossy_sends_drop_when_full() {
        let (mut ui, mut engine) = channels(1, 1);
        ui.send_command_lossy(EngineCommand::SetVolume(0.5));
        ui.send_command_lossy(EngineCommand::SetVolume(0.6));
        assert_eq!(collect(&mut engine), vec![EngineCommand::SetVolume(0.5)]);

        engine.send_event_lossy(EngineEvent::ActiveVoices(1));
        engine.send_event_lossy(EngineEvent::ActiveVoices(2));
        assert_eq!(ui.latest_voice_count(), Some(1));
    }

    #[test]
    fn test_latest_voice_count_skips_started() {
        let (mut ui, mut engine) = channels(8, 8);
        assert_eq!(ui.latest_voice_count(), None);

        engine.send_event_lossy(EngineEvent::Started);
        engine.send_event_lossy(EngineEvent::ActiveVoices(3));
        engine.send_event_lossy(EngineEvent::ActiveVoices(1));
        engine.send_event_lossy(EngineEvent::Started);
        assert_eq!(ui.latest_voice_count(), Some(1));
        assert_eq!(ui.latest_voice_count(), None);
    }

    #[test]
    fn test_handles_are_send() {
        fn assert_send<T: Send>() {}
        assert_send::<UiHandle>();
        assert_send::<EngineHandle>();
    }
}
