//! Events a multitool emits to its host.

use super::props::Props;

#[derive(Debug, Clone, PartialEq)]
pub enum ToolEvent {
    /// Create a sibling tool with these settings.
    AddTool(Box<Props>),
    /// Destroy the emitting tool.
    RemoveTool,
    /// The grid changed size. Also consumed internally to size the menu.
    FretboardResized { width: f32 },
}

/// Sound requests produced by the grid in play mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoteEvent {
    /// Start a note. `key` identifies the voice for a later stop.
    Start {
        key: NoteKey,
        midi_note: u8,
        /// Seconds, or `None` to sound until stopped.
        duration: Option<f32>,
    },
    Stop { key: NoteKey },
}

/// Voice key: the emitting tool plus the cell index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoteKey {
    pub tool: u64,
    pub cell: usize,
}

impl NoteKey {
    /// Pack into one integer for the audio thread.
    pub fn packed(&self) -> u64 {
        (self.tool << 16) | (self.cell as u64 & 0xffff)
    }
}
