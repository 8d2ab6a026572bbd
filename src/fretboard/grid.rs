//! Fretboard grid state.
//!
//! One cell per (string, fret) in the range. Cells carry their own visibility
//! and size so edits survive label and color changes until the next reset.

use std::collections::HashMap;

use super::events::{NoteEvent, NoteKey};
use super::pointers::{PointerDownIds, PointerId};
use super::positions::{color_for, fret_positions, label_for, FretPosition};
use super::props::{Mode, NoteDuration, Props};

/// Width of one fret column at normal scale, in points.
pub const CELL_WIDTH: f32 = 48.0;
/// Height of one string row at normal scale, in points.
pub const CELL_HEIGHT: f32 = 36.0;
/// Scale applied by the resize button.
pub const ENLARGED_SCALE: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteState {
    pub visible: bool,
    /// Radius in points at normal scale.
    pub size: f32,
}

impl NoteState {
    /// Next state of the edit cycle: hidden, first size, second size, hidden.
    fn cycled(&self, props: &Props) -> NoteState {
        let sizes = props.note_sizes;
        if !self.visible {
            NoteState {
                visible: true,
                size: sizes.first,
            }
        } else if self.size == sizes.first && sizes.first != sizes.second {
            NoteState {
                visible: true,
                size: sizes.second,
            }
        } else {
            NoteState {
                visible: false,
                size: sizes.first,
            }
        }
    }
}

/// A cell played by a held pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Sounding {
    cell: usize,
    /// Started "while touching", so it needs an explicit stop.
    held: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub position: FretPosition,
    pub label: String,
    pub color: String,
    pub note: NoteState,
}

#[derive(Debug)]
pub struct GridState {
    tool: u64,
    cells: Vec<Cell>,
    columns: usize,
    pointer_down_ids: PointerDownIds,
    /// Cell each held pointer last played.
    sounding: HashMap<PointerId, Sounding>,
    /// Cells started with an indefinite duration.
    sustained: Vec<usize>,
    enlarged: bool,
}

impl GridState {
    pub fn new(tool: u64, props: &Props) -> Self {
        let mut grid = Self {
            tool,
            cells: Vec::new(),
            columns: 0,
            pointer_down_ids: PointerDownIds::new(),
            sounding: HashMap::new(),
            sustained: Vec::new(),
            enlarged: false,
        };
        grid.reset(props);
        grid
    }

    /// Rebuild every cell from props, discarding edits.
    ///
    /// Held and indefinite notes end here.
    pub fn reset(&mut self, props: &Props) -> Vec<NoteEvent> {
        self.columns = (props.to_fret.saturating_sub(props.from_fret) as usize) + 1;
        self.cells = fret_positions(props)
            .into_iter()
            .map(|position| Cell {
                label: label_for(props, &position),
                color: color_for(props, &position).to_string(),
                note: NoteState {
                    visible: props.sequence.contains(&position.degree),
                    size: props.note_sizes.first,
                },
                position,
            })
            .collect();

        let events = self.silence();
        tracing::debug!(tool = self.tool, cells = self.cells.len(), "grid reset");
        events
    }

    /// End held and indefinite notes. Timed notes run out on their own.
    pub fn silence(&mut self) -> Vec<NoteEvent> {
        let mut stopped: Vec<usize> = self
            .sounding
            .values()
            .filter(|s| s.held)
            .map(|s| s.cell)
            .chain(self.sustained.drain(..))
            .collect();
        stopped.sort_unstable();
        stopped.dedup();
        self.sounding.clear();
        stopped
            .into_iter()
            .map(|cell| NoteEvent::Stop { key: self.key(cell) })
            .collect()
    }

    /// Refresh labels and colors, keeping per-note edits.
    pub fn update(&mut self, props: &Props, reset_sizes: bool) {
        for cell in &mut self.cells {
            cell.label = label_for(props, &cell.position);
            cell.color = color_for(props, &cell.position).to_string();
            if reset_sizes {
                cell.note.size = props.note_sizes.first;
            }
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        if self.columns == 0 {
            0
        } else {
            self.cells.len() / self.columns
        }
    }

    /// Index of the cell for a string row and a column within the range.
    pub fn cell_index(&self, string: usize, column: usize) -> Option<usize> {
        (string < self.rows() && column < self.columns).then(|| string * self.columns + column)
    }

    pub fn pointer_down_ids(&self) -> &PointerDownIds {
        &self.pointer_down_ids
    }

    pub fn pointer_down_ids_mut(&mut self) -> &mut PointerDownIds {
        &mut self.pointer_down_ids
    }

    pub fn scale(&self) -> f32 {
        if self.enlarged {
            ENLARGED_SCALE
        } else {
            1.0
        }
    }

    pub fn is_enlarged(&self) -> bool {
        self.enlarged
    }

    pub fn width(&self) -> f32 {
        self.columns as f32 * CELL_WIDTH * self.scale()
    }

    pub fn height(&self) -> f32 {
        self.rows() as f32 * CELL_HEIGHT * self.scale()
    }

    /// Switch between normal and enlarged scale. Returns the new width.
    pub fn toggle_resize(&mut self) -> f32 {
        self.enlarged = !self.enlarged;
        self.width()
    }

    /// Grid-level pointer-down on `cell` (or on empty grid space).
    pub fn pointer_down(&mut self, props: &Props, id: PointerId, cell: Option<usize>) -> Vec<NoteEvent> {
        self.pointer_down_ids.insert(id);
        let Some(index) = cell.filter(|&i| i < self.cells.len()) else {
            return Vec::new();
        };

        match props.mode {
            Mode::Play => self.play(props, id, index),
            Mode::EditOne => {
                self.cells[index].note = self.cells[index].note.cycled(props);
                Vec::new()
            }
            Mode::EditAll => {
                let next = self.cells[index].note.cycled(props);
                let pitch_class = self.cells[index].position.pitch_class;
                for cell in &mut self.cells {
                    if cell.position.pitch_class == pitch_class {
                        cell.note = next;
                    }
                }
                Vec::new()
            }
        }
    }

    /// Pointer moved. A held pointer entering a new cell plays it in play mode.
    pub fn pointer_move(&mut self, props: &Props, id: PointerId, cell: Option<usize>) -> Vec<NoteEvent> {
        if props.mode != Mode::Play || !self.pointer_down_ids.contains(id) {
            return Vec::new();
        }
        let current = self.sounding.get(&id).map(|s| s.cell);
        match cell.filter(|&i| i < self.cells.len()) {
            Some(index) if Some(index) != current => self.play(props, id, index),
            Some(_) => Vec::new(),
            None => self.stop_touch(id).into_iter().collect(),
        }
    }

    /// Grid-level pointer-up. Returns note stops for "while touching" notes.
    pub fn pointer_up(&mut self, id: PointerId) -> Vec<NoteEvent> {
        self.pointer_down_ids.remove(id);
        self.stop_touch(id).into_iter().collect()
    }

    /// Stop whatever `id` is sounding after the boundary dropped it.
    pub fn release(&mut self, id: PointerId) -> Vec<NoteEvent> {
        self.stop_touch(id).into_iter().collect()
    }

    fn play(&mut self, props: &Props, id: PointerId, index: usize) -> Vec<NoteEvent> {
        let mut events: Vec<NoteEvent> = self.stop_touch(id).into_iter().collect();
        let (visible, midi_note) = {
            let cell = &self.cells[index];
            (cell.note.visible, cell.position.midi_note)
        };
        if !visible {
            return events;
        }

        let key = self.key(index);
        let duration = match props.note_duration {
            NoteDuration::Seconds(s) => Some(s),
            NoteDuration::Touch => None,
            NoteDuration::Indefinite => {
                if !self.sustained.contains(&index) {
                    self.sustained.push(index);
                }
                None
            }
        };
        self.sounding.insert(
            id,
            Sounding {
                cell: index,
                held: props.note_duration == NoteDuration::Touch,
            },
        );
        events.push(NoteEvent::Start {
            key,
            midi_note,
            duration,
        });
        events
    }

    fn stop_touch(&mut self, id: PointerId) -> Option<NoteEvent> {
        let sounding = self.sounding.remove(&id)?;
        if !sounding.held {
            return None;
        }
        // Another pointer may still hold the same cell
        if self.sounding.values().any(|s| s.held && s.cell == sounding.cell) {
            return None;
        }
        Some(NoteEvent::Stop {
            key: self.key(sounding.cell),
        })
    }

    fn key(&self, cell: usize) -> NoteKey {
        NoteKey {
            tool: self.tool,
            cell,
        }
    }
}
