//! Fretboard multitool core
//!
//! Headless state for one fretboard editor: props, position computation,
//! the action reducer, grid and menu state, pointer reconciliation and
//! keyboard shortcuts. The egui layer in `app` and `widgets` only paints
//! this state and feeds input into [`Multitool`].

pub mod actions;
pub mod buttons;
pub mod events;
pub mod grid;
pub mod menu;
pub mod multitool;
pub mod pointers;
pub mod positions;
pub mod props;
pub mod shortcuts;
pub mod transition;

pub use actions::{Action, Render};
pub use buttons::{ButtonKind, IconButton};
pub use events::{NoteEvent, NoteKey, ToolEvent};
pub use grid::{Cell, GridState, NoteState, CELL_HEIGHT, CELL_WIDTH};
pub use menu::{MenuSelections, MenuState};
pub use multitool::Multitool;
pub use pointers::{NoCapture, PointerCapture, PointerDownIds, PointerError, PointerId, PointerTarget};
pub use positions::{active_positions, compute_active_labels, fret_positions, FretPosition};
pub use props::{
    ColorTheme, Hand, Mode, MultitoolOptions, NoteDuration, NoteSizeChoice, NoteSizes,
    PitchClass, Props,
};
pub use shortcuts::action_for_key;
pub use transition::{Transition, TransitionState};
