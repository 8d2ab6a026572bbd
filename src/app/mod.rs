//! Application module
//!
//! Contains the eframe application, input translation, the per-fretboard
//! view and theme definitions.

pub mod fretboard_app;
pub mod input;
pub mod multitool_view;
pub mod theme;

pub use fretboard_app::{FretboardApp, ToolList};
pub use input::{FrameInput, InputTranslator, PointerInput};
pub use multitool_view::MultitoolView;
