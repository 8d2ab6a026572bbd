//! Widgets module
//!
//! Custom painters for the multitool interface: the fretboard grid,
//! icon buttons and grouped selectors.

pub mod buttons;
pub mod fretboard;
pub mod selector;

pub use buttons::{icon_button, IconButtonConfig};
pub use fretboard::{fretboard, FretboardConfig, FretboardGeometry};
pub use selector::{selector, SelectorGroup, SelectorResponse};

use eframe::egui::Color32;

/// Parse `#rrggbb` (the leading `#` is optional).
pub fn color_from_hex(hex: &str) -> Option<Color32> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some(Color32::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Black or white, whichever reads better on `background`.
pub fn contrasting_text(background: Color32) -> Color32 {
    let luma = 0.299 * background.r() as f32
        + 0.587 * background.g() as f32
        + 0.114 * background.b() as f32;
    if luma > 150.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}
