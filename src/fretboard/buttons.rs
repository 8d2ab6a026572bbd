//! Icon buttons under the menu.

use std::time::Instant;

use super::transition::Transition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonKind {
    Menu,
    Plus,
    Minus,
    Resize,
}

impl ButtonKind {
    /// Display order.
    pub const ALL: [ButtonKind; 4] = [
        ButtonKind::Menu,
        ButtonKind::Plus,
        ButtonKind::Minus,
        ButtonKind::Resize,
    ];

    pub fn tooltip(&self) -> &'static str {
        match self {
            ButtonKind::Menu => "Show or hide the menu",
            ButtonKind::Plus => "Add a fretboard with these settings",
            ButtonKind::Minus => "Remove this fretboard",
            ButtonKind::Resize => "Toggle fretboard size",
        }
    }
}

/// Themed icon with a short press animation.
#[derive(Debug, Clone)]
pub struct IconButton {
    kind: ButtonKind,
    foreground: String,
    /// `None` draws no background.
    background: Option<String>,
    press: Transition,
}

impl IconButton {
    pub fn new(kind: ButtonKind, foreground: &str) -> Self {
        Self {
            kind,
            foreground: foreground.to_string(),
            background: None,
            press: Transition::button(),
        }
    }

    pub fn kind(&self) -> ButtonKind {
        self.kind
    }

    pub fn foreground(&self) -> &str {
        &self.foreground
    }

    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }

    /// Re-theme in place. A missing background means transparent.
    pub fn set_color_theme(&mut self, foreground: &str, background: Option<&str>) {
        self.foreground = foreground.to_string();
        self.background = background.map(str::to_string);
    }

    pub fn press(&mut self, now: Instant) {
        self.press.pulse(now);
    }

    /// Whether the icon is drawn in its pressed pose.
    pub fn is_pressed(&self) -> bool {
        self.press.is_expanded()
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        self.press.tick(now)
    }
}
