//! Theme definitions for the fretboard UI
//!
//! The window chrome (toolbar, status bar) uses a fixed dark palette. Each
//! multitool paints its own panel from its [`ColorTheme`].

use eframe::egui::{self, Color32, Rounding, Stroke, Vec2};

use crate::fretboard::ColorTheme;
use crate::widgets::{color_from_hex, contrasting_text};

/// Background colors
pub mod background {
    use super::Color32;

    /// Main window background - deep dark blue
    pub const MAIN: Color32 = Color32::from_rgb(26, 26, 46);

    /// Toolbar and status bar
    pub const PANEL: Color32 = Color32::from_rgb(35, 35, 55);
}

/// Text colors
pub mod text {
    use super::Color32;

    pub const PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);

    pub const SECONDARY: Color32 = Color32::from_rgb(160, 160, 175);

    pub const DISABLED: Color32 = Color32::from_rgb(100, 100, 115);
}

/// UI accent colors
pub mod accent {
    use super::Color32;

    pub const SUCCESS: Color32 = Color32::from_rgb(129, 199, 132);

    pub const ERROR: Color32 = Color32::from_rgb(239, 83, 80);
}

/// Smaller rounding for compact elements
pub const ROUNDING_SMALL: Rounding = Rounding {
    nw: 4.0,
    ne: 4.0,
    sw: 4.0,
    se: 4.0,
};

/// Resolved colors of one multitool.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToolColors {
    pub background: Color32,
    pub foreground: Color32,
}

impl ToolColors {
    /// Unparseable entries fall back to the window palette.
    pub fn from_theme(theme: &ColorTheme) -> Self {
        Self {
            background: color_from_hex(&theme.background).unwrap_or(background::MAIN),
            foreground: color_from_hex(&theme.foreground).unwrap_or(text::PRIMARY),
        }
    }

    /// Fill for widgets drawn on the tool background.
    pub fn widget_fill(&self) -> Color32 {
        self.background.lerp_to_gamma(self.foreground, 0.12)
    }
}

/// Apply the dark window theme to an egui context
pub fn apply_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    let visuals = &mut style.visuals;
    visuals.dark_mode = true;
    visuals.panel_fill = background::MAIN;
    visuals.window_fill = background::PANEL;

    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, text::SECONDARY);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, text::PRIMARY);
    visuals.widgets.inactive.rounding = ROUNDING_SMALL;
    visuals.widgets.hovered.rounding = ROUNDING_SMALL;
    visuals.widgets.active.rounding = ROUNDING_SMALL;

    style.spacing.item_spacing = Vec2::new(8.0, 6.0);
    style.spacing.button_padding = Vec2::new(8.0, 4.0);

    ctx.set_style(style);
}

/// Restyle widgets inside one tool's panel.
pub fn apply_tool_visuals(ui: &mut egui::Ui, colors: ToolColors) {
    let fill = colors.widget_fill();
    let hovered = colors.background.lerp_to_gamma(colors.foreground, 0.25);
    let visuals = ui.visuals_mut();

    visuals.dark_mode = contrasting_text(colors.background) == Color32::WHITE;
    visuals.override_text_color = Some(colors.foreground);
    visuals.window_fill = colors.background;
    visuals.extreme_bg_color = colors.background;

    for widget in [
        &mut visuals.widgets.inactive,
        &mut visuals.widgets.hovered,
        &mut visuals.widgets.active,
        &mut visuals.widgets.open,
    ] {
        widget.bg_fill = fill;
        widget.weak_bg_fill = fill;
        widget.fg_stroke = Stroke::new(1.0, colors.foreground);
    }
    visuals.widgets.hovered.bg_fill = hovered;
    visuals.widgets.hovered.weak_bg_fill = hovered;
    visuals.selection.bg_fill = colors.foreground.gamma_multiply(0.3);
    visuals.selection.stroke = Stroke::new(1.0, colors.foreground);
}
