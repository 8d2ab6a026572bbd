//! Icon buttons drawn with the painter.
//!
//! Each [`ButtonKind`] has a simple line icon. While a press is animating the
//! icon is drawn rotated a quarter turn back.

use std::f32::consts::FRAC_PI_4;

use eframe::egui::{Color32, Pos2, Response, Sense, Stroke, Ui, Vec2};

use crate::fretboard::{ButtonKind, IconButton};
use super::color_from_hex;

/// Configuration for icon buttons.
#[derive(Clone, Debug)]
pub struct IconButtonConfig {
    /// Edge length of the square button.
    pub size: f32,
    /// Stroke width of the icon lines.
    pub stroke_width: f32,
    /// Used when the button's own color fails to parse.
    pub fallback: Color32,
}

impl Default for IconButtonConfig {
    fn default() -> Self {
        Self {
            size: 28.0,
            stroke_width: 2.0,
            fallback: Color32::WHITE,
        }
    }
}

impl IconButtonConfig {
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }
}

/// Line segments of an icon in unit space, centered on the origin.
fn icon_segments(kind: ButtonKind) -> Vec<[Vec2; 2]> {
    match kind {
        ButtonKind::Menu => [-0.3, 0.0, 0.3]
            .iter()
            .map(|&y| [Vec2::new(-0.35, y), Vec2::new(0.35, y)])
            .collect(),
        ButtonKind::Plus => vec![
            [Vec2::new(-0.35, 0.0), Vec2::new(0.35, 0.0)],
            [Vec2::new(0.0, -0.35), Vec2::new(0.0, 0.35)],
        ],
        ButtonKind::Minus => vec![[Vec2::new(-0.35, 0.0), Vec2::new(0.35, 0.0)]],
        ButtonKind::Resize => vec![
            [Vec2::new(-0.35, 0.35), Vec2::new(0.35, -0.35)],
            [Vec2::new(0.35, -0.35), Vec2::new(0.05, -0.35)],
            [Vec2::new(0.35, -0.35), Vec2::new(0.35, -0.05)],
            [Vec2::new(-0.35, 0.35), Vec2::new(-0.05, 0.35)],
            [Vec2::new(-0.35, 0.35), Vec2::new(-0.35, 0.05)],
        ],
    }
}

fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Draw one icon button. The caller decides what a click does.
pub fn icon_button(ui: &mut Ui, button: &IconButton, config: &IconButtonConfig) -> Response {
    let (rect, response) = ui.allocate_exact_size(Vec2::splat(config.size), Sense::click());

    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        let foreground = color_from_hex(button.foreground()).unwrap_or(config.fallback);

        if let Some(background) = button.background().and_then(color_from_hex) {
            painter.rect_filled(rect, 4.0, background);
        }
        if response.hovered() {
            painter.rect_stroke(rect.shrink(1.0), 4.0, Stroke::new(1.0, foreground.gamma_multiply(0.4)));
        }

        let angle = if button.is_pressed() { -FRAC_PI_4 } else { 0.0 };
        let stroke = Stroke::new(config.stroke_width, foreground);
        let center = rect.center();
        let scale = rect.width();
        for [a, b] in icon_segments(button.kind()) {
            let to_screen = |v: Vec2| -> Pos2 { center + rotate(v, angle) * scale };
            painter.line_segment([to_screen(a), to_screen(b)], stroke);
        }
    }

    response.on_hover_text(button.kind().tooltip())
}
