//! Fretboard grid painter.
//!
//! Draws strings, frets and the visible notes of a [`GridState`], highest
//! string on top. Left-handed layouts mirror the columns so the nut sits on
//! the right. Hit testing uses the same geometry as painting.

use eframe::egui::{Align2, Color32, FontId, Pos2, Rect, Response, Sense, Stroke, Ui, Vec2};

use crate::fretboard::{GridState, CELL_HEIGHT, CELL_WIDTH};
use super::{color_from_hex, contrasting_text};

/// Frets that get a number under the grid.
const MARKED_FRETS: [u8; 10] = [3, 5, 7, 9, 12, 15, 17, 19, 21, 24];
/// Height of the fret number row at normal scale.
const NUMBER_ROW_HEIGHT: f32 = 16.0;

/// Colors and orientation for painting.
#[derive(Clone, Debug)]
pub struct FretboardConfig {
    pub foreground: Color32,
    pub background: Color32,
    /// Mirror horizontally (left hand).
    pub mirrored: bool,
    /// Fret number of the first column.
    pub from_fret: u8,
}

/// Where each cell sits on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FretboardGeometry {
    /// The cell area, without the fret number row.
    pub rect: Rect,
    pub rows: usize,
    pub columns: usize,
    pub scale: f32,
    pub mirrored: bool,
}

impl FretboardGeometry {
    pub fn new(origin: Pos2, grid: &GridState, mirrored: bool) -> Self {
        let scale = grid.scale();
        Self {
            rect: Rect::from_min_size(origin, Vec2::new(grid.width(), grid.height())),
            rows: grid.rows(),
            columns: grid.columns(),
            scale,
            mirrored,
        }
    }

    fn cell_size(&self) -> Vec2 {
        Vec2::new(CELL_WIDTH, CELL_HEIGHT) * self.scale
    }

    fn display_column(&self, column: usize) -> usize {
        if self.mirrored {
            self.columns - 1 - column
        } else {
            column
        }
    }

    /// Screen rect of a cell by string and column.
    pub fn cell_rect(&self, string: usize, column: usize) -> Rect {
        let size = self.cell_size();
        let x = self.display_column(column) as f32 * size.x;
        let y = (self.rows - 1 - string) as f32 * size.y;
        Rect::from_min_size(self.rect.min + Vec2::new(x, y), size)
    }

    /// String and column under `pos`, if any.
    pub fn hit(&self, pos: Pos2) -> Option<(usize, usize)> {
        if !self.rect.contains(pos) || self.rows == 0 || self.columns == 0 {
            return None;
        }
        let size = self.cell_size();
        let local = pos - self.rect.min;
        let display_column = ((local.x / size.x) as usize).min(self.columns - 1);
        let row = ((local.y / size.y) as usize).min(self.rows - 1);
        Some((self.rows - 1 - row, self.display_column(display_column)))
    }
}

/// Paint the grid and return its response plus the geometry used.
pub fn fretboard(ui: &mut Ui, grid: &GridState, config: &FretboardConfig) -> (Response, FretboardGeometry) {
    let scale = grid.scale();
    let number_row = NUMBER_ROW_HEIGHT * scale;
    let (rect, response) = ui.allocate_exact_size(
        Vec2::new(grid.width(), grid.height() + number_row),
        Sense::click_and_drag(),
    );
    let geometry = FretboardGeometry::new(rect.min, grid, config.mirrored);

    if !ui.is_rect_visible(rect) || geometry.rows == 0 {
        return (response, geometry);
    }

    let painter = ui.painter();
    painter.rect_filled(rect, 0.0, config.background);

    let thin = Stroke::new(1.0, config.foreground.gamma_multiply(0.6));

    // Strings through the row centers
    for string in 0..geometry.rows {
        let y = geometry.cell_rect(string, 0).center().y;
        painter.line_segment(
            [
                Pos2::new(geometry.rect.left(), y),
                Pos2::new(geometry.rect.right(), y),
            ],
            thin,
        );
    }

    // Fret wires on the far edge of each column from the nut
    for column in 0..geometry.columns {
        let cell = geometry.cell_rect(0, column);
        let x = if config.mirrored { cell.left() } else { cell.right() };
        let fret = config.from_fret as usize + column;
        let stroke = if fret == 0 {
            Stroke::new(4.0 * scale, config.foreground)
        } else {
            thin
        };
        painter.line_segment(
            [
                Pos2::new(x, geometry.rect.top()),
                Pos2::new(x, geometry.rect.bottom()),
            ],
            stroke,
        );

        if MARKED_FRETS.contains(&(fret as u8)) || column == 0 {
            painter.text(
                Pos2::new(cell.center().x, geometry.rect.bottom() + number_row / 2.0),
                Align2::CENTER_CENTER,
                fret.to_string(),
                FontId::proportional(11.0 * scale),
                config.foreground,
            );
        }
    }

    for cell in grid.cells().iter().filter(|c| c.note.visible) {
        let column = cell.position.fret.saturating_sub(config.from_fret) as usize;
        let center = geometry.cell_rect(cell.position.string, column).center();
        let fill = color_from_hex(&cell.color).unwrap_or(config.foreground);
        let radius = cell.note.size * scale;
        painter.circle_filled(center, radius, fill);
        if !cell.label.is_empty() {
            painter.text(
                center,
                Align2::CENTER_CENTER,
                &cell.label,
                FontId::proportional(radius.max(6.0)),
                contrasting_text(fill),
            );
        }
    }

    (response, geometry)
}
