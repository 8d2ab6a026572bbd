//! Paints one [`Multitool`] and routes input into it.
//!
//! Painting happens first so pointer input is hit-tested against the layout
//! the user is looking at. Clicks on selectors and buttons come back from
//! egui responses and are applied after the frame's widgets are laid out.

use std::time::Instant;

use eframe::egui::{self, Margin, Pos2, Rect, RichText, Stroke, Ui};

use crate::data::{
    instruments::MAX_FRET, name_from_index, COLOR_THEMES, INSTRUMENTS, NOTE_COLORS, NOTE_LABELS,
    NOTE_SEQUENCES,
};
use crate::fretboard::{
    Action, ButtonKind, GridState, Hand, Mode, Multitool, NoteDuration, NoteEvent, NoteSizeChoice,
    PitchClass, PointerCapture, PointerDownIds, PointerError, PointerId, PointerTarget, ToolEvent,
};
use crate::widgets::{
    fretboard, icon_button, selector, FretboardConfig, FretboardGeometry, IconButtonConfig,
    SelectorGroup,
};

use super::input::{FrameInput, PointerInput};
use super::theme::{self, ToolColors};

/// Releases egui's drag state so raw pointer events keep driving the grid.
pub struct EguiCapture<'a> {
    pub ctx: &'a egui::Context,
}

impl PointerCapture for EguiCapture<'_> {
    fn release_pointer_capture(&mut self, _id: PointerId) -> Result<(), PointerError> {
        self.ctx.stop_dragging();
        Ok(())
    }
}

/// Screen regions of a painted tool.
#[derive(Debug, Clone, Copy)]
pub struct ToolLayout {
    pub rect: Rect,
    pub menu: Option<Rect>,
    pub buttons: Rect,
    pub grid: FretboardGeometry,
}

impl ToolLayout {
    /// Grid cell under `pos`.
    pub fn cell_at(&self, pos: Pos2, grid: &GridState) -> Option<usize> {
        self.grid
            .hit(pos)
            .and_then(|(string, column)| grid.cell_index(string, column))
    }

    /// What a press at `pos` lands on, or `None` outside the tool.
    pub fn target_at(&self, pos: Pos2, grid: &GridState) -> Option<PointerTarget> {
        if !self.rect.contains(pos) {
            return None;
        }
        if let Some(cell) = self.cell_at(pos, grid) {
            return Some(PointerTarget::Grid(cell));
        }
        if self.menu.is_some_and(|menu| menu.contains(pos)) {
            return Some(PointerTarget::Selector);
        }
        if self.buttons.contains(pos) {
            return Some(PointerTarget::Button);
        }
        Some(PointerTarget::Background)
    }
}

/// Selector options, built once per view.
struct MenuOptions {
    instruments: Vec<SelectorGroup<String>>,
    roots: Vec<SelectorGroup<PitchClass>>,
    sequences: Vec<SelectorGroup<String>>,
    frets: Vec<SelectorGroup<u8>>,
    modes: Vec<SelectorGroup<Mode>>,
    hands: Vec<SelectorGroup<Hand>>,
    labels: Vec<SelectorGroup<String>>,
    colors: Vec<SelectorGroup<String>>,
    sizes: Vec<SelectorGroup<NoteSizeChoice>>,
    durations: Vec<SelectorGroup<NoteDuration>>,
    themes: Vec<SelectorGroup<String>>,
}

fn named(names: impl Iterator<Item = &'static str>) -> Vec<SelectorGroup<String>> {
    vec![SelectorGroup::plain(
        names.map(|name| (name.to_string(), name.to_string())).collect(),
    )]
}

impl MenuOptions {
    fn new() -> Self {
        Self {
            instruments: named(INSTRUMENTS.iter().map(|i| i.name)),
            roots: vec![SelectorGroup::plain(
                (0..12u8)
                    .map(|pc| (pc, name_from_index(pc).to_string()))
                    .collect(),
            )],
            sequences: NOTE_SEQUENCES
                .iter()
                .map(|category| {
                    SelectorGroup::labeled(
                        category.name,
                        category
                            .sequences
                            .iter()
                            .map(|s| (s.name.to_string(), s.name.to_string()))
                            .collect(),
                    )
                })
                .collect(),
            frets: vec![SelectorGroup::plain(
                (0..=MAX_FRET).map(|f| (f, f.to_string())).collect(),
            )],
            modes: vec![SelectorGroup::plain(
                Mode::ALL.iter().map(|&m| (m, m.name().to_string())).collect(),
            )],
            hands: vec![SelectorGroup::plain(
                Hand::ALL.iter().map(|&h| (h, h.name().to_string())).collect(),
            )],
            labels: named(NOTE_LABELS.iter().map(|l| l.name)),
            colors: named(NOTE_COLORS.iter().map(|c| c.name)),
            sizes: vec![SelectorGroup::plain(
                NoteSizeChoice::ALL
                    .iter()
                    .map(|&s| (s, s.name().to_string()))
                    .collect(),
            )],
            durations: vec![SelectorGroup::plain(
                NoteDuration::OPTIONS.iter().map(|&d| (d, d.label())).collect(),
            )],
            themes: named(COLOR_THEMES.iter().map(|t| t.name)),
        }
    }
}

/// A selector under a small caption.
fn field(ui: &mut Ui, name: &str, add: impl FnOnce(&mut Ui)) {
    ui.vertical(|ui| {
        ui.label(RichText::new(name).small());
        add(ui);
    });
}

/// Deferred work collected while painting.
#[derive(Default)]
struct ViewActions {
    actions: Vec<Action>,
    buttons: Vec<ButtonKind>,
    note_size_pressed: bool,
}

/// What a tool produced this frame.
#[derive(Debug, Default)]
pub struct ViewOutput {
    pub events: Vec<ToolEvent>,
    pub notes: Vec<NoteEvent>,
    /// A press landed inside the tool.
    pub took_focus: bool,
}

pub struct MultitoolView {
    tool: Multitool,
    options: MenuOptions,
    layout: Option<ToolLayout>,
    /// Pointers currently over the tool.
    inside: PointerDownIds,
}

impl MultitoolView {
    pub fn new(tool: Multitool) -> Self {
        Self {
            tool,
            options: MenuOptions::new(),
            layout: None,
            inside: PointerDownIds::new(),
        }
    }

    pub fn tool(&self) -> &Multitool {
        &self.tool
    }

    pub fn tool_mut(&mut self) -> &mut Multitool {
        &mut self.tool
    }

    pub fn show(
        &mut self,
        ui: &mut Ui,
        now: Instant,
        input: &FrameInput,
        popup_open: bool,
    ) -> ViewOutput {
        self.tool.tick(now);

        let mut deferred = ViewActions::default();
        self.layout = Some(self.paint(ui, &mut deferred));

        if deferred.note_size_pressed {
            self.tool.note_size_pressed();
        }
        for action in deferred.actions {
            self.tool.dispatch(action);
        }
        for kind in deferred.buttons {
            self.tool.press_button(kind, now);
        }

        let mut output = ViewOutput::default();
        let mut capture = EguiCapture { ctx: ui.ctx() };
        for &pointer in &input.pointers {
            output.took_focus |= self.route_pointer(pointer, popup_open, &mut capture);
        }
        for key in &input.keys {
            self.tool.on_key(key);
        }

        output.events = self.tool.drain_events();
        output.notes = self.tool.drain_notes();
        output
    }

    /// Feed one pointer event. Returns whether it was a press inside the tool.
    pub fn route_pointer(
        &mut self,
        input: PointerInput,
        popup_open: bool,
        capture: &mut dyn PointerCapture,
    ) -> bool {
        let Some(layout) = self.layout else {
            return false;
        };
        match input {
            PointerInput::Down { id, pos } => {
                let Some(target) = layout.target_at(pos, self.tool.grid()) else {
                    return false;
                };
                // A press on an open popup belongs to the selector
                let target = if popup_open { PointerTarget::Selector } else { target };
                self.inside.insert(id);
                self.tool.pointer_down(id, target, capture);
                true
            }
            PointerInput::Move { id, pos, down } => {
                if layout.rect.contains(pos) {
                    self.inside.insert(id);
                    if down {
                        let cell = layout.cell_at(pos, self.tool.grid());
                        self.tool.pointer_move(id, cell);
                    }
                } else if self.inside.remove(id) {
                    self.tool.pointer_leave(id, down);
                }
                false
            }
            PointerInput::Up { id, .. } => {
                self.tool.pointer_up(id);
                false
            }
            PointerInput::Gone { id, down } => {
                self.inside.remove(id);
                self.tool.pointer_leave(id, down);
                false
            }
        }
    }

    fn paint(&self, ui: &mut Ui, deferred: &mut ViewActions) -> ToolLayout {
        let props = self.tool.props();
        let colors = ToolColors::from_theme(self.tool.menu().theme());

        // Keyboard shortcuts go to the outlined tool
        let outline = if self.tool.is_focused() {
            Stroke::new(1.0, colors.foreground)
        } else {
            Stroke::NONE
        };
        let frame = egui::Frame::none()
            .fill(colors.background)
            .stroke(outline)
            .rounding(theme::ROUNDING_SMALL)
            .inner_margin(Margin::same(8.0));

        let inner = frame.show(ui, |ui| {
            theme::apply_tool_visuals(ui, colors);

            let menu = if self.tool.menu().visibility().is_displayed() {
                Some(self.paint_menu(ui, deferred))
            } else {
                None
            };

            let buttons = ui
                .horizontal(|ui| {
                    let size = if self.tool.grid().is_enlarged() { 36.0 } else { 28.0 };
                    let config = IconButtonConfig {
                        fallback: colors.foreground,
                        ..Default::default()
                    }
                    .with_size(size);
                    for button in self.tool.buttons() {
                        if icon_button(ui, button, &config).clicked() {
                            deferred.buttons.push(button.kind());
                        }
                    }
                })
                .response
                .rect;

            let config = FretboardConfig {
                foreground: colors.foreground,
                background: colors.background,
                mirrored: props.hand == Hand::Left,
                from_fret: props.from_fret,
            };
            let (_, grid) = fretboard(ui, self.tool.grid(), &config);

            (menu, buttons, grid)
        });

        let (menu, buttons, grid) = inner.inner;
        ToolLayout {
            rect: inner.response.rect,
            menu,
            buttons,
            grid,
        }
    }

    fn paint_menu(&self, ui: &mut Ui, deferred: &mut ViewActions) -> Rect {
        let id = self.tool.id();
        let menu = self.tool.menu();
        let s = menu.selections();
        let o = &self.options;

        ui.add_enabled_ui(menu.visibility().is_expanded(), |ui| {
            ui.set_max_width(menu.width().max(240.0));
            ui.horizontal_wrapped(|ui| {
                field(ui, "Instrument", |ui| {
                    let r = selector(ui, (id, "instrument"), &o.instruments, Some(&s.instrument));
                    if let Some(name) = r.changed {
                        deferred.actions.push(Action::ChangeInstrument(name));
                    }
                });
                field(ui, "Root", |ui| {
                    let r = selector(ui, (id, "root"), &o.roots, Some(&s.root_note));
                    if let Some(root) = r.changed {
                        deferred.actions.push(Action::ChangeRoot(root));
                    }
                });
                field(ui, "Sequence", |ui| {
                    let r = selector(ui, (id, "sequence"), &o.sequences, Some(&s.sequence));
                    if let Some(name) = r.changed {
                        deferred.actions.push(Action::ChangeSequence(name));
                    }
                });
                field(ui, "From", |ui| {
                    let r = selector(ui, (id, "from"), &o.frets, Some(&s.from_fret));
                    if let Some(fret) = r.changed {
                        deferred.actions.push(Action::ChangeFromFret(fret));
                    }
                });
                field(ui, "To", |ui| {
                    let r = selector(ui, (id, "to"), &o.frets, Some(&s.to_fret));
                    if let Some(fret) = r.changed {
                        deferred.actions.push(Action::ChangeToFret(fret));
                    }
                });
                field(ui, "Mode", |ui| {
                    let r = selector(ui, (id, "mode"), &o.modes, Some(&s.mode));
                    if let Some(mode) = r.changed {
                        deferred.actions.push(Action::ChangeMode(mode));
                    }
                });
                field(ui, "Hand", |ui| {
                    let r = selector(ui, (id, "hand"), &o.hands, Some(&s.hand));
                    if let Some(hand) = r.changed {
                        deferred.actions.push(Action::ChangeHand(hand));
                    }
                });
                field(ui, "Labels", |ui| {
                    let r = selector(ui, (id, "labels"), &o.labels, Some(&s.note_labels));
                    if let Some(name) = r.changed {
                        deferred.actions.push(Action::ChangeNoteLabels(name));
                    }
                });
                field(ui, "Colors", |ui| {
                    let r = selector(ui, (id, "colors"), &o.colors, s.note_colors.as_ref());
                    if let Some(name) = r.changed {
                        deferred.actions.push(Action::ChangeNoteColors(name));
                    }
                });
                field(ui, "Note size", |ui| {
                    let r = selector(ui, (id, "size"), &o.sizes, s.note_size.as_ref());
                    if r.response.clicked() {
                        deferred.note_size_pressed = true;
                    }
                    if let Some(choice) = r.changed {
                        deferred.actions.push(Action::ChangeNoteSize(choice));
                    }
                });
                field(ui, "Duration", |ui| {
                    let r = selector(ui, (id, "duration"), &o.durations, Some(&s.note_duration));
                    if let Some(duration) = r.changed {
                        deferred.actions.push(Action::ChangeNoteDuration(duration));
                    }
                });
                field(ui, "Theme", |ui| {
                    let r = selector(ui, (id, "theme"), &o.themes, s.color_theme.as_ref());
                    if let Some(name) = r.changed {
                        deferred.actions.push(Action::ChangeColorTheme(name));
                    }
                });
            });
        })
        .response
        .rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fretboard::{MultitoolOptions, NoCapture};
    use eframe::egui::Vec2;

    fn view() -> MultitoolView {
        let options = MultitoolOptions {
            note_duration: Some(NoteDuration::Touch),
            ..Default::default()
        };
        let mut view = MultitoolView::new(Multitool::new(1, &options));
        let grid = FretboardGeometry::new(Pos2::new(10.0, 100.0), view.tool().grid(), false);
        view.layout = Some(ToolLayout {
            rect: Rect::from_min_max(Pos2::ZERO, grid.rect.max + Vec2::splat(10.0)),
            menu: Some(Rect::from_min_size(Pos2::new(10.0, 10.0), Vec2::new(200.0, 40.0))),
            buttons: Rect::from_min_size(Pos2::new(10.0, 60.0), Vec2::new(120.0, 28.0)),
            grid,
        });
        view
    }

    fn cell_center(view: &MultitoolView, string: usize, column: usize) -> Pos2 {
        view.layout.unwrap().grid.cell_rect(string, column).center()
    }

    #[test]
    fn test_targets() {
        let view = view();
        let layout = view.layout.unwrap();
        let grid = view.tool().grid();
        assert_eq!(layout.target_at(Pos2::new(20.0, 20.0), grid), Some(PointerTarget::Selector));
        assert_eq!(layout.target_at(Pos2::new(20.0, 70.0), grid), Some(PointerTarget::Button));
        assert_eq!(layout.target_at(Pos2::new(300.0, 20.0), grid), Some(PointerTarget::Background));
        assert_eq!(layout.target_at(Pos2::new(-5.0, 20.0), grid), None);
        let columns = grid.columns();
        assert_eq!(
            layout.target_at(cell_center(&view, 1, 2), grid),
            Some(PointerTarget::Grid(columns + 2))
        );
    }

    #[test]
    fn test_drag_out_of_tool_stops_note() {
        let mut view = view();
        let pos = cell_center(&view, 0, 0);
        assert!(view.route_pointer(PointerInput::Down { id: 3, pos }, false, &mut NoCapture));
        assert!(view.tool().is_focused());
        assert_eq!(view.tool_mut().drain_notes().len(), 1);

        let outside = Pos2::new(-50.0, -50.0);
        view.route_pointer(PointerInput::Move { id: 3, pos: outside, down: true }, false, &mut NoCapture);
        assert!(matches!(view.tool_mut().drain_notes().as_slice(), [NoteEvent::Stop { .. }]));
        assert!(view.tool().grid().pointer_down_ids().is_empty());
    }

    #[test]
    fn test_press_outside_is_ignored() {
        let mut view = view();
        let pos = Pos2::new(-50.0, 0.0);
        assert!(!view.route_pointer(PointerInput::Down { id: 1, pos }, false, &mut NoCapture));
        assert!(!view.tool().is_focused());
    }

    #[test]
    fn test_press_through_popup_is_not_tracked() {
        let mut view = view();
        let pos = cell_center(&view, 0, 0);
        view.route_pointer(PointerInput::Down { id: 2, pos }, true, &mut NoCapture);
        assert!(view.tool().grid().pointer_down_ids().is_empty());
        assert!(view.tool_mut().drain_notes().is_empty());
    }

    #[test]
    fn test_release_anywhere_clears() {
        let mut view = view();
        let pos = cell_center(&view, 2, 1);
        view.route_pointer(PointerInput::Down { id: 7, pos }, false, &mut NoCapture);
        view.route_pointer(PointerInput::Up { id: 7, pos: Pos2::new(900.0, 900.0) }, false, &mut NoCapture);
        assert!(view.tool().grid().pointer_down_ids().is_empty());
    }
}
