//! The multitool: menu, grid and buttons around one shared [`Props`].
//!
//! Every change goes through [`Multitool::dispatch`], which applies the action
//! and then carries out the render directive on the grid, menu and buttons.
//! Pointer events are reconciled here as well as in the grid, so a release
//! that lands on a button or outside the tool still clears the pointer.

use std::time::Instant;

use super::actions::{Action, Render};
use super::buttons::{ButtonKind, IconButton};
use super::events::{NoteEvent, ToolEvent};
use super::grid::GridState;
use super::menu::MenuState;
use super::pointers::{
    reconcile_down, reconcile_leave, reconcile_up, PointerCapture, PointerId, PointerTarget,
};
use super::props::{MultitoolOptions, Props};
use super::shortcuts::action_for_key;

pub struct Multitool {
    id: u64,
    props: Props,
    grid: GridState,
    menu: MenuState,
    buttons: Vec<IconButton>,
    focused: bool,
    events: Vec<ToolEvent>,
    notes: Vec<NoteEvent>,
}

impl Multitool {
    pub fn new(id: u64, options: &MultitoolOptions) -> Self {
        Self::from_props(id, Props::from_options(options))
    }

    /// Build from a props snapshot, e.g. the one carried by [`ToolEvent::AddTool`].
    pub fn from_props(id: u64, props: Props) -> Self {
        let grid = GridState::new(id, &props);
        let menu = MenuState::new(&props, grid.width());
        let buttons = ButtonKind::ALL
            .iter()
            .map(|&kind| IconButton::new(kind, &props.color_theme.foreground))
            .collect();
        tracing::debug!(
            id,
            instrument = props.instrument_name.as_str(),
            sequence = props.sequence_name.as_str(),
            "multitool created"
        );
        Self {
            id,
            props,
            grid,
            menu,
            buttons,
            focused: false,
            events: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    pub fn menu(&self) -> &MenuState {
        &self.menu
    }

    pub fn buttons(&self) -> &[IconButton] {
        &self.buttons
    }

    /// Apply a change and bring every child in line with it.
    pub fn dispatch(&mut self, action: Action) -> Render {
        tracing::debug!(id = self.id, ?action, "dispatch");
        let render = self.props.apply(&action);
        self.menu.record(&action, &self.props);

        match render {
            Render::None => {}
            Render::Update { reset_sizes } => self.grid.update(&self.props, reset_sizes),
            Render::Reset => {
                let width = self.grid.width();
                let stops = self.grid.reset(&self.props);
                self.notes.extend(stops);
                if self.grid.width() != width {
                    self.emit(ToolEvent::FretboardResized {
                        width: self.grid.width(),
                    });
                }
            }
            Render::Restyle => self.restyle(),
        }
        render
    }

    /// Re-theme the menu, the grid and all buttons.
    fn restyle(&mut self) {
        let theme = &self.props.color_theme;
        self.menu.set_color_theme(theme);
        for button in &mut self.buttons {
            button.set_color_theme(&theme.foreground, None);
        }
        self.grid.update(&self.props, false);
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Keydown while focused. Returns whether the key was a shortcut.
    pub fn on_key(&mut self, key: &str) -> bool {
        if !self.focused {
            return false;
        }
        match action_for_key(key) {
            Some(action) => {
                self.dispatch(action);
                true
            }
            None => false,
        }
    }

    /// The note size selector was pressed, before it opens.
    pub fn note_size_pressed(&mut self) {
        self.menu.note_size_pressed();
    }

    /// Pointer-down anywhere in the tool. Focuses the tool.
    pub fn pointer_down(
        &mut self,
        id: PointerId,
        target: PointerTarget,
        capture: &mut dyn PointerCapture,
    ) {
        self.focus();
        if let Err(err) = reconcile_down(self.grid.pointer_down_ids_mut(), id, target, capture) {
            tracing::error!(tool = self.id, pointer = id, "pointer down: {}", err);
        }
        if let PointerTarget::Grid(cell) = target {
            let notes = self.grid.pointer_down(&self.props, id, Some(cell));
            self.notes.extend(notes);
        }
    }

    /// Pointer moved over the grid (`Some(cell)`) or elsewhere in the tool.
    pub fn pointer_move(&mut self, id: PointerId, cell: Option<usize>) {
        let notes = self.grid.pointer_move(&self.props, id, cell);
        self.notes.extend(notes);
    }

    pub fn pointer_up(&mut self, id: PointerId) {
        let notes = self.grid.pointer_up(id);
        self.notes.extend(notes);
        if reconcile_up(self.grid.pointer_down_ids_mut(), id) {
            let notes = self.grid.release(id);
            self.notes.extend(notes);
        }
    }

    /// Pointer left the tool's bounds.
    pub fn pointer_leave(&mut self, id: PointerId, still_down: bool) {
        if reconcile_leave(self.grid.pointer_down_ids_mut(), id, still_down) {
            let notes = self.grid.release(id);
            self.notes.extend(notes);
        }
    }

    pub fn press_button(&mut self, kind: ButtonKind, now: Instant) {
        if let Some(button) = self.buttons.iter_mut().find(|b| b.kind() == kind) {
            button.press(now);
        }
        match kind {
            ButtonKind::Menu => self.menu.toggle(now),
            ButtonKind::Plus => self.emit(ToolEvent::AddTool(Box::new(self.props.clone()))),
            ButtonKind::Minus => self.emit(ToolEvent::RemoveTool),
            ButtonKind::Resize => {
                let width = self.grid.toggle_resize();
                self.emit(ToolEvent::FretboardResized { width });
            }
        }
    }

    /// Advance pending transitions. Returns whether anything changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = self.menu.tick(now);
        for button in &mut self.buttons {
            changed |= button.tick(now);
        }
        changed
    }

    fn emit(&mut self, event: ToolEvent) {
        tracing::debug!(id = self.id, ?event, "tool event");
        if let ToolEvent::FretboardResized { width } = event {
            self.menu.set_width(width);
        }
        self.events.push(event);
    }

    /// Stop everything this tool holds, e.g. before it is removed.
    pub fn silence(&mut self) {
        let stops = self.grid.silence();
        self.notes.extend(stops);
    }

    pub fn drain_events(&mut self) -> Vec<ToolEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn drain_notes(&mut self) -> Vec<NoteEvent> {
        std::mem::take(&mut self.notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fretboard::pointers::NoCapture;
    use crate::fretboard::props::{Mode, NoteDuration};

    fn tool() -> Multitool {
        Multitool::new(
            1,
            &MultitoolOptions {
                note_duration: Some(NoteDuration::Touch),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_keys_need_focus() {
        let mut tool = tool();
        assert!(!tool.on_key("4"));
        assert_eq!(tool.props().sequence_name, "Ionian / Major");

        tool.pointer_down(1, PointerTarget::Background, &mut NoCapture);
        assert!(tool.is_focused());
        assert!(tool.on_key("4"));
        assert_eq!(tool.props().sequence_name, "Lydian");
        assert_eq!(tool.menu().selections().sequence, "Lydian");
    }

    #[test]
    fn test_restyle_reaches_buttons_and_menu() {
        let mut tool = tool();
        let render = tool.dispatch(Action::ChangeColorTheme("Black".to_string()));
        assert_eq!(render, Render::Restyle);
        assert!(tool.buttons().iter().all(|b| b.foreground() == "#ffffff"));
        assert_eq!(tool.menu().theme().background, "#000000");
        assert_eq!(tool.menu().selections().color_theme.as_deref(), Some("Black"));
    }

    #[test]
    fn test_plus_emits_snapshot() {
        let mut tool = tool();
        tool.dispatch(Action::ChangeRoot(7));
        tool.press_button(ButtonKind::Plus, Instant::now());
        tool.press_button(ButtonKind::Minus, Instant::now());
        let events = tool.drain_events();
        assert_eq!(events.len(), 2);
        match &events[0] {
            ToolEvent::AddTool(props) => assert_eq!(props.root_note, 7),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(events[1], ToolEvent::RemoveTool);
        assert!(tool.drain_events().is_empty());
    }

    #[test]
    fn test_resize_syncs_menu_width() {
        let mut tool = tool();
        let before = tool.menu().width();
        tool.press_button(ButtonKind::Resize, Instant::now());
        let events = tool.drain_events();
        let ToolEvent::FretboardResized { width } = events[0] else {
            panic!("expected resize");
        };
        assert!(width > before);
        assert_eq!(tool.menu().width(), width);
    }

    #[test]
    fn test_range_change_resizes() {
        let mut tool = tool();
        tool.dispatch(Action::ChangeToFret(5));
        assert!(matches!(
            tool.drain_events().as_slice(),
            [ToolEvent::FretboardResized { .. }]
        ));
        assert_eq!(tool.grid().columns(), 6);
        assert_eq!(tool.menu().width(), tool.grid().width());
    }

    #[test]
    fn test_release_off_grid_stops_note() {
        let mut tool = tool();
        tool.pointer_down(5, PointerTarget::Grid(0), &mut NoCapture);
        assert_eq!(tool.drain_notes().len(), 1);
        tool.pointer_leave(5, true);
        assert!(matches!(tool.drain_notes().as_slice(), [NoteEvent::Stop { .. }]));
        assert!(tool.grid().pointer_down_ids().is_empty());
    }

    #[test]
    fn test_press_on_button_then_drag_into_grid_plays() {
        let mut tool = tool();
        tool.pointer_down(2, PointerTarget::Button, &mut NoCapture);
        assert!(tool.grid().pointer_down_ids().contains(2));
        tool.pointer_move(2, Some(0));
        assert_eq!(tool.drain_notes().len(), 1);
        tool.pointer_up(2);
        assert!(tool.grid().pointer_down_ids().is_empty());
    }

    #[test]
    fn test_selector_press_is_not_tracked() {
        let mut tool = tool();
        tool.pointer_down(3, PointerTarget::Selector, &mut NoCapture);
        assert!(tool.grid().pointer_down_ids().is_empty());
        assert!(tool.is_focused());
    }

    #[test]
    fn test_mode_change_takes_effect_on_next_press() {
        let mut tool = tool();
        assert_eq!(tool.dispatch(Action::ChangeMode(Mode::EditOne)), Render::None);
        tool.pointer_down(1, PointerTarget::Grid(0), &mut NoCapture);
        assert!(tool.drain_notes().is_empty());
        assert_eq!(tool.grid().cells()[0].note.size, tool.props().note_sizes.second);
    }

    #[test]
    fn test_menu_button_hides_menu() {
        let mut tool = tool();
        let now = Instant::now();
        tool.press_button(ButtonKind::Menu, now);
        assert!(tool.tick(now + std::time::Duration::from_millis(250)));
        assert!(!tool.menu().visibility().is_displayed());
    }

    #[test]
    fn test_silence_before_removal() {
        let mut tool = tool();
        tool.pointer_down(1, PointerTarget::Grid(0), &mut NoCapture);
        tool.drain_notes();
        tool.silence();
        assert!(matches!(tool.drain_notes().as_slice(), [NoteEvent::Stop { .. }]));
    }
}
