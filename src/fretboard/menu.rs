//! Control panel state.
//!
//! Each selector owns one slice of props. The menu only remembers what every
//! selector currently displays, plus its own visibility and width.

use std::time::Instant;

use super::actions::Action;
use super::props::{ColorTheme, Hand, Mode, NoteDuration, NoteSizeChoice, PitchClass, Props};
use super::transition::Transition;

/// Values shown by the selectors.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuSelections {
    pub instrument: String,
    pub root_note: PitchClass,
    pub sequence: String,
    pub from_fret: u8,
    pub to_fret: u8,
    pub mode: Mode,
    pub hand: Hand,
    pub note_labels: String,
    /// `None` when the colors match no stock scheme.
    pub note_colors: Option<String>,
    /// `None` after a press on the selector, so picking the same option fires again.
    pub note_size: Option<NoteSizeChoice>,
    pub note_duration: NoteDuration,
    /// `None` when the theme matches no stock theme.
    pub color_theme: Option<String>,
}

impl MenuSelections {
    pub fn from_props(props: &Props) -> Self {
        Self {
            instrument: props.instrument_name.clone(),
            root_note: props.root_note,
            sequence: props.sequence_name.clone(),
            from_fret: props.from_fret,
            to_fret: props.to_fret,
            mode: props.mode,
            hand: props.hand,
            note_labels: props.note_labels_name.clone(),
            note_colors: props.note_colors_name().map(str::to_string),
            note_size: Some(props.note_sizes.choice()),
            note_duration: props.note_duration,
            color_theme: props.color_theme.name().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MenuState {
    selections: MenuSelections,
    visibility: Transition,
    width: f32,
    theme: ColorTheme,
}

impl MenuState {
    pub fn new(props: &Props, width: f32) -> Self {
        Self {
            selections: MenuSelections::from_props(props),
            visibility: Transition::menu().opened(),
            width,
            theme: props.color_theme.clone(),
        }
    }

    pub fn selections(&self) -> &MenuSelections {
        &self.selections
    }

    /// Show the value an applied action left in props.
    pub fn record(&mut self, action: &Action, props: &Props) {
        let s = &mut self.selections;
        match action {
            Action::ChangeInstrument(_) => {
                s.instrument = props.instrument_name.clone();
                self.sync_range(props);
            }
            Action::ChangeRoot(_) => s.root_note = props.root_note,
            Action::ChangeSequence(_) => s.sequence = props.sequence_name.clone(),
            // The clamp may have moved the other bound
            Action::ChangeFromFret(_) | Action::ChangeToFret(_) => self.sync_range(props),
            Action::ChangeMode(_) => s.mode = props.mode,
            Action::ChangeHand(_) => s.hand = props.hand,
            Action::ChangeNoteLabels(_) => s.note_labels = props.note_labels_name.clone(),
            Action::ChangeNoteColors(_) => {
                s.note_colors = props.note_colors_name().map(str::to_string)
            }
            Action::ChangeNoteSize(_) => s.note_size = Some(props.note_sizes.choice()),
            Action::ChangeNoteDuration(_) => s.note_duration = props.note_duration,
            Action::ChangeColorTheme(_) => {
                s.color_theme = props.color_theme.name().map(str::to_string)
            }
        }
    }

    /// Copy the fret range from props into both range selectors.
    pub fn sync_range(&mut self, props: &Props) {
        self.selections.from_fret = props.from_fret;
        self.selections.to_fret = props.to_fret;
    }

    pub fn note_size_pressed(&mut self) {
        self.selections.note_size = None;
    }

    pub fn toggle(&mut self, now: Instant) {
        self.visibility.toggle(now);
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        self.visibility.tick(now)
    }

    pub fn visibility(&self) -> &Transition {
        &self.visibility
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    pub fn theme(&self) -> &ColorTheme {
        &self.theme
    }

    pub fn set_color_theme(&mut self, theme: &ColorTheme) {
        self.theme = theme.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_range_resyncs_on_instrument_change() {
        let mut props = Props::default();
        let mut menu = MenuState::new(&props, 100.0);

        let action = Action::ChangeToFret(5);
        props.apply(&action);
        menu.record(&action, &props);
        assert_eq!(menu.selections().to_fret, 5);

        let action = Action::ChangeInstrument("Ukulele".to_string());
        props.apply(&action);
        menu.record(&action, &props);
        assert_eq!(menu.selections().instrument, "Ukulele");
        assert_eq!((menu.selections().from_fret, menu.selections().to_fret), (0, 12));
    }

    #[test]
    fn test_clamped_bound_is_shown() {
        let mut props = Props::default();
        let mut menu = MenuState::new(&props, 100.0);
        let action = Action::ChangeFromFret(15);
        props.apply(&action);
        menu.record(&action, &props);
        assert_eq!((menu.selections().from_fret, menu.selections().to_fret), (15, 15));
    }

    #[test]
    fn test_note_size_press_clears_selection() {
        let props = Props::default();
        let mut menu = MenuState::new(&props, 100.0);
        assert_eq!(menu.selections().note_size, Some(NoteSizeChoice::Large));
        menu.note_size_pressed();
        assert_eq!(menu.selections().note_size, None);
    }

    #[test]
    fn test_unknown_colors_show_no_scheme() {
        let mut props = Props::default();
        props.note_colors[3] = "#123456".to_string();
        let menu = MenuState::new(&props, 100.0);
        assert_eq!(menu.selections().note_colors, None);
        assert_eq!(menu.selections().color_theme.as_deref(), Some("Light"));
    }

    #[test]
    fn test_menu_starts_open_and_toggles() {
        let props = Props::default();
        let mut menu = MenuState::new(&props, 100.0);
        assert!(menu.visibility().is_expanded());

        let now = Instant::now();
        menu.toggle(now);
        assert!(menu.visibility().is_displayed());
        assert!(menu.tick(now + Duration::from_millis(200)));
        assert!(!menu.visibility().is_displayed());
    }
}
