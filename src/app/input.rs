//! Translation of raw egui events into pointer and key input.
//!
//! egui reports the mouse as pointer events and touches as `Event::Touch`,
//! and on touch screens it also synthesizes pointer events from the first
//! touch. Pointer events are ignored while a touch is down and in any frame
//! that carries touch events, so no press is counted twice. The mouse works
//! again once every touch has lifted.

use eframe::egui::{Event, PointerButton, Pos2, TouchPhase};

use crate::fretboard::PointerId;

/// Pointer id used for the mouse.
pub const MOUSE_POINTER_ID: PointerId = 0;

/// A pointer event in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    Down { id: PointerId, pos: Pos2 },
    Move { id: PointerId, pos: Pos2, down: bool },
    Up { id: PointerId, pos: Pos2 },
    /// The pointer left the window or the touch was cancelled.
    Gone { id: PointerId, down: bool },
}

impl PointerInput {
    pub fn id(&self) -> PointerId {
        match *self {
            PointerInput::Down { id, .. }
            | PointerInput::Move { id, .. }
            | PointerInput::Up { id, .. }
            | PointerInput::Gone { id, .. } => id,
        }
    }
}

/// Input gathered from one frame.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FrameInput {
    pub pointers: Vec<PointerInput>,
    /// Typed characters, one per entry.
    pub keys: Vec<String>,
}

#[derive(Debug, Default)]
pub struct InputTranslator {
    /// Touches currently down, by egui touch id.
    touches: Vec<u64>,
    mouse_down: bool,
}

impl InputTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn translate(&mut self, events: &[Event]) -> FrameInput {
        let mut input = FrameInput::default();
        let suppress_mouse =
            !self.touches.is_empty() || events.iter().any(|e| matches!(e, Event::Touch { .. }));
        for event in events {
            match event {
                Event::Text(text) => input.keys.extend(text.chars().map(String::from)),
                Event::Touch { id, phase, pos, .. } => {
                    match phase {
                        TouchPhase::Start | TouchPhase::Move => {
                            if !self.touches.contains(&id.0) {
                                self.touches.push(id.0);
                            }
                        }
                        TouchPhase::End | TouchPhase::Cancel => self.touches.retain(|&t| t != id.0),
                    }
                    // Offset so touches never collide with the mouse
                    let id = id.0.wrapping_add(1);
                    let pos = *pos;
                    input.pointers.push(match phase {
                        TouchPhase::Start => PointerInput::Down { id, pos },
                        TouchPhase::Move => PointerInput::Move { id, pos, down: true },
                        TouchPhase::End => PointerInput::Up { id, pos },
                        TouchPhase::Cancel => PointerInput::Gone { id, down: true },
                    });
                }
                _ if suppress_mouse => {}
                Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed,
                    ..
                } => {
                    self.mouse_down = *pressed;
                    let id = MOUSE_POINTER_ID;
                    input.pointers.push(if *pressed {
                        PointerInput::Down { id, pos: *pos }
                    } else {
                        PointerInput::Up { id, pos: *pos }
                    });
                }
                Event::PointerMoved(pos) => input.pointers.push(PointerInput::Move {
                    id: MOUSE_POINTER_ID,
                    pos: *pos,
                    down: self.mouse_down,
                }),
                Event::PointerGone => input.pointers.push(PointerInput::Gone {
                    id: MOUSE_POINTER_ID,
                    down: self.mouse_down,
                }),
                _ => {}
            }
        }
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::{Modifiers, TouchDeviceId, TouchId};

    fn button(pressed: bool) -> Event {
        Event::PointerButton {
            pos: Pos2::new(5.0, 5.0),
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::NONE,
        }
    }

    fn touch(id: u64, phase: TouchPhase) -> Event {
        Event::Touch {
            device_id: TouchDeviceId(0),
            id: TouchId(id),
            phase,
            pos: Pos2::new(1.0, 2.0),
            force: None,
        }
    }

    #[test]
    fn test_mouse_press_drag_release() {
        let mut translator = InputTranslator::new();
        let input = translator.translate(&[
            button(true),
            Event::PointerMoved(Pos2::new(6.0, 5.0)),
            button(false),
            Event::PointerMoved(Pos2::new(7.0, 5.0)),
        ]);
        assert_eq!(
            input.pointers,
            vec![
                PointerInput::Down { id: 0, pos: Pos2::new(5.0, 5.0) },
                PointerInput::Move { id: 0, pos: Pos2::new(6.0, 5.0), down: true },
                PointerInput::Up { id: 0, pos: Pos2::new(5.0, 5.0) },
                PointerInput::Move { id: 0, pos: Pos2::new(7.0, 5.0), down: false },
            ]
        );
    }

    #[test]
    fn test_touch_suppresses_synthesized_mouse() {
        let mut translator = InputTranslator::new();
        let input = translator.translate(&[touch(4, TouchPhase::Start), button(true)]);
        assert_eq!(input.pointers.len(), 1);
        assert_eq!(input.pointers[0].id(), 5);

        let input = translator.translate(&[button(false), touch(4, TouchPhase::End)]);
        assert!(matches!(input.pointers.as_slice(), [PointerInput::Up { id: 5, .. }]));
    }

    #[test]
    fn test_mouse_works_again_after_touches_lift() {
        let mut translator = InputTranslator::new();
        translator.translate(&[touch(1, TouchPhase::Start), touch(2, TouchPhase::Start)]);
        translator.translate(&[touch(1, TouchPhase::End)]);

        // Touch 2 is still down
        let input = translator.translate(&[button(true)]);
        assert!(input.pointers.is_empty());

        let input = translator.translate(&[touch(2, TouchPhase::End), button(false)]);
        assert!(matches!(input.pointers.as_slice(), [PointerInput::Up { id: 3, .. }]));

        let input = translator.translate(&[button(true), button(false)]);
        assert_eq!(input.pointers.len(), 2);
        assert!(input.pointers.iter().all(|p| p.id() == MOUSE_POINTER_ID));
    }

    #[test]
    fn test_cancelled_touch_is_gone() {
        let mut translator = InputTranslator::new();
        let input = translator.translate(&[touch(0, TouchPhase::Cancel)]);
        assert_eq!(input.pointers, vec![PointerInput::Gone { id: 1, down: true }]);
    }

    #[test]
    fn test_text_splits_into_keys() {
        let mut translator = InputTranslator::new();
        let input = translator.translate(&[Event::Text("z1".to_string())]);
        assert_eq!(input.keys, vec!["z".to_string(), "1".to_string()]);
        assert!(input.pointers.is_empty());
    }

    #[test]
    fn test_secondary_button_ignored() {
        let mut translator = InputTranslator::new();
        let input = translator.translate(&[Event::PointerButton {
            pos: Pos2::ZERO,
            button: PointerButton::Secondary,
            pressed: true,
            modifiers: Modifiers::NONE,
        }]);
        assert!(input.pointers.is_empty());
    }
}
