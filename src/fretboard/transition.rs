//! Timed show/hide state machine.
//!
//! Menu visibility and button press animations are staged: the widget is
//! shown first and expanded after a delay, or collapsed first and hidden after
//! a delay. The pending step is a deadline checked by [`Transition::tick`], so
//! toggling again simply replaces it.

use std::time::{Duration, Instant};

/// Menu: delay between showing and expanding.
pub const MENU_OPEN_DELAY: Duration = Duration::from_millis(20);
/// Menu: delay between collapsing and hiding.
pub const MENU_CLOSE_DELAY: Duration = Duration::from_millis(200);
/// How long a pressed button stays rotated.
pub const BUTTON_PULSE: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionState {
    /// Hidden.
    #[default]
    Idle,
    /// Shown, waiting to expand.
    Opening,
    /// Shown and expanded.
    Open,
    /// Collapsed, waiting to hide.
    Closing,
}

#[derive(Debug, Clone)]
pub struct Transition {
    state: TransitionState,
    deadline: Option<Instant>,
    open_delay: Duration,
    close_delay: Duration,
}

impl Transition {
    pub fn new(open_delay: Duration, close_delay: Duration) -> Self {
        Self {
            state: TransitionState::Idle,
            deadline: None,
            open_delay,
            close_delay,
        }
    }

    pub fn menu() -> Self {
        Self::new(MENU_OPEN_DELAY, MENU_CLOSE_DELAY)
    }

    pub fn button() -> Self {
        Self::new(Duration::ZERO, BUTTON_PULSE)
    }

    /// Start out open, with nothing pending.
    pub fn opened(mut self) -> Self {
        self.state = TransitionState::Open;
        self.deadline = None;
        self
    }

    /// Flip direction. Any pending step is cancelled.
    pub fn toggle(&mut self, now: Instant) {
        match self.state {
            TransitionState::Idle | TransitionState::Closing => {
                self.state = TransitionState::Opening;
                self.deadline = Some(now + self.open_delay);
            }
            TransitionState::Opening | TransitionState::Open => {
                self.state = TransitionState::Closing;
                self.deadline = Some(now + self.close_delay);
            }
        }
    }

    /// Expand immediately, then fall back to idle after the close delay.
    pub fn pulse(&mut self, now: Instant) {
        self.state = TransitionState::Open;
        self.deadline = Some(now + self.close_delay);
    }

    /// Advance a pending step whose deadline has passed. Returns whether the state changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(deadline) = self.deadline else {
            return false;
        };
        if now < deadline {
            return false;
        }
        self.deadline = None;
        self.state = match self.state {
            TransitionState::Opening => TransitionState::Open,
            TransitionState::Open | TransitionState::Closing | TransitionState::Idle => {
                TransitionState::Idle
            }
        };
        true
    }

    /// Time left until the pending step, if any.
    pub fn pending(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    /// Whether the widget takes up space.
    pub fn is_displayed(&self) -> bool {
        self.state != TransitionState::Idle
    }

    /// Whether the widget is drawn expanded.
    pub fn is_expanded(&self) -> bool {
        self.state == TransitionState::Open
    }
}
