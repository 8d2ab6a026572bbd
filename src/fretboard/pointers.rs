//! Pointer-id bookkeeping for multi-touch.
//!
//! The grid tracks which pointers are held so drags keep sounding notes.
//! Presses and releases can land on nested widgets that the grid never sees,
//! so the multitool reconciles the same list at its own boundary.

use thiserror::Error;

/// Identifier of a mouse or touch pointer.
pub type PointerId = u64;

/// Errors from the host's pointer capture.
#[derive(Debug, Error)]
pub enum PointerError {
    #[error("failed to release capture of pointer {id}: {reason}")]
    ReleaseCapture { id: PointerId, reason: String },
}

/// Host hook for releasing native pointer capture.
pub trait PointerCapture {
    fn release_pointer_capture(&mut self, id: PointerId) -> Result<(), PointerError>;
}

/// Capture hook for hosts without pointer capture.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCapture;

impl PointerCapture for NoCapture {
    fn release_pointer_capture(&mut self, _id: PointerId) -> Result<(), PointerError> {
        Ok(())
    }
}

/// What a pointer event landed on inside the multitool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// A selector in the menu. Never tracked.
    Selector,
    /// A fretboard cell, by index into the grid.
    Grid(usize),
    Button,
    Background,
}

/// Ordered list of held pointers. Each id appears at most once.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PointerDownIds {
    ids: Vec<PointerId>,
}

impl PointerDownIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: PointerId) -> bool {
        self.ids.contains(&id)
    }

    /// Append `id` unless already present. Returns whether it was added.
    pub fn insert(&mut self, id: PointerId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Remove `id` if present. Returns whether it was removed.
    pub fn remove(&mut self, id: PointerId) -> bool {
        match self.ids.iter().position(|&held| held == id) {
            Some(index) => {
                self.ids.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn as_slice(&self) -> &[PointerId] {
        &self.ids
    }
}

/// Boundary pointer-down.
///
/// Tracks the pointer unless it hit a selector or is already tracked, then
/// releases native capture so later moves and releases reach the boundary.
/// The id stays tracked even when releasing capture fails.
pub fn reconcile_down(
    ids: &mut PointerDownIds,
    id: PointerId,
    target: PointerTarget,
    capture: &mut dyn PointerCapture,
) -> Result<bool, PointerError> {
    if target == PointerTarget::Selector || !ids.insert(id) {
        return Ok(false);
    }
    capture.release_pointer_capture(id)?;
    Ok(true)
}

/// Boundary pointer-up. Claims the id if the grid did not already.
pub fn reconcile_up(ids: &mut PointerDownIds, id: PointerId) -> bool {
    ids.remove(id)
}

/// Pointer left the multitool. A held pointer is dropped unconditionally.
pub fn reconcile_leave(ids: &mut PointerDownIds, id: PointerId, still_down: bool) -> bool {
    still_down && ids.remove(id)
}
