//! Tick subscription - scoped acquisition with guaranteed release.
//!
//! An external per-frame scheduler (animation frames, a test loop) drives
//! the engine by calling `GraphView::tick`. The scheduler holds a
//! `TickHandle`; dropping it (view teardown) cancels all future ticks, so
//! no callback can outlive the view it was scheduled for.

use std::cell::Cell;
use std::rc::Rc;

/// Shared active flag between a `GraphView` and its scheduler.
///
/// Single-threaded by design: the whole engine is owned by one view.
#[derive(Debug, Clone, Default)]
pub(crate) struct TickFlag {
    active: Rc<Cell<bool>>,
}

impl TickFlag {
    pub(crate) fn new() -> Self {
        Self {
            active: Rc::new(Cell::new(false)),
        }
    }

    pub(crate) fn activate(&self) {
        self.active.set(true);
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active.get()
    }

    pub(crate) fn handle(&self) -> TickHandle {
        TickHandle {
            active: Rc::clone(&self.active),
        }
    }
}

/// RAII guard over a tick subscription.
///
/// While alive, `GraphView::tick` advances the simulation; once dropped or
/// explicitly cancelled, ticks become no-ops.
#[derive(Debug)]
pub struct TickHandle {
    active: Rc<Cell<bool>>,
}

impl TickHandle {
    /// Cancel the subscription without waiting for drop.
    pub fn cancel(&self) {
        self.active.set(false);
    }

    /// Whether ticks are still being accepted.
    pub fn is_active(&self) -> bool {
        self.active.get()
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.active.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_cancels_on_drop() {
        let flag = TickFlag::new();
        flag.activate();

        let handle = flag.handle();
        assert!(flag.is_active());
        assert!(handle.is_active());

        drop(handle);
        assert!(!flag.is_active());
    }

    #[test]
    fn test_explicit_cancel() {
        let flag = TickFlag::new();
        flag.activate();

        let handle = flag.handle();
        handle.cancel();
        assert!(!flag.is_active());
        assert!(!handle.is_active());
    }
}
