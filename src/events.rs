//! Event flags shared between notification context and the control loop.
//!
//! The two flags here are the only channel from interrupt handlers back into
//! [`ModeController`](crate::controller::ModeController). The discipline is
//! single-writer-per-direction: notification handlers only ever *set* a flag,
//! the control loop only ever *clears* it. Atomics keep every main-loop read
//! fresh across the handler boundary without a critical section.

use core::sync::atomic::{AtomicBool, Ordering};

/// The pair of event flags raised from notification context.
///
/// Intended to live in a `static` shared between the interrupt handlers and
/// the control loop:
///
/// ```
/// use sample_scope::EventFlags;
///
/// static FLAGS: EventFlags = EventFlags::new();
///
/// // edge notification handler: FLAGS.raise_button();
/// // countdown expiry handler:  FLAGS.raise_timer();
/// assert!(!FLAGS.button_pending());
/// ```
///
/// Edges arriving between a raise and the matching clear coalesce into a
/// single pending event. The flag therefore only means "something changed";
/// which input changed must be re-derived from a fresh
/// [`Buttons::snapshot`](crate::input::Buttons::snapshot) at clear time.
#[derive(Debug)]
pub struct EventFlags {
    button: AtomicBool,
    timer: AtomicBool,
}

impl EventFlags {
    /// Creates both flags cleared.
    pub const fn new() -> Self {
        EventFlags {
            button: AtomicBool::new(false),
            timer: AtomicBool::new(false),
        }
    }

    /// Marks a button edge pending. Notification-context side.
    #[inline]
    pub fn raise_button(&self) {
        self.button.store(true, Ordering::Release);
    }

    /// Marks a countdown expiry pending. Notification-context side.
    #[inline]
    pub fn raise_timer(&self) {
        self.timer.store(true, Ordering::Release);
    }

    /// Returns whether a button edge is pending.
    #[inline]
    pub fn button_pending(&self) -> bool {
        self.button.load(Ordering::Acquire)
    }

    /// Returns whether a countdown expiry is pending.
    #[inline]
    pub fn timer_elapsed(&self) -> bool {
        self.timer.load(Ordering::Acquire)
    }

    /// Clears the button flag. Control-loop side only.
    #[inline]
    pub fn clear_button(&self) {
        self.button.store(false, Ordering::Release);
    }

    /// Clears the timer flag. Control-loop side only.
    #[inline]
    pub fn clear_timer(&self) {
        self.timer.store(false, Ordering::Release);
    }
}

impl Default for EventFlags {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_start_cleared() {
        let flags = EventFlags::new();
        assert!(!flags.button_pending());
        assert!(!flags.timer_elapsed());
    }

    #[test]
    fn raise_and_clear_are_independent_per_flag() {
        let flags = EventFlags::new();

        flags.raise_button();
        assert!(flags.button_pending());
        assert!(!flags.timer_elapsed());

        flags.raise_timer();
        flags.clear_button();
        assert!(!flags.button_pending());
        assert!(flags.timer_elapsed());

        flags.clear_timer();
        assert!(!flags.timer_elapsed());
    }

    #[test]
    fn repeated_raises_coalesce_into_one_pending_event() {
        let flags = EventFlags::new();

        flags.raise_button();
        flags.raise_button();
        flags.raise_button();

        assert!(flags.button_pending());
        flags.clear_button();
        // A single clear consumes all coalesced edges.
        assert!(!flags.button_pending());
    }
}
