//! Countdown pacing and the low-power wait primitives.
//!
//! [`EventTimer`] is the only place the control loop blocks. It composes a
//! hardware countdown ([`PacingTimer`]), the CPU's idle primitive
//! ([`IdleWait`]) and the shared [`EventFlags`] into the two waiting modes
//! the controller needs: uninterruptible (timer only) and interruptible
//! (timer or button, first event wins, caller re-checks which).

use crate::events::EventFlags;
use crate::time::Millis;

/// Trait for abstracting the hardware countdown.
///
/// Implement this for your timer peripheral. [`arm`](PacingTimer::arm) loads
/// a countdown for the given period (convert through
/// [`TickRate`](crate::time::TickRate)) and starts it. The expiry
/// notification handler must call
/// [`EventFlags::raise_timer`](crate::events::EventFlags::raise_timer),
/// acknowledge the hardware pending indicator, and (because the countdown is
/// used periodically) re-arm the next period before returning, so the
/// spacing between expiries stays regular no matter when the control loop
/// wakes.
pub trait PacingTimer {
    /// Loads and starts the countdown.
    fn arm(&mut self, period: Millis);

    /// Stops the countdown. Idempotent.
    fn disarm(&mut self);
}

/// Trait for abstracting the low-power wait.
///
/// [`idle`](IdleWait::idle) parks the CPU until any enabled event wakes it
/// (WFI or the architecture's equivalent). Spurious wakes are fine: every
/// wait loop in this crate re-checks its flags after each return.
pub trait IdleWait {
    /// Parks until the next event, then returns.
    fn idle(&mut self);
}

/// The controller's blocking wait facility.
///
/// Owns the countdown and the idle primitive, shares the event flags with
/// the notification handlers. The flag discipline is: arming clears the
/// timer flag, waking on expiry consumes it, and the button flag is never
/// touched here; the controller clears it when it dispatches a snapshot.
#[derive(Debug)]
pub struct EventTimer<'f, T: PacingTimer, W: IdleWait> {
    timer: T,
    idle: W,
    flags: &'f EventFlags,
}

impl<'f, T: PacingTimer, W: IdleWait> EventTimer<'f, T, W> {
    /// Creates the wait facility around a countdown and an idle primitive.
    pub fn new(timer: T, idle: W, flags: &'f EventFlags) -> Self {
        EventTimer { timer, idle, flags }
    }

    /// Starts the countdown with a cleared elapsed flag.
    pub fn arm(&mut self, period: Millis) {
        self.flags.clear_timer();
        self.timer.arm(period);
    }

    /// Stops the countdown.
    pub fn disarm(&mut self) {
        self.timer.disarm();
    }

    /// Non-blocking read of the elapsed flag.
    #[inline]
    pub fn elapsed(&self) -> bool {
        self.flags.timer_elapsed()
    }

    /// Blocks for the full period, idling the CPU between events.
    ///
    /// Uninterruptible: a button edge raised meanwhile leaves its flag
    /// pending but never ends the wait early.
    pub fn wait(&mut self, period: Millis) {
        self.arm(period);
        while !self.flags.timer_elapsed() {
            self.idle.idle();
        }
        self.flags.clear_timer();
    }

    /// Blocks until the period elapses or a button edge arrives, whichever
    /// comes first.
    ///
    /// Returns with the flags telling the story: on expiry the elapsed flag
    /// is consumed here, on a button edge it is left for the controller's
    /// snapshot dispatch. Re-check [`EventFlags::button_pending`] after
    /// return to learn which event won.
    pub fn wait_interruptible(&mut self, period: Millis) {
        self.arm(period);
        self.wait_tick_interruptible();
    }

    /// Like [`wait_interruptible`](EventTimer::wait_interruptible) against a
    /// countdown that is already running.
    ///
    /// Used for pacing: the countdown re-arms itself from notification
    /// context, so the loop only ever consumes ticks.
    pub fn wait_tick_interruptible(&mut self) {
        while !self.flags.timer_elapsed() && !self.flags.button_pending() {
            self.idle.idle();
        }
        if self.flags.timer_elapsed() {
            self.flags.clear_timer();
        }
    }

    /// Idles the CPU until a button edge is pending. No countdown involved.
    ///
    /// Returns immediately when the flag is already set, which is why the
    /// controller clears it before re-entering this wait. The flag is left
    /// pending for the snapshot dispatch that follows.
    pub fn park_until_button(&mut self) {
        while !self.flags.button_pending() {
            self.idle.idle();
        }
    }
}
