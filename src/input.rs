//! Push-button inputs: snapshot reads and the edge-notification contract.

/// The two monitored push-buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Cycles between live display and the waiting/streaming pair.
    Mode,
    /// Starts streaming from the waiting state.
    Start,
}

/// Instantaneous logic levels of both buttons, pressed = 1.
///
/// Bit 1 is the mode button, bit 0 the start button. Implementations of
/// [`Buttons`] fold the active-low wiring in before constructing this, so a
/// set bit always means "currently held down".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonSnapshot(u8);

impl ButtonSnapshot {
    /// Bit for the mode button.
    pub const MODE: u8 = 0b10;
    /// Bit for the start button.
    pub const START: u8 = 0b01;

    /// Creates a snapshot from raw bits; anything above the low two bits is
    /// discarded.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        ButtonSnapshot(bits & (Self::MODE | Self::START))
    }

    /// Creates a snapshot from individual pressed levels.
    #[inline]
    pub const fn from_levels(mode_pressed: bool, start_pressed: bool) -> Self {
        ButtonSnapshot(((mode_pressed as u8) << 1) | start_pressed as u8)
    }

    /// Returns the raw 2-bit value.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns true if the mode button reads pressed.
    #[inline]
    pub const fn mode_pressed(self) -> bool {
        self.0 & Self::MODE != 0
    }

    /// Returns true if the start button reads pressed.
    #[inline]
    pub const fn start_pressed(self) -> bool {
        self.0 & Self::START != 0
    }

    /// Resolves the snapshot to the button it commands, if any.
    ///
    /// The mode button takes precedence when both read pressed, so the
    /// ambiguous simultaneous case resolves the same way in every state.
    /// `None` covers the released/noise case (nothing held at read time);
    /// callers treat it as "stay put".
    pub const fn command(self) -> Option<Button> {
        if self.mode_pressed() {
            Some(Button::Mode)
        } else if self.start_pressed() {
            Some(Button::Start)
        } else {
            None
        }
    }
}

/// Trait for abstracting the two monitored inputs.
///
/// Implement this for your input pins. [`snapshot`](Buttons::snapshot) must
/// be a side-effect-free read of the current levels with the active-low
/// inversion already applied; it may be called at any time and never blocks.
///
/// The implementor also owns the edge-notification path: arm edge-sensitive
/// notification on both pins at initialization, and from the handler do
/// exactly two things: call
/// [`EventFlags::raise_button`](crate::events::EventFlags::raise_button) and
/// acknowledge the hardware pending indicator so the notification can recur.
/// No debouncing, no decisions; the control loop re-reads the snapshot when
/// it consumes the flag.
pub trait Buttons {
    /// Returns the instantaneous state of both buttons.
    fn snapshot(&self) -> ButtonSnapshot;
}
