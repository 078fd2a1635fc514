//! Time units for platform-agnostic pacing.

/// A duration in milliseconds.
///
/// All pacing in this crate is expressed in milliseconds; hardware timer
/// implementations convert to their own tick counts through [`TickRate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Millis(pub u32);

impl Millis {
    /// Zero duration constant.
    pub const ZERO: Self = Millis(0);

    /// Returns the raw millisecond count.
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

/// The fixed clock-to-ticks conversion factor of a hardware countdown.
///
/// A countdown peripheral counts at some rate derived from the system clock
/// and a prescaler. Keeping that rate symbolic lets period-register values be
/// derived instead of hard-coded: a 500 kHz instruction clock behind a 1:256
/// prescaler gives `TickRate::from_clock(500_000, 256)`, and a 100 ms period
/// loads `ticks_for(Millis(100))` counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickRate {
    hz: u32,
}

impl TickRate {
    /// Creates a tick rate directly from ticks per second.
    #[inline]
    pub const fn from_hz(hz: u32) -> Self {
        TickRate { hz }
    }

    /// Derives the tick rate from a clock frequency and a prescale divider.
    #[inline]
    pub const fn from_clock(clock_hz: u32, prescale: u32) -> Self {
        TickRate {
            hz: clock_hz / prescale,
        }
    }

    /// Returns ticks per second.
    #[inline]
    pub const fn hz(self) -> u32 {
        self.hz
    }

    /// Converts a duration to a tick count, rounding down.
    ///
    /// Saturates at `u32::MAX`; the caller decides whether its period
    /// register can hold the result.
    pub const fn ticks_for(self, duration: Millis) -> u32 {
        let ticks = duration.0 as u64 * self.hz as u64 / 1000;
        if ticks > u32::MAX as u64 {
            u32::MAX
        } else {
            ticks as u32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_rate_derives_from_clock_and_prescale() {
        // 500 kHz clock behind a 1:256 prescaler counts at ~1.95 kHz.
        let rate = TickRate::from_clock(500_000, 256);
        assert_eq!(rate.hz(), 1953);
        assert_eq!(rate, TickRate::from_hz(1953));
    }

    #[test]
    fn ticks_for_scales_by_rate() {
        let rate = TickRate::from_hz(1000);
        assert_eq!(rate.ticks_for(Millis(100)), 100);

        let rate = TickRate::from_clock(500_000, 256);
        assert_eq!(rate.ticks_for(Millis(100)), 195);
        assert_eq!(rate.ticks_for(Millis::ZERO), 0);
    }

    #[test]
    fn ticks_for_saturates_instead_of_wrapping() {
        let rate = TickRate::from_hz(u32::MAX);
        assert_eq!(rate.ticks_for(Millis(u32::MAX)), u32::MAX);
    }
}
