//! The mode controller: a three-state acquisition/display/streaming loop.
//!
//! Provides [`ModeController`] which composes a [`Sampler`], the two
//! [`Buttons`], an [`EventTimer`] and a [`SerialSink`] into the firmware's
//! single thread of control. Notification handlers talk to it exclusively
//! through [`EventFlags`]; it never blocks anywhere except inside the
//! [`EventTimer`] waits.

use crate::events::EventFlags;
use crate::input::{Button, ButtonSnapshot, Buttons};
use crate::report::SerialSink;
use crate::sample::{Sampler, bar_len};
use crate::time::Millis;
use crate::timer::{EventTimer, IdleWait, PacingTimer};

const LIVE_LABEL: &str = "\rLive: ";
const BAR_BYTE: u8 = b'*';
const FIELD_SEPARATOR: u8 = b' ';
const RECORD_DELIMITER: u8 = b',';
const SYNC_PREFIX: &str = "Syncing - sample period (ms): ";

/// The controller's operating mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Continuously sample and redraw the live bar on change.
    Live,
    /// Idle until a button commands the next mode.
    WaitingForCommand,
    /// Emit one sample per pacing period as a comma-delimited record.
    Streaming,
}

/// Streaming configuration errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The sample period was zero; the pacing countdown needs at least one
    /// tick between records.
    ZeroSamplePeriod,

    /// The sample period exceeds the 16-bit millisecond field the sync line
    /// announces and typical period registers can hold.
    PeriodTooLong,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroSamplePeriod => {
                write!(f, "sample period must be non-zero")
            }
            ConfigError::PeriodTooLong => {
                write!(f, "sample period must fit 16 bits of milliseconds")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Validated streaming parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamConfig {
    sample_period: Millis,
}

impl StreamConfig {
    /// The original firmware's pacing period, announced in the sync line.
    pub const DEFAULT_PERIOD: Millis = Millis(100);

    /// Creates a config with the given pacing period.
    ///
    /// # Errors
    /// * `ZeroSamplePeriod` - the period was zero
    /// * `PeriodTooLong` - the period does not fit 16 bits of milliseconds
    pub const fn new(sample_period: Millis) -> Result<Self, ConfigError> {
        if sample_period.as_u32() == 0 {
            return Err(ConfigError::ZeroSamplePeriod);
        }
        if sample_period.as_u32() > u16::MAX as u32 {
            return Err(ConfigError::PeriodTooLong);
        }
        Ok(StreamConfig { sample_period })
    }

    /// Returns the pacing period between streamed records.
    pub const fn sample_period(self) -> Millis {
        self.sample_period
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        StreamConfig {
            sample_period: Self::DEFAULT_PERIOD,
        }
    }
}

/// Drives the acquisition/display/streaming state machine.
///
/// The controller starts in [`Mode::Live`] and owns all mutable state: the
/// current mode and the last value reported from the live display. The event
/// flags are shared with the notification handlers and are the only channel
/// back in; the controller consumes a pending button event by clearing the
/// flag and re-reading the snapshot, never by trusting the flag itself
/// (edges coalesce).
///
/// # Type Parameters
/// * `S` - Analog sampler
/// * `B` - Button inputs
/// * `T` - Pacing countdown
/// * `W` - Low-power wait primitive
/// * `K` - Serial output sink
pub struct ModeController<'f, S, B, T, W, K>
where
    S: Sampler,
    B: Buttons,
    T: PacingTimer,
    W: IdleWait,
    K: SerialSink,
{
    sampler: S,
    buttons: B,
    timer: EventTimer<'f, T, W>,
    sink: K,
    flags: &'f EventFlags,
    config: StreamConfig,
    mode: Mode,
    last_reported: Option<u16>,
}

impl<'f, S, B, T, W, K> ModeController<'f, S, B, T, W, K>
where
    S: Sampler,
    B: Buttons,
    T: PacingTimer,
    W: IdleWait,
    K: SerialSink,
{
    /// Creates a controller in [`Mode::Live`] with nothing reported yet.
    pub fn new(
        sampler: S,
        buttons: B,
        timer: T,
        idle: W,
        sink: K,
        flags: &'f EventFlags,
        config: StreamConfig,
    ) -> Self {
        ModeController {
            sampler,
            buttons,
            timer: EventTimer::new(timer, idle, flags),
            sink,
            flags,
            config,
            mode: Mode::Live,
            last_reported: None,
        }
    }

    /// Returns the current operating mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the output sink, e.g. to hand an assembled line to a transfer.
    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Mutable access to the output sink.
    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }

    /// Runs the state machine forever.
    pub fn run(&mut self) -> ! {
        loop {
            self.service();
        }
    }

    /// Executes one activation of the current mode, entry to exit.
    ///
    /// An activation ends when a pending button event has been consumed and
    /// dispatched; the next call picks up whichever mode that dispatch
    /// selected. Splitting the loop here keeps each activation finite and
    /// observable.
    pub fn service(&mut self) {
        match self.mode {
            Mode::Live => self.live(),
            Mode::WaitingForCommand => self.waiting(),
            Mode::Streaming => self.streaming(),
        }
    }

    /// Consumes the pending button event: clear first, then snapshot.
    ///
    /// An edge landing between the clear and the read re-raises the flag and
    /// is handled on the next wake instead of being lost.
    fn take_button_snapshot(&mut self) -> ButtonSnapshot {
        self.flags.clear_button();
        self.buttons.snapshot()
    }

    /// Live display: sample continuously, redraw only on change.
    fn live(&mut self) {
        while !self.flags.button_pending() {
            let sample = self.sampler.sample();
            if self.last_reported != Some(sample) {
                self.last_reported = Some(sample);
                self.report_live(sample);
            }
        }
        // Only the mode button is actionable here; a release edge or a lone
        // start press keeps the live display running.
        if self.take_button_snapshot().command() == Some(Button::Mode) {
            self.mode = Mode::WaitingForCommand;
        }
    }

    /// Waiting: idle the CPU until a button selects the next mode.
    fn waiting(&mut self) {
        self.timer.park_until_button();
        match self.take_button_snapshot().command() {
            Some(Button::Mode) => self.mode = Mode::Live,
            Some(Button::Start) => self.mode = Mode::Streaming,
            // Nothing held at read time: the wait is re-entered with the
            // flag already cleared.
            None => {}
        }
    }

    /// Streaming: one record per pacing period until a button intervenes.
    fn streaming(&mut self) {
        self.announce_stream();
        loop {
            self.timer.arm(self.config.sample_period);
            while !self.flags.button_pending() {
                let sample = self.sampler.sample();
                self.stream_record(sample);
                self.timer.wait_tick_interruptible();
            }
            self.timer.disarm();
            match self.take_button_snapshot().command() {
                Some(Button::Mode) => {
                    self.mode = Mode::Live;
                    return;
                }
                Some(Button::Start) => {
                    self.mode = Mode::WaitingForCommand;
                    return;
                }
                // Release edge or noise: resume pacing without repeating
                // the sync line.
                None => {}
            }
        }
    }

    /// One live report: label, 1-17 tick bar, separator, hex value.
    fn report_live(&mut self, sample: u16) {
        self.sink.write_str(LIVE_LABEL);
        self.sink.write_repeated(BAR_BYTE, bar_len(sample, S::FULL_SCALE));
        self.sink.write_repeated(FIELD_SEPARATOR, 1);
        self.sink.write_hex(sample);
    }

    /// The one-time sync line a capture tool locks onto.
    fn announce_stream(&mut self) {
        self.sink.write_str(SYNC_PREFIX);
        self.sink.write_dec(self.config.sample_period.as_u32() as u16);
        self.sink.write_str("\n");
    }

    /// One streamed record: decimal value and the delimiter.
    fn stream_record(&mut self, sample: u16) {
        self.sink.write_dec(sample);
        self.sink.write_repeated(RECORD_DELIMITER, 1);
    }
}
