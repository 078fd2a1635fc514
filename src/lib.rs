#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`ModeController`**: The three-state acquisition loop (`Live`, `WaitingForCommand`, `Streaming`)
//! - **`EventFlags`**: The atomic button/timer flags notification handlers raise and the controller clears
//! - **`Sampler`**: Trait to implement for your analog-to-digital converter
//! - **`Buttons`**: Trait to implement for the two monitored inputs (plus the edge-notification contract)
//! - **`PacingTimer`** / **`IdleWait`**: Traits for the hardware countdown and the low-power wait primitive
//! - **`EventTimer`**: The blocking waits built from countdown + idle + flags (uninterruptible and interruptible)
//! - **`SerialSink`**: Trait for the serial formatting service; **`LineBuffer`** is the buffered implementation
//! - **`StreamConfig`**: Validated pacing parameters for streaming
//!
//! Samples are `u16` values in `0..=Sampler::FULL_SCALE` (10-bit by default).
//! The live display collapses that range onto a 1-17 tick bar; streaming
//! emits comma-delimited decimal records at the configured period.

pub mod controller;
pub mod events;
pub mod input;
pub mod report;
pub mod sample;
pub mod time;
pub mod timer;

pub use controller::{ConfigError, Mode, ModeController, StreamConfig};
pub use events::EventFlags;
pub use input::{Button, ButtonSnapshot, Buttons};
pub use report::{LineBuffer, SerialSink};
pub use sample::{BAR_MAX_LEN, Sampler, bar_len};
pub use time::{Millis, TickRate};
pub use timer::{EventTimer, IdleWait, PacingTimer};
