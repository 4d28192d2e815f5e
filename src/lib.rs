#![no_std]

pub mod channel;
pub mod error;
pub mod pattern;
pub mod runner;
pub mod sensor;

pub use channel::{PatternChannel, PatternController, PatternStatus};
pub use error::PatternError;
pub use pattern::{Fade, Flicker, Pattern, PatternMode, PatternSequencer, Step};
pub use runner::{PatternRunner, RunnerConfig};
pub use sensor::SignalFilter;

pub use embassy_time::{Duration, Instant};

/// PWM carrier frequency the output channel is expected to run at
pub const PWM_FREQUENCY_HZ: u32 = 5000;

/// PWM duty resolution; duty values span `0..=255`
pub const PWM_RESOLUTION_BITS: u8 = 8;

/// Abstract PWM output trait
///
/// Implement this trait to bind a hardware PWM channel.
/// The pattern runner takes exclusive ownership of the output.
pub trait PwmOutput {
    /// Set the duty cycle (0 = off, 255 = fully on)
    fn set_duty(&mut self, duty: u8);
}

/// Abstract analog input trait
///
/// Implement this trait to bind an ADC pin.
pub trait AnalogInput {
    /// Read one raw sample in `0..=sensor::ADC_MAX`
    fn read_raw(&mut self) -> u16;
}
