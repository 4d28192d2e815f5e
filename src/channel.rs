//! Shared state between pattern setters and the pattern runner.
//!
//! The latest requested pattern is published as one value through an
//! `embassy-sync` [`Signal`]: a newer request overwrites an older one that was
//! not picked up yet, and the runner always sees a complete parameter set.
//! The runner reports back through a status cell guarded by
//! `critical-section`.

use core::cell::Cell;

use critical_section::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::Duration;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::PwmOutput;
use crate::error::PatternError;
use crate::pattern::{Fade, Flicker, Pattern};
use crate::runner::{PatternRunner, RunnerConfig};

/// Snapshot of what the runner is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternStatus {
    /// Pattern the runner is executing
    pub pattern: Pattern,
    /// Last duty cycle written to the output
    pub duty: Option<u8>,
    /// Whether the runner loop is active
    pub running: bool,
}

impl PatternStatus {
    const IDLE: Self = Self {
        pattern: Pattern::On,
        duty: None,
        running: false,
    };
}

/// Shared pattern state, usually placed in a `static`
///
/// ```ignore
/// static LIGHT: PatternChannel = PatternChannel::new();
///
/// let runner = LIGHT.runner(pwm, RunnerConfig::default());
/// spawner.spawn(light_task(runner));
///
/// LIGHT.controller().set_flicker(on, off)?;
/// ```
pub struct PatternChannel {
    pattern: Signal<CriticalSectionRawMutex, Pattern>,
    stop: Signal<CriticalSectionRawMutex, ()>,
    stopped: Signal<CriticalSectionRawMutex, ()>,
    status: Mutex<Cell<PatternStatus>>,
}

impl PatternChannel {
    /// Create a new channel with no pending pattern
    pub const fn new() -> Self {
        Self {
            pattern: Signal::new(),
            stop: Signal::new(),
            stopped: Signal::new(),
            status: Mutex::new(Cell::new(PatternStatus::IDLE)),
        }
    }

    /// Get a controller handle for this channel.
    ///
    /// Multiple controllers can coexist; the latest request wins.
    pub const fn controller(&self) -> PatternController<'_> {
        PatternController { channel: self }
    }

    /// Bind a PWM output to this channel
    ///
    /// Only one runner should be active per channel. Stop requests and
    /// completion left over from an earlier runner are cleared, and the
    /// status reports `config.initial` until the first step.
    pub fn runner<P: PwmOutput>(&self, output: P, config: RunnerConfig) -> PatternRunner<'_, P> {
        self.stop.reset();
        self.stopped.reset();
        PatternRunner::new(self, output, config)
    }

    pub(crate) fn publish(&self, pattern: Pattern) {
        self.pattern.signal(pattern);
    }

    pub(crate) fn take_pending(&self) -> Option<Pattern> {
        self.pattern.try_take()
    }

    pub(crate) async fn wait_pattern(&self) -> Pattern {
        self.pattern.wait().await
    }

    pub(crate) async fn wait_stop(&self) {
        self.stop.wait().await;
    }

    pub(crate) fn take_stop(&self) -> bool {
        self.stop.try_take().is_some()
    }

    pub(crate) fn mark_stopped(&self) {
        self.stopped.signal(());
    }

    /// Completion stays latched until the next `runner()`, so every waiter
    /// sees it.
    async fn wait_stopped(&self) {
        self.stopped.wait().await;
        self.stopped.signal(());
    }

    pub(crate) fn set_status(&self, status: PatternStatus) {
        critical_section::with(|cs| self.status.borrow(cs).set(status));
    }

    fn status(&self) -> PatternStatus {
        critical_section::with(|cs| self.status.borrow(cs).get())
    }
}

impl Default for PatternChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// A controller handle for a [`PatternChannel`].
///
/// Setters are non-blocking and take effect on the runner's next step. There
/// is no acknowledgment; use [`PatternController::status`] to observe what is
/// running.
#[derive(Clone, Copy)]
pub struct PatternController<'a> {
    channel: &'a PatternChannel,
}

impl PatternController<'_> {
    /// Request a pre-built pattern
    pub fn apply(&self, pattern: Pattern) {
        #[cfg(feature = "esp32-log")]
        println!("[PatternController.apply] requesting {:?}", pattern);
        self.channel.publish(pattern);
    }

    /// Ramp up to `brightness` over `fade_in`, then down over `fade_out`
    pub fn set_fade(
        &self,
        fade_in: Duration,
        fade_out: Duration,
        brightness: u8,
    ) -> Result<(), PatternError> {
        let fade = Fade::new(fade_in, fade_out, brightness);
        #[cfg(feature = "esp32-log")]
        if let Err(err) = &fade {
            println!("[PatternController.set_fade] rejected: {}", err);
        }
        self.apply(Pattern::Fade(fade?));
        Ok(())
    }

    /// Alternate fully lit for `on` and dark for `off`
    pub fn set_flicker(&self, on: Duration, off: Duration) -> Result<(), PatternError> {
        let flicker = Flicker::new(on, off);
        #[cfg(feature = "esp32-log")]
        if let Err(err) = &flicker {
            println!("[PatternController.set_flicker] rejected: {}", err);
        }
        self.apply(Pattern::Flicker(flicker?));
        Ok(())
    }

    pub fn turn_on(&self) {
        self.apply(Pattern::On);
    }

    pub fn turn_off(&self) {
        self.apply(Pattern::Off);
    }

    /// Stay fully lit for `duration`, then turn off
    ///
    /// A zero duration turns the output off on the next step.
    pub fn turn_off_after(&self, duration: Duration) {
        self.apply(Pattern::OffAfter(duration));
    }

    /// Latest status published by the runner
    pub fn status(&self) -> PatternStatus {
        self.channel.status()
    }

    /// Ask the runner to stop without waiting for it
    pub fn stop(&self) {
        self.channel.stop.signal(());
    }

    /// Stop the runner and wait until it has released the output
    ///
    /// Any number of controllers may wait at once. Returns immediately if the
    /// runner already finished. Never returns if no runner was bound.
    pub async fn shutdown(&self) {
        self.stop();
        self.channel.wait_stopped().await;
    }
}
