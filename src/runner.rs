//! Background pattern loop.
//!
//! The runner owns the PWM output and drives it from a [`PatternSequencer`].
//! Every hold is a cooperative timer wait raced against a newly published
//! pattern and a stop request, so a setter takes effect right away instead of
//! after the current hold.

use embassy_futures::select::{Either3, select3};
use embassy_time::{Duration, Instant, Timer};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::PwmOutput;
use crate::channel::{PatternChannel, PatternStatus};
use crate::pattern::{Pattern, PatternSequencer};

/// Default re-check cadence of steady patterns
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Configuration for the pattern runner
#[derive(Debug, Clone, Copy)]
pub struct RunnerConfig {
    /// Hold used by steady patterns between re-checks
    pub poll_interval: Duration,
    /// Pattern started with when nothing was requested yet
    pub initial: Pattern,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            initial: Pattern::On,
        }
    }
}

/// Pattern runner - the perpetual background activity
///
/// Created with [`PatternChannel::runner`]. Spawn [`PatternRunner::run`] on
/// the executor; it runs until a controller calls `stop` or `shutdown`.
///
/// [`PatternRunner::step`] and [`PatternRunner::finish`] expose the same loop
/// for callers that do their own waiting.
pub struct PatternRunner<'a, P: PwmOutput> {
    channel: &'a PatternChannel,
    output: P,
    sequencer: PatternSequencer,
    last_duty: Option<u8>,
}

impl<'a, P: PwmOutput> PatternRunner<'a, P> {
    pub(crate) fn new(channel: &'a PatternChannel, output: P, config: RunnerConfig) -> Self {
        let runner = Self {
            channel,
            output,
            sequencer: PatternSequencer::new(config.initial, config.poll_interval),
            last_duty: None,
        };
        runner.publish_status(false);
        runner
    }

    /// Run the pattern loop until stopped
    ///
    /// On stop the output is switched off and handed back.
    pub async fn run(mut self) -> P {
        #[cfg(feature = "esp32-log")]
        println!("[PatternRunner.run] started with {:?}", self.sequencer.pattern());

        while let Some(hold) = self.step(Instant::now()) {
            match select3(
                Timer::after(hold),
                self.channel.wait_pattern(),
                self.channel.wait_stop(),
            )
            .await
            {
                Either3::First(()) => {}
                Either3::Second(pattern) => self.switch(pattern),
                Either3::Third(()) => break,
            }
        }

        self.finish()
    }

    /// Run one loop iteration at `now`
    ///
    /// Picks up a newly requested pattern, writes the next duty cycle and
    /// publishes the status. Returns how long to hold before the next
    /// iteration, or `None` once a stop was requested.
    pub fn step(&mut self, now: Instant) -> Option<Duration> {
        if self.channel.take_stop() {
            return None;
        }
        if let Some(pattern) = self.channel.take_pending() {
            self.switch(pattern);
        }

        let step = self.sequencer.next(now);
        if let Some(duty) = step.duty {
            self.write(duty);
        }
        self.publish_status(true);

        Some(step.hold)
    }

    /// Switch the output off and hand it back
    pub fn finish(mut self) -> P {
        self.write(0);
        self.publish_status(false);
        self.channel.mark_stopped();

        #[cfg(feature = "esp32-log")]
        println!("[PatternRunner.finish] stopped");

        self.output
    }

    /// Pattern the runner is executing
    pub const fn pattern(&self) -> Pattern {
        self.sequencer.pattern()
    }

    fn switch(&mut self, pattern: Pattern) {
        #[cfg(feature = "esp32-log")]
        println!("[PatternRunner.switch] switching to {:?}", pattern);
        self.sequencer.apply(pattern);
    }

    fn write(&mut self, duty: u8) {
        self.output.set_duty(duty);
        self.last_duty = Some(duty);
    }

    fn publish_status(&self, running: bool) {
        self.channel.set_status(PatternStatus {
            pattern: self.sequencer.pattern(),
            duty: self.last_duty,
            running,
        });
    }
}
