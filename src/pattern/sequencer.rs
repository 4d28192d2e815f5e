//! Pattern stepping
//!
//! Portable pattern timing without async or platform timers. The sequencer
//! says which duty cycle to write now and how long to hold it; the caller is
//! responsible for waiting.

use embassy_time::{Duration, Instant};

use super::{FULL_DUTY, Fade, Flicker, Pattern};

/// Shortest hold ever returned, so a looping caller always yields
pub const MIN_HOLD: Duration = Duration::from_ticks(1);

/// Result of a single sequencer step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Duty cycle to write, `None` to leave the output as is
    pub duty: Option<u8>,
    /// How long to hold before the next step
    pub hold: Duration,
}

impl Step {
    const fn write(duty: u8, hold: Duration) -> Self {
        Self {
            duty: Some(duty),
            hold,
        }
    }

    const fn idle(hold: Duration) -> Self {
        Self { duty: None, hold }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Steady,
    Rising(u8),
    Falling(u8),
    Lit,
    Dark,
    Until(Instant),
}

/// State machine that turns the active pattern into timed duty writes
///
/// # Usage
///
/// ```ignore
/// let mut sequencer = PatternSequencer::new(Pattern::On, poll_interval);
///
/// loop {
///     let step = sequencer.next(Instant::now());
///     if let Some(duty) = step.duty {
///         pwm.set_duty(duty);
///     }
///     Timer::after(step.hold).await;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PatternSequencer {
    pattern: Pattern,
    phase: Phase,
    poll_interval: Duration,
}

impl PatternSequencer {
    /// Create a sequencer running `pattern` from its first step
    ///
    /// `poll_interval` is the hold used by steady patterns.
    pub fn new(pattern: Pattern, poll_interval: Duration) -> Self {
        Self {
            pattern,
            phase: Self::first_phase(pattern),
            poll_interval: poll_interval.max(MIN_HOLD),
        }
    }

    /// Currently active pattern
    pub const fn pattern(&self) -> Pattern {
        self.pattern
    }

    pub const fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Switch to a new pattern
    ///
    /// The new pattern starts from its first step. The output is not reset;
    /// the next step overwrites it. An auto-off timer starts counting at the
    /// first step after the switch.
    pub fn apply(&mut self, pattern: Pattern) {
        self.pattern = pattern;
        self.phase = Self::first_phase(pattern);
    }

    const fn first_phase(pattern: Pattern) -> Phase {
        match pattern {
            Pattern::Fade(_) => Phase::Rising(0),
            Pattern::Flicker(_) => Phase::Lit,
            Pattern::On | Pattern::Off | Pattern::OffAfter(_) | Pattern::Idle => Phase::Steady,
        }
    }

    /// Advance by one step
    pub fn next(&mut self, now: Instant) -> Step {
        let step = match self.pattern {
            Pattern::Fade(fade) => self.next_fade(fade),
            Pattern::Flicker(flicker) => self.next_flicker(flicker),
            Pattern::On => Step::write(FULL_DUTY, self.poll_interval),
            Pattern::Off => Step::write(0, self.poll_interval),
            Pattern::OffAfter(hold) => self.next_off_after(hold, now),
            Pattern::Idle => Step::idle(self.poll_interval),
        };

        Step {
            hold: step.hold.max(MIN_HOLD),
            ..step
        }
    }

    fn next_fade(&mut self, fade: Fade) -> Step {
        let peak = fade.peak();
        match self.phase {
            Phase::Falling(level) => {
                self.phase = match level.checked_sub(1) {
                    Some(lower) => Phase::Falling(lower),
                    None => Phase::Rising(0),
                };
                Step::write(level, fade.fall_step())
            }
            phase => {
                let level = match phase {
                    Phase::Rising(level) => level.min(peak),
                    _ => 0,
                };
                self.phase = if level >= peak {
                    Phase::Falling(peak)
                } else {
                    Phase::Rising(level + 1)
                };
                Step::write(level, fade.rise_step())
            }
        }
    }

    fn next_flicker(&mut self, flicker: Flicker) -> Step {
        if self.phase == Phase::Dark {
            self.phase = Phase::Lit;
            Step::write(0, flicker.off())
        } else {
            self.phase = Phase::Dark;
            Step::write(FULL_DUTY, flicker.on())
        }
    }

    fn next_off_after(&mut self, hold: Duration, now: Instant) -> Step {
        let deadline = match self.phase {
            Phase::Until(deadline) => deadline,
            _ => {
                let deadline = now.checked_add(hold).unwrap_or(Instant::MAX);
                self.phase = Phase::Until(deadline);
                deadline
            }
        };
        if now >= deadline {
            self.pattern = Pattern::Off;
            self.phase = Phase::Steady;
            return Step::write(0, self.poll_interval);
        }

        let remaining = deadline.saturating_duration_since(now);
        Step::write(FULL_DUTY, remaining.min(self.poll_interval))
    }
}
