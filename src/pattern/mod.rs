//! Lighting patterns with compile-time known variants
//!
//! Every pattern carries its complete parameter set, so a pattern is
//! published and observed as one value. Invalid parameter sets are rejected
//! by the constructors and cannot be represented.

mod sequencer;

use core::num::NonZeroU8;

use embassy_time::Duration;

pub use sequencer::{MIN_HOLD, PatternSequencer, Step};

use crate::error::PatternError;

/// Duty cycle of a fully lit output
pub const FULL_DUTY: u8 = 255;

/// Brightness used when none is given
pub const DEFAULT_BRIGHTNESS: u8 = 255;

/// Lit phase duration used when none is given
pub const DEFAULT_ON_TIME: Duration = Duration::from_millis(100);

/// Dark phase duration used when none is given
pub const DEFAULT_OFF_TIME: Duration = Duration::from_millis(100);

const MODE_NAME_FADE: &str = "fade";
const MODE_NAME_FLICKER: &str = "flicker";
const MODE_NAME_ON: &str = "on";
const MODE_NAME_OFF_AFTER: &str = "off_after";
const MODE_NAME_OFF: &str = "off";

const MODE_ID_FADE: u8 = 0;
const MODE_ID_FLICKER: u8 = 1;
const MODE_ID_ON: u8 = 2;
const MODE_ID_OFF_AFTER: u8 = 3;
const MODE_ID_OFF: u8 = 4;

/// Known pattern modes that can be requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum PatternMode {
    Fade = MODE_ID_FADE,
    Flicker = MODE_ID_FLICKER,
    On = MODE_ID_ON,
    OffAfter = MODE_ID_OFF_AFTER,
    Off = MODE_ID_OFF,
}

impl PatternMode {
    pub const fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            MODE_ID_FADE => Self::Fade,
            MODE_ID_FLICKER => Self::Flicker,
            MODE_ID_ON => Self::On,
            MODE_ID_OFF_AFTER => Self::OffAfter,
            MODE_ID_OFF => Self::Off,
            _ => return None,
        })
    }

    pub const fn as_raw(self) -> u8 {
        self as u8
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fade => MODE_NAME_FADE,
            Self::Flicker => MODE_NAME_FLICKER,
            Self::On => MODE_NAME_ON,
            Self::OffAfter => MODE_NAME_OFF_AFTER,
            Self::Off => MODE_NAME_OFF,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            MODE_NAME_FADE => Some(Self::Fade),
            MODE_NAME_FLICKER => Some(Self::Flicker),
            MODE_NAME_ON => Some(Self::On),
            MODE_NAME_OFF_AFTER => Some(Self::OffAfter),
            MODE_NAME_OFF => Some(Self::Off),
            _ => None,
        }
    }
}

/// Fade parameters: ramp up to `peak` over `fade_in`, back down over `fade_out`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fade {
    fade_in: Duration,
    fade_out: Duration,
    peak: NonZeroU8,
}

impl Fade {
    /// Create fade parameters
    ///
    /// # Arguments
    /// * `fade_in` - Total time of the rising ramp
    /// * `fade_out` - Total time of the falling ramp
    /// * `brightness` - Peak duty cycle, at least 1
    pub fn new(fade_in: Duration, fade_out: Duration, brightness: u8) -> Result<Self, PatternError> {
        let peak = NonZeroU8::new(brightness).ok_or(PatternError::ZeroBrightness)?;
        if fade_in.as_ticks() == 0 || fade_out.as_ticks() == 0 {
            return Err(PatternError::ZeroDuration);
        }

        Ok(Self {
            fade_in,
            fade_out,
            peak,
        })
    }

    pub const fn fade_in(&self) -> Duration {
        self.fade_in
    }

    pub const fn fade_out(&self) -> Duration {
        self.fade_out
    }

    pub const fn peak(&self) -> u8 {
        self.peak.get()
    }

    /// Hold time of a single step on the rising ramp
    pub fn rise_step(&self) -> Duration {
        self.fade_in / u32::from(self.peak.get())
    }

    /// Hold time of a single step on the falling ramp
    pub fn fall_step(&self) -> Duration {
        self.fade_out / u32::from(self.peak.get())
    }
}

impl Default for Fade {
    fn default() -> Self {
        Self {
            fade_in: DEFAULT_ON_TIME,
            fade_out: DEFAULT_OFF_TIME,
            peak: NonZeroU8::MAX,
        }
    }
}

/// Flicker parameters: fully lit for `on`, dark for `off`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flicker {
    on: Duration,
    off: Duration,
}

impl Flicker {
    pub fn new(on: Duration, off: Duration) -> Result<Self, PatternError> {
        if on.as_ticks() == 0 || off.as_ticks() == 0 {
            return Err(PatternError::ZeroDuration);
        }
        Ok(Self { on, off })
    }

    pub const fn on(&self) -> Duration {
        self.on
    }

    pub const fn off(&self) -> Duration {
        self.off
    }
}

impl Default for Flicker {
    fn default() -> Self {
        Self {
            on: DEFAULT_ON_TIME,
            off: DEFAULT_OFF_TIME,
        }
    }
}

/// A complete lighting pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pattern {
    /// Repeating ramp up and down
    Fade(Fade),
    /// Repeating full on / full off
    Flicker(Flicker),
    /// Steady full duty
    #[default]
    On,
    /// Steady zero duty
    Off,
    /// Full duty for the given time, then [`Pattern::Off`]
    OffAfter(Duration),
    /// Leaves the output untouched. Used for unrecognized raw modes.
    Idle,
}

impl Pattern {
    /// Build a pattern from a raw mode id and raw parameters
    ///
    /// `on` is the fade-in, lit or auto-off time, `off` is the fade-out or dark
    /// time and `brightness` is the fade peak. Parameters a mode does not use
    /// are ignored. An unknown mode id yields [`Pattern::Idle`].
    pub fn from_raw_parts(
        mode: u8,
        on: Duration,
        off: Duration,
        brightness: u8,
    ) -> Result<Self, PatternError> {
        let Some(mode) = PatternMode::from_raw(mode) else {
            return Ok(Self::Idle);
        };
        Ok(match mode {
            PatternMode::Fade => Self::Fade(Fade::new(on, off, brightness)?),
            PatternMode::Flicker => Self::Flicker(Flicker::new(on, off)?),
            PatternMode::On => Self::On,
            PatternMode::OffAfter => Self::OffAfter(on),
            PatternMode::Off => Self::Off,
        })
    }

    /// Mode of this pattern, `None` for [`Pattern::Idle`]
    pub const fn mode(&self) -> Option<PatternMode> {
        match self {
            Self::Fade(_) => Some(PatternMode::Fade),
            Self::Flicker(_) => Some(PatternMode::Flicker),
            Self::On => Some(PatternMode::On),
            Self::Off => Some(PatternMode::Off),
            Self::OffAfter(_) => Some(PatternMode::OffAfter),
            Self::Idle => None,
        }
    }
}
