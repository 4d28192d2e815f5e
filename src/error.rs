use thiserror::Error;

/// Reasons a pattern request is rejected at the setter boundary.
///
/// A rejected request never reaches the running loop; the active pattern
/// stays untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternError {
    /// Fade peak brightness must be at least 1
    #[error("fade brightness must be greater than zero")]
    ZeroBrightness,
    /// Fade and flicker phases must last longer than zero
    #[error("pattern durations must be greater than zero")]
    ZeroDuration,
}
