mod tests {
    use embassy_time::Duration;
    use myrtio_sound_light::pattern::{DEFAULT_BRIGHTNESS, DEFAULT_ON_TIME};
    use myrtio_sound_light::{Fade, Flicker, Pattern, PatternError, PatternMode};

    const MS_100: Duration = Duration::from_millis(100);

    #[test]
    fn test_pattern_mode_from_raw() {
        assert_eq!(PatternMode::from_raw(0), Some(PatternMode::Fade));
        assert_eq!(PatternMode::from_raw(1), Some(PatternMode::Flicker));
        assert_eq!(PatternMode::from_raw(2), Some(PatternMode::On));
        assert_eq!(PatternMode::from_raw(3), Some(PatternMode::OffAfter));
        assert_eq!(PatternMode::from_raw(4), Some(PatternMode::Off));
        assert_eq!(PatternMode::from_raw(5), None);
        assert_eq!(PatternMode::OffAfter.as_raw(), 3);
    }

    #[test]
    fn test_pattern_mode_names() {
        assert_eq!(PatternMode::Flicker.as_str(), "flicker");
        assert_eq!(
            PatternMode::parse_from_str("off_after"),
            Some(PatternMode::OffAfter)
        );
        assert_eq!(PatternMode::parse_from_str("strobe"), None);
    }

    #[test]
    fn test_fade_rejects_zero_brightness() {
        assert_eq!(
            Fade::new(MS_100, MS_100, 0),
            Err(PatternError::ZeroBrightness)
        );
    }

    #[test]
    fn test_fade_rejects_zero_duration() {
        assert_eq!(
            Fade::new(Duration::from_ticks(0), MS_100, 10),
            Err(PatternError::ZeroDuration)
        );
        assert_eq!(
            Fade::new(MS_100, Duration::from_ticks(0), 10),
            Err(PatternError::ZeroDuration)
        );
    }

    #[test]
    fn test_fade_step_holds() {
        let fade = Fade::new(MS_100, Duration::from_millis(200), 10).unwrap();
        assert_eq!(fade.peak(), 10);
        assert_eq!(fade.rise_step(), Duration::from_millis(10));
        assert_eq!(fade.fall_step(), Duration::from_millis(20));
    }

    #[test]
    fn test_flicker_rejects_zero_duration() {
        assert_eq!(
            Flicker::new(Duration::from_ticks(0), MS_100),
            Err(PatternError::ZeroDuration)
        );
        assert!(Flicker::new(MS_100, MS_100).is_ok());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Pattern::default(), Pattern::On);
        let fade = Fade::default();
        assert_eq!(fade.peak(), DEFAULT_BRIGHTNESS);
        assert_eq!(fade.fade_in(), DEFAULT_ON_TIME);
        assert_eq!(Flicker::default().off(), Duration::from_millis(100));
    }

    #[test]
    fn test_pattern_from_raw_parts() {
        let short = Duration::from_millis(20);
        assert_eq!(
            Pattern::from_raw_parts(1, MS_100, short, 0),
            Ok(Pattern::Flicker(Flicker::new(MS_100, short).unwrap()))
        );
        assert_eq!(
            Pattern::from_raw_parts(3, MS_100, short, 0),
            Ok(Pattern::OffAfter(MS_100))
        );
        assert_eq!(
            Pattern::from_raw_parts(0, MS_100, short, 0),
            Err(PatternError::ZeroBrightness)
        );
        assert_eq!(Pattern::from_raw_parts(42, MS_100, short, 0), Ok(Pattern::Idle));
        assert_eq!(Pattern::Idle.mode(), None);
        assert_eq!(Pattern::Off.mode(), Some(PatternMode::Off));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            PatternError::ZeroBrightness.to_string(),
            "fade brightness must be greater than zero"
        );
    }
}
