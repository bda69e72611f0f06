/// Shown in place of a duration that is not known yet
pub const DURATION_PLACEHOLDER: &str = "00:00";

/// Format seconds as `MM:SS`, or `HH:MM:SS` once there is at least one hour.
///
/// Fractions are truncated. Negative and non-finite input formats as zero.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return DURATION_PLACEHOLDER.to_string();
    }
    let total_secs = seconds as u64;
    let hours = total_secs / 3600;
    let mins = (total_secs % 3600) / 60;
    let secs = total_secs % 60;
    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{:02}:{:02}", mins, secs)
    }
}

/// Fraction of the media that has played, in `[0, 1]`.
///
/// `0` whenever the duration is zero or not a usable number.
pub fn progress_ratio(elapsed_seconds: f64, duration_seconds: f64) -> f64 {
    if !duration_seconds.is_finite() || duration_seconds <= 0.0 {
        return 0.0;
    }
    let ratio = elapsed_seconds / duration_seconds;
    if ratio.is_nan() {
        0.0
    } else {
        ratio.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_zero() {
        assert_eq!(format_time(0.0), "00:00");
    }

    #[test]
    fn test_format_minutes_and_seconds() {
        assert_eq!(format_time(65.0), "01:05");
        assert_eq!(format_time(59.9), "00:59");
        assert_eq!(format_time(3599.0), "59:59");
    }

    #[test]
    fn test_format_with_hours() {
        assert_eq!(format_time(3661.0), "01:01:01");
        assert_eq!(format_time(3600.0), "01:00:00");
        assert_eq!(format_time(36000.0 + 125.0), "10:02:05");
    }

    #[test]
    fn test_format_garbage_input() {
        assert_eq!(format_time(-5.0), "00:00");
        assert_eq!(format_time(f64::NAN), "00:00");
        assert_eq!(format_time(f64::INFINITY), "00:00");
    }

    #[test]
    fn test_ratio_is_zero_without_duration() {
        assert_eq!(progress_ratio(10.0, 0.0), 0.0);
        assert_eq!(progress_ratio(0.0, 0.0), 0.0);
        assert_eq!(progress_ratio(10.0, f64::NAN), 0.0);
    }

    #[test]
    fn test_ratio_stays_in_unit_interval() {
        let duration = 240.0;
        let mut elapsed = 0.0;
        while elapsed <= duration {
            let ratio = progress_ratio(elapsed, duration);
            assert!((0.0..=1.0).contains(&ratio), "ratio {} at {}", ratio, elapsed);
            elapsed += 7.5;
        }
        assert_eq!(progress_ratio(duration, duration), 1.0);
        assert_eq!(progress_ratio(duration * 2.0, duration), 1.0);
        assert_eq!(progress_ratio(60.0, 240.0), 0.25);
    }
}
