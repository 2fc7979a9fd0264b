//! Time formatting for marker labels

/// Format a time in seconds as `[hh:]mm:ss[.hh]`
///
/// Every component is zero-padded to two digits. Hours are only shown when
/// non-zero. With `include_hundredths` the fractional part is appended as
/// truncated hundredths of a second.
///
/// ```
/// use wavemark_core::format_time;
///
/// assert_eq!(format_time(10.0, true), "00:10.00");
/// assert_eq!(format_time(3725.5, false), "01:02:05");
/// ```
pub fn format_time(time: f64, include_hundredths: bool) -> String {
    let time = if time.is_finite() { time.max(0.0) } else { 0.0 };

    let hundredths = (time.fract() * 100.0).floor() as u64;
    let seconds = time.floor() as u64;
    let minutes = seconds / 60;
    let hours = minutes / 60;

    let mut result = if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes % 60, seconds % 60)
    } else {
        format!("{:02}:{:02}", minutes % 60, seconds % 60)
    };

    if include_hundredths {
        result.push_str(&format!(".{:02}", hundredths));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_minutes_seconds() {
        assert_eq!(format_time(0.0, false), "00:00");
        assert_eq!(format_time(59.0, false), "00:59");
        assert_eq!(format_time(61.0, false), "01:01");
    }

    #[test]
    fn test_format_hours_only_when_present() {
        assert_eq!(format_time(3599.0, false), "59:59");
        assert_eq!(format_time(3600.0, false), "01:00:00");
    }

    #[test]
    fn test_format_hundredths_truncate() {
        assert_eq!(format_time(1.5, true), "00:01.50");
        assert_eq!(format_time(12.257, true), "00:12.25");
    }

    #[test]
    fn test_format_negative_and_nan_as_zero() {
        assert_eq!(format_time(-3.0, true), "00:00.00");
        assert_eq!(format_time(f64::NAN, false), "00:00");
    }
}
