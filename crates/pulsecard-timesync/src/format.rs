//! Pure duration math and label formatting.
//!
//! All instants are millisecond epoch values. Negative intermediates (clock
//! skew, late timestamps) clamp to zero; nothing here produces a negative
//! or NaN display value.

/// Format a whole-second duration as `m:ss`, or `h:mm:ss` when at least an
/// hour long. Minutes and seconds are zero-padded to two digits.
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

/// Whole seconds elapsed since `start_ms` at `now_ms`, clamped to zero.
pub fn elapsed_seconds(start_ms: i64, now_ms: i64) -> u64 {
    ((now_ms - start_ms).max(0) / 1000) as u64
}

/// Playback progress at `now_ms` as a percentage, clamped to `0.0..=100.0`.
///
/// A degenerate range (`end <= start`) reports zero rather than dividing
/// by a non-positive span.
pub fn progress_percent(start_ms: i64, end_ms: i64, now_ms: i64) -> f64 {
    let span = end_ms - start_ms;
    if span <= 0 {
        return 0.0;
    }
    let elapsed = now_ms - start_ms;
    ((elapsed as f64 / span as f64) * 100.0).clamp(0.0, 100.0)
}

/// Total activity length as a formatted label. Single-shot; no ticking.
pub fn total_duration(start_ms: i64, end_ms: i64) -> String {
    format_duration(((end_ms - start_ms).max(0) / 1000) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_zero() {
        assert_eq!(format_duration(0), "0:00");
    }

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_duration(65), "1:05");
        assert_eq!(format_duration(599), "9:59");
    }

    #[test]
    fn formats_hours_with_padded_fields() {
        assert_eq!(format_duration(3661), "1:01:01");
        assert_eq!(format_duration(3600), "1:00:00");
        assert_eq!(format_duration(7325), "2:02:05");
    }

    #[test]
    fn elapsed_clamps_clock_skew_to_zero() {
        assert_eq!(elapsed_seconds(10_000, 5_000), 0);
        assert_eq!(elapsed_seconds(10_000, 75_000), 65);
    }

    #[test]
    fn progress_before_start_is_zero() {
        assert_eq!(progress_percent(1_000, 2_000, 500), 0.0);
    }

    #[test]
    fn progress_after_end_is_capped() {
        assert_eq!(progress_percent(1_000, 2_000, 9_000), 100.0);
    }

    #[test]
    fn progress_inside_range_is_strictly_between() {
        let pct = progress_percent(1_000, 2_000, 1_500);
        assert!(pct > 0.0 && pct < 100.0);
        assert!((pct - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn progress_degenerate_range_is_zero_not_nan() {
        assert_eq!(progress_percent(2_000, 2_000, 2_500), 0.0);
        assert_eq!(progress_percent(3_000, 2_000, 2_500), 0.0);
    }

    #[test]
    fn total_duration_label() {
        assert_eq!(total_duration(0, 180_000), "3:00");
        assert_eq!(total_duration(180_000, 0), "0:00");
    }
}
