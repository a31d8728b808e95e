//! Formatting helpers for session and deck statistics.

/// Renders a duration in seconds as `"{h}h {m}m {s}s"`, dropping leading
/// zero units: 90 seconds is `"1m 30s"`, 30 seconds is `"30s"`.
///
/// Fractions of a second are truncated; negative or non-finite input renders
/// as `"0s"`.
#[must_use]
pub fn format_elapsed(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        // Truncation is the intended rounding.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let whole = seconds as u64;
        whole
    } else {
        0
    };

    let (minutes, secs) = (total / 60, total % 60);
    let (hours, minutes) = (minutes / 60, minutes % 60);

    if hours > 0 {
        format!("{hours}h {minutes}m {secs}s")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}

/// `floor(part / total * 100)`, or `0` when `total` is zero.
#[must_use]
pub fn percentage(part: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    let scaled = u128::from(part) * 100 / u128::from(total);
    u64::try_from(scaled).unwrap_or(u64::MAX)
}
