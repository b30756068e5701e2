//! Compact human-readable renderings of byte counts and durations.
//!
//! Every badge in the task list and status bar goes through these two
//! functions, and the layout engine measures their output to size columns.

const KIB: f64 = 1024.0;
const MIB: f64 = 1024.0 * 1024.0;
const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Which duration rendering to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationStyle {
    /// `42s`, `7m`, `3h`, `2d`, `?`
    Short,
    /// `42 seconds`, `1 minute`, `unknown`
    Long,
}

/// Scale a byte count to the largest binary unit it fills.
///
/// Gigabytes keep two decimals, megabytes and kilobytes one; megabytes
/// drop the decimal from 100 up and kilobytes from 10 up so the string
/// never grows past four significant characters. A trailing `.0` is
/// removed.
pub fn scale_bytes(bytes: u64) -> String {
    let value = bytes as f64;
    let (scaled, unit) = if value >= GIB {
        (round_to(value / GIB, 2), "G")
    } else if value >= MIB {
        let scaled = round_to(value / MIB, 1);
        (if scaled >= 100.0 { scaled.trunc() } else { scaled }, "M")
    } else if value >= KIB {
        let scaled = round_to(value / KIB, 1);
        (if scaled >= 10.0 { scaled.trunc() } else { scaled }, "K")
    } else {
        return format!("{}B", bytes);
    };

    if scaled.fract() == 0.0 {
        format!("{}{}", scaled as u64, unit)
    } else {
        let text = format!("{}", scaled);
        format!("{}{}", text.trim_end_matches('0'), unit)
    }
}

/// Render a duration in seconds. Negative values mean "unknown".
pub fn scale_time(seconds: i64, style: DurationStyle) -> String {
    if seconds < 0 {
        return match style {
            DurationStyle::Short => "?".to_string(),
            DurationStyle::Long => "unknown".to_string(),
        };
    }

    let (amount, short_unit, long_unit) = if seconds < 60 {
        (seconds, "s", "second")
    } else if seconds < 3600 {
        (seconds / 60, "m", "minute")
    } else if seconds < 86400 {
        (seconds / 3600, "h", "hour")
    } else {
        (seconds / 86400, "d", "day")
    };

    match style {
        DurationStyle::Short => format!("{}{}", amount, short_unit),
        DurationStyle::Long => format!(
            "{} {}{}",
            amount,
            long_unit,
            if amount > 1 { "s" } else { "" }
        ),
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
