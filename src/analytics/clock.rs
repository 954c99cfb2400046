//! 12-hour clock strings as stored on attendance records ("9:15:00 AM").

/// Check-ins after this many minutes past midnight (9:00 AM) are late.
pub const LATE_THRESHOLD_MINUTES: u32 = 9 * 60;

/// Parses `h:mm[:ss] AM|PM` into minutes since midnight.
///
/// Returns `None` for empty or unparsable input. Seconds are accepted but
/// ignored. `12:xx AM` maps to hour 0 and `12:xx PM` stays at hour 12.
pub fn to_minutes(value: &str) -> Option<u32> {
    let mut parts = value.split_whitespace();
    let time = parts.next()?;
    let period = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    let mut fields = time.split(':');
    let hours: u32 = fields.next()?.parse().ok()?;
    let minutes: u32 = fields.next()?.parse().ok()?;
    if let Some(seconds) = fields.next() {
        let seconds: u32 = seconds.parse().ok()?;
        if seconds > 59 {
            return None;
        }
    }
    if fields.next().is_some() || !(1..=12).contains(&hours) || minutes > 59 {
        return None;
    }

    let hours = match period.to_ascii_uppercase().as_str() {
        "AM" if hours == 12 => 0,
        "AM" => hours,
        "PM" if hours == 12 => 12,
        "PM" => hours + 12,
        _ => return None,
    };

    Some(hours * 60 + minutes)
}

/// Formats minutes since midnight as `h:mm AM|PM`.
pub fn format_minutes(minutes: u32) -> String {
    let minutes = minutes % (24 * 60);
    let (hours, rest) = (minutes / 60, minutes % 60);
    let period = if hours < 12 { "AM" } else { "PM" };
    let display_hour = match hours % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", display_hour, rest, period)
}

/// A check-in is late when it parses and lands strictly after 9:00 AM.
pub fn is_late(checkin: &str) -> bool {
    to_minutes(checkin).is_some_and(|m| m > LATE_THRESHOLD_MINUTES)
}

/// Minutes past 9:00 AM for a late check-in.
pub fn minutes_late(checkin: &str) -> Option<u32> {
    to_minutes(checkin)
        .filter(|m| *m > LATE_THRESHOLD_MINUTES)
        .map(|m| m - LATE_THRESHOLD_MINUTES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midnight_and_noon_are_fixed_points() {
        assert_eq!(to_minutes("12:00 AM"), Some(0));
        assert_eq!(to_minutes("12:00 PM"), Some(720));
        assert_eq!(to_minutes("12:30:15 AM"), Some(30));
        assert_eq!(format_minutes(0), "12:00 AM");
        assert_eq!(format_minutes(720), "12:00 PM");
    }

    #[test]
    fn parses_locale_strings() {
        assert_eq!(to_minutes("9:00 AM"), Some(540));
        assert_eq!(to_minutes("9:15:00 AM"), Some(555));
        assert_eq!(to_minutes("5:00:00 PM"), Some(17 * 60));
        assert_eq!(to_minutes("11:59:59 pm"), Some(23 * 60 + 59));
        // browsers separate the period with U+202F
        assert_eq!(to_minutes("9:01:00\u{202f}AM"), Some(541));
    }

    #[test]
    fn rejects_garbage() {
        for input in ["", "   ", "9:00", "13:00 PM", "0:10 AM", "9:60 AM", "9:00 XM", "nine AM", "9:00:61 AM", "9:00 AM extra"] {
            assert_eq!(to_minutes(input), None, "{input:?}");
        }
    }

    #[test]
    fn formatter_round_trips_every_minute() {
        for minutes in 0..24 * 60 {
            assert_eq!(to_minutes(&format_minutes(minutes)), Some(minutes));
        }
    }

    #[test]
    fn late_threshold_is_exclusive() {
        assert!(!is_late("9:00 AM"));
        assert!(is_late("9:01 AM"));
        assert!(!is_late(""));
        assert_eq!(minutes_late("9:45:00 AM"), Some(45));
        assert_eq!(minutes_late("8:45:00 AM"), None);
    }
}
