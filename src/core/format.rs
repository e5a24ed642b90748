//! Display helpers for user records.

use chrono::{DateTime, Utc};

/// Inserts a space after `UTC` so offsets read as `UTC -5`.
pub fn format_timezone(timezone: &str) -> String {
    timezone.replacen("UTC", "UTC ", 1)
}

/// `2023-01-01T00:00:00Z` → `Jan 1, 2023, 12:00 AM` (UTC).
/// Unparsable input comes back unchanged.
pub fn format_date(date: &str) -> String {
    match DateTime::parse_from_rfc3339(date) {
        Ok(parsed) => parsed
            .with_timezone(&Utc)
            .format("%b %-d, %Y, %I:%M %p")
            .to_string(),
        Err(_) => date.to_string(),
    }
}

const INTERVALS: [(&str, i64); 6] = [
    ("year", 31_536_000),
    ("month", 2_592_000),
    ("week", 604_800),
    ("day", 86_400),
    ("hour", 3_600),
    ("minute", 60),
];

/// `3 days ago`, `1 hour ago`, or `Just now`. Unparsable input comes back unchanged.
pub fn format_relative_date(date: &str, now: DateTime<Utc>) -> String {
    let Ok(parsed) = DateTime::parse_from_rfc3339(date) else {
        return date.to_string();
    };
    let elapsed = (now - parsed.with_timezone(&Utc)).num_seconds();

    for (unit, seconds) in INTERVALS {
        let count = elapsed / seconds;
        if count >= 1 {
            let plural = if count == 1 { "" } else { "s" };
            return format!("{count} {unit}{plural} ago");
        }
    }
    "Just now".to_string()
}

/// Up to two uppercase initials: `John Doe` → `JD`.
pub fn initials(name: &str) -> String {
    name.split(' ')
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

/// `40.7128, -74.0060` at precision 4.
pub fn format_coordinates(latitude: f64, longitude: f64, precision: usize) -> String {
    format!("{latitude:.precision$}, {longitude:.precision$}")
}

/// Google Maps search link centred on a point.
pub fn maps_url(latitude: f64, longitude: f64) -> String {
    format!("https://www.google.com/maps/search/?api=1&query={latitude},{longitude}")
}

/// Stable palette slot for a name, from its first character.
pub fn avatar_index(name: &str, palette_len: usize) -> usize {
    if palette_len == 0 {
        return 0;
    }
    name.chars().next().map_or(0, |c| c as usize % palette_len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_timezone() {
        assert_eq!(format_timezone("UTC-5"), "UTC -5");
        assert_eq!(format_timezone("America/New_York"), "America/New_York");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2023-01-01T00:00:00Z"), "Jan 1, 2023, 12:00 AM");
        assert_eq!(format_date("2023-07-15T14:05:00Z"), "Jul 15, 2023, 02:05 PM");
    }

    #[test]
    fn test_format_date_passes_through_garbage() {
        assert_eq!(format_date("yesterday"), "yesterday");
    }

    #[test]
    fn test_relative_date_units() {
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
        assert_eq!(format_relative_date("2024-01-10T11:59:30Z", now), "Just now");
        assert_eq!(format_relative_date("2024-01-10T11:59:00Z", now), "1 minute ago");
        assert_eq!(format_relative_date("2024-01-10T10:00:00Z", now), "2 hours ago");
        assert_eq!(format_relative_date("2024-01-07T12:00:00Z", now), "3 days ago");
        assert_eq!(format_relative_date("2024-01-01T12:00:00Z", now), "1 week ago");
        assert_eq!(format_relative_date("2023-11-01T12:00:00Z", now), "2 months ago");
        assert_eq!(format_relative_date("2022-01-01T00:00:00Z", now), "2 years ago");
    }

    #[test]
    fn test_relative_date_in_future_is_just_now() {
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
        assert_eq!(format_relative_date("2024-01-11T12:00:00Z", now), "Just now");
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("John Doe"), "JD");
        assert_eq!(initials("mary ann smith"), "MA");
        assert_eq!(initials("Cher"), "C");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn test_format_coordinates() {
        assert_eq!(format_coordinates(40.7128, -74.006, 4), "40.7128, -74.0060");
        assert_eq!(format_coordinates(40.7128, -74.006, 6), "40.712800, -74.006000");
    }

    #[test]
    fn test_maps_url() {
        assert_eq!(
            maps_url(40.7128, -74.006),
            "https://www.google.com/maps/search/?api=1&query=40.7128,-74.006"
        );
        assert_eq!(
            maps_url(0.0, 0.0),
            "https://www.google.com/maps/search/?api=1&query=0,0"
        );
    }

    #[test]
    fn test_avatar_index_is_stable() {
        assert_eq!(avatar_index("John", 8), 'J' as usize % 8);
        assert_eq!(avatar_index("John", 8), avatar_index("Jane", 8));
        assert_eq!(avatar_index("", 8), 0);
        assert_eq!(avatar_index("John", 0), 0);
    }
}
