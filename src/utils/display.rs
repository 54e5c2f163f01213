//! Display helpers shared by the list and detail views.
//!
//! All of these are pure and total: any input string maps to some output,
//! and timestamps that fail to parse are rendered verbatim rather than
//! panicking.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Event level to badge/marker color. Total over arbitrary input.
pub fn color_for_level(level: &str) -> &'static str {
    match level {
        "error" => "#d32f2f",
        "warning" => "#f57c00",
        "info" => "#1976d2",
        _ => "#616161",
    }
}

/// Incident severity to badge color. Absent severity falls to neutral gray.
pub fn color_for_severity(severity: Option<&str>) -> &'static str {
    match severity {
        Some("high") => "#d32f2f",
        Some("medium") => "#f57c00",
        _ => "#616161",
    }
}

/// Severity text for badges; the service may omit severity entirely.
pub fn severity_label(severity: Option<&str>) -> &str {
    severity.unwrap_or("unknown")
}

/// Render a timestamp as short month, day and 24h time with an explicit UTC
/// suffix, so operators in different timezones read the same wall clock.
/// The detail view includes seconds; the list view does not.
pub fn format_timestamp(timestamp: &str, include_seconds: bool) -> String {
    let Some(utc) = parse_utc(timestamp) else {
        return timestamp.to_string();
    };
    let fmt = if include_seconds {
        "%b %-d, %H:%M:%S UTC"
    } else {
        "%b %-d, %H:%M UTC"
    };
    utc.format(fmt).to_string()
}

/// The service emits naive datetimes (no zone suffix) that are UTC by
/// contract; full RFC 3339 is accepted as well.
fn parse_utc(timestamp: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_colors_are_fixed() {
        assert_eq!(color_for_level("error"), "#d32f2f");
        assert_eq!(color_for_level("warning"), "#f57c00");
        assert_eq!(color_for_level("info"), "#1976d2");
    }

    #[test]
    fn level_color_is_total_over_arbitrary_input() {
        let known = ["#d32f2f", "#f57c00", "#1976d2", "#616161"];
        for level in ["debug", "", "ERROR", "fatal", "🔥", "critical"] {
            assert!(known.contains(&color_for_level(level)), "level: {level:?}");
        }
        assert_eq!(color_for_level("anything else"), "#616161");
    }

    #[test]
    fn severity_colors() {
        assert_eq!(color_for_severity(Some("high")), "#d32f2f");
        assert_eq!(color_for_severity(Some("medium")), "#f57c00");
        assert_eq!(color_for_severity(Some("low")), "#616161");
        assert_eq!(color_for_severity(None), "#616161");
    }

    #[test]
    fn severity_label_falls_back_to_unknown() {
        assert_eq!(severity_label(Some("high")), "high");
        assert_eq!(severity_label(None), "unknown");
    }

    #[test]
    fn formats_rfc3339_in_utc() {
        assert_eq!(
            format_timestamp("2024-01-01T00:00:00Z", true),
            "Jan 1, 00:00:00 UTC"
        );
        assert_eq!(
            format_timestamp("2024-01-01T00:05:00Z", false),
            "Jan 1, 00:05 UTC"
        );
    }

    #[test]
    fn normalizes_offsets_to_utc() {
        // 10:30 at +02:00 is 08:30 UTC.
        assert_eq!(
            format_timestamp("2023-06-15T10:30:00+02:00", false),
            "Jun 15, 08:30 UTC"
        );
    }

    #[test]
    fn accepts_naive_service_timestamps() {
        assert_eq!(
            format_timestamp("2026-02-03T10:42:11", true),
            "Feb 3, 10:42:11 UTC"
        );
        assert_eq!(
            format_timestamp("2026-02-03T10:42:11.123456", true),
            "Feb 3, 10:42:11 UTC"
        );
    }

    #[test]
    fn unparsable_input_is_rendered_verbatim() {
        assert_eq!(format_timestamp("not-a-date", true), "not-a-date");
        assert_eq!(format_timestamp("", false), "");
    }
}
