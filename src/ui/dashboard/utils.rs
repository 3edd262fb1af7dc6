//! Dashboard utility functions
//!
//! Contains helper functions used across section renderers

use crate::api::types::InsightKind;
use crate::notifications::Severity;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use ratatui::prelude::Color;

/// Format a server timestamp as `JJ/MM/AAAA HH:MM`.
///
/// Accepts RFC 3339, naive ISO 8601 with or without fractional seconds, and
/// bare dates. Anything else is shown unchanged.
pub fn format_french_date(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%d/%m/%Y %H:%M").to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return dt.format("%d/%m/%Y %H:%M").to_string();
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%d/%m/%Y").to_string();
    }
    raw.to_string()
}

/// Color of a rating on the 0-5 scale.
pub fn rating_color(rating: f64) -> Color {
    if rating >= 4.0 {
        Color::LightGreen
    } else if rating >= 3.0 {
        Color::LightYellow
    } else {
        Color::LightRed
    }
}

pub fn insight_color(kind: InsightKind) -> Color {
    match kind {
        InsightKind::Positive => Color::LightGreen,
        InsightKind::Warning => Color::LightYellow,
        InsightKind::Improvement => Color::LightMagenta,
        InsightKind::Info | InsightKind::Other => Color::LightBlue,
    }
}

pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Info => Color::LightBlue,
        Severity::Success => Color::LightGreen,
        Severity::Warning => Color::LightYellow,
        Severity::Danger => Color::LightRed,
    }
}

/// Human readable size of a saved file.
pub fn format_size(bytes: usize) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} Mo", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} Ko", bytes as f64 / 1024.0)
    } else {
        format!("{} o", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_french_date() {
        assert_eq!(format_french_date("2026-03-09T14:22:05"), "09/03/2026 14:22");
        assert_eq!(
            format_french_date("2026-03-09T14:22:05.123456"),
            "09/03/2026 14:22"
        );
        assert_eq!(
            format_french_date("2026-03-09T14:22:05+02:00"),
            "09/03/2026 14:22"
        );
        assert_eq!(format_french_date("2026-03-09"), "09/03/2026");
        assert_eq!(format_french_date("hier"), "hier");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 o");
        assert_eq!(format_size(2048), "2.0 Ko");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 Mo");
    }
}
