use chrono::{DateTime, Datelike, Local, NaiveDate};

const KEY_FORMAT: &str = "%Y-%m-%d";

/// `DD/MM/YY`, two-digit year with no century marker.
pub fn format_display(date: NaiveDate) -> String {
    format!(
        "{:02}/{:02}/{:02}",
        date.day(),
        date.month(),
        date.year().rem_euclid(100)
    )
}

/// `YYYY-MM-DD`. String order of these keys is chronological order.
pub fn format_key(date: NaiveDate) -> String {
    date.format(KEY_FORMAT).to_string()
}

/// Accepts only the canonical form `format_key` produces.
pub fn parse_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, KEY_FORMAT)
        .ok()
        .filter(|date| format_key(*date) == key)
}

/// Display date for a stored key, or the key itself if it is not a valid date.
pub fn display_for_key(key: &str) -> String {
    parse_key(key)
        .map(format_display)
        .unwrap_or_else(|| key.to_string())
}

pub fn format_time(at: DateTime<Local>) -> String {
    at.format("%H:%M:%S").to_string()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
