//! Module for handling date parsing and formatting.

use chrono::NaiveDate;

use crate::schema::adapt::types::DateFormatConfig;

/// Parse a date string with multiple format attempts
#[must_use]
pub fn parse_date_string(s: &str, config: &DateFormatConfig) -> Option<NaiveDate> {
    let s = s.trim();

    if let Some(date) = config
        .date_formats
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
    {
        return Some(date);
    }

    if config.enable_format_detection {
        if let Some(detected_format) = detect_date_format(s) {
            return NaiveDate::parse_from_str(s, detected_format).ok();
        }
    }

    None
}

/// Try to detect the date format based on string patterns
#[must_use]
pub fn detect_date_format(s: &str) -> Option<&'static str> {
    let bytes = s.as_bytes();

    // YYYY-MM-DD
    if bytes.len() == 10 && bytes[4] == b'-' && bytes[7] == b'-' {
        return Some("%Y-%m-%d");
    }

    if s.contains('/') {
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() == 3 {
            if parts[0].len() == 4 {
                return Some("%Y/%m/%d");
            }
            if parts[2].len() == 4 {
                // Day first; US order is only reachable through `date_formats`
                return parts[0].parse::<u8>().ok().map(|_| "%d/%m/%Y");
            }
        }
    }

    // DD.MM.YYYY
    if s.contains('.') {
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() == 3 && parts[2].len() == 4 {
            return Some("%d.%m.%Y");
        }
    }

    // YYYYMMDD
    if bytes.len() == 8 && bytes.iter().all(u8::is_ascii_digit) {
        return Some("%Y%m%d");
    }

    None
}
