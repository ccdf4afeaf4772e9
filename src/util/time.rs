use chrono::{Datelike, Utc};

/// Milliseconds since the UNIX epoch, stamped on saved projects.
pub fn timestamp_millis() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default()
}

/// The current calendar year (UTC).
pub fn current_year() -> i32 {
    Utc::now().year()
}

/// Today's date formatted as `YYYY-MM-DD` (UTC).
pub fn today_iso() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}
