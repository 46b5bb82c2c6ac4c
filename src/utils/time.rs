//! Time utilities: parsing HH:MM form values and formatting.

use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;

/// Parse `HH:MM`. Browsers may also send `HH:MM:SS`, and older stores hold
/// `HH:MM:SS.ffffff`.
pub fn parse_time(t: &str) -> Option<NaiveTime> {
    let t = t.trim();
    NaiveTime::parse_from_str(t, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M:%S%.f"))
        .ok()
}

/// Empty input means "no time"; anything else must parse.
pub fn parse_optional_time(input: Option<&str>) -> AppResult<Option<NaiveTime>> {
    match input.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_time(s)
            .map(Some)
            .ok_or_else(|| AppError::InvalidTime(s.to_string())),
    }
}
