/*
[INPUT]:  Task dates in compact (YYYYMMDD) and ISO (YYYY-MM-DD) form
[OUTPUT]: Reformatted date strings for forms, wire and display
[POS]:    Data layer - date format conversion
[UPDATE]: When the server or form date format changes
*/

//! Conversions between the three textual date forms a task passes through.
//!
//! The server stores `YYYYMMDD`, edit forms use `YYYY-MM-DD`, and lists show
//! `DD.MM.YYYY`. The conversions are purely textual so that
//! `to_compact_date(to_iso_date(s)) == s` for every 8-digit string `s`, and
//! `to_iso_date(to_compact_date(t)) == t` for every ISO-shaped `t`. An empty
//! string means "no due date" and converts to an empty string.

use chrono::NaiveDate;
use thiserror::Error;

/// chrono format of the server's date column
pub const COMPACT_FORMAT: &str = "%Y%m%d";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    #[error("expected an 8-digit YYYYMMDD date, got {0:?}")]
    NotCompact(String),

    #[error("expected a YYYY-MM-DD date, got {0:?}")]
    NotIso(String),

    #[error("{0:?} is not a calendar date")]
    NotOnCalendar(String),
}

fn is_compact(value: &str) -> bool {
    value.len() == 8 && value.bytes().all(|b| b.is_ascii_digit())
}

fn is_iso(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// `YYYYMMDD` -> `YYYY-MM-DD`
pub fn to_iso_date(compact: &str) -> Result<String, DateError> {
    if compact.is_empty() {
        return Ok(String::new());
    }
    if !is_compact(compact) {
        return Err(DateError::NotCompact(compact.to_string()));
    }
    Ok(format!("{}-{}-{}", &compact[0..4], &compact[4..6], &compact[6..8]))
}

/// `YYYY-MM-DD` -> `YYYYMMDD`, by dropping the separators
pub fn to_compact_date(iso: &str) -> Result<String, DateError> {
    if iso.is_empty() {
        return Ok(String::new());
    }
    if !is_iso(iso) {
        return Err(DateError::NotIso(iso.to_string()));
    }
    Ok(iso.replace('-', ""))
}

/// `YYYYMMDD` -> `DD.MM.YYYY`
pub fn to_display_date(compact: &str) -> Result<String, DateError> {
    if compact.is_empty() {
        return Ok(String::new());
    }
    if !is_compact(compact) {
        return Err(DateError::NotCompact(compact.to_string()));
    }
    Ok(format!("{}.{}.{}", &compact[6..8], &compact[4..6], &compact[0..4]))
}

/// Parse a compact date and check it exists on the calendar.
pub fn parse_compact_date(compact: &str) -> Result<NaiveDate, DateError> {
    if !is_compact(compact) {
        return Err(DateError::NotCompact(compact.to_string()));
    }
    NaiveDate::parse_from_str(compact, COMPACT_FORMAT)
        .map_err(|_| DateError::NotOnCalendar(compact.to_string()))
}
