//! # Scan Timestamp Normalization
//!
//! QR codes carry the attendance moment as two localized strings: a date in
//! `D/M/YYYY` form and a 12-hour time such as `7:10:01 p. m.`. This module
//! combines them into a single timestamp for the backend.
//!
//! Phones render the meridiem marker in many ways (`PM`, `p.m.`, `p. m.`),
//! often separated by non-breaking or narrow no-break spaces. All whitespace
//! is collapsed before parsing and the marker is compared without dots,
//! spaces or case.

use chrono::{
    DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, Offset,
    SecondsFormat, TimeZone, Timelike, Utc,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ClientError, ClientResult};

/// Zone used to turn the naive scan time into an absolute timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TimestampZone {
    /// Zone of the device running the client
    #[default]
    Local,
    Utc,
    Fixed(FixedOffset),
}

impl TimestampZone {
    /// Attach an offset to a naive scan time
    pub fn resolve(&self, naive: NaiveDateTime) -> ClientResult<DateTime<FixedOffset>> {
        match self {
            TimestampZone::Local => {
                let local = Local.from_local_datetime(&naive).earliest().ok_or_else(|| {
                    ClientError::InvalidTimestamp(format!(
                        "{} does not exist in the local time zone",
                        naive
                    ))
                })?;
                let offset = local.offset().fix();
                Ok(local.with_timezone(&offset))
            }
            TimestampZone::Utc => Self::Fixed(Utc.fix()).resolve(naive),
            TimestampZone::Fixed(offset) => offset
                .from_local_datetime(&naive)
                .single()
                .ok_or_else(|| ClientError::InvalidTimestamp(format!("cannot place {} at {}", naive, offset))),
        }
    }
}

impl FromStr for TimestampZone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        match value.to_ascii_lowercase().as_str() {
            "local" => return Ok(TimestampZone::Local),
            "utc" | "z" => return Ok(TimestampZone::Utc),
            _ => {}
        }

        let (sign, rest) = match value.chars().next() {
            Some('+') => (1, &value[1..]),
            Some('-') => (-1, &value[1..]),
            _ => return Err(format!("unknown time zone '{}', expected local, utc or ±HH:MM", value)),
        };

        let (hours, minutes) = rest
            .split_once(':')
            .ok_or_else(|| format!("offset '{}' must look like ±HH:MM", value))?;
        let hours = parse_number(hours, 2, "offset hours").map_err(|e| e.to_string())?;
        let minutes = parse_number(minutes, 2, "offset minutes").map_err(|e| e.to_string())?;
        if minutes >= 60 {
            return Err(format!("invalid offset minutes in '{}'", value));
        }

        // Two digits each, so at most 99:59 and no overflow
        let seconds = (hours * 3600 + minutes * 60) as i32;
        FixedOffset::east_opt(sign * seconds)
            .map(TimestampZone::Fixed)
            .ok_or_else(|| format!("offset '{}' is out of range", value))
    }
}

impl TryFrom<String> for TimestampZone {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimestampZone> for String {
    fn from(zone: TimestampZone) -> Self {
        zone.to_string()
    }
}

impl fmt::Display for TimestampZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimestampZone::Local => write!(f, "local"),
            TimestampZone::Utc => write!(f, "utc"),
            TimestampZone::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}

/// Collapse every run of whitespace (including U+00A0 and U+202F) into one space
pub fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn parse_number(part: &str, max_digits: usize, what: &str) -> ClientResult<u32> {
    if part.is_empty() || part.len() > max_digits || !part.chars().all(|c| c.is_ascii_digit()) {
        return Err(ClientError::InvalidTimestamp(format!("invalid {} '{}'", what, part)));
    }
    part.parse()
        .map_err(|_| ClientError::InvalidTimestamp(format!("invalid {} '{}'", what, part)))
}

/// Parse a `D/M/YYYY` date
pub fn parse_scan_date(fecha: &str) -> ClientResult<NaiveDate> {
    let fecha = fecha.trim();
    let parts: Vec<&str> = fecha.split('/').collect();
    if parts.len() != 3 {
        return Err(ClientError::InvalidTimestamp(format!(
            "date '{}' is not in D/M/YYYY form",
            fecha
        )));
    }

    let day = parse_number(parts[0], 2, "day")?;
    let month = parse_number(parts[1], 2, "month")?;
    if parts[2].len() != 4 {
        return Err(ClientError::InvalidTimestamp(format!("invalid year '{}'", parts[2])));
    }
    let year = parse_number(parts[2], 4, "year")? as i32;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| ClientError::InvalidTimestamp(format!("date '{}' does not exist", fecha)))
}

/// Parse a 12-hour `h:mm:ss <meridiem>` time
pub fn parse_scan_time(hora: &str) -> ClientResult<NaiveTime> {
    let collapsed = collapse_whitespace(hora);

    let marker_start = collapsed
        .find(|c: char| c.is_alphabetic())
        .ok_or_else(|| ClientError::InvalidTimestamp(format!("time '{}' has no AM/PM marker", collapsed)))?;
    let (clock, marker) = collapsed.split_at(marker_start);

    let marker: String = marker
        .chars()
        .filter(|c| *c != '.' && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    let is_pm = match marker.as_str() {
        "am" | "a" => false,
        "pm" | "p" => true,
        _ => {
            return Err(ClientError::InvalidTimestamp(format!(
                "unknown meridiem marker in '{}'",
                collapsed
            )))
        }
    };

    let parts: Vec<&str> = clock.trim().split(':').collect();
    if parts.len() != 3 {
        return Err(ClientError::InvalidTimestamp(format!(
            "time '{}' is not in h:mm:ss form",
            collapsed
        )));
    }
    let hour = parse_number(parts[0], 2, "hour")?;
    let minute = parse_number(parts[1], 2, "minute")?;
    let second = parse_number(parts[2], 2, "second")?;

    if !(1..=12).contains(&hour) {
        return Err(ClientError::InvalidTimestamp(format!("hour {} is not on a 12-hour clock", hour)));
    }
    let hour = match (hour, is_pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, false) => h,
        (h, true) => h + 12,
    };

    NaiveTime::from_hms_opt(hour, minute, second)
        .ok_or_else(|| ClientError::InvalidTimestamp(format!("time '{}' does not exist", collapsed)))
}

/// Combine the scanned date and time into one naive timestamp
pub fn normalize_scan_timestamp(fecha: &str, hora: &str) -> ClientResult<NaiveDateTime> {
    let date = parse_scan_date(fecha)?;
    let time = parse_scan_time(hora)?;
    Ok(date.and_time(time))
}

/// Render a timestamp back into the `(fecha, hora)` pair a QR code would carry
pub fn format_scan_fields(timestamp: &NaiveDateTime) -> (String, String) {
    let (is_pm, hour) = timestamp.hour12();
    let fecha = format!("{}/{}/{}", timestamp.day(), timestamp.month(), timestamp.year());
    let hora = format!(
        "{}:{:02}:{:02} {}",
        hour,
        timestamp.minute(),
        timestamp.second(),
        if is_pm { "PM" } else { "AM" }
    );
    (fecha, hora)
}

/// Wire form of `fecha_hora`: RFC 3339 with milliseconds, `Z` for UTC
pub fn to_wire_timestamp(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}
