// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed by the BeePF project.
// Copyright 2026-present BeePF authors.

//! Resolution of the loosely typed timestamps the backend attaches to metric
//! samples.
//!
//! The backend has emitted ISO dates, epoch seconds and epoch milliseconds at
//! various times, sometimes as strings and sometimes as numbers. Resolution
//! tries, in order:
//!
//! 1. a JSON number, taken as epoch milliseconds (`true` and `false` count as
//!    1 and 0);
//! 2. a date string (RFC 3339, RFC 2822, naive `YYYY-MM-DD HH:MM:SS` or
//!    `YYYY/MM/DD HH:MM:SS` in the display zone, bare `YYYY-MM-DD` as UTC
//!    midnight, bare `YYYY/MM/DD` as midnight in the display zone);
//! 3. the leading integer of the string: up to 10 characters including the
//!    sign is epoch seconds, longer is epoch milliseconds. Strings shaped like
//!    a date never get here, so `2024-13-45` is invalid rather than year 2024.
//!
//! Anything else is invalid and yields `None`, including objects and arrays.
//! chrono stops at roughly ±8.2e15 ms, short of [`MAX_EPOCH_MILLIS`], so
//! instants between the two are invalid as well.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Timelike};
use serde::{Deserialize, Serialize};

/// Largest magnitude a date may have, in milliseconds from the epoch
/// (100 000 000 days either side).
pub const MAX_EPOCH_MILLIS: i64 = 8_640_000_000_000_000;

/// Digit count at or below which an integer string is read as seconds.
const SECONDS_MAX_DIGITS: usize = 10;

/// Shown in place of a time of day that could not be resolved.
pub const INVALID_DATE: &str = "invalid date";

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
];

/// A timestamp as sent. Any JSON shape decodes, so one odd sample cannot fail
/// the whole payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    Text(String),
    Number(f64),
    Bool(bool),
    Other(serde_json::Value),
}

/// Resolve a raw timestamp to epoch milliseconds. Naive date strings are
/// interpreted in `tz`.
pub fn resolve_millis<Tz: TimeZone>(raw: Option<&RawTimestamp>, tz: &Tz) -> Option<i64> {
    match raw? {
        RawTimestamp::Number(n) => clip_float(*n),
        RawTimestamp::Bool(b) => clip(i64::from(*b)),
        RawTimestamp::Text(text) if looks_like_date(text) => parse_date_string(text, tz),
        RawTimestamp::Text(text) => {
            parse_date_string(text, tz).or_else(|| parse_integer_timestamp(text))
        }
        RawTimestamp::Other(_) => None,
    }
}

/// `HH:MM:SS` of `millis` in `tz`, or [`INVALID_DATE`].
pub fn time_of_day<Tz: TimeZone>(millis: Option<i64>, tz: &Tz) -> String {
    match millis.and_then(|ms| tz.timestamp_millis_opt(ms).single()) {
        Some(dt) => format!("{:02}:{:02}:{:02}", dt.hour(), dt.minute(), dt.second()),
        None => INVALID_DATE.to_string(),
    }
}

fn clip(millis: i64) -> Option<i64> {
    let in_range = (-MAX_EPOCH_MILLIS..=MAX_EPOCH_MILLIS).contains(&millis);
    // chrono's representable range ends short of MAX_EPOCH_MILLIS.
    (in_range && DateTime::from_timestamp_millis(millis).is_some()).then_some(millis)
}

#[allow(clippy::cast_possible_truncation)]
fn clip_float(value: f64) -> Option<i64> {
    if !value.is_finite() || value.abs() > MAX_EPOCH_MILLIS as f64 {
        return None;
    }
    // In range, so the truncating cast is exact for the integer part.
    clip(value.trunc() as i64)
}

fn parse_date_string<Tz: TimeZone>(text: &str, tz: &Tz) -> Option<i64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return clip(dt.timestamp_millis());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return clip(dt.timestamp_millis());
    }
    if let Ok(dt) = DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return clip(dt.timestamp_millis());
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return tz
                .from_local_datetime(&naive)
                .earliest()
                .and_then(|dt| clip(dt.timestamp_millis()));
        }
    }

    // Date-only ISO strings are UTC midnight, not local midnight.
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .and_then(|naive| clip(naive.and_utc().timestamp_millis()));
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y/%m/%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .and_then(|naive| tz.from_local_datetime(&naive).earliest())
            .and_then(|dt| clip(dt.timestamp_millis()));
    }

    None
}

/// One to four digits followed by `-` or `/` and another digit.
fn looks_like_date(text: &str) -> bool {
    let text = text.trim_start();
    let year = text.chars().take_while(char::is_ascii_digit).count();
    if !(1..=4).contains(&year) {
        return false;
    }
    let mut rest = text.chars().skip(year);
    matches!(rest.next(), Some('-' | '/')) && rest.next().is_some_and(|c| c.is_ascii_digit())
}

/// Read the leading integer of `text` (optional whitespace and sign, then
/// digits; anything after the digits is ignored) and scale it by its length.
fn parse_integer_timestamp(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits = rest
        .split(|c: char| !c.is_ascii_digit())
        .next()
        .unwrap_or_default();
    if digits.is_empty() {
        return None;
    }

    let magnitude: i64 = digits.parse().ok()?;
    let value = if negative { -magnitude } else { magnitude };

    // Length of the value as written without leading zeros; a minus sign counts.
    let millis = if value.to_string().len() <= SECONDS_MAX_DIGITS {
        value.checked_mul(1000)?
    } else {
        value
    };
    clip(millis)
}
