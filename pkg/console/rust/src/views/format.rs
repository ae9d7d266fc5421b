// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed by the BeePF project.
// Copyright 2026-present BeePF authors.

//! Output formatting utilities

use chrono::{DateTime, Local, TimeZone};
use colored::{ColoredString, Colorize};
use std::fmt;

use crate::state::TaskStatus;

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Format a backend timestamp as local date and time. Strings that are not
/// RFC 3339 are shown as sent.
pub fn datetime(value: Option<&str>) -> String {
    datetime_in(value, &Local)
}

pub fn datetime_in<Tz: TimeZone>(value: Option<&str>, tz: &Tz) -> String
where
    Tz::Offset: fmt::Display,
{
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return "-".to_string();
    };
    match DateTime::parse_from_rfc3339(value) {
        Ok(dt) => dt
            .with_timezone(tz)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        Err(_) => value.to_string(),
    }
}

pub fn or_dash(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => "-",
    }
}

/// Format a task status with appropriate color
pub fn status(status: TaskStatus) -> ColoredString {
    paint(status, status.to_string())
}

/// Status label left-aligned to `width` columns, padded before coloring.
pub fn status_cell(status: TaskStatus, width: usize) -> ColoredString {
    paint(status, format!("{:<width$}", status.to_string()))
}

fn paint(status: TaskStatus, label: String) -> ColoredString {
    match status {
        TaskStatus::Running => label.green(),
        TaskStatus::Failed => label.red(),
        TaskStatus::Stopped => label.yellow(),
        TaskStatus::Init | TaskStatus::Completed => label.blue(),
        TaskStatus::Other(_) | TaskStatus::Unknown => label.normal(),
    }
}

/// Shorten `value` to at most `max` characters, marking the cut with `...`.
pub fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = value.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Whole numbers without decimals, everything else with two.
pub fn value(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}

/// One character per value for the last `width` values, scaled between their
/// minimum and maximum.
pub fn sparkline(values: &[f64], width: usize) -> String {
    let start = values.len().saturating_sub(width);
    let window = values.get(start..).unwrap_or_default();

    let (min, max) = window
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        });

    let top = SPARK_LEVELS.len() - 1;
    window
        .iter()
        .map(|v| {
            let level = if !v.is_finite() {
                return ' ';
            } else if max <= min {
                top / 2
            } else {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let scaled = (((v - min) / (max - min)) * top as f64).round() as usize;
                scaled.min(top)
            };
            SPARK_LEVELS.get(level).copied().unwrap_or(' ')
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_datetime() {
        assert_eq!(
            datetime_in(Some("2024-05-01T10:00:00Z"), &Utc),
            "2024-05-01 10:00:00"
        );
        assert_eq!(
            datetime_in(Some("2024-05-01T18:00:00+08:00"), &Utc),
            "2024-05-01 10:00:00"
        );
        assert_eq!(datetime_in(Some("yesterday"), &Utc), "yesterday");
        assert_eq!(datetime_in(Some("  "), &Utc), "-");
        assert_eq!(datetime_in(None, &Utc), "-");
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(Some("boom")), "boom");
        assert_eq!(or_dash(Some("")), "-");
        assert_eq!(or_dash(None), "-");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("tracepoint__syscalls__sys_enter", 12), "tracepoin...");
        assert_eq!(truncate("追踪程序名称很长很长", 6), "追踪程...");
    }

    #[test]
    fn test_value() {
        assert_eq!(value(1200.0), "1200");
        assert_eq!(value(0.0), "0");
        assert_eq!(value(12.345), "12.35");
    }

    #[test]
    fn test_sparkline() {
        assert_eq!(sparkline(&[0.0, 7.0], 10), "▁█");
        assert_eq!(sparkline(&[1.0, 1.0, 1.0], 10), "▄▄▄");
        assert_eq!(sparkline(&[], 10), "");
        // Only the most recent `width` values are drawn.
        assert_eq!(sparkline(&[100.0, 0.0, 1.0], 2), "▁█");
    }

    #[test]
    fn test_status_text() {
        assert!(status(TaskStatus::Running).to_string().contains("running"));
        assert!(status(TaskStatus::Other(8)).to_string().contains("status 8"));
        assert!(
            status_cell(TaskStatus::Failed, 10)
                .to_string()
                .contains("failed    ")
        );
    }
}
