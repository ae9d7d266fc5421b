// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed by the BeePF project.
// Copyright 2026-present BeePF authors.

//! Metric series normalization.
//!
//! Raw samples from the backend carry loosely typed timestamps and may have
//! no value at all. [`normalize`] turns them into a chart-ready sequence:
//! valueless samples are dropped, timestamps are resolved to epoch
//! milliseconds and rendered as a time of day, and the result is stably
//! sorted in time. Samples whose timestamp cannot be resolved are kept with
//! the [`INVALID_DATE`] label and sorted after every valid sample.

use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::timestamp::{RawTimestamp, resolve_millis, time_of_day};

pub use crate::timestamp::INVALID_DATE;

/// Label for samples that do not name their program.
pub const DEFAULT_LABEL: &str = "default";

/// One raw sample as sent by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricPoint {
    #[serde(default)]
    pub timestamp: Option<RawTimestamp>,
    /// `None` means no sample was taken.
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default, rename = "program_name", alias = "source_label")]
    pub source_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedPoint {
    /// `HH:MM:SS`, or [`INVALID_DATE`].
    pub display_time: String,
    pub value: f64,
    pub source_label: String,
    /// Epoch milliseconds; `None` when the timestamp could not be resolved.
    pub sort_key: Option<i64>,
}

/// Normalize `points` for display in the local time zone.
pub fn normalize(points: &[MetricPoint]) -> Vec<NormalizedPoint> {
    normalize_in(points, &Local)
}

pub fn normalize_in<Tz: TimeZone>(points: &[MetricPoint], tz: &Tz) -> Vec<NormalizedPoint> {
    let mut normalized: Vec<NormalizedPoint> = points
        .iter()
        .filter_map(|point| {
            let value = point.value?;
            let sort_key = resolve_millis(point.timestamp.as_ref(), tz);
            Some(NormalizedPoint {
                display_time: time_of_day(sort_key, tz),
                value,
                source_label: resolve_label(point.source_label.as_deref()),
                sort_key,
            })
        })
        .collect();

    // Stable: equal keys keep their input order, unresolved timestamps go last.
    normalized.sort_by_key(|point| (point.sort_key.is_none(), point.sort_key));
    normalized
}

fn resolve_label(label: Option<&str>) -> String {
    match label {
        Some(label) if !label.is_empty() => label.to_string(),
        _ => DEFAULT_LABEL.to_string(),
    }
}

/// The named series recorded for every task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricSeries {
    AvgRunTime,
    CpuUsage,
    EventsPerSecond,
    Period,
    TotalAvgRunTime,
}

impl MetricSeries {
    pub const ALL: [MetricSeries; 5] = [
        MetricSeries::AvgRunTime,
        MetricSeries::CpuUsage,
        MetricSeries::EventsPerSecond,
        MetricSeries::Period,
        MetricSeries::TotalAvgRunTime,
    ];

    pub fn title(self) -> &'static str {
        match self {
            MetricSeries::AvgRunTime => "Average run time",
            MetricSeries::CpuUsage => "CPU usage",
            MetricSeries::EventsPerSecond => "Events per second",
            MetricSeries::Period => "Period",
            MetricSeries::TotalAvgRunTime => "Total average run time",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            MetricSeries::AvgRunTime | MetricSeries::Period | MetricSeries::TotalAvgRunTime => {
                "ns"
            }
            MetricSeries::CpuUsage => "%",
            MetricSeries::EventsPerSecond => "events",
        }
    }

    /// Field name in the metrics payload.
    pub fn field(self) -> &'static str {
        match self {
            MetricSeries::AvgRunTime => "avg_run_time_ns",
            MetricSeries::CpuUsage => "cpu_usage",
            MetricSeries::EventsPerSecond => "events_per_second",
            MetricSeries::Period => "period_ns",
            MetricSeries::TotalAvgRunTime => "total_avg_run_time_ns",
        }
    }
}

impl fmt::Display for MetricSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title(), self.unit())
    }
}

/// Per-label view of a normalized series.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSummary {
    pub label: String,
    /// Values in display order.
    pub values: Vec<f64>,
    pub first_time: String,
    pub last_time: String,
}

impl LabelSummary {
    pub fn min(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn latest(&self) -> Option<f64> {
        self.values.last().copied()
    }
}

/// Group a normalized series by label, in order of first appearance.
pub fn summarize(points: &[NormalizedPoint]) -> Vec<LabelSummary> {
    let mut summaries: Vec<LabelSummary> = Vec::new();
    for point in points {
        match summaries.iter_mut().find(|s| s.label == point.source_label) {
            Some(summary) => {
                summary.values.push(point.value);
                summary.last_time.clone_from(&point.display_time);
            }
            None => summaries.push(LabelSummary {
                label: point.source_label.clone(),
                values: vec![point.value],
                first_time: point.display_time.clone(),
                last_time: point.display_time.clone(),
            }),
        }
    }
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use proptest::prelude::*;

    fn point(timestamp: &str, value: Option<f64>) -> MetricPoint {
        MetricPoint {
            timestamp: Some(RawTimestamp::Text(timestamp.to_string())),
            value,
            source_label: None,
        }
    }

    fn labeled(timestamp: &str, value: f64, label: &str) -> MetricPoint {
        MetricPoint {
            source_label: Some(label.to_string()),
            ..point(timestamp, Some(value))
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(normalize_in(&[], &Utc).is_empty());
    }

    #[test]
    fn test_ten_digit_string_is_seconds() {
        let out = normalize_in(&[point("1700000000", Some(5.0))], &Utc);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].sort_key, Some(1_700_000_000_000));
        assert_eq!(out[0].display_time, "22:13:20");
        assert_eq!(out[0].value, 5.0);
    }

    #[test]
    fn test_thirteen_digit_string_is_millis() {
        let out = normalize_in(&[point("1700000000000", Some(5.0))], &Utc);
        assert_eq!(out[0].sort_key, Some(1_700_000_000_000));
        assert_eq!(out[0].display_time, "22:13:20");
    }

    #[test]
    fn test_invalid_timestamp_is_kept() {
        let out = normalize_in(&[point("not-a-date", Some(5.0))], &Utc);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].display_time, INVALID_DATE);
        assert_eq!(out[0].sort_key, None);
        assert_eq!(out[0].value, 5.0);
    }

    #[test]
    fn test_missing_timestamp_is_kept_as_invalid() {
        let raw = MetricPoint {
            timestamp: None,
            value: Some(1.0),
            source_label: None,
        };
        let out = normalize_in(&[raw], &Utc);
        assert_eq!(out[0].display_time, INVALID_DATE);
    }

    #[test]
    fn test_null_value_is_dropped() {
        let out = normalize_in(
            &[
                point("2024-01-01T00:00:00Z", None),
                point("2024-01-01T00:00:01Z", Some(1.0)),
            ],
            &Utc,
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].display_time, "00:00:01");
    }

    #[test]
    fn test_zero_value_is_kept() {
        let out = normalize_in(&[point("2024-01-01T00:00:00Z", Some(0.0))], &Utc);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].value, 0.0);
    }

    #[test]
    fn test_chronological_order_regardless_of_input_order() {
        let later = point("2024-01-01T00:00:01Z", Some(3.0));
        let earlier = point("2024-01-01T00:00:00Z", Some(3.0));
        let out = normalize_in(&[later, earlier], &Utc);
        let times: Vec<&str> = out.iter().map(|p| p.display_time.as_str()).collect();
        assert_eq!(times, vec!["00:00:00", "00:00:01"]);
    }

    #[test]
    fn test_mixed_formats_sort_together() {
        let out = normalize_in(
            &[
                point("1704067203", Some(3.0)),
                point("2024-01-01T00:00:01Z", Some(1.0)),
                point("1704067202000", Some(2.0)),
                MetricPoint {
                    timestamp: Some(RawTimestamp::Number(1_704_067_200_000.0)),
                    value: Some(0.0),
                    source_label: None,
                },
            ],
            &Utc,
        );
        let values: Vec<f64> = out.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let out = normalize_in(
            &[
                labeled("1700000000", 1.0, "a"),
                labeled("1700000000", 2.0, "b"),
                labeled("1700000000", 3.0, "c"),
            ],
            &Utc,
        );
        let labels: Vec<&str> = out.iter().map(|p| p.source_label.as_str()).collect();
        assert_eq!(labels, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_invalid_sort_last_in_input_order() {
        let out = normalize_in(
            &[
                labeled("garbage", 1.0, "x"),
                labeled("1700000001", 2.0, "late"),
                labeled("more garbage", 3.0, "y"),
                labeled("1700000000", 4.0, "early"),
            ],
            &Utc,
        );
        let labels: Vec<&str> = out.iter().map(|p| p.source_label.as_str()).collect();
        assert_eq!(labels, vec!["early", "late", "x", "y"]);
    }

    #[test]
    fn test_default_label() {
        let out = normalize_in(
            &[
                point("1700000000", Some(1.0)),
                labeled("1700000001", 1.0, ""),
                labeled("1700000002", 1.0, "kprobe__do_sys_open"),
            ],
            &Utc,
        );
        let labels: Vec<&str> = out.iter().map(|p| p.source_label.as_str()).collect();
        assert_eq!(labels, vec![DEFAULT_LABEL, DEFAULT_LABEL, "kprobe__do_sys_open"]);
    }

    #[test]
    fn test_decode_wire_points() {
        let points: Vec<MetricPoint> = serde_json::from_str(
            r#"[
                {"timestamp": "2024-01-01T00:00:00Z", "value": null},
                {"timestamp": 1704067200000, "value": 7, "program_name": "handle_exec"},
                {"timestamp": "1704067201", "value": 8.5}
            ]"#,
        )
        .unwrap();
        let out = normalize_in(&points, &Utc);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].source_label, "handle_exec");
        assert_eq!(out[1].display_time, "00:00:01");
    }

    #[test]
    fn test_summarize_groups_by_label() {
        let out = normalize_in(
            &[
                labeled("1700000002", 30.0, "b"),
                labeled("1700000000", 10.0, "a"),
                labeled("1700000001", 20.0, "b"),
                labeled("1700000003", 5.0, "a"),
            ],
            &Utc,
        );
        let summaries = summarize(&out);
        assert_eq!(summaries.len(), 2);

        assert_eq!(summaries[0].label, "a");
        assert_eq!(summaries[0].values, vec![10.0, 5.0]);
        assert_eq!(summaries[0].min(), 5.0);
        assert_eq!(summaries[0].max(), 10.0);
        assert_eq!(summaries[0].latest(), Some(5.0));
        assert_eq!(summaries[0].first_time, "22:13:20");
        assert_eq!(summaries[0].last_time, "22:13:23");

        assert_eq!(summaries[1].label, "b");
        assert_eq!(summaries[1].values, vec![20.0, 30.0]);
    }

    #[test]
    fn test_series_catalogue() {
        assert_eq!(MetricSeries::ALL.len(), 5);
        assert_eq!(MetricSeries::CpuUsage.to_string(), "CPU usage (%)");
        assert_eq!(MetricSeries::Period.field(), "period_ns");
    }

    fn arb_timestamp() -> impl Strategy<Value = Option<RawTimestamp>> {
        prop_oneof![
            Just(None),
            "[0-9]{1,16}".prop_map(|s| Some(RawTimestamp::Text(s))),
            "-?[0-9]{1,12}[a-z]{0,2}".prop_map(|s| Some(RawTimestamp::Text(s))),
            ".{0,24}".prop_map(|s| Some(RawTimestamp::Text(s))),
            (2000i32..2040, 1u32..13, 1u32..29, 0u32..24, 0u32..60, 0u32..60).prop_map(
                |(y, mo, d, h, mi, s)| Some(RawTimestamp::Text(format!(
                    "{y:04}-{mo:02}-{d:02}T{h:02}:{mi:02}:{s:02}Z"
                )))
            ),
            any::<f64>().prop_map(|n| Some(RawTimestamp::Number(n))),
            any::<bool>().prop_map(|b| Some(RawTimestamp::Bool(b))),
            Just(Some(RawTimestamp::Other(serde_json::json!({"at": 1})))),
        ]
    }

    fn arb_point() -> impl Strategy<Value = MetricPoint> {
        (
            arb_timestamp(),
            proptest::option::of(-1e12f64..1e12f64),
            proptest::option::of("[a-z_]{0,8}"),
        )
            .prop_map(|(timestamp, value, source_label)| MetricPoint {
                timestamp,
                value,
                source_label,
            })
    }

    proptest! {
        #[test]
        fn prop_keeps_exactly_valued_points(points in proptest::collection::vec(arb_point(), 0..64)) {
            let out = normalize_in(&points, &Utc);
            let expected = points.iter().filter(|p| p.value.is_some()).count();
            prop_assert_eq!(out.len(), expected);
        }

        #[test]
        fn prop_sort_keys_non_decreasing(points in proptest::collection::vec(arb_point(), 0..64)) {
            let out = normalize_in(&points, &Utc);
            for pair in out.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                match (a.sort_key, b.sort_key) {
                    (Some(x), Some(y)) => prop_assert!(x <= y),
                    (None, Some(_)) => prop_assert!(false, "invalid timestamp sorted before a valid one"),
                    _ => {}
                }
            }
        }

        #[test]
        fn prop_labels_never_empty(points in proptest::collection::vec(arb_point(), 0..32)) {
            for p in normalize_in(&points, &Utc) {
                prop_assert!(!p.source_label.is_empty());
                prop_assert!(p.display_time == INVALID_DATE || p.display_time.len() == 8);
            }
        }
    }
}
