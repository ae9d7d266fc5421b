// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed by the BeePF project.
// Copyright 2026-present BeePF authors.

//! Types exchanged with the BeePF backend.
//!
//! Decoding is lenient: missing or `null` fields fall back to their defaults
//! so that a partially filled record still renders.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use crate::metrics::{MetricPoint, MetricSeries};
use crate::state::{TaskStatus, TaskStep};

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub description: Option<String>,
    pub component_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub component_name: String,
    pub status: TaskStatus,
    pub step: TaskStep,
    pub error: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub prog_status: Vec<ProgStatus>,
}

/// Status of one eBPF program loaded by a task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgStatus {
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub program_name: String,
    pub status: TaskStatus,
    pub error: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// The five series the backend records per task. A series the backend omits
/// or sends as `null` is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskMetrics {
    #[serde(deserialize_with = "null_as_default")]
    pub avg_run_time_ns: Vec<MetricPoint>,
    #[serde(deserialize_with = "null_as_default")]
    pub cpu_usage: Vec<MetricPoint>,
    #[serde(deserialize_with = "null_as_default")]
    pub events_per_second: Vec<MetricPoint>,
    #[serde(deserialize_with = "null_as_default")]
    pub period_ns: Vec<MetricPoint>,
    #[serde(deserialize_with = "null_as_default")]
    pub total_avg_run_time_ns: Vec<MetricPoint>,
}

impl TaskMetrics {
    pub fn series(&self, series: MetricSeries) -> &[MetricPoint] {
        match series {
            MetricSeries::AvgRunTime => &self.avg_run_time_ns,
            MetricSeries::CpuUsage => &self.cpu_usage,
            MetricSeries::EventsPerSecond => &self.events_per_second,
            MetricSeries::Period => &self.period_ns,
            MetricSeries::TotalAvgRunTime => &self.total_avg_run_time_ns,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cluster {
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(alias = "address", deserialize_with = "null_as_default")]
    pub master_ip: String,
    pub description: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    /// Attributes this console does not model, shown as-is.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Body of a create or edit cluster request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterSpec {
    pub name: String,
    pub master_ip: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Component {
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Responses arrive either bare or wrapped as `{code, message, data}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(inner) => inner,
        }
    }
}

/// Decode a response body, unwrapping the `data` envelope when present.
pub fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str::<Envelope<T>>(body)
        .map(Envelope::into_inner)
        .or_else(|_| serde_json::from_str::<T>(body))
}

/// Pull a human readable message out of an error response body.
pub fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Object(map)) => ["message", "error", "msg"]
            .iter()
            .filter_map(|key| map.get(*key).and_then(|v| v.as_str()))
            .map(str::trim)
            .find(|s| !s.is_empty())
            .map(str::to_string),
        Ok(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Ok(_) => None,
        Err(_) => Some(trimmed.to_string()),
    }
}
