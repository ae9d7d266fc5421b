// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed by the BeePF project.
// Copyright 2026-present BeePF authors.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a task or of one of its programs, as reported by the
/// backend's integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<i64>", into = "Option<i64>")]
pub enum TaskStatus {
    /// Code 0.
    Init,
    /// Code 1.
    Running,
    /// Code 2.
    Completed,
    /// Code 3.
    Failed,
    /// Code 4. Terminal state after a stop request.
    Stopped,
    /// A code this console does not know about.
    Other(i64),
    /// No status was sent.
    #[default]
    Unknown,
}

impl TaskStatus {
    pub fn is_running(self) -> bool {
        self == TaskStatus::Running
    }

    /// Stopping is only offered while the task runs.
    pub fn can_stop(self) -> bool {
        self.is_running()
    }
}

impl From<Option<i64>> for TaskStatus {
    fn from(code: Option<i64>) -> Self {
        match code {
            None => TaskStatus::Unknown,
            Some(0) => TaskStatus::Init,
            Some(1) => TaskStatus::Running,
            Some(2) => TaskStatus::Completed,
            Some(3) => TaskStatus::Failed,
            Some(4) => TaskStatus::Stopped,
            Some(other) => TaskStatus::Other(other),
        }
    }
}

impl From<TaskStatus> for Option<i64> {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Init => Some(0),
            TaskStatus::Running => Some(1),
            TaskStatus::Completed => Some(2),
            TaskStatus::Failed => Some(3),
            TaskStatus::Stopped => Some(4),
            TaskStatus::Other(code) => Some(code),
            TaskStatus::Unknown => None,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Init => write!(f, "init"),
            TaskStatus::Running => write!(f, "running"),
            TaskStatus::Completed => write!(f, "completed"),
            TaskStatus::Failed => write!(f, "failed"),
            TaskStatus::Stopped => write!(f, "stopped"),
            TaskStatus::Other(code) => write!(f, "status {code}"),
            TaskStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// Step counter of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<i64>", into = "Option<i64>")]
pub enum TaskStep {
    Init,
    Load,
    Start,
    Stats,
    Metrics,
    Stop,
    Other(i64),
    #[default]
    Unknown,
}

impl From<Option<i64>> for TaskStep {
    fn from(step: Option<i64>) -> Self {
        match step {
            None => TaskStep::Unknown,
            Some(0) => TaskStep::Init,
            Some(1) => TaskStep::Load,
            Some(2) => TaskStep::Start,
            Some(3) => TaskStep::Stats,
            Some(4) => TaskStep::Metrics,
            Some(5) => TaskStep::Stop,
            Some(other) => TaskStep::Other(other),
        }
    }
}

impl From<TaskStep> for Option<i64> {
    fn from(step: TaskStep) -> Self {
        match step {
            TaskStep::Init => Some(0),
            TaskStep::Load => Some(1),
            TaskStep::Start => Some(2),
            TaskStep::Stats => Some(3),
            TaskStep::Metrics => Some(4),
            TaskStep::Stop => Some(5),
            TaskStep::Other(step) => Some(step),
            TaskStep::Unknown => None,
        }
    }
}

impl fmt::Display for TaskStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStep::Init => write!(f, "init"),
            TaskStep::Load => write!(f, "load"),
            TaskStep::Start => write!(f, "start"),
            TaskStep::Stats => write!(f, "stats"),
            TaskStep::Metrics => write!(f, "metrics"),
            TaskStep::Stop => write!(f, "stop"),
            TaskStep::Other(step) => write!(f, "step {step}"),
            TaskStep::Unknown => write!(f, "unknown"),
        }
    }
}
