// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed by the BeePF project.
// Copyright 2026-present BeePF authors.

//! Page flows that do more than one fetch-and-render: the task detail page
//! and stopping a task.

use log::{info, warn};
use std::future::Future;
use tokio_util::sync::CancellationToken;

use crate::client::BeepfClient;
use crate::errors::{Error, Result};
use crate::model::{Task, TaskMetrics};
use crate::request::CancelableRequest;
use crate::state::TaskStatus;

/// Both halves of the task detail page. Each is whatever its own request
/// produced.
#[derive(Debug)]
pub struct TaskDetailPage {
    pub task_id: i64,
    pub task: Result<Task>,
    pub metrics: Result<TaskMetrics>,
}

impl TaskDetailPage {
    /// One line per failed fetch.
    pub fn notifications(&self) -> Vec<String> {
        let mut notices = Vec::new();
        if let Err(e) = &self.task {
            notices.push(format!("failed to load task {}: {e}", self.task_id));
        }
        if let Err(e) = &self.metrics {
            notices.push(format!("failed to load metrics of task {}: {e}", self.task_id));
        }
        notices
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.task, Err(Error::Cancelled)) || matches!(self.metrics, Err(Error::Cancelled))
    }
}

/// Fetch task detail and metrics concurrently. Cancelling `page` aborts
/// whichever request is still running.
pub async fn load_task_detail(
    client: &BeepfClient,
    task_id: i64,
    page: &CancellationToken,
) -> TaskDetailPage {
    let detail = {
        let client = client.clone();
        CancelableRequest::spawn(page, async move { client.get_task(task_id).await })
    };
    let metrics = {
        let client = client.clone();
        CancelableRequest::spawn(page, async move { client.get_task_metrics(task_id).await })
    };

    let (task, metrics) = tokio::join!(detail.wait(), metrics.wait());
    if let Err(e) = &task {
        warn!("task {task_id}: detail request failed: {e}");
    }
    if let Err(e) = &metrics {
        warn!("task {task_id}: metrics request failed: {e}");
    }
    TaskDetailPage {
        task_id,
        task,
        metrics,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

/// The person driving a mutation: receives notices and answers prompts.
pub trait Operator {
    fn notify(&mut self, notice: Notice);

    fn confirm(&mut self, question: &str) -> impl Future<Output = bool> + Send;
}

#[derive(Debug)]
pub enum StopOutcome {
    /// The backend accepted the stop. Carries the re-fetched task, if that
    /// request succeeded.
    Stopped(Option<Task>),
    NotRunning(TaskStatus),
    Declined,
    /// The stop failed and the operator could not be asked to retry.
    Failed(Error),
}

/// Stop a running task after confirmation. A failed stop is reported and the
/// confirmation is offered again until it succeeds or is declined. With
/// `assume_yes` nobody is asked, so a failure ends the flow.
pub async fn stop_task<O: Operator>(
    client: &BeepfClient,
    task_id: i64,
    operator: &mut O,
    assume_yes: bool,
) -> Result<StopOutcome> {
    let task = client.get_task(task_id).await?;
    if !task.status.can_stop() {
        info!("task {task_id} is {}, not stopping", task.status);
        return Ok(StopOutcome::NotRunning(task.status));
    }

    let mut question = format!(
        "Stop task \"{}\"? A stopped task cannot be resumed.",
        task.name
    );
    loop {
        if !assume_yes && !operator.confirm(&question).await {
            return Ok(StopOutcome::Declined);
        }

        match client.stop_task(task_id).await {
            Ok(()) => {
                info!("task {task_id} stopped");
                operator.notify(Notice::Success(format!("task {} stopped", task.name)));
                let refreshed = match client.get_task(task_id).await {
                    Ok(task) => Some(task),
                    Err(e) => {
                        operator.notify(Notice::Error(format!(
                            "failed to load task {task_id}: {e}"
                        )));
                        None
                    }
                };
                return Ok(StopOutcome::Stopped(refreshed));
            }
            Err(e) => {
                warn!("task {task_id}: stop failed: {e}");
                operator.notify(Notice::Error(format!("stop failed: {}", e.user_message())));
                if assume_yes {
                    return Ok(StopOutcome::Failed(e));
                }
                question = format!("Retry stopping task \"{}\"?", task.name);
            }
        }
    }
}
