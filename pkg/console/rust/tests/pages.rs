// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed by the BeePF project.
// Copyright 2026-present BeePF authors.

use beepf_console::state::TaskStatus;
use beepf_console::{
    BeepfClient, Error, Notice, Operator, StopOutcome, load_task_detail, stop_task,
};
use mockito::Server;
use std::collections::VecDeque;
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const RUNNING_TASK: &str = r#"{"id": 7, "name": "trace-open", "status": 1, "step": 4}"#;

/// Answers prompts from a script and records everything it was shown.
#[derive(Default)]
struct ScriptedOperator {
    answers: VecDeque<bool>,
    questions: Vec<String>,
    notices: Vec<Notice>,
}

impl ScriptedOperator {
    fn answering(answers: &[bool]) -> Self {
        ScriptedOperator {
            answers: answers.iter().copied().collect(),
            ..Default::default()
        }
    }
}

impl Operator for ScriptedOperator {
    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    fn confirm(&mut self, question: &str) -> impl Future<Output = bool> + Send {
        self.questions.push(question.to_string());
        let answer = self.answers.pop_front().unwrap_or(false);
        async move { answer }
    }
}

fn client_for(server: &Server) -> BeepfClient {
    BeepfClient::new(&server.url(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_detail_loads_both_halves() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/tasks/7")
        .with_body(RUNNING_TASK)
        .create_async()
        .await;
    server
        .mock("GET", "/api/tasks/7/metrics")
        .with_body(r#"{"cpu_usage": [{"timestamp": "1700000000", "value": 3}]}"#)
        .create_async()
        .await;

    let page = CancellationToken::new();
    let detail = load_task_detail(&client_for(&server), 7, &page).await;
    assert_eq!(detail.task.unwrap().name, "trace-open");
    assert_eq!(detail.metrics.unwrap().cpu_usage.len(), 1);
}

#[tokio::test]
async fn test_detail_partial_load() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/tasks/7")
        .with_body(RUNNING_TASK)
        .create_async()
        .await;
    server
        .mock("GET", "/api/tasks/7/metrics")
        .with_status(503)
        .with_body(r#"{"message": "metrics store offline"}"#)
        .create_async()
        .await;

    let page = CancellationToken::new();
    let detail = load_task_detail(&client_for(&server), 7, &page).await;
    assert!(detail.task.is_ok());
    assert!(!detail.is_cancelled());
    let notices = detail.notifications();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].contains("metrics store offline"));
}

#[tokio::test]
async fn test_detail_cancelled_page() {
    let server = Server::new_async().await;
    let page = CancellationToken::new();
    page.cancel();

    let detail = load_task_detail(&client_for(&server), 7, &page).await;
    assert!(matches!(detail.task, Err(Error::Cancelled)));
    assert!(matches!(detail.metrics, Err(Error::Cancelled)));
    assert!(detail.is_cancelled());
}

#[tokio::test]
async fn test_stop_confirmed() {
    let mut server = Server::new_async().await;
    let fetch = server
        .mock("GET", "/api/tasks/7")
        .with_body(RUNNING_TASK)
        .expect(2)
        .create_async()
        .await;
    let stop = server
        .mock("POST", "/api/tasks/7/stop")
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let mut operator = ScriptedOperator::answering(&[true]);
    let outcome = stop_task(&client_for(&server), 7, &mut operator, false)
        .await
        .unwrap();

    assert!(matches!(outcome, StopOutcome::Stopped(Some(_))));
    assert_eq!(operator.questions.len(), 1);
    assert_eq!(
        operator.notices,
        vec![Notice::Success("task trace-open stopped".to_string())]
    );
    fetch.assert_async().await;
    stop.assert_async().await;
}

#[tokio::test]
async fn test_stop_declined() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/tasks/7")
        .with_body(RUNNING_TASK)
        .create_async()
        .await;
    let stop = server
        .mock("POST", "/api/tasks/7/stop")
        .expect(0)
        .create_async()
        .await;

    let mut operator = ScriptedOperator::answering(&[false]);
    let outcome = stop_task(&client_for(&server), 7, &mut operator, false)
        .await
        .unwrap();

    assert!(matches!(outcome, StopOutcome::Declined));
    assert!(operator.notices.is_empty());
    stop.assert_async().await;
}

#[tokio::test]
async fn test_stop_not_running() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/tasks/7")
        .with_body(r#"{"id": 7, "name": "trace-open", "status": 4}"#)
        .create_async()
        .await;

    let mut operator = ScriptedOperator::answering(&[true]);
    let outcome = stop_task(&client_for(&server), 7, &mut operator, false)
        .await
        .unwrap();

    assert!(matches!(outcome, StopOutcome::NotRunning(TaskStatus::Stopped)));
    assert!(operator.questions.is_empty());
}

#[tokio::test]
async fn test_stop_failure_offers_retry() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/tasks/7")
        .with_body(RUNNING_TASK)
        .create_async()
        .await;
    let stop = server
        .mock("POST", "/api/tasks/7/stop")
        .with_status(500)
        .with_body(r#"{"message": "agent unreachable"}"#)
        .expect(2)
        .create_async()
        .await;

    // Confirm, retry once, then give up.
    let mut operator = ScriptedOperator::answering(&[true, true, false]);
    let outcome = stop_task(&client_for(&server), 7, &mut operator, false)
        .await
        .unwrap();

    assert!(matches!(outcome, StopOutcome::Declined));
    assert_eq!(operator.questions.len(), 3);
    assert!(operator.questions[1].starts_with("Retry"));
    assert_eq!(
        operator.notices,
        vec![
            Notice::Error("stop failed: agent unreachable".to_string()),
            Notice::Error("stop failed: agent unreachable".to_string()),
        ]
    );
    stop.assert_async().await;
}

#[tokio::test]
async fn test_stop_failure_without_prompt() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/tasks/7")
        .with_body(RUNNING_TASK)
        .create_async()
        .await;
    server
        .mock("POST", "/api/tasks/7/stop")
        .with_status(500)
        .create_async()
        .await;

    let mut operator = ScriptedOperator::default();
    let outcome = stop_task(&client_for(&server), 7, &mut operator, true)
        .await
        .unwrap();

    assert!(matches!(outcome, StopOutcome::Failed(Error::Api { status: 500, .. })));
    assert!(operator.questions.is_empty());
    assert_eq!(
        operator.notices,
        vec![Notice::Error("stop failed: unknown error".to_string())]
    );
}
