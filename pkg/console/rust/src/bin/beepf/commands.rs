// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed by the BeePF project.
// Copyright 2026-present BeePF authors.

use anyhow::{Context, Result, anyhow};
use beepf_console::metrics::normalize;
use beepf_console::model::{Cluster, ClusterSpec};
use beepf_console::pages::{self, Notice, Operator, StopOutcome};
use beepf_console::request::CancelableRequest;
use beepf_console::views::{self, clusters, components, format, observability, tasks};
use beepf_console::{BeepfClient, ComponentUpload, MetricSeries, ObservabilityView, Page};
use chrono::Local;
use colored::Colorize;
use log::info;
use std::future::Future;
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tokio_util::sync::CancellationToken;

#[allow(clippy::print_stdout)]
fn emit(out: &str) {
    print!("{out}");
}

#[allow(clippy::print_stderr)]
fn report_error(message: &str) {
    eprintln!("{} {message}", "[ERROR]".red());
}

/// Asks on the terminal; anything but `y`/`yes` is a no.
pub struct TerminalOperator {
    lines: Lines<BufReader<Stdin>>,
}

impl TerminalOperator {
    pub fn stdin() -> Self {
        TerminalOperator {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Operator for TerminalOperator {
    fn notify(&mut self, notice: Notice) {
        match notice {
            Notice::Success(message) => emit(&format!("{} {message}\n", "[OK]".green())),
            Notice::Error(message) => report_error(&message),
        }
    }

    fn confirm(&mut self, question: &str) -> impl Future<Output = bool> + Send {
        let prompt = format!("{question} [y/N] ");
        async move {
            let mut stdout = tokio::io::stdout();
            if stdout.write_all(prompt.as_bytes()).await.is_err() || stdout.flush().await.is_err()
            {
                return false;
            }
            match self.lines.next_line().await {
                Ok(Some(answer)) => {
                    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
                }
                _ => false,
            }
        }
    }
}

/// Mutation failures carry the backend's message, or "unknown error".
fn submit(result: beepf_console::Result<()>, action: &str) -> Result<()> {
    result.map_err(|e| anyhow!("{action} failed: {}", e.user_message()))
}

/// Optional cluster fields; on edit, missing ones keep their current value.
pub struct ClusterFields {
    pub name: Option<String>,
    pub master_ip: Option<String>,
    pub description: Option<String>,
}

pub struct Console {
    client: BeepfClient,
    page: CancellationToken,
}

impl Console {
    pub fn new(client: BeepfClient, page: CancellationToken) -> Self {
        Console { client, page }
    }

    /// Run one fetch under the page token.
    async fn fetch<T, F>(&self, what: &str, future: F) -> Result<T>
    where
        T: Send + 'static,
        F: Future<Output = beepf_console::Result<T>> + Send + 'static,
    {
        CancelableRequest::spawn(&self.page, future)
            .wait()
            .await
            .with_context(|| format!("failed to load {what}"))
    }

    async fn find_cluster(&self, cluster_id: i64) -> Result<Cluster> {
        let client = self.client.clone();
        let list = self
            .fetch("clusters", async move { client.list_clusters().await })
            .await?;
        list.into_iter()
            .find(|c| c.id == cluster_id)
            .ok_or_else(|| anyhow!("cluster {cluster_id} not found"))
    }

    /// Fetch and print a page.
    pub async fn show(&self, page: Page) -> Result<ExitCode> {
        let mut out = String::new();
        let client = self.client.clone();
        match page {
            Page::ClusterList => {
                let list = self
                    .fetch("clusters", async move { client.list_clusters().await })
                    .await?;
                clusters::render_cluster_list(&mut out, &list)?;
            }
            Page::ClusterCreate => {
                out.push_str(
                    "Create a cluster with:\n  beepf clusters create --name <NAME> --master-ip <IP> [--description <TEXT>]\n",
                );
            }
            Page::ClusterEdit { cluster_id } => {
                let cluster = self.find_cluster(cluster_id).await?;
                clusters::render_cluster_list(&mut out, std::slice::from_ref(&cluster))?;
                out.push_str(&format!(
                    "Edit it with:\n  beepf clusters edit {cluster_id} [--name <NAME>] [--master-ip <IP>] [--description <TEXT>]\n"
                ));
            }
            Page::ComponentList => {
                let list = self
                    .fetch("components", async move { client.list_components().await })
                    .await?;
                components::render_component_list(&mut out, &list)?;
            }
            Page::ComponentUpload => {
                out.push_str(
                    "Upload a component with:\n  beepf components upload <FILE> [--name <NAME>] [--description <TEXT>]\n",
                );
            }
            Page::ComponentDetail { component_id } => {
                let component = self
                    .fetch(&format!("component {component_id}"), async move {
                        client.get_component(component_id).await
                    })
                    .await?;
                components::render_component(&mut out, &component)?;
            }
            Page::TaskList => {
                let list = self
                    .fetch("tasks", async move { client.list_tasks().await })
                    .await?;
                tasks::render_task_list(&mut out, &list)?;
            }
            Page::TaskDetail { task_id } => {
                let detail = pages::load_task_detail(&self.client, task_id, &self.page).await;
                if detail.is_cancelled() {
                    return Err(beepf_console::Error::Cancelled.into());
                }
                tasks::render_task_detail(&mut out, &detail)?;
                emit(&out);
                let failed = detail.task.is_err() || detail.metrics.is_err();
                return Ok(if failed {
                    ExitCode::FAILURE
                } else {
                    ExitCode::SUCCESS
                });
            }
            Page::NodeResources => {
                self.observe(&mut out, ObservabilityView::NodeResources)
                    .await?
            }
            Page::NodeMetrics => self.observe(&mut out, ObservabilityView::NodeMetrics).await?,
            Page::ProgramDetail { program_id } => {
                self.observe(&mut out, ObservabilityView::Program(program_id))
                    .await?
            }
            Page::Topology => self.observe(&mut out, ObservabilityView::Topology).await?,
            Page::Workflow => views::render_placeholder(&mut out, "Workflow")?,
        }
        emit(&out);
        Ok(ExitCode::SUCCESS)
    }

    async fn observe(&self, out: &mut String, view: ObservabilityView) -> Result<()> {
        let client = self.client.clone();
        let document = self
            .fetch(&view.title().to_lowercase(), async move {
                client.observability(view).await
            })
            .await?;
        observability::render_document(out, &view.title(), &document)?;
        Ok(())
    }

    pub async fn create_cluster(&self, fields: ClusterFields) -> Result<ExitCode> {
        let (Some(name), Some(master_ip)) = (fields.name, fields.master_ip) else {
            return Err(anyhow!("--name and --master-ip are required"));
        };
        let spec = ClusterSpec {
            name,
            master_ip,
            description: fields.description,
        };
        submit(self.client.create_cluster(&spec).await, "create cluster")?;
        info!("created cluster {}", spec.name);
        let mut out = String::new();
        clusters::render_cluster_saved(&mut out, &spec, None)?;
        emit(&out);
        Ok(ExitCode::SUCCESS)
    }

    pub async fn edit_cluster(&self, cluster_id: i64, fields: ClusterFields) -> Result<ExitCode> {
        let current = self.find_cluster(cluster_id).await?;
        let spec = ClusterSpec {
            name: fields.name.unwrap_or(current.name),
            master_ip: fields.master_ip.unwrap_or(current.master_ip),
            description: fields.description.or(current.description),
        };
        submit(
            self.client.update_cluster(cluster_id, &spec).await,
            "update cluster",
        )?;
        info!("updated cluster {cluster_id}");
        let mut out = String::new();
        clusters::render_cluster_saved(&mut out, &spec, Some(cluster_id))?;
        emit(&out);
        Ok(ExitCode::SUCCESS)
    }

    pub async fn upload_component(&self, upload: ComponentUpload) -> Result<ExitCode> {
        submit(
            self.client.upload_component(&upload).await,
            "upload component",
        )?;
        info!("uploaded component from {}", upload.file.display());
        emit(&format!(
            "{} Component uploaded from {}\n",
            "[OK]".green(),
            upload.file.display()
        ));
        Ok(ExitCode::SUCCESS)
    }

    pub async fn stop_task(&self, task_id: i64, assume_yes: bool) -> Result<ExitCode> {
        let mut operator = TerminalOperator::stdin();
        let outcome = pages::stop_task(&self.client, task_id, &mut operator, assume_yes)
            .await
            .with_context(|| format!("failed to load task {task_id}"))?;
        match outcome {
            StopOutcome::Stopped(Some(task)) => {
                let mut out = String::new();
                tasks::render_task(&mut out, &task)?;
                emit(&out);
                Ok(ExitCode::SUCCESS)
            }
            StopOutcome::Stopped(None) => Ok(ExitCode::SUCCESS),
            StopOutcome::NotRunning(status) => {
                report_error(&format!(
                    "task {task_id} is not running (status: {})",
                    format::status(status)
                ));
                Ok(ExitCode::FAILURE)
            }
            StopOutcome::Declined => {
                emit("Aborted\n");
                Ok(ExitCode::SUCCESS)
            }
            StopOutcome::Failed(_) => Ok(ExitCode::FAILURE),
        }
    }

    /// Every normalized point of a task's series, as text or JSON.
    pub async fn task_metrics(
        &self,
        task_id: i64,
        series: Option<MetricSeries>,
        json: bool,
    ) -> Result<ExitCode> {
        let client = self.client.clone();
        let metrics = self
            .fetch(&format!("metrics of task {task_id}"), async move {
                client.get_task_metrics(task_id).await
            })
            .await?;

        if json {
            let mut all = tasks::normalized_series_in(&metrics, &Local);
            if let Some(only) = series {
                all.retain(|field, _| *field == only.field());
            }
            emit(&format!("{}\n", serde_json::to_string_pretty(&all)?));
            return Ok(ExitCode::SUCCESS);
        }

        let mut out = String::new();
        for each in MetricSeries::ALL {
            if series.is_some_and(|only| only != each) {
                continue;
            }
            tasks::render_points(&mut out, each, &normalize(metrics.series(each)))?;
        }
        emit(&out);
        Ok(ExitCode::SUCCESS)
    }
}
