// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed by the BeePF project.
// Copyright 2026-present BeePF authors.

//! HTTP client for the BeePF backend API.

use log::debug;
use reqwest::RequestBuilder;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::Config;
use crate::errors::{Error, Result};
use crate::model::{
    Cluster, ClusterSpec, Component, Task, TaskMetrics, decode_body, error_message,
};

/// Observability documents served by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservabilityView {
    NodeResources,
    NodeMetrics,
    Topology,
    Program(i64),
}

impl ObservabilityView {
    fn path(self) -> String {
        match self {
            ObservabilityView::NodeResources => "/api/observability/node-resources".to_string(),
            ObservabilityView::NodeMetrics => "/api/observability/node-metrics".to_string(),
            ObservabilityView::Topology => "/api/observability/topology".to_string(),
            ObservabilityView::Program(id) => format!("/api/observability/programs/{id}"),
        }
    }

    pub fn title(self) -> String {
        match self {
            ObservabilityView::NodeResources => "Node resources".to_string(),
            ObservabilityView::NodeMetrics => "Node metrics".to_string(),
            ObservabilityView::Topology => "Topology".to_string(),
            ObservabilityView::Program(id) => format!("Program {id}"),
        }
    }
}

/// A program file to upload as a new component.
#[derive(Debug, Clone)]
pub struct ComponentUpload {
    pub file: PathBuf,
    /// Defaults to the file stem.
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Clone)]
pub struct BeepfClient {
    base_url: String,
    client: reqwest::Client,
}

impl BeepfClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| Error::Http {
                url: base_url.to_string(),
                source,
            })?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api_url, config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and return the body of a successful response.
    /// Non-2xx responses become [`Error::Api`] carrying the backend's message.
    async fn execute(&self, url: &str, request: RequestBuilder) -> Result<String> {
        let response = request.send().await.map_err(|source| Error::Http {
            url: url.to_string(),
            source,
        })?;
        let status = response.status();
        let body = response.text().await.map_err(|source| Error::Http {
            url: url.to_string(),
            source,
        })?;
        debug!("{url} -> {status} ({} bytes)", body.len());

        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }
        Ok(body)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        debug!("GET {url}");
        let body = self.execute(&url, self.client.get(&url)).await?;
        decode_body(&body).map_err(|source| Error::Decode { url, source })
    }

    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        self.get("/api/tasks").await
    }

    pub async fn get_task(&self, id: i64) -> Result<Task> {
        self.get(&format!("/api/tasks/{id}")).await
    }

    pub async fn get_task_metrics(&self, id: i64) -> Result<TaskMetrics> {
        self.get(&format!("/api/tasks/{id}/metrics")).await
    }

    /// Ask the backend to move the task to its stopped state.
    pub async fn stop_task(&self, id: i64) -> Result<()> {
        let url = self.url(&format!("/api/tasks/{id}/stop"));
        debug!("POST {url}");
        self.execute(&url, self.client.post(&url)).await?;
        Ok(())
    }

    pub async fn list_clusters(&self) -> Result<Vec<Cluster>> {
        self.get("/api/clusters").await
    }

    pub async fn create_cluster(&self, spec: &ClusterSpec) -> Result<()> {
        let url = self.url("/api/clusters");
        debug!("POST {url}");
        self.execute(&url, self.client.post(&url).json(spec)).await?;
        Ok(())
    }

    pub async fn update_cluster(&self, id: i64, spec: &ClusterSpec) -> Result<()> {
        let url = self.url(&format!("/api/clusters/{id}"));
        debug!("PUT {url}");
        self.execute(&url, self.client.put(&url).json(spec)).await?;
        Ok(())
    }

    pub async fn list_components(&self) -> Result<Vec<Component>> {
        self.get("/api/components").await
    }

    pub async fn get_component(&self, id: i64) -> Result<Component> {
        self.get(&format!("/api/components/{id}")).await
    }

    pub async fn upload_component(&self, upload: &ComponentUpload) -> Result<()> {
        let bytes = tokio::fs::read(&upload.file)
            .await
            .map_err(|source| Error::Io {
                context: format!("reading {}", upload.file.display()),
                source,
            })?;
        let file_name = upload
            .file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "program.o".to_string());
        let name = match &upload.name {
            Some(name) => name.clone(),
            None => upload
                .file
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| file_name.clone()),
        };

        let mut form = Form::new()
            .text("name", name)
            .part("file", Part::bytes(bytes).file_name(file_name));
        if let Some(description) = &upload.description {
            form = form.text("description", description.clone());
        }

        let url = self.url("/api/components/upload");
        debug!("POST {url} (multipart)");
        self.execute(&url, self.client.post(&url).multipart(form))
            .await?;
        Ok(())
    }

    pub async fn observability(&self, view: ObservabilityView) -> Result<serde_json::Value> {
        self.get(&view.path()).await
    }
}
