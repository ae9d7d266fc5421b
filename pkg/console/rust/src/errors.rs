// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed by the BeePF project.
// Copyright 2026-present BeePF authors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {}", message.as_deref().unwrap_or("unknown error"))]
    Api {
        status: u16,
        message: Option<String>,
    },

    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("no page at {path}")]
    RouteNotFound { path: String },

    #[error("invalid parameter {name}={value} in {path}")]
    RouteParam {
        path: String,
        name: &'static str,
        value: String,
    },

    #[error("request cancelled")]
    Cancelled,

    #[error("request task failed: {0}")]
    TaskFailed(String),
}

impl Error {
    /// Message to show the operator for a failed mutation: the backend's own
    /// message when it sent one, a generic fallback otherwise.
    pub fn user_message(&self) -> String {
        match self {
            Error::Api {
                message: Some(message),
                ..
            } => message.clone(),
            Error::Api { message: None, .. } => "unknown error".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
