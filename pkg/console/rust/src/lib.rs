// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed by the BeePF project.
// Copyright 2026-present BeePF authors.

// Correctness
#![deny(clippy::indexing_slicing)]
#![deny(clippy::string_slice)]
#![deny(clippy::cast_possible_wrap)]
// Panicking code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::unimplemented)]
#![deny(clippy::todo)]
// Debug code that shouldn't be in production
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::indexing_slicing
    )
)]

pub mod client;
pub mod config;
mod errors;
pub mod metrics;
pub mod model;
pub mod pages;
pub mod request;
pub mod router;
pub mod state;
pub mod timestamp;
pub mod views;

pub use client::{BeepfClient, ComponentUpload, ObservabilityView};
pub use config::{Config, Overrides};
pub use errors::{Error, Result};
pub use metrics::{MetricPoint, MetricSeries, NormalizedPoint, normalize, normalize_in};
pub use pages::{Notice, Operator, StopOutcome, TaskDetailPage, load_task_detail, stop_task};
pub use router::{Page, resolve};
