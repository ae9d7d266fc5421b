// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed by the BeePF project.
// Copyright 2026-present BeePF authors.

use chrono::{Local, TimeZone};
use colored::Colorize;
use std::collections::BTreeMap;
use std::fmt::{self, Write};

use crate::metrics::{MetricSeries, NormalizedPoint, normalize_in, summarize};
use crate::model::{Task, TaskMetrics};
use crate::pages::TaskDetailPage;
use crate::views::format;

const TREND_WIDTH: usize = 24;

pub fn render_task_list(out: &mut impl Write, tasks: &[Task]) -> fmt::Result {
    if tasks.is_empty() {
        return writeln!(out, "No tasks");
    }

    writeln!(
        out,
        "{:<6}  {:<24}  {:<20}  {:<10}  {:<8}  {:<19}",
        "ID", "NAME", "COMPONENT", "STATUS", "STEP", "CREATED"
    )?;
    writeln!(
        out,
        "{:-<6}  {:-<24}  {:-<20}  {:-<10}  {:-<8}  {:-<19}",
        "", "", "", "", "", ""
    )?;
    for task in tasks {
        writeln!(
            out,
            "{:<6}  {:<24}  {:<20}  {}  {:<8}  {:<19}",
            task.id,
            format::truncate(&task.name, 24),
            format::truncate(&task.component_name, 20),
            format::status_cell(task.status, 10),
            task.step.to_string(),
            format::datetime(task.created_at.as_deref()),
        )?;
    }
    writeln!(out)
}

/// Basic information and program status of one task.
pub fn render_task(out: &mut impl Write, task: &Task) -> fmt::Result {
    writeln!(out, "\nTask {}", task.name.bold())?;
    writeln!(out, "{}", "─".repeat(60))?;
    writeln!(out, "  Status:          {}", format::status(task.status))?;
    writeln!(out, "  Component:       {}", format::or_dash(Some(task.component_name.as_str())))?;
    writeln!(out, "  Step:            {}", task.step)?;

    writeln!(out, "\nBASIC INFORMATION")?;
    writeln!(out, "  ID:              {}", task.id)?;
    writeln!(out, "  Name:            {}", format::or_dash(Some(task.name.as_str())))?;
    writeln!(out, "  Description:     {}", format::or_dash(task.description.as_deref()))?;
    writeln!(out, "  Component ID:    {}", task.component_id)?;
    if let Some(error) = task.error.as_deref().filter(|e| !e.trim().is_empty()) {
        writeln!(out, "  Error:           {}", error.red())?;
    }
    writeln!(out, "  Created:         {}", format::datetime(task.created_at.as_deref()))?;
    writeln!(out, "  Updated:         {}", format::datetime(task.updated_at.as_deref()))?;

    writeln!(out, "\nPROGRAM STATUS")?;
    if task.prog_status.is_empty() {
        return writeln!(out, "  No programs");
    }
    writeln!(
        out,
        "  {:<6}  {:<40}  {:<10}  {:<19}  {}",
        "ID", "PROGRAM", "STATUS", "UPDATED", "ERROR"
    )?;
    for prog in &task.prog_status {
        writeln!(
            out,
            "  {:<6}  {:<40}  {}  {:<19}  {}",
            prog.id,
            format::truncate(&prog.program_name, 40),
            format::status_cell(prog.status, 10),
            format::datetime(prog.updated_at.as_deref()),
            format::or_dash(prog.error.as_deref()),
        )?;
    }
    Ok(())
}

/// One block per series: a row per label with its range, latest value and a
/// trend line, or "no data" for an empty series.
pub fn render_metrics_in<Tz: TimeZone>(
    out: &mut impl Write,
    metrics: &TaskMetrics,
    tz: &Tz,
) -> fmt::Result {
    writeln!(out, "\nMETRICS")?;
    for series in MetricSeries::ALL {
        let points = normalize_in(metrics.series(series), tz);
        writeln!(out, "\n  {}", series.to_string().bold())?;
        if points.is_empty() {
            writeln!(out, "    no data")?;
            continue;
        }
        writeln!(
            out,
            "    {:<32}  {:>6}  {:>12}  {:>12}  {:>12}  {:<12}  {:<12}  {}",
            "LABEL", "POINTS", "MIN", "MAX", "LATEST", "FROM", "TO", "TREND"
        )?;
        for summary in summarize(&points) {
            writeln!(
                out,
                "    {:<32}  {:>6}  {:>12}  {:>12}  {:>12}  {:<12}  {:<12}  {}",
                format::truncate(&summary.label, 32),
                summary.values.len(),
                format::value(summary.min()),
                format::value(summary.max()),
                summary.latest().map_or_else(|| "-".to_string(), format::value),
                summary.first_time,
                summary.last_time,
                format::sparkline(&summary.values, TREND_WIDTH),
            )?;
        }
    }
    Ok(())
}

pub fn render_task_detail(out: &mut impl Write, page: &TaskDetailPage) -> fmt::Result {
    render_task_detail_in(out, page, &Local)
}

/// Each section renders from whatever its own request produced, so a failed
/// metrics fetch still shows the task and the other way round.
pub fn render_task_detail_in<Tz: TimeZone>(
    out: &mut impl Write,
    page: &TaskDetailPage,
    tz: &Tz,
) -> fmt::Result {
    for notice in page.notifications() {
        writeln!(out, "{} {notice}", "[ERROR]".red())?;
    }
    match &page.task {
        Ok(task) => render_task(out, task)?,
        Err(_) => writeln!(out, "\nNo information for task {}", page.task_id)?,
    }
    if let Ok(metrics) = &page.metrics {
        render_metrics_in(out, metrics, tz)?;
    }
    Ok(())
}

/// Every normalized point of one series, in display order.
pub fn render_points(
    out: &mut impl Write,
    series: MetricSeries,
    points: &[NormalizedPoint],
) -> fmt::Result {
    writeln!(out, "{}", series.to_string().bold())?;
    if points.is_empty() {
        return writeln!(out, "  no data");
    }
    for point in points {
        writeln!(
            out,
            "  {:<12}  {:>12}  {}",
            point.display_time,
            format::value(point.value),
            point.source_label
        )?;
    }
    Ok(())
}

/// All five series normalized, keyed by their wire field name.
pub fn normalized_series_in<Tz: TimeZone>(
    metrics: &TaskMetrics,
    tz: &Tz,
) -> BTreeMap<&'static str, Vec<NormalizedPoint>> {
    MetricSeries::ALL
        .into_iter()
        .map(|series| (series.field(), normalize_in(metrics.series(series), tz)))
        .collect()
}
