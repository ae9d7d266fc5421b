// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed by the BeePF project.
// Copyright 2026-present BeePF authors.

use colored::Colorize;
use std::fmt::{self, Write};

use crate::model::Component;
use crate::views::format;

pub fn render_component_list(out: &mut impl Write, components: &[Component]) -> fmt::Result {
    if components.is_empty() {
        return writeln!(out, "No components");
    }

    writeln!(
        out,
        "{:<6}  {:<24}  {:<10}  {:<36}  {:<19}",
        "ID", "NAME", "VERSION", "DESCRIPTION", "CREATED"
    )?;
    writeln!(
        out,
        "{:-<6}  {:-<24}  {:-<10}  {:-<36}  {:-<19}",
        "", "", "", "", ""
    )?;
    for component in components {
        writeln!(
            out,
            "{:<6}  {:<24}  {:<10}  {:<36}  {:<19}",
            component.id,
            format::truncate(&component.name, 24),
            format::or_dash(component.version.as_deref()),
            format::truncate(format::or_dash(component.description.as_deref()), 36),
            format::datetime(component.created_at.as_deref()),
        )?;
    }
    writeln!(out)
}

pub fn render_component(out: &mut impl Write, component: &Component) -> fmt::Result {
    writeln!(out, "\nComponent {}", component.name.bold())?;
    writeln!(out, "{}", "─".repeat(60))?;
    writeln!(out, "  ID:              {}", component.id)?;
    writeln!(out, "  Version:         {}", format::or_dash(component.version.as_deref()))?;
    writeln!(
        out,
        "  Description:     {}",
        format::or_dash(component.description.as_deref())
    )?;
    writeln!(out, "  Created:         {}", format::datetime(component.created_at.as_deref()))?;
    writeln!(out, "  Updated:         {}", format::datetime(component.updated_at.as_deref()))?;

    if !component.extra.is_empty() {
        writeln!(out, "\nATTRIBUTES")?;
        for (key, value) in &component.extra {
            match value {
                serde_json::Value::String(s) => writeln!(out, "  {key}: {s}")?,
                other => writeln!(out, "  {key}: {other}")?,
            }
        }
    }
    Ok(())
}
