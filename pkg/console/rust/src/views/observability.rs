// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed by the BeePF project.
// Copyright 2026-present BeePF authors.

//! Observability documents have no fixed shape; they are shown as pretty JSON.

use colored::Colorize;
use serde_json::Value;
use std::fmt::{self, Write};

fn is_empty(document: &Value) -> bool {
    match document {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

pub fn render_document(out: &mut impl Write, title: &str, document: &Value) -> fmt::Result {
    writeln!(out, "{}", title.bold())?;
    if is_empty(document) {
        return writeln!(out, "  no data");
    }
    let pretty = serde_json::to_string_pretty(document).map_err(|_| fmt::Error)?;
    writeln!(out, "{pretty}")
}
