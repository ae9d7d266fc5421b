// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed by the BeePF project.
// Copyright 2026-present BeePF authors.

//! Plain-text rendering of each console page. Renderers write into any
//! [`std::fmt::Write`] so the binary prints them and tests inspect them.

pub mod clusters;
pub mod components;
pub mod format;
pub mod observability;
pub mod tasks;

use std::fmt::{self, Write};

use crate::router::MenuItem;

/// The navigation menu as an indented tree with the path of each page.
pub fn render_menu(out: &mut impl Write, items: &[MenuItem]) -> fmt::Result {
    render_menu_level(out, items, 0)
}

fn render_menu_level(out: &mut impl Write, items: &[MenuItem], depth: usize) -> fmt::Result {
    let indent = "  ".repeat(depth);
    for item in items {
        match item.path {
            Some(path) => writeln!(out, "{indent}{:<24}  {path}", item.label)?,
            None => writeln!(out, "{indent}{}", item.label)?,
        }
        render_menu_level(out, item.children, depth + 1)?;
    }
    Ok(())
}

/// Shown for pages the console knows about but has nothing to fetch for.
pub fn render_placeholder(out: &mut impl Write, title: &str) -> fmt::Result {
    writeln!(out, "{title}")?;
    writeln!(out, "  This page has no content yet.")
}
