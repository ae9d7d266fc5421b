// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed by the BeePF project.
// Copyright 2026-present BeePF authors.

//! Console navigation: the page table, the menu tree and path resolution.
//!
//! Paths are the same ones the web console used, so links copied from it
//! (`/task/42`, `/clusters/edit/3`, ...) open the matching page here.

use crate::errors::{Error, Result};

/// Bounds redirect chains; the table has none longer than one hop.
const MAX_REDIRECTS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    ClusterList,
    ClusterCreate,
    ClusterEdit { cluster_id: i64 },
    ComponentList,
    ComponentUpload,
    ComponentDetail { component_id: i64 },
    TaskList,
    TaskDetail { task_id: i64 },
    NodeResources,
    NodeMetrics,
    ProgramDetail { program_id: i64 },
    Topology,
    Workflow,
}

/// Parameters bound while matching a path against a pattern.
pub struct Params<'a> {
    path: &'a str,
    values: Vec<(&'static str, &'a str)>,
}

impl Params<'_> {
    pub fn id(&self, name: &'static str) -> Result<i64> {
        let value = self
            .values
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
            .unwrap_or_default();
        value.parse().map_err(|_| Error::RouteParam {
            path: self.path.to_string(),
            name,
            value: value.to_string(),
        })
    }
}

pub enum Target {
    Page(fn(&Params<'_>) -> Result<Page>),
    Redirect(&'static str),
}

pub struct Route {
    /// Slash separated; `:name` segments bind a parameter.
    pub pattern: &'static str,
    pub target: Target,
}

pub static ROUTES: &[Route] = &[
    Route {
        pattern: "/",
        target: Target::Redirect("/components/list"),
    },
    Route {
        pattern: "/clusters/list",
        target: Target::Page(|_| Ok(Page::ClusterList)),
    },
    Route {
        pattern: "/clusters/create",
        target: Target::Page(|_| Ok(Page::ClusterCreate)),
    },
    Route {
        pattern: "/clusters/edit/:id",
        target: Target::Page(|p| {
            Ok(Page::ClusterEdit {
                cluster_id: p.id("id")?,
            })
        }),
    },
    Route {
        pattern: "/components/list",
        target: Target::Page(|_| Ok(Page::ComponentList)),
    },
    Route {
        pattern: "/components/create",
        target: Target::Redirect("/components/upload"),
    },
    Route {
        pattern: "/components/upload",
        target: Target::Page(|_| Ok(Page::ComponentUpload)),
    },
    Route {
        pattern: "/component/:id",
        target: Target::Page(|p| {
            Ok(Page::ComponentDetail {
                component_id: p.id("id")?,
            })
        }),
    },
    Route {
        pattern: "/tasks/list",
        target: Target::Page(|_| Ok(Page::TaskList)),
    },
    Route {
        pattern: "/task/:taskId",
        target: Target::Page(|p| {
            Ok(Page::TaskDetail {
                task_id: p.id("taskId")?,
            })
        }),
    },
    Route {
        pattern: "/observability",
        target: Target::Redirect("/observability/node-resources"),
    },
    Route {
        pattern: "/observability/node-resources",
        target: Target::Page(|_| Ok(Page::NodeResources)),
    },
    Route {
        pattern: "/observability/node-metrics",
        target: Target::Page(|_| Ok(Page::NodeMetrics)),
    },
    Route {
        pattern: "/observability/program-detail/:progId",
        target: Target::Page(|p| {
            Ok(Page::ProgramDetail {
                program_id: p.id("progId")?,
            })
        }),
    },
    Route {
        pattern: "/observability/topo",
        target: Target::Page(|_| Ok(Page::Topology)),
    },
    Route {
        pattern: "/workflow",
        target: Target::Page(|_| Ok(Page::Workflow)),
    },
];

/// An entry of the navigation menu. Groups have no path of their own.
pub struct MenuItem {
    pub label: &'static str,
    pub path: Option<&'static str>,
    pub children: &'static [MenuItem],
}

const fn link(label: &'static str, path: &'static str) -> MenuItem {
    MenuItem {
        label,
        path: Some(path),
        children: &[],
    }
}

pub static MENU: &[MenuItem] = &[
    MenuItem {
        label: "Clusters",
        path: None,
        children: &[
            link("Cluster list", "/clusters/list"),
            link("New cluster", "/clusters/create"),
        ],
    },
    MenuItem {
        label: "Components",
        path: None,
        children: &[
            link("Component list", "/components/list"),
            link("Upload component", "/components/upload"),
        ],
    },
    MenuItem {
        label: "Tasks",
        path: None,
        children: &[link("Task list", "/tasks/list")],
    },
    MenuItem {
        label: "Observability",
        path: None,
        children: &[
            link("Node resources", "/observability/node-resources"),
            link("Node metrics", "/observability/node-metrics"),
            link("Topology", "/observability/topo"),
        ],
    },
    link("Workflow", "/workflow"),
];

/// Normalize a user supplied path: drop query and fragment, make it absolute,
/// strip trailing slashes.
fn clean(path: &str) -> String {
    let path = path
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim();
    let trimmed = path.trim_matches('/');
    format!("/{trimmed}")
}

fn match_pattern<'a>(pattern: &'static str, path: &'a str) -> Option<Params<'a>> {
    let mut pattern_segments = pattern.split('/').filter(|s| !s.is_empty());
    let mut path_segments = path.split('/').filter(|s| !s.is_empty());
    let mut values = Vec::new();

    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return Some(Params { path, values }),
            (Some(expected), Some(actual)) => {
                if let Some(name) = expected.strip_prefix(':') {
                    values.push((name, actual));
                } else if expected != actual {
                    return None;
                }
            }
            _ => return None,
        }
    }
}

/// Resolve `path` to the page it shows, following redirects.
pub fn resolve(path: &str) -> Result<Page> {
    let mut current = clean(path);
    for _ in 0..=MAX_REDIRECTS {
        let redirect = {
            let Some((route, params)) = ROUTES
                .iter()
                .find_map(|route| match_pattern(route.pattern, &current).map(|p| (route, p)))
            else {
                return Err(Error::RouteNotFound {
                    path: current.clone(),
                });
            };
            match &route.target {
                Target::Page(build) => return build(&params),
                Target::Redirect(to) => *to,
            }
        };
        current = redirect.to_string();
    }
    Err(Error::RouteNotFound { path: current })
}

/// Path of `page`, the inverse of [`resolve`].
pub fn path_of(page: Page) -> String {
    match page {
        Page::ClusterList => "/clusters/list".to_string(),
        Page::ClusterCreate => "/clusters/create".to_string(),
        Page::ClusterEdit { cluster_id } => format!("/clusters/edit/{cluster_id}"),
        Page::ComponentList => "/components/list".to_string(),
        Page::ComponentUpload => "/components/upload".to_string(),
        Page::ComponentDetail { component_id } => format!("/component/{component_id}"),
        Page::TaskList => "/tasks/list".to_string(),
        Page::TaskDetail { task_id } => format!("/task/{task_id}"),
        Page::NodeResources => "/observability/node-resources".to_string(),
        Page::NodeMetrics => "/observability/node-metrics".to_string(),
        Page::ProgramDetail { program_id } => {
            format!("/observability/program-detail/{program_id}")
        }
        Page::Topology => "/observability/topo".to_string(),
        Page::Workflow => "/workflow".to_string(),
    }
}
