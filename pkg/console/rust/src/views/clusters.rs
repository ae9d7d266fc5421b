// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed by the BeePF project.
// Copyright 2026-present BeePF authors.

use std::fmt::{self, Write};

use crate::model::{Cluster, ClusterSpec};
use crate::views::format;

pub fn render_cluster_list(out: &mut impl Write, clusters: &[Cluster]) -> fmt::Result {
    if clusters.is_empty() {
        return writeln!(out, "No clusters");
    }

    writeln!(
        out,
        "{:<6}  {:<24}  {:<16}  {:<32}  {:<19}",
        "ID", "NAME", "MASTER IP", "DESCRIPTION", "CREATED"
    )?;
    writeln!(
        out,
        "{:-<6}  {:-<24}  {:-<16}  {:-<32}  {:-<19}",
        "", "", "", "", ""
    )?;
    for cluster in clusters {
        writeln!(
            out,
            "{:<6}  {:<24}  {:<16}  {:<32}  {:<19}",
            cluster.id,
            format::truncate(&cluster.name, 24),
            format::or_dash(Some(cluster.master_ip.as_str())),
            format::truncate(format::or_dash(cluster.description.as_deref()), 32),
            format::datetime(cluster.created_at.as_deref()),
        )?;
    }
    writeln!(out)
}

/// Confirmation printed after a create or edit went through.
pub fn render_cluster_saved(
    out: &mut impl Write,
    spec: &ClusterSpec,
    cluster_id: Option<i64>,
) -> fmt::Result {
    match cluster_id {
        Some(id) => writeln!(out, "[OK] Cluster {id} updated")?,
        None => writeln!(out, "[OK] Cluster created")?,
    }
    writeln!(out, "  Name:            {}", spec.name)?;
    writeln!(out, "  Master IP:       {}", spec.master_ip)?;
    writeln!(
        out,
        "  Description:     {}",
        format::or_dash(spec.description.as_deref())
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_list() {
        let clusters = vec![Cluster {
            id: 3,
            name: "edge-east".to_string(),
            master_ip: "10.0.0.7".to_string(),
            ..Cluster::default()
        }];
        let mut out = String::new();
        render_cluster_list(&mut out, &clusters).unwrap();
        let row = out.lines().nth(2).unwrap();
        assert!(row.starts_with("3 "));
        assert!(row.contains("edge-east"));
        assert!(row.contains("10.0.0.7"));
    }

    #[test]
    fn test_empty_cluster_list() {
        let mut out = String::new();
        render_cluster_list(&mut out, &[]).unwrap();
        assert_eq!(out, "No clusters\n");
    }

    #[test]
    fn test_saved_message() {
        let spec = ClusterSpec {
            name: "edge-east".to_string(),
            master_ip: "10.0.0.7".to_string(),
            description: None,
        };
        let mut out = String::new();
        render_cluster_saved(&mut out, &spec, Some(3)).unwrap();
        assert!(out.starts_with("[OK] Cluster 3 updated"));
        assert!(out.contains("Description:     -"));
    }
}
