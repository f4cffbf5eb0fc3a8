//! Serializable snapshot of a laid-out diagram: table boxes, routed edge
//! polylines with their connector points, and the active theme. This is the
//! crate's output format.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use crate::config::LayoutConfig;
use crate::ir::{Column, Diagram, Relationship, Table};
use crate::layout::{RoutedEdge, route_edge};
use crate::theme::Theme;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramDump {
    pub tables: Vec<TableDump>,
    pub edges: Vec<EdgeDump>,
    pub theme: Theme,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDump {
    pub id: String,
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub columns: Vec<ColumnDump>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDump {
    pub id: String,
    pub name: String,
    pub data_type: String,
    pub is_primary: bool,
    pub is_foreign: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeDump {
    pub id: String,
    pub source_table_id: String,
    pub source_column_id: String,
    pub target_table_id: String,
    pub target_column_id: String,
    /// Orthogonal polyline, already tail-shortened for the arrowhead.
    pub points: Vec<[f32; 2]>,
    /// Exact connector point on the source table border.
    pub source: [f32; 2],
    /// Exact connector point on the target table border.
    pub target: [f32; 2],
    pub bends: usize,
}

impl TableDump {
    fn new(table: &Table) -> Self {
        Self {
            id: table.id.clone(),
            name: table.name.clone(),
            x: table.position.x,
            y: table.position.y,
            width: table.width,
            height: table.height,
            columns: table.columns.iter().map(ColumnDump::new).collect(),
        }
    }
}

impl ColumnDump {
    fn new(column: &Column) -> Self {
        Self {
            id: column.id.clone(),
            name: column.name.clone(),
            data_type: column.data_type.clone(),
            is_primary: column.is_primary,
            is_foreign: column.is_foreign,
        }
    }
}

impl EdgeDump {
    fn new(relationship: &Relationship, edge: &RoutedEdge) -> Self {
        Self {
            id: relationship.id.clone(),
            source_table_id: relationship.source_table_id.clone(),
            source_column_id: relationship.source_column_id.clone(),
            target_table_id: relationship.target_table_id.clone(),
            target_column_id: relationship.target_column_id.clone(),
            points: edge.points.iter().map(|p| [p.x, p.y]).collect(),
            source: [edge.source.x, edge.source.y],
            target: [edge.target.x, edge.target.y],
            bends: edge.bend_count(),
        }
    }
}

/// Route every relationship against the current positions and assemble the
/// dump. Relationships whose endpoints cannot be resolved are left out.
pub fn build_dump(diagram: &Diagram, config: &LayoutConfig, theme: &Theme) -> DiagramDump {
    let edges = diagram
        .relationships
        .iter()
        .filter_map(|rel| {
            route_edge(&diagram.tables, rel, config).map(|edge| EdgeDump::new(rel, &edge))
        })
        .collect();
    DiagramDump {
        tables: diagram.tables.iter().map(TableDump::new).collect(),
        edges,
        theme: theme.clone(),
    }
}

/// Write the dump as JSON to `path`, or to stdout when no path is given.
pub fn write_dump(dump: &DiagramDump, path: Option<&Path>, pretty: bool) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating output file {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_json(&mut writer, dump, pretty)?;
            writer.flush()?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            write_json(&mut writer, dump, pretty)?;
            writer.write_all(b"\n")?;
        }
    }
    Ok(())
}

fn write_json<W: Write>(writer: &mut W, dump: &DiagramDump, pretty: bool) -> anyhow::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(writer, dump).context("serializing diagram dump")?;
    } else {
        serde_json::to_writer(writer, dump).context("serializing diagram dump")?;
    }
    Ok(())
}
