//! Automatic table placement and relationship routing.
//!
//! Layout proceeds per connected component: pick the most-connected table as
//! the root, spread the rest into BFS-level columns to its right, centre each
//! column vertically, and lay components out left to right in descending size
//! order. Routing and collision handling live in their own submodules.

pub mod collision;
pub mod graph;
pub mod routing;

pub use collision::{is_colliding, resolve_overlaps};
pub use graph::SchemaGraph;
pub use routing::{RoutedEdge, route_all, route_edge};

use std::cmp::Reverse;
use std::collections::HashMap;

use crate::config::LayoutConfig;
use crate::ir::{Point, Relationship, Table};

/// Compute fresh positions for every table. Input positions are ignored;
/// the result depends only on the schema and the config, so the same input
/// always produces the same picture.
pub fn auto_layout(
    tables: &[Table],
    relationships: &[Relationship],
    config: &LayoutConfig,
) -> Vec<Table> {
    let mut out: Vec<Table> = tables.to_vec();
    if out.is_empty() {
        return out;
    }

    let graph = SchemaGraph::build(tables, relationships);
    let mut components = graph.components();
    // big components first; the stable sort keeps input order on ties
    components.sort_by_key(|c| Reverse(c.len()));

    let index_of: HashMap<&str, usize> = tables
        .iter()
        .enumerate()
        .map(|(idx, t)| (t.id.as_str(), idx))
        .collect();

    let column_step = config.table_width + config.spacing_x;
    let mut cursor_x = config.left_margin;

    for component in &components {
        // the hub anchors the component; earliest input position wins ties
        let root = component
            .iter()
            .max_by_key(|id| (graph.degree(id.as_str()), Reverse(graph.input_index(id.as_str()))))
            .expect("components are non-empty");
        let levels = graph.levels_from(root);

        let max_level = component
            .iter()
            .map(|id| levels[id.as_str()])
            .max()
            .unwrap_or(0);
        let mut columns: Vec<Vec<&String>> = vec![Vec::new(); max_level + 1];
        for id in component {
            columns[levels[id.as_str()]].push(id);
        }
        // hubs toward the top of each column, input order breaking ties
        for column in &mut columns {
            column.sort_by_key(|id| (Reverse(graph.degree(id.as_str())), graph.input_index(id.as_str())));
        }

        let heights: Vec<f32> = columns
            .iter()
            .map(|column| {
                let total: f32 = column
                    .iter()
                    .map(|id| out[index_of[id.as_str()]].height)
                    .sum();
                total + (column.len().saturating_sub(1)) as f32 * config.spacing_y
            })
            .collect();
        let component_height = heights.iter().cloned().fold(0.0, f32::max);

        for (level, column) in columns.iter().enumerate() {
            let x = cursor_x + level as f32 * column_step;
            let mut y = config.top_margin + (component_height - heights[level]) / 2.0;
            for id in column {
                let idx = index_of[id.as_str()];
                out[idx].position = Point::new(x, y);
                y += out[idx].height + config.spacing_y;
            }
        }

        let component_width = max_level as f32 * column_step + config.table_width;
        cursor_x += component_width + config.component_gap_x;
    }

    out
}
