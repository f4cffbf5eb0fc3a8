use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::LayoutConfig;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: String,
    pub name: String,
    pub data_type: String,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default)]
    pub is_foreign: bool,
    /// Row order within the table; contiguous 0..n-1 in declaration order.
    pub index: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: String,
    pub name: String,
    pub columns: Vec<Column>,
    #[serde(default)]
    pub position: Point,
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,
}

impl Table {
    pub fn new(id: impl Into<String>, columns: Vec<Column>, config: &LayoutConfig) -> Self {
        let id = id.into();
        let mut table = Self {
            name: id.clone(),
            id,
            columns,
            position: Point::default(),
            width: 0.0,
            height: 0.0,
        };
        table.measure(config);
        table
    }

    /// Width is a fixed constant; height follows the row count. Tables are
    /// never resized after creation.
    pub fn measure(&mut self, config: &LayoutConfig) {
        self.width = config.table_width;
        self.height = config.header_height + self.columns.len() as f32 * config.row_height;
    }

    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    /// World-space y of a column's connector: the vertical centre of its row.
    pub fn row_anchor_y(&self, column: &Column, config: &LayoutConfig) -> f32 {
        self.position.y
            + config.header_height
            + column.index as f32 * config.row_height
            + config.row_height / 2.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub id: String,
    pub source_table_id: String,
    pub source_column_id: String,
    pub target_table_id: String,
    pub target_column_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Diagram {
    pub tables: Vec<Table>,
    pub relationships: Vec<Relationship>,
}

#[derive(Debug, Error)]
pub enum DiagramError {
    #[error("duplicate table id `{0}`")]
    DuplicateTable(String),
    #[error("table `{table}`: column `{column}` has index {actual}, expected {expected}")]
    ColumnIndexGap {
        table: String,
        column: String,
        expected: usize,
        actual: usize,
    },
}

impl Diagram {
    pub fn table(&self, id: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    /// Structural validation of a freshly loaded diagram. Relationships with
    /// missing endpoints are not an error here; they are dropped when routed.
    pub fn validate(&self) -> Result<(), DiagramError> {
        let mut seen = std::collections::HashSet::new();
        for table in &self.tables {
            if !seen.insert(table.id.as_str()) {
                return Err(DiagramError::DuplicateTable(table.id.clone()));
            }
            for (expected, column) in table.columns.iter().enumerate() {
                if column.index != expected {
                    return Err(DiagramError::ColumnIndexGap {
                        table: table.id.clone(),
                        column: column.id.clone(),
                        expected,
                        actual: column.index,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Assign the fixed visual sizes to every table that was loaded without them.
pub fn measure_tables(tables: &mut [Table], config: &LayoutConfig) {
    for table in tables {
        table.measure(config);
    }
}
