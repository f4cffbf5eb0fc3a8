use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Fixed table width; tables are never measured from their text.
    pub table_width: f32,
    pub header_height: f32,
    pub row_height: f32,
    /// Horizontal gap between BFS-level columns inside a component.
    pub spacing_x: f32,
    /// Vertical gap between tables stacked in a column.
    pub spacing_y: f32,
    /// Gap between connected components.
    pub component_gap_x: f32,
    pub top_margin: f32,
    pub left_margin: f32,
    pub routing: RoutingConfig,
    pub collision: CollisionConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            table_width: 220.0,
            header_height: 40.0,
            row_height: 28.0,
            spacing_x: 80.0,
            spacing_y: 80.0,
            component_gap_x: 240.0,
            top_margin: 20.0,
            left_margin: 20.0,
            routing: RoutingConfig::default(),
            collision: CollisionConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Routing grid cell size in world units.
    pub grid_size: f32,
    /// Margin added around the table bounding box when building the grid.
    pub grid_margin: f32,
    /// Padding added around each table rectangle when treated as an obstacle.
    pub clearance: f32,
    /// Distance from a table edge to its exit stub.
    pub exit_offset: f32,
    /// Shortening of the final segment so an arrowhead clears the border.
    pub end_inset: f32,
    /// Bound on the outward march when an exit stub lands on a blocked cell.
    pub stub_march_limit: usize,
    /// Passes of the colinear-collapse cleanup over the routed polyline.
    pub optimize_passes: usize,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            grid_size: 16.0,
            grid_margin: 160.0,
            clearance: 20.0,
            exit_offset: 24.0,
            end_inset: 6.0,
            stub_march_limit: 200,
            optimize_passes: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollisionConfig {
    /// Minimum gap the one-shot resolver keeps between tables.
    pub resolve_gap: f32,
    /// Iteration bound for the resolver; residual overlap past this is
    /// accepted as best-effort.
    pub max_iterations: usize,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            resolve_gap: 60.0,
            max_iterations: 200,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::light(),
            layout: LayoutConfig::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    layout: Option<LayoutOverrides>,
    routing: Option<RoutingOverrides>,
    collision: Option<CollisionOverrides>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutOverrides {
    table_width: Option<f32>,
    header_height: Option<f32>,
    row_height: Option<f32>,
    spacing_x: Option<f32>,
    spacing_y: Option<f32>,
    component_gap_x: Option<f32>,
    top_margin: Option<f32>,
    left_margin: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RoutingOverrides {
    grid_size: Option<f32>,
    grid_margin: Option<f32>,
    clearance: Option<f32>,
    exit_offset: Option<f32>,
    end_inset: Option<f32>,
    stub_march_limit: Option<usize>,
    optimize_passes: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CollisionOverrides {
    resolve_gap: Option<f32>,
    max_iterations: Option<usize>,
}

macro_rules! apply {
    ($target:expr, $source:expr, $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = $source.$field {
                $target.$field = value;
            }
        )+
    };
}

fn apply_config_file(config: &mut Config, parsed: ConfigFile) {
    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "dark" {
            config.theme = Theme::dark();
        } else if theme_name == "light" || theme_name == "default" {
            config.theme = Theme::light();
        }
    }
    if let Some(layout) = parsed.layout {
        apply!(
            config.layout,
            layout,
            table_width,
            header_height,
            row_height,
            spacing_x,
            spacing_y,
            component_gap_x,
            top_margin,
            left_margin,
        );
    }
    if let Some(routing) = parsed.routing {
        apply!(
            config.layout.routing,
            routing,
            grid_size,
            grid_margin,
            clearance,
            exit_offset,
            end_inset,
            stub_march_limit,
            optimize_passes,
        );
    }
    if let Some(collision) = parsed.collision {
        apply!(config.layout.collision, collision, resolve_gap, max_iterations);
    }
}

/// Load configuration, starting from defaults. Strict JSON is tried first;
/// hand-written config files may use the lenient JSON5 form.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = match serde_json::from_str(&contents) {
        Ok(parsed) => parsed,
        Err(_) => json5::from_str(&contents)?,
    };
    apply_config_file(&mut config, parsed);
    Ok(config)
}
