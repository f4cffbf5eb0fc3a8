use serde::{Deserialize, Serialize};

/// Diagram palette handed to the rendering layer alongside the layout. The
/// caller decides light or dark; nothing here inspects ambient state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub table_background: String,
    pub table_border: String,
    pub header_background: String,
    pub header_text: String,
    pub field_name_color: String,
    pub field_type_color: String,
    pub primary_key_highlight: String,
    pub foreign_key_highlight: String,
    pub primary_key_accent: String,
    pub foreign_key_accent: String,
    pub relationship_stroke: String,
    pub relationship_hover: String,
    pub grid_line: String,
    pub grid_opacity: f32,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            table_background: "#ffffff".to_string(),
            table_border: "#d1d5db".to_string(),
            header_background: "#f8fafc".to_string(),
            header_text: "#1e293b".to_string(),
            field_name_color: "#374151".to_string(),
            field_type_color: "#6b7280".to_string(),
            primary_key_highlight: "rgba(245, 158, 11, 0.15)".to_string(),
            foreign_key_highlight: "rgba(59, 130, 246, 0.15)".to_string(),
            primary_key_accent: "#f59e0b".to_string(),
            foreign_key_accent: "#3b82f6".to_string(),
            relationship_stroke: "#64748b".to_string(),
            relationship_hover: "#0ea5e9".to_string(),
            grid_line: "#e2e8f0".to_string(),
            grid_opacity: 0.6,
        }
    }

    pub fn dark() -> Self {
        Self {
            table_background: "#1e293b".to_string(),
            table_border: "#334155".to_string(),
            header_background: "#0f172a".to_string(),
            header_text: "#e2e8f0".to_string(),
            field_name_color: "#f1f5f9".to_string(),
            field_type_color: "#94a3b8".to_string(),
            primary_key_highlight: "rgba(245, 158, 11, 0.1)".to_string(),
            foreign_key_highlight: "rgba(59, 130, 246, 0.1)".to_string(),
            primary_key_accent: "#f59e0b".to_string(),
            foreign_key_accent: "#3b82f6".to_string(),
            relationship_stroke: "#64748b".to_string(),
            relationship_hover: "#0ea5e9".to_string(),
            grid_line: "#334155".to_string(),
            grid_opacity: 0.4,
        }
    }
}
