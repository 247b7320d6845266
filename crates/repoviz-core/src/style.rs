//! Rendering style payloads.
//!
//! A node's style depends only on its kind and classification flags; an edge's style only on its
//! connection type. Colors come from a [`Palette`] so hosts can re-theme without touching the
//! classification logic.

use crate::model::{ConnectionKind, NodeKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Palette {
    pub file_background: String,
    pub orphan_background: String,
    pub file_text: String,
    pub file_border: String,
    pub folder_background: String,
    pub folder_text: String,
    pub folder_border: String,
    pub selected_border: String,
    pub import_edge: String,
    pub external_edge: String,
    pub edge_label: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            file_background: "#1e293b".to_string(),
            orphan_background: "#f97316".to_string(),
            file_text: "#f8fafc".to_string(),
            file_border: "#334155".to_string(),
            folder_background: "#facc15".to_string(),
            folder_text: "#0f172a".to_string(),
            folder_border: "#eab308".to_string(),
            selected_border: "#38bdf8".to_string(),
            import_edge: "#3b82f6".to_string(),
            external_edge: "#ef4444".to_string(),
            edge_label: "#94a3b8".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStyle {
    pub background: String,
    pub color: String,
    pub border: String,
    pub border_radius: String,
    pub padding: String,
    pub font_size: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    pub min_width: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeMarker {
    #[serde(rename = "type")]
    pub kind: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeStyle {
    pub path_type: String,
    pub stroke: String,
    pub stroke_width: u32,
    pub marker_end: EdgeMarker,
    pub label: String,
    pub label_font_size: String,
    pub label_fill: String,
}

impl Palette {
    pub fn node_style(&self, kind: NodeKind, is_orphan: bool, is_selected: bool) -> NodeStyle {
        let mut style = match kind {
            NodeKind::File => NodeStyle {
                background: if is_orphan {
                    self.orphan_background.clone()
                } else {
                    self.file_background.clone()
                },
                color: self.file_text.clone(),
                border: format!("1px solid {}", self.file_border),
                border_radius: "8px".to_string(),
                padding: "10px".to_string(),
                font_size: "12px".to_string(),
                font_weight: None,
                min_width: "120px".to_string(),
            },
            NodeKind::Folder => NodeStyle {
                background: self.folder_background.clone(),
                color: self.folder_text.clone(),
                border: format!("1px solid {}", self.folder_border),
                border_radius: "8px".to_string(),
                padding: "10px".to_string(),
                font_size: "12px".to_string(),
                font_weight: Some("bold".to_string()),
                min_width: "100px".to_string(),
            },
        };
        if is_selected {
            style.border = format!("2px solid {}", self.selected_border);
            style.font_weight = Some("bold".to_string());
        }
        style
    }

    pub fn edge_style(&self, raw_kind: &str) -> EdgeStyle {
        let stroke = match ConnectionKind::parse(raw_kind) {
            ConnectionKind::External => self.external_edge.clone(),
            ConnectionKind::Import | ConnectionKind::Other => self.import_edge.clone(),
        };
        EdgeStyle {
            path_type: "smoothstep".to_string(),
            marker_end: EdgeMarker {
                kind: "arrowclosed".to_string(),
                color: stroke.clone(),
            },
            stroke,
            stroke_width: 2,
            label: raw_kind.to_string(),
            label_font_size: "10px".to_string(),
            label_fill: self.edge_label.clone(),
        }
    }
}
