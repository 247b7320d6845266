use repoviz_core::Palette;
use repoviz_layout::{ForceLayoutOptions, TreeLayoutOptions};
use serde::{Deserialize, Serialize};

/// Engine settings. Every field is optional in JSON; missing ones keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    pub layout: LayoutMode,
    pub tree: TreeLayoutOptions,
    pub force: ForceLayoutOptions,
    pub palette: Palette,
}

impl EngineConfig {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Tree layout for the full graph, force layout for a focused one.
    #[default]
    Auto,
    Tree,
    Force,
}

impl std::str::FromStr for LayoutMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "tree" | "hierarchical" => Ok(Self::Tree),
            "force" => Ok(Self::Force),
            _ => Err(()),
        }
    }
}
