pub mod force;
pub mod tree;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub enum Algorithm {
    /// Folder containment stacking (full repository overview).
    Tree(TreeLayoutOptions),
    /// Fixed-budget physical simulation (focused subgraph).
    Force(ForceLayoutOptions),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TreeLayoutOptions {
    /// Distance between depth columns.
    pub horizontal_spacing: f64,
    /// Height consumed by a leaf; half of it separates a subtree from its next sibling.
    pub vertical_spacing: f64,
    /// `y` of the first root.
    pub start_y: f64,
}

impl Default for TreeLayoutOptions {
    fn default() -> Self {
        Self {
            horizontal_spacing: 280.0,
            vertical_spacing: 100.0,
            start_y: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ForceLayoutOptions {
    /// Number of simulation steps. There is no convergence check; all steps always run.
    pub iterations: usize,
    /// Many-body strength; negative values repel.
    pub charge_strength: f64,
    /// Rest length of edge springs.
    pub link_distance: f64,
    pub center_x: f64,
    pub center_y: f64,
    /// Collision radius of every node.
    pub collide_radius: f64,
    /// Fraction of velocity lost per step.
    pub velocity_decay: f64,
    /// `alpha` reached after `iterations` steps; sets the cooling rate.
    pub alpha_min: f64,
    /// Seed for the jitter applied to coincident nodes.
    pub random_seed: u64,
}

impl Default for ForceLayoutOptions {
    fn default() -> Self {
        Self {
            iterations: 300,
            charge_strength: -400.0,
            link_distance: 200.0,
            center_x: 600.0,
            center_y: 400.0,
            collide_radius: 100.0,
            velocity_decay: 0.4,
            alpha_min: 0.001,
            random_seed: 1,
        }
    }
}
