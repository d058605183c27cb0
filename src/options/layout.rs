use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Layout", inline)]
#[serde(default)]
/// Geometry of the three target arrangements.
pub struct LayoutOptions {
    /// Cone radius at the base of the tree spiral.
    #[schemars(title = "Tree Radius", range(min = 2.0, max = 40.0), extend("step" = 0.5))]
    pub tree_max_radius: f32,
    /// Total height of the tree spiral, centered on the origin.
    #[schemars(title = "Tree Height", range(min = 5.0, max = 60.0), extend("step" = 0.5))]
    pub tree_height: f32,
    /// Spiral sweep: angle at parameter `t` is `t * spiral_factor * PI`.
    #[schemars(skip)]
    pub spiral_factor: f32,
    /// Inner radius of the scatter shell.
    #[schemars(title = "Shell Inner", range(min = 1.0, max = 50.0), extend("step" = 0.5))]
    pub scatter_inner_radius: f32,
    /// Outer radius of the scatter shell.
    #[schemars(title = "Shell Outer", range(min = 1.0, max = 80.0), extend("step" = 0.5))]
    pub scatter_outer_radius: f32,
    /// Presentation position of the focused particle.
    #[schemars(skip)]
    pub focus_position: [f32; 3],
    /// Scale multiplier for the focused particle.
    #[schemars(title = "Focus Scale", range(min = 1.0, max = 10.0), extend("step" = 0.1))]
    pub focus_scale: f32,
    /// Inner radius of the ring (around the view axis) the background
    /// crowd recedes to.
    #[schemars(skip)]
    pub ring_inner_radius: f32,
    /// Outer radius of the background ring.
    #[schemars(skip)]
    pub ring_outer_radius: f32,
    /// Depth spread of the background ring along the view axis.
    #[schemars(skip)]
    pub ring_thickness: f32,
    /// How far behind the origin the ring is centered.
    #[schemars(skip)]
    pub ring_depth: f32,
    /// Scale multiplier for non-focused particles while focusing.
    #[schemars(title = "Background Scale", range(min = 0.05, max = 1.0), extend("step" = 0.05))]
    pub background_scale: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            tree_max_radius: 15.0,
            tree_height: 30.0,
            spiral_factor: 45.0,
            scatter_inner_radius: 12.0,
            scatter_outer_radius: 24.0,
            focus_position: [0.0, 0.0, 35.0],
            focus_scale: 4.5,
            ring_inner_radius: 25.0,
            ring_outer_radius: 45.0,
            ring_thickness: 30.0,
            ring_depth: 20.0,
            background_scale: 0.3,
        }
    }
}
