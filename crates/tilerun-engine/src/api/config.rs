use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Immutable tuning values for one simulation.
///
/// Passed by reference into every step so that independent simulations
/// (tests, replays) never share state. All velocities are in world units per
/// frame, accelerations in world units per frame squared. +Y points down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Added to `velocity.y` every frame.
    pub gravity: f32,
    /// Horizontal speed while a move intent is held.
    pub move_speed: f32,
    /// Vertical velocity set on a grounded jump. Negative = upward.
    pub jump_velocity: f32,
    /// Inward nudge applied to box edges before converting them to cell indices.
    pub collision_epsilon: f32,
    /// Body size as a fraction of the level's cell size.
    pub body_scale: Vec2,
    /// Explicit body size in world units. Overrides `body_scale` when set.
    pub body_size: Option<Vec2>,
    /// Visible extent of the camera in world units.
    pub view_size: Vec2,
    /// Fixed timestep in seconds, used by hosts to pace `Simulation::step`.
    pub fixed_dt: f32,
    /// Camera follow smoothing (0.0 = locked to the body).
    pub camera_smoothing: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 0.8,
            move_speed: 5.0,
            jump_velocity: -18.0,
            collision_epsilon: 0.01,
            body_scale: Vec2::new(0.8, 0.95),
            body_size: None,
            view_size: Vec2::new(800.0, 600.0),
            fixed_dt: 1.0 / 60.0,
            camera_smoothing: 0.0,
        }
    }
}

impl PhysicsConfig {
    /// Parse a config from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Half extent of the body on a grid with `cell_size` cells.
    pub fn body_half_extent(&self, cell_size: f32) -> Vec2 {
        self.body_size.unwrap_or(self.body_scale * cell_size) / 2.0
    }
}
