use glam::Vec2;

use crate::api::config::PhysicsConfig;
use crate::api::types::HorizontalIntent;
use crate::core::aabb::Aabb;

/// The single moving body (the player).
///
/// `position` is always the center of the bounding box. `half_extent` is set
/// at construction and never changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicBody {
    /// Center in world space.
    pub position: Vec2,
    /// World units per frame. +Y is down.
    pub velocity: Vec2,
    half_extent: Vec2,
    /// Resting on a solid cell this frame.
    pub grounded: bool,
}

impl KinematicBody {
    /// Create a body at rest.
    pub fn new(position: Vec2, half_extent: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            half_extent,
            grounded: false,
        }
    }

    /// Create a body sized from the config for a grid of `cell_size` cells.
    pub fn from_config(position: Vec2, cell_size: f32, config: &PhysicsConfig) -> Self {
        Self::new(position, config.body_half_extent(cell_size))
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_grounded(mut self, grounded: bool) -> Self {
        self.grounded = grounded;
        self
    }

    pub fn half_extent(&self) -> Vec2 {
        self.half_extent
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.position, self.half_extent)
    }

    pub fn apply_gravity(&mut self, config: &PhysicsConfig) {
        self.velocity.y += config.gravity;
    }

    /// Horizontal velocity is set directly every frame, no inertia.
    pub fn apply_horizontal(&mut self, intent: HorizontalIntent, config: &PhysicsConfig) {
        self.velocity.x = match intent {
            HorizontalIntent::None => 0.0,
            HorizontalIntent::Left => -config.move_speed,
            HorizontalIntent::Right => config.move_speed,
        };
    }

    /// Jump if grounded. Returns whether the jump happened.
    pub fn jump(&mut self, config: &PhysicsConfig) -> bool {
        if !self.grounded {
            return false;
        }
        self.velocity.y = config.jump_velocity;
        self.grounded = false;
        true
    }

    /// Put the body back at `spawn`, at rest and airborne.
    pub fn respawn(&mut self, spawn: Vec2) {
        self.position = spawn;
        self.velocity = Vec2::ZERO;
        self.grounded = false;
    }
}
