use glam::Vec2;

use crate::api::config::PhysicsConfig;
use crate::api::types::{FrameInput, FrameOutput, StepEvent};
use crate::assets::level::Level;
use crate::components::body::KinematicBody;
use crate::components::grid::GridMap;
use crate::core::bounds::{enforce_bounds, BoundsOutcome};
use crate::core::collision::{resolve_collision, CollisionReport};
use crate::renderer::camera::Camera2D;

/// One player body on one static level, advanced one fixed frame at a time.
///
/// Per step: jump and horizontal intent, gravity, collision against the
/// grid (Y then X), world bounds, then the camera follows the result.
pub struct Simulation {
    config: PhysicsConfig,
    grid: GridMap,
    spawn: Vec2,
    body: KinematicBody,
    camera: Camera2D,
    last_report: CollisionReport,
    frame: u64,
}

impl Simulation {
    pub fn new(config: PhysicsConfig, level: Level) -> Self {
        let Level { grid, spawn } = level;
        let body = KinematicBody::from_config(spawn, grid.cell_size(), &config);
        let mut camera = Camera2D::for_world(config.view_size, grid.world_size());
        camera.set_smoothing(config.camera_smoothing);
        camera.look_at(spawn);

        Self {
            config,
            grid,
            spawn,
            body,
            camera,
            last_report: CollisionReport::default(),
            frame: 0,
        }
    }

    /// Advance one frame.
    pub fn step(&mut self, input: &FrameInput) -> FrameOutput {
        let config = &self.config;
        let was_grounded = self.body.grounded;
        let mut events = Vec::new();

        let mut body = self.body;
        if input.jump_pressed && body.jump(config) {
            events.push(StepEvent::Jumped);
        }
        body.apply_horizontal(input.horizontal(), config);
        body.apply_gravity(config);

        let (body, report) = resolve_collision(body, &self.grid, config);
        let (body, outcome) = enforce_bounds(body, self.grid.world_size(), self.spawn);

        if outcome == BoundsOutcome::Respawned {
            events.push(StepEvent::Respawned);
        } else if body.grounded && !was_grounded {
            events.push(StepEvent::Landed);
        }

        self.body = body;
        self.last_report = report;
        self.camera.follow(body.position, config.fixed_dt);
        self.frame += 1;

        FrameOutput {
            frame: self.frame,
            position: body.position,
            velocity: body.velocity,
            grounded: body.grounded,
            camera_center: self.camera.center,
            events,
        }
    }

    /// Put the body back at spawn and recenter the camera.
    pub fn reset(&mut self) {
        self.body.respawn(self.spawn);
        self.camera.look_at(self.spawn);
        self.last_report = CollisionReport::default();
    }

    pub fn body(&self) -> &KinematicBody {
        &self.body
    }

    pub fn camera(&self) -> &Camera2D {
        &self.camera
    }

    pub fn grid(&self) -> &GridMap {
        &self.grid
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn spawn(&self) -> Vec2 {
        self.spawn
    }

    /// Collision result from the most recent step.
    pub fn last_report(&self) -> CollisionReport {
        self.last_report
    }

    /// Number of steps run so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }
}
