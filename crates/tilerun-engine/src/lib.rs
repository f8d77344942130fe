//! Per-frame physics, tile collision and camera core for a 2D side-scroller.
//!
//! One kinematic body moves against a static [`GridMap`]. Each step applies
//! input and gravity, resolves collisions one axis at a time (Y then X),
//! keeps the body inside the world and moves a bounded [`Camera2D`] after it.
//! Windowing, key polling and drawing belong to the host.

pub mod api;
pub mod assets;
pub mod components;
pub mod core;
pub mod input;
pub mod renderer;

// Re-export key types at crate root for convenience
pub use api::config::PhysicsConfig;
pub use api::sim::Simulation;
pub use api::types::{FrameInput, FrameOutput, FrameSnapshot, HorizontalIntent, StepEvent};
pub use assets::level::{Level, LevelDesc, LevelError, DEFAULT_CELL_SIZE};
pub use components::body::KinematicBody;
pub use components::grid::{Cell, CellRange, GridMap};
pub use crate::core::aabb::Aabb;
pub use crate::core::bounds::{enforce_bounds, BoundsOutcome};
pub use crate::core::collision::{
    resolve_collision, sweep_horizontal, sweep_vertical, CollisionReport, Edge, Sweep,
};
pub use crate::core::time::FixedTimestep;
pub use input::queue::{InputEvent, InputQueue, InputState, Key};
pub use renderer::camera::{Camera2D, CameraUniform};
