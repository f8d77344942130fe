//! Level data: the static grid plus the player spawn point.
//!
//! Levels are authored as rows of characters (`#` = solid) and loaded from
//! JSON at runtime, or taken from the built-in demo layout.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::config::PhysicsConfig;
use crate::components::grid::{Cell, GridMap};
use crate::core::aabb::Aabb;

/// Cell size used when a level does not name one, and by the demo level.
pub const DEFAULT_CELL_SIZE: f32 = 40.0;

/// Level descriptor as authored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelDesc {
    /// Side length of a cell in world units.
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
    /// One string per row, top to bottom. `#` is solid, anything else empty.
    pub rows: Vec<String>,
    /// Spawn point in cell units (center of the body). Defaults to
    /// `(1.5, height - 3)`.
    #[serde(default)]
    pub spawn: Option<[f32; 2]>,
}

fn default_cell_size() -> f32 {
    DEFAULT_CELL_SIZE
}

#[derive(Debug)]
pub enum LevelError {
    /// Could not parse the JSON descriptor.
    Parse(serde_json::Error),
    /// No rows, or rows with no cells.
    Empty,
    /// A row whose length differs from the first row.
    Ragged { row: usize, expected: usize, found: usize },
    /// Cell size must be positive and finite.
    BadCellSize(f32),
    /// A body placed at the spawn point would stick out of the grid.
    SpawnOutside { spawn: Vec2 },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::Parse(e) => write!(f, "invalid level JSON: {}", e),
            LevelError::Empty => write!(f, "level has no cells"),
            LevelError::Ragged { row, expected, found } => write!(
                f,
                "row {} has {} cells, expected {} (grid must be rectangular)",
                row, found, expected
            ),
            LevelError::BadCellSize(size) => write!(f, "cell size must be positive, got {}", size),
            LevelError::SpawnOutside { spawn } => {
                write!(f, "body at spawn ({}, {}) does not fit inside the level", spawn.x, spawn.y)
            }
        }
    }
}

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LevelError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for LevelError {
    fn from(e: serde_json::Error) -> Self {
        LevelError::Parse(e)
    }
}

/// A loaded level.
#[derive(Debug, Clone)]
pub struct Level {
    pub grid: GridMap,
    /// Spawn position in world units.
    pub spawn: Vec2,
}

impl LevelDesc {
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate and build the grid.
    pub fn build(&self) -> Result<Level, LevelError> {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(LevelError::BadCellSize(self.cell_size));
        }
        let expected = self.rows.first().map_or(0, |r| r.chars().count());
        if expected == 0 {
            return Err(LevelError::Empty);
        }
        for (row, line) in self.rows.iter().enumerate() {
            let found = line.chars().count();
            if found != expected {
                return Err(LevelError::Ragged { row, expected, found });
            }
        }

        let rows: Vec<&str> = self.rows.iter().map(String::as_str).collect();
        let grid = GridMap::from_ascii(&rows, self.cell_size);
        let spawn_cells = self
            .spawn
            .map(Vec2::from)
            .unwrap_or_else(|| default_spawn_cells(grid.height()));
        let level = Level {
            grid,
            spawn: spawn_cells * self.cell_size,
        };
        level.check_spawn(PhysicsConfig::default().body_half_extent(self.cell_size))?;

        log::info!(
            "level loaded: {}x{} cells, {} solid, spawn ({:.1}, {:.1})",
            level.grid.width(),
            level.grid.height(),
            level.grid.solid_count(),
            level.spawn.x,
            level.spawn.y
        );
        Ok(level)
    }
}

fn default_spawn_cells(height: u32) -> Vec2 {
    Vec2::new(1.5, height as f32 - 3.0)
}

impl Level {
    /// Parse and build in one go.
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        LevelDesc::from_json(json)?.build()
    }

    /// Check that a body with `half_extent` fits inside the world at spawn.
    /// A body whose bottom edge starts below the world would respawn forever.
    pub fn check_spawn(&self, half_extent: Vec2) -> Result<(), LevelError> {
        let body = Aabb::from_center(self.spawn, half_extent);
        let world = self.grid.world_size();
        if body.min.x < 0.0 || body.min.y < 0.0 || body.max.x > world.x || body.max.y > world.y {
            return Err(LevelError::SpawnOutside { spawn: self.spawn });
        }
        Ok(())
    }

    /// The built-in 40x15 demo layout.
    pub fn demo(cell_size: f32) -> Self {
        let (width, height) = (40, 15);
        let mut grid = GridMap::new(width, height, cell_size);

        // Floor
        grid.fill_rect(0, height - 1, width, 1, Cell::Solid);
        // Platforms
        grid.fill_rect(5, 10, 5, 1, Cell::Solid);
        grid.fill_rect(12, 8, 4, 1, Cell::Solid);
        grid.fill_rect(15, 6, 2, 1, Cell::Solid);
        grid.fill_rect(25, 10, 5, 1, Cell::Solid);
        grid.fill_rect(32, 7, 4, 1, Cell::Solid);
        grid.fill_rect(21, 12, 2, 1, Cell::Solid);
        // Walls
        grid.fill_rect(2, 11, 1, height - 1 - 11, Cell::Solid);
        grid.fill_rect(18, 6, 1, 5, Cell::Solid);
        grid.fill_rect(38, 8, 1, height - 1 - 8, Cell::Solid);

        let spawn = default_spawn_cells(height) * cell_size;
        Self { grid, spawn }
    }
}
