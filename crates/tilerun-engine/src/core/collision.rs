//! Swept per-axis collision between the body and the tile grid.
//!
//! The vertical axis is resolved completely before the horizontal one, so
//! the horizontal sweep sees the rows the body actually occupies after
//! landing or bumping its head. Each axis resolves at most one hit per frame:
//! the first solid cell in increasing index order along the sweep span.
//! Very high speeds can tunnel through thin geometry; there is no
//! time-of-impact search.

use glam::{IVec2, Vec2};

use crate::api::config::PhysicsConfig;
use crate::components::body::KinematicBody;
use crate::components::grid::GridMap;
use crate::core::aabb::Aabb;

/// Which edge of the body struck a solid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

/// Result of sweeping one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sweep {
    #[default]
    NoHit,
    /// First solid cell found at the leading edge, lowest index in the span.
    Hit { cell: IVec2, edge: Edge },
}

impl Sweep {
    pub fn is_hit(&self) -> bool {
        matches!(self, Sweep::Hit { .. })
    }
}

/// What happened on each axis during one resolution pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionReport {
    pub vertical: Sweep,
    pub horizontal: Sweep,
}

impl CollisionReport {
    pub fn landed(&self) -> bool {
        matches!(self.vertical, Sweep::Hit { edge: Edge::Bottom, .. })
    }
}

#[inline]
fn cell_index(coord: f32, cell_size: f32) -> i32 {
    (coord / cell_size).floor() as i32
}

fn first_solid(grid: &GridMap, cells: impl Iterator<Item = IVec2>, edge: Edge) -> Sweep {
    cells
        .into_iter()
        .find(|cell| grid.is_solid(cell.x, cell.y))
        .map_or(Sweep::NoHit, |cell| Sweep::Hit { cell, edge })
}

/// Sweep the box vertically by `velocity_y`.
///
/// The span is the columns covered by the predicted box; the leading row is
/// its bottom row when falling, its top row when rising. Edges are pulled in
/// by `epsilon` so a box flush with a cell boundary does not count as
/// overlapping the neighbouring cell.
pub fn sweep_vertical(bounds: &Aabb, velocity_y: f32, grid: &GridMap, epsilon: f32) -> Sweep {
    let edge = if velocity_y > 0.0 {
        Edge::Bottom
    } else if velocity_y < 0.0 {
        Edge::Top
    } else {
        return Sweep::NoHit;
    };

    let cell_size = grid.cell_size();
    let predicted = bounds.translated(Vec2::new(0.0, velocity_y));
    let first_col = cell_index(predicted.min.x + epsilon, cell_size);
    let last_col = cell_index(predicted.max.x - epsilon, cell_size);
    let row = match edge {
        Edge::Bottom => cell_index(predicted.max.y - epsilon, cell_size),
        _ => cell_index(predicted.min.y + epsilon, cell_size),
    };

    first_solid(grid, (first_col..=last_col).map(|col| IVec2::new(col, row)), edge)
}

/// Sweep the box horizontally by `velocity_x`.
///
/// The row span comes from the box as given (already vertically resolved);
/// only the leading column is taken from the predicted box.
pub fn sweep_horizontal(bounds: &Aabb, velocity_x: f32, grid: &GridMap, epsilon: f32) -> Sweep {
    let edge = if velocity_x > 0.0 {
        Edge::Right
    } else if velocity_x < 0.0 {
        Edge::Left
    } else {
        return Sweep::NoHit;
    };

    let cell_size = grid.cell_size();
    let predicted = bounds.translated(Vec2::new(velocity_x, 0.0));
    let first_row = cell_index(bounds.min.y + epsilon, cell_size);
    let last_row = cell_index(bounds.max.y - epsilon, cell_size);
    let col = match edge {
        Edge::Right => cell_index(predicted.max.x - epsilon, cell_size),
        _ => cell_index(predicted.min.x + epsilon, cell_size),
    };

    first_solid(grid, (first_row..=last_row).map(|row| IVec2::new(col, row)), edge)
}

/// Apply one axis's sweep to the body: snap flush and stop on a hit,
/// otherwise advance by the full velocity on that axis.
fn apply_sweep(body: &mut KinematicBody, sweep: Sweep, vertical: bool, cell_size: f32) {
    let half = body.half_extent();
    match sweep {
        Sweep::Hit { cell, edge } => {
            match edge {
                Edge::Bottom => body.position.y = cell.y as f32 * cell_size - half.y,
                Edge::Top => body.position.y = (cell.y + 1) as f32 * cell_size + half.y,
                Edge::Right => body.position.x = cell.x as f32 * cell_size - half.x,
                Edge::Left => body.position.x = (cell.x + 1) as f32 * cell_size + half.x,
            }
            if vertical {
                body.velocity.y = 0.0;
            } else {
                body.velocity.x = 0.0;
            }
            if edge == Edge::Bottom {
                body.grounded = true;
            }
            log::trace!("{:?} hit cell ({}, {}) -> {:?}", edge, cell.x, cell.y, body.position);
        }
        Sweep::NoHit if vertical => body.position.y += body.velocity.y,
        Sweep::NoHit => body.position.x += body.velocity.x,
    }
}

/// Move the body by its velocity against the grid, Y first then X.
///
/// Returns the corrected body and what each axis hit. `grounded` is cleared
/// at the start and only set again by a downward hit.
pub fn resolve_collision(
    body: KinematicBody,
    grid: &GridMap,
    config: &PhysicsConfig,
) -> (KinematicBody, CollisionReport) {
    let mut body = body;
    body.grounded = false;
    let epsilon = config.collision_epsilon;
    let cell_size = grid.cell_size();

    let vertical = sweep_vertical(&body.aabb(), body.velocity.y, grid, epsilon);
    apply_sweep(&mut body, vertical, true, cell_size);

    // Rows for the horizontal sweep come from the vertically resolved box.
    let horizontal = sweep_horizontal(&body.aabb(), body.velocity.x, grid, epsilon);
    apply_sweep(&mut body, horizontal, false, cell_size);

    let report = CollisionReport { vertical, horizontal };
    if report.vertical.is_hit() || report.horizontal.is_hit() {
        log::debug!("collision: {:?}", report);
    }
    (body, report)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CELL: f32 = 40.0;

    fn config() -> PhysicsConfig {
        PhysicsConfig::default()
    }

    /// Body with the default 32x38 size whose bottom edge sits at `bottom`.
    fn body_with_bottom(x: f32, bottom: f32) -> KinematicBody {
        let cfg = config();
        let half = cfg.body_half_extent(CELL);
        KinematicBody::from_config(Vec2::new(x, bottom - half.y), CELL, &cfg)
    }

    fn floor_grid() -> GridMap {
        // Floor top at y = 200 (row 5).
        GridMap::from_ascii(
            &[
                "..........",
                "..........",
                "..........",
                "..........",
                "..........",
                "##########",
            ],
            CELL,
        )
    }

    #[test]
    fn landing_snaps_to_floor_top() {
        let grid = floor_grid();
        let body = body_with_bottom(100.0, 199.0).with_velocity(Vec2::new(0.0, 10.0));

        let (body, report) = resolve_collision(body, &grid, &config());

        assert!((body.aabb().max.y - 200.0).abs() < 1e-4);
        assert_eq!(body.velocity.y, 0.0);
        assert!(body.grounded);
        assert!(report.landed());
        assert_eq!(
            report.vertical,
            Sweep::Hit { cell: IVec2::new(2, 5), edge: Edge::Bottom }
        );
    }

    #[test]
    fn free_fall_moves_full_velocity() {
        let grid = floor_grid();
        let body = body_with_bottom(100.0, 100.0).with_velocity(Vec2::new(3.0, 7.0));

        let (moved, report) = resolve_collision(body, &grid, &config());

        assert_eq!(report, CollisionReport::default());
        assert_eq!(moved.position, body.position + Vec2::new(3.0, 7.0));
        assert_eq!(moved.velocity, body.velocity);
        assert!(!moved.grounded);
    }

    #[test]
    fn grounded_is_earned_each_frame() {
        let grid = floor_grid();
        let body = body_with_bottom(100.0, 100.0).with_grounded(true);

        let (body, _) = resolve_collision(body, &grid, &config());
        assert!(!body.grounded);
    }

    #[test]
    fn resting_body_stays_put() {
        let grid = floor_grid();
        let cfg = config();
        let mut body = body_with_bottom(100.0, 200.0).with_grounded(true);
        let start = body.position;

        for _ in 0..30 {
            body.apply_gravity(&cfg);
            body = resolve_collision(body, &grid, &cfg).0;
            assert_eq!(body.position, start);
            assert_eq!(body.velocity, Vec2::ZERO);
            assert!(body.grounded);
        }
    }

    #[test]
    fn ceiling_bonk_snaps_below_cell() {
        let grid = GridMap::from_ascii(&["#####", ".....", ".....", "....."], CELL);
        let half = config().body_half_extent(CELL);
        // Top edge at y = 42, rising by 5.
        let body = KinematicBody::from_config(Vec2::new(60.0, 42.0 + half.y), CELL, &config())
            .with_velocity(Vec2::new(0.0, -5.0));

        let (body, report) = resolve_collision(body, &grid, &config());

        assert!((body.aabb().min.y - 40.0).abs() < 1e-4);
        assert_eq!(body.velocity.y, 0.0);
        assert!(!body.grounded);
        assert!(matches!(report.vertical, Sweep::Hit { edge: Edge::Top, .. }));
    }

    #[test]
    fn wall_on_the_right_blocks() {
        // Solid column at col 2 (x in 80..120).
        let grid = GridMap::from_ascii(&["..#..", "..#..", "..#..", "....."], CELL);
        let half = config().body_half_extent(CELL);
        // Right edge at x = 79.
        let body = KinematicBody::from_config(Vec2::new(79.0 - half.x, 60.0), CELL, &config())
            .with_velocity(Vec2::new(5.0, 0.0));

        let (body, report) = resolve_collision(body, &grid, &config());

        assert_eq!(body.velocity.x, 0.0);
        assert!((body.aabb().max.x - 80.0).abs() < 1e-4);
        assert!(matches!(report.horizontal, Sweep::Hit { edge: Edge::Right, .. }));
    }

    #[test]
    fn wall_on_the_left_blocks() {
        let grid = GridMap::from_ascii(&["#....", "#....", "#....", "....."], CELL);
        let half = config().body_half_extent(CELL);
        let body = KinematicBody::from_config(Vec2::new(42.0 + half.x, 60.0), CELL, &config())
            .with_velocity(Vec2::new(-5.0, 0.0));

        let (body, _) = resolve_collision(body, &grid, &config());

        assert_eq!(body.velocity.x, 0.0);
        assert!((body.aabb().min.x - 40.0).abs() < 1e-4);
    }

    #[test]
    fn flush_edges_do_not_touch_neighbours() {
        // Body exactly fills x in 48..80, standing next to a wall at col 2.
        // Falling must not treat the wall column as part of the span.
        let grid = GridMap::from_ascii(&["..#..", "..#..", "..#..", "..#.."], CELL);
        let half = config().body_half_extent(CELL);
        let body = KinematicBody::from_config(Vec2::new(80.0 - half.x, 60.0), CELL, &config())
            .with_velocity(Vec2::new(0.0, 4.0));

        let (moved, report) = resolve_collision(body, &grid, &config());

        assert_eq!(report.vertical, Sweep::NoHit);
        assert_eq!(moved.position.y, body.position.y + 4.0);
    }

    #[test]
    fn lowest_index_wins_in_span() {
        let grid = GridMap::from_ascii(&["....", "....", "####"], CELL);
        // Box spans cols 1 and 2, falling into row 2.
        let bounds = Aabb::from_center(Vec2::new(80.0, 60.0), Vec2::new(16.0, 19.0));
        let sweep = sweep_vertical(&bounds, 10.0, &grid, 0.01);
        assert_eq!(sweep, Sweep::Hit { cell: IVec2::new(1, 2), edge: Edge::Bottom });
    }

    #[test]
    fn moving_away_from_solid_is_not_a_hit() {
        let grid = floor_grid();
        let bounds = Aabb::from_center(Vec2::new(100.0, 181.0), Vec2::new(16.0, 19.0));
        assert_eq!(sweep_vertical(&bounds, -1.0, &grid, 0.01), Sweep::NoHit);
        assert_eq!(sweep_vertical(&bounds, 0.0, &grid, 0.01), Sweep::NoHit);
    }

    #[test]
    fn horizontal_uses_resolved_rows() {
        // Landing on a floor while running right: the floor cells ahead must
        // not stop horizontal motion once the body is standing on them.
        let grid = floor_grid();
        let body = body_with_bottom(100.0, 195.0).with_velocity(Vec2::new(5.0, 10.0));

        let (moved, report) = resolve_collision(body, &grid, &config());

        assert!(moved.grounded);
        assert_eq!(report.horizontal, Sweep::NoHit);
        assert_eq!(moved.velocity.x, 5.0);
        assert_eq!(moved.position.x, 105.0);
    }

    #[test]
    fn corner_approach_is_caught_by_horizontal_sweep() {
        // Falling right toward the side of a ledge at col 2, row 2.
        let grid = GridMap::from_ascii(&[".....", ".....", "..#..", "....."], CELL);
        let half = config().body_half_extent(CELL);
        let body = KinematicBody::from_config(Vec2::new(78.0 - half.x, 78.0 - half.y), CELL, &config())
            .with_velocity(Vec2::new(5.0, 6.0));

        let (moved, report) = resolve_collision(body, &grid, &config());

        assert_eq!(report.vertical, Sweep::NoHit);
        assert!(matches!(report.horizontal, Sweep::Hit { edge: Edge::Right, .. }));
        assert!((moved.aabb().max.x - 80.0).abs() < 1e-4);
    }

    #[test]
    fn out_of_grid_is_open_space() {
        let grid = GridMap::from_ascii(&["##", "##"], CELL);
        let body = KinematicBody::from_config(Vec2::new(-100.0, -100.0), CELL, &config())
            .with_velocity(Vec2::new(-5.0, 5.0));
        let (moved, report) = resolve_collision(body, &grid, &config());
        assert_eq!(report, CollisionReport::default());
        assert_eq!(moved.position, Vec2::new(-105.0, -95.0));
    }
}
