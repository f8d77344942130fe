//! Confines the body to the world rectangle `[0, world_size]`.
//!
//! Left, top and right edges clamp in place. Leaving through the bottom is
//! treated as falling out of the world and resets the body to its spawn.

use glam::Vec2;

use crate::components::body::KinematicBody;

/// What the enforcer had to do this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundsOutcome {
    #[default]
    Inside,
    /// At least one of left/top/right was clamped.
    Clamped,
    /// Fell out through the bottom and was reset to spawn.
    Respawned,
}

pub fn enforce_bounds(
    body: KinematicBody,
    world_size: Vec2,
    spawn: Vec2,
) -> (KinematicBody, BoundsOutcome) {
    let mut body = body;
    let half = body.half_extent();
    let mut outcome = BoundsOutcome::Inside;

    if body.position.x - half.x < 0.0 {
        body.position.x = half.x;
        body.velocity.x = 0.0;
        outcome = BoundsOutcome::Clamped;
    }
    if body.position.x + half.x > world_size.x {
        body.position.x = world_size.x - half.x;
        body.velocity.x = 0.0;
        outcome = BoundsOutcome::Clamped;
    }
    if body.position.y - half.y < 0.0 {
        body.position.y = half.y;
        body.velocity.y = 0.0;
        outcome = BoundsOutcome::Clamped;
    }
    if body.position.y + half.y > world_size.y {
        log::info!(
            "body fell out of the world at ({:.1}, {:.1}), respawning at ({:.1}, {:.1})",
            body.position.x,
            body.position.y,
            spawn.x,
            spawn.y
        );
        body.respawn(spawn);
        outcome = BoundsOutcome::Respawned;
    }

    (body, outcome)
}
