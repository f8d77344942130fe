use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Resolved horizontal intent for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalIntent {
    #[default]
    None,
    Left,
    Right,
}

impl HorizontalIntent {
    /// Combine the two held flags. Right wins when both are held.
    pub fn from_flags(left: bool, right: bool) -> Self {
        if right {
            HorizontalIntent::Right
        } else if left {
            HorizontalIntent::Left
        } else {
            HorizontalIntent::None
        }
    }
}

/// Intents sampled by the host for a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Held this frame.
    pub move_left: bool,
    /// Held this frame.
    pub move_right: bool,
    /// Pressed since the previous frame. Fires once per press.
    pub jump_pressed: bool,
}

impl FrameInput {
    pub fn horizontal(&self) -> HorizontalIntent {
        HorizontalIntent::from_flags(self.move_left, self.move_right)
    }
}

/// Game-semantic events raised during a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEvent {
    /// A grounded jump was started.
    Jumped,
    /// The body touched down after being airborne.
    Landed,
    /// The body fell out of the bottom of the world and was reset to spawn.
    Respawned,
}

/// Output of one simulation step, handed to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    /// Frame number, starting at 1 for the first step.
    pub frame: u64,
    pub position: Vec2,
    pub velocity: Vec2,
    pub grounded: bool,
    pub camera_center: Vec2,
    pub events: Vec<StepEvent>,
}

impl FrameOutput {
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            position: self.position.to_array(),
            velocity: self.velocity.to_array(),
            camera_center: self.camera_center.to_array(),
            grounded: if self.grounded { 1.0 } else { 0.0 },
            respawned: if self.events.contains(&StepEvent::Respawned) { 1.0 } else { 0.0 },
        }
    }
}

/// Flat per-frame record for hosts that read shared memory.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct FrameSnapshot {
    pub position: [f32; 2],
    pub velocity: [f32; 2],
    pub camera_center: [f32; 2],
    pub grounded: f32,
    pub respawned: f32,
}

impl FrameSnapshot {
    pub const FLOATS: usize = 8;

    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(std::slice::from_ref(self))
    }
}
