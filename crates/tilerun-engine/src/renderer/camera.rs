use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};

/// Orthographic 2D camera that follows the body.
///
/// With bounds set, the visible window never extends past them on an axis
/// where the bounds are at least as large as the view. On an axis where the
/// bounds are smaller than the view, the camera sits at the bounds' center.
#[derive(Debug, Clone)]
pub struct Camera2D {
    /// Visible width in world units.
    pub width: f32,
    /// Visible height in world units.
    pub height: f32,
    /// Camera center position in world space.
    pub center: Vec2,
    /// Optional world rectangle (min, max) the view must stay inside.
    pub bounds: Option<(Vec2, Vec2)>,
    /// Smoothing factor for camera follow (0.0 = instant, 1.0 = never moves).
    pub smoothing: f32,
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub projection: [[f32; 4]; 4],
}

/// Inclusive range the center may take on one axis.
fn center_range(min: f32, max: f32, view: f32) -> (f32, f32) {
    let extent = max - min;
    if extent < view {
        let mid = (min + max) / 2.0;
        (mid, mid)
    } else {
        let half = view / 2.0;
        (min + half, max - half)
    }
}

impl Camera2D {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            center: Vec2::ZERO,
            bounds: None,
            smoothing: 0.0,
        }
    }

    /// Camera sized to the view and bounded by a world starting at the origin.
    pub fn for_world(view_size: Vec2, world_size: Vec2) -> Self {
        let mut camera = Self::new(view_size.x, view_size.y);
        camera.set_bounds(Vec2::ZERO, world_size);
        camera
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Visible rectangle as (min, max) in world space.
    pub fn view_rect(&self) -> (Vec2, Vec2) {
        let half = self.size() / 2.0;
        (self.center - half, self.center + half)
    }

    /// Build an orthographic projection matrix.
    /// Y grows downward in world space, so top maps to `min.y`.
    pub fn projection_matrix(&self) -> Mat4 {
        let (min, max) = self.view_rect();
        Mat4::orthographic_rh(min.x, max.x, max.y, min.y, 0.0, 1.0)
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            projection: self.projection_matrix().to_cols_array_2d(),
        }
    }

    /// Set world bounds for camera clamping.
    pub fn set_bounds(&mut self, min: Vec2, max: Vec2) {
        self.bounds = Some((min, max));
        self.clamp_to_bounds();
    }

    /// 0.0 = instant snap, 0.9 = very smooth/slow.
    pub fn set_smoothing(&mut self, smoothing: f32) {
        self.smoothing = smoothing.clamp(0.0, 0.99);
    }

    /// Center on `target`, then clamp.
    pub fn look_at(&mut self, target: Vec2) {
        self.center = target;
        self.clamp_to_bounds();
    }

    /// Move toward `target`. Called once per simulation step.
    pub fn follow(&mut self, target: Vec2, dt: f32) {
        if self.smoothing <= 0.0 {
            self.look_at(target);
        } else {
            let lerp_factor = 1.0 - self.smoothing.powf(dt * 60.0);
            self.center += (target - self.center) * lerp_factor;
            self.clamp_to_bounds();
        }
    }

    /// Center the camera would take for `target` under the current bounds,
    /// without moving it.
    pub fn clamped_center(&self, target: Vec2) -> Vec2 {
        match self.bounds {
            Some((min, max)) => {
                let (lo_x, hi_x) = center_range(min.x, max.x, self.width);
                let (lo_y, hi_y) = center_range(min.y, max.y, self.height);
                Vec2::new(target.x.clamp(lo_x, hi_x), target.y.clamp(lo_y, hi_y))
            }
            None => target,
        }
    }

    fn clamp_to_bounds(&mut self) {
        self.center = self.clamped_center(self.center);
    }

    /// Check if a world-space point is visible in the viewport.
    pub fn is_visible(&self, point: Vec2) -> bool {
        let (min, max) = self.view_rect();
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }

    /// Check if a world-space rectangle overlaps the viewport.
    pub fn is_rect_visible(&self, rect_center: Vec2, rect_half_size: Vec2) -> bool {
        let (min, max) = self.view_rect();
        let rect_min = rect_center - rect_half_size;
        let rect_max = rect_center + rect_half_size;
        rect_max.x >= min.x && rect_min.x <= max.x && rect_max.y >= min.y && rect_min.y <= max.y
    }
}
