/// Fixed timestep accumulator for hosts with a variable frame time.
///
/// The simulation only ever advances in whole steps of `dt`; the host feeds
/// in wall-clock deltas and runs as many steps as have accumulated.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
    /// Upper bound on steps returned from a single `accumulate` call.
    max_steps: u32,
    /// Total steps handed out so far.
    total_steps: u64,
}

impl FixedTimestep {
    pub const DEFAULT_MAX_STEPS: u32 = 10;

    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_steps: Self::DEFAULT_MAX_STEPS,
            total_steps: 0,
        }
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    /// Add frame time and return how many fixed steps to run now.
    /// Backlog beyond `max_steps` is dropped rather than carried over.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        let mut steps = (self.accumulator / self.dt) as u32;
        if steps > self.max_steps {
            steps = self.max_steps;
            self.accumulator = 0.0;
        } else {
            self.accumulator -= steps as f32 * self.dt;
        }
        self.total_steps += steps as u64;
        steps
    }

    /// Fraction of a step left in the accumulator, for render interpolation.
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }
}
