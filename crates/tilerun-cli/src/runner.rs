use tilerun_engine::{FixedTimestep, FrameOutput, InputEvent, InputQueue, InputState, Simulation};

/// Drives a [`Simulation`] from a host loop with a variable frame time.
///
/// The host pushes input events as they arrive and calls `tick` once per
/// rendered frame. Input is sampled once per tick and fed to every fixed
/// step run during it; the jump edge only goes to the first of those steps.
pub struct Runner {
    sim: Simulation,
    input: InputQueue,
    input_state: InputState,
    timestep: FixedTimestep,
}

impl Runner {
    pub fn new(sim: Simulation) -> Self {
        let timestep = FixedTimestep::new(sim.config().fixed_dt);
        Self {
            sim,
            input: InputQueue::new(),
            input_state: InputState::new(),
            timestep,
        }
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one host frame of `dt` seconds. Returns the output of every fixed
    /// step that ran, oldest first. May be empty.
    pub fn tick(&mut self, dt: f32) -> Vec<FrameOutput> {
        let steps = self.timestep.accumulate(dt);
        if steps == 0 {
            return Vec::new();
        }

        let mut frame_input = self.input_state.sample(&mut self.input);
        let mut outputs = Vec::with_capacity(steps as usize);
        for _ in 0..steps {
            outputs.push(self.sim.step(&frame_input));
            frame_input.jump_pressed = false;
        }
        outputs
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }
}
