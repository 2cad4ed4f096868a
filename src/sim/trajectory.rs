use crate::sim::lorenz::{euler_step, LorenzParams};

/// One independently integrated path through phase space.
pub struct Trajectory {
    pub position: [f64; 3],
    pub history: Vec<[f64; 3]>,
}

impl Trajectory {
    /// Trajectories start at (0.1 + i*0.01, 0, 0) — only x is perturbed, so
    /// paths begin visually separated but on the same sheet of the attractor.
    fn new(index: usize) -> Self {
        Self {
            position: [0.1 + index as f64 * 0.01, 0.0, 0.0],
            history: Vec::new(),
        }
    }

    fn step(&mut self, params: &LorenzParams) {
        euler_step(&mut self.position, params);
        self.history.push(self.position);
    }
}

/// Owns the active trajectory set and the step budget for one run.
pub struct Simulation {
    pub params: LorenzParams,
    pub trajectories: Vec<Trajectory>,
    steps_taken: u32,
}

impl Simulation {
    pub fn new(params: LorenzParams) -> Self {
        Self {
            params,
            trajectories: Vec::new(),
            steps_taken: 0,
        }
    }

    /// Discard all prior state and seed `count` fresh trajectories.
    pub fn reset(&mut self, count: usize) {
        self.trajectories = (0..count).map(Trajectory::new).collect();
        self.steps_taken = 0;
    }

    /// Advance every trajectory by up to `steps` Euler steps, never past the
    /// total step budget. Each new position is appended to its history.
    pub fn step_batch(&mut self, steps: u32) {
        let remaining = self.params.total_steps.saturating_sub(self.steps_taken);
        let n = steps.min(remaining);
        for _ in 0..n {
            for trajectory in &mut self.trajectories {
                trajectory.step(&self.params);
            }
        }
        self.steps_taken += n;
    }

    pub fn steps_taken(&self) -> u32 {
        self.steps_taken
    }

    pub fn exhausted(&self) -> bool {
        self.steps_taken >= self.params.total_steps
    }
}
