/// Fixed-timestep accumulator driven by absolute timestamps.
///
/// Converts variable wall-clock elapsed time into a whole number of
/// fixed-size simulation steps, so physics advances at a consistent rate
/// regardless of frame timing.
pub struct StepClock {
    /// The fixed delta time per step, in seconds.
    dt: f64,
    /// Unspent simulated time carried between frames.
    acc: f64,
    /// Maximum steps granted per `advance` call.
    step_limit: u32,
    /// Wall-clock time of the previous `advance` call, in seconds.
    /// `None` until the first call, which only primes this value.
    last_update: Option<f64>,
}

/// Outcome of one [`StepClock::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Advance {
    /// Number of fixed steps to run.
    pub steps: u32,
    /// Simulated time dropped by the overload clamp, in seconds. Zero when
    /// the accumulator stayed under the cap.
    pub dropped: f64,
}

impl StepClock {
    pub fn new(dt: f64, step_limit: u32) -> Self {
        Self {
            dt,
            acc: 0.0,
            step_limit,
            last_update: None,
        }
    }

    /// Feed the current wall-clock time and receive the number of fixed
    /// steps to run.
    ///
    /// The accumulator is clamped to `dt * step_limit` before steps are
    /// counted, so one call never grants more than `step_limit` steps; the
    /// excess is dropped and reported instead of becoming simulation debt.
    /// A timestamp earlier than the previous one drains the accumulator but
    /// never takes it below zero.
    pub fn advance(&mut self, now: f64) -> Advance {
        let last = match self.last_update.replace(now) {
            Some(last) => last,
            // First call: prime the clock, no elapsed time yet.
            None => return Advance { steps: 0, dropped: 0.0 },
        };

        self.acc += now - last;
        if self.acc < 0.0 {
            log::debug!("clock went backwards by {:.4}s, draining accumulator", -self.acc);
            self.acc = 0.0;
        }

        let acc_max = self.dt * self.step_limit as f64;
        let dropped = if self.acc > acc_max {
            let excess = self.acc - acc_max;
            self.acc = acc_max;
            excess
        } else {
            0.0
        };

        let steps = (self.acc / self.dt) as u32;
        self.acc = (self.acc - steps as f64 * self.dt).max(0.0);
        Advance { steps, dropped }
    }

    /// Interpolation fraction into the next unsimulated step (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        (self.acc / self.dt) as f32
    }

    /// The fixed step size in seconds.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Unspent simulated time, in seconds.
    pub fn acc(&self) -> f64 {
        self.acc
    }
}
