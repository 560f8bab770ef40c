use log::debug;

/// Fraction of a step treated as rounding noise when elapsed time is a multiple of the step
const STEP_EPSILON: f64 = 1.0e-4;

/// Fixed-step accumulator turning variable frame deltas into whole sub-steps.
///
/// Leftover time below one step carries over to the next call. Time beyond
/// `max_substeps` steps is discarded so a stalled host never triggers a
/// catch-up spiral.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    fixed_step: f64,
    max_substeps: u32,
    accumulated: f64,
}

impl FixedTimestep {
    /// Creates a new accumulator
    pub fn new(fixed_step: f32, max_substeps: u32) -> Self {
        Self {
            fixed_step: f64::from(fixed_step),
            max_substeps,
            accumulated: 0.0,
        }
    }

    /// Adds `elapsed` seconds and returns how many fixed sub-steps to run now
    pub fn consume(&mut self, elapsed: f32) -> u32 {
        if !(elapsed.is_finite() && elapsed > 0.0) || self.fixed_step <= 0.0 {
            return 0;
        }

        self.accumulated += f64::from(elapsed);

        let due = (self.accumulated / self.fixed_step + STEP_EPSILON).floor();
        if due < 1.0 {
            return 0;
        }

        self.accumulated = (self.accumulated - due * self.fixed_step).max(0.0);

        let max = f64::from(self.max_substeps);
        if due > max {
            debug!(
                "simulation fell behind: {} sub-steps due, running {}",
                due, self.max_substeps
            );
            return self.max_substeps;
        }

        due as u32
    }

    /// Returns the length of one sub-step in seconds
    pub fn fixed_step(&self) -> f32 {
        self.fixed_step as f32
    }

    /// Drops any carried-over time
    pub fn reset(&mut self) {
        self.accumulated = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: f32 = 1.0 / 60.0;

    #[test]
    fn exact_multiples_produce_whole_steps() {
        let mut timestep = FixedTimestep::new(STEP, 40);
        assert_eq!(timestep.consume(STEP), 1);
        assert_eq!(timestep.consume(3.0 * STEP), 3);
        // nothing is carried over
        assert_eq!(timestep.consume(STEP * 0.9), 0);
    }

    #[test]
    fn partial_steps_accumulate() {
        let mut timestep = FixedTimestep::new(STEP, 40);
        assert_eq!(timestep.consume(STEP * 0.6), 0);
        assert_eq!(timestep.consume(STEP * 0.6), 1);
        // the remaining fifth of a step completes the next one
        assert_eq!(timestep.consume(STEP * 0.8), 1);
    }

    #[test]
    fn caps_substeps_and_drops_excess_time() {
        let mut timestep = FixedTimestep::new(STEP, 40);
        assert_eq!(timestep.consume(1000.0), 40);
        // the dropped backlog must not leak into the next call
        assert_eq!(timestep.consume(STEP), 1);
    }

    #[test]
    fn ignores_non_positive_and_non_finite_deltas() {
        let mut timestep = FixedTimestep::new(STEP, 40);
        assert_eq!(timestep.consume(0.0), 0);
        assert_eq!(timestep.consume(-1.0), 0);
        assert_eq!(timestep.consume(f32::NAN), 0);
        assert_eq!(timestep.consume(f32::INFINITY), 0);
    }
}
