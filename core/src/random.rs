use rand::Rng;

/// Lower bound (inclusive) of the per-tick progress increment.
pub const MIN_PROGRESS_INCREMENT: f64 = 5.0;
/// Upper bound (exclusive) of the per-tick progress increment.
pub const MAX_PROGRESS_INCREMENT: f64 = 15.0;
/// Chance per tick that a simulated transfer fails.
pub const FAILURE_PROBABILITY: f64 = 0.05;

/// Source of the simulator's randomness.
///
/// The simulator draws once from each method per tick, increment first,
/// then the failure roll. Injecting a scripted implementation makes a run
/// fully deterministic.
pub trait RandomSource: Send {
    /// Progress added on this tick, in `[5, 15)` for the default source.
    fn progress_increment(&mut self) -> f64;

    /// True when this tick should fail the transfer.
    fn roll_failure(&mut self) -> bool;
}

/// Default source backed by the thread-local RNG.
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn progress_increment(&mut self) -> f64 {
        rand::thread_rng()
            .gen_range(MIN_PROGRESS_INCREMENT..MAX_PROGRESS_INCREMENT)
    }

    fn roll_failure(&mut self) -> bool {
        rand::thread_rng().gen_bool(FAILURE_PROBABILITY)
    }
}
