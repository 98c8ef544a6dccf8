//! Single-slot cart-pole dynamics.
//!
//! The dynamics model is stateless: [`advance`] and [`reset_state`] are the
//! only mutations of a [`SlotState`], they touch nothing but the state they
//! are handed, and they are safe to call concurrently on distinct slots
//! without synchronization.

use rand::distributions::{Distribution, Uniform};

use crate::core::{Observation, StepOutcome};
use crate::params::SimParams;
use crate::utils::rng::{RngStream, rng_from_seed};

/// Number of discrete actions: 0 pushes the cart left, 1 pushes it right.
pub const NUM_ACTIONS: u32 = 2;

/// Default seed for slots that have not yet been explicitly seeded.
pub(crate) const DEFAULT_SEED: u64 = 1_234_567;

/// Reset perturbations are drawn uniformly from this interval, per the
/// benchmark convention.
const RESET_BOUND: f64 = 0.05;

/// Full Markov state of one cart-pole instance plus its episode
/// bookkeeping. Exactly one batch slot owns each value; nothing else is
/// carried between step calls.
#[derive(Clone, Debug)]
pub struct SlotState {
    pub x: f64,
    pub x_dot: f64,
    pub theta: f64,
    pub theta_dot: f64,
    /// Steps taken since the last reset.
    pub elapsed_steps: u32,
    /// Set when a failure condition has been detected; cleared by reset.
    pub terminated: bool,
    /// Per-slot RNG stream, used only at reset, never during stepping.
    pub(crate) rng: RngStream,
}

impl SlotState {
    pub(crate) fn new(seed: u64) -> Self {
        Self {
            x: 0.0,
            x_dot: 0.0,
            theta: 0.0,
            theta_dot: 0.0,
            elapsed_steps: 0,
            terminated: false,
            rng: rng_from_seed(seed),
        }
    }

    /// Observation in the fixed `[x, x_dot, theta, theta_dot]` layout.
    pub fn observation(&self) -> Observation {
        [self.x, self.x_dot, self.theta, self.theta_dot]
    }

    pub(crate) fn reseed(&mut self, seed: u64) {
        self.rng = rng_from_seed(seed);
    }
}

/// Re-initialize a slot to a small random perturbation around the upright
/// equilibrium, drawn from the slot's own RNG stream. Clears the episode
/// bookkeeping and returns the fresh initial observation.
pub fn reset_state(state: &mut SlotState) -> Observation {
    let uni = Uniform::new_inclusive(-RESET_BOUND, RESET_BOUND);
    state.x = uni.sample(&mut state.rng);
    state.x_dot = uni.sample(&mut state.rng);
    state.theta = uni.sample(&mut state.rng);
    state.theta_dot = uni.sample(&mut state.rng);
    state.elapsed_steps = 0;
    state.terminated = false;
    state.observation()
}

/// Advance one slot by exactly one time step.
///
/// Integration is explicit Euler in a fixed order: positions are updated
/// from the pre-step velocities first, then velocities from the freshly
/// computed accelerations. That order is part of the reproducibility
/// contract — reordering the four updates changes trajectories.
///
/// The action must already be validated (`action < NUM_ACTIONS`); the
/// orchestrator rejects invalid actions before any slot is touched.
pub fn advance(state: &mut SlotState, action: u32, params: &SimParams) -> StepOutcome {
    let force = if action == 1 {
        params.force_mag
    } else {
        -params.force_mag
    };
    let cos_theta = state.theta.cos();
    let sin_theta = state.theta.sin();

    // Same equations of motion as the classic benchmark.
    let total_mass = params.total_mass();
    let polemass_length = params.polemass_length();
    let temp =
        (force + polemass_length * state.theta_dot * state.theta_dot * sin_theta) / total_mass;
    let theta_acc = (params.gravity * sin_theta - cos_theta * temp)
        / (params.pole_half_length
            * (4.0 / 3.0 - params.pole_mass * cos_theta * cos_theta / total_mass));
    let x_acc = temp - polemass_length * theta_acc * cos_theta / total_mass;

    state.x += params.tau * state.x_dot;
    state.x_dot += params.tau * x_acc;
    state.theta += params.tau * state.theta_dot;
    state.theta_dot += params.tau * theta_acc;

    state.elapsed_steps += 1;
    let terminated = state.x < -params.x_threshold
        || state.x > params.x_threshold
        || state.theta < -params.theta_threshold
        || state.theta > params.theta_threshold;
    let truncated = state.elapsed_steps >= params.max_episode_steps;
    state.terminated = terminated;

    StepOutcome {
        observation: state.observation(),
        // 1.0 for every step survived, including the ending step.
        reward: 1.0,
        terminated,
        truncated,
    }
}
