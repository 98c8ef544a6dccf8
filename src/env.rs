//! Single-environment convenience wrapper over the dynamics model.

use crate::core::{EngineError, Observation, Result, StepOutcome};
use crate::dynamics::{self, DEFAULT_SEED, NUM_ACTIONS, SlotState};
use crate::params::SimParams;

/// One cart-pole instance with scalar reset/step, no worker pool.
///
/// Useful for debugging a policy against a single trajectory and as the
/// reference for the batch-vs-single independence guarantee: a batch slot
/// seeded with `derive_subseed(seed, i)` follows exactly the trajectory of
/// a `CartPoleEnv` reset with that sub-seed.
pub struct CartPoleEnv {
    state: SlotState,
    params: SimParams,
}

impl Default for CartPoleEnv {
    fn default() -> Self {
        // Default parameters are always valid.
        Self {
            state: SlotState::new(DEFAULT_SEED),
            params: SimParams::default(),
        }
    }
}

impl CartPoleEnv {
    pub fn new(params: SimParams, seed: u64) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            state: SlotState::new(seed),
            params,
        })
    }

    /// Reset to a fresh randomized initial state. Reseeds the RNG stream
    /// first when `seed` is provided, otherwise continues the current
    /// stream (matching a batch slot's auto-reset behavior).
    pub fn reset(&mut self, seed: Option<u64>) -> Observation {
        if let Some(s) = seed {
            self.state.reseed(s);
        }
        dynamics::reset_state(&mut self.state)
    }

    /// Apply one action (0 = push left, 1 = push right) and advance by one
    /// time step.
    pub fn step(&mut self, action: u32) -> Result<StepOutcome> {
        if action >= NUM_ACTIONS {
            return Err(EngineError::InvalidAction { slot: 0, action });
        }
        Ok(dynamics::advance(&mut self.state, action, &self.params))
    }

    pub fn observation(&self) -> Observation {
        self.state.observation()
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    /// Access the underlying state (advanced usage, e.g. boundary tests).
    pub fn state(&self) -> &SlotState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SlotState {
        &mut self.state
    }
}
