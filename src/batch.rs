//! Batch orchestrator: N independent cart-pole slots stepped through a
//! fixed worker pool.
//!
//! Slots live in one contiguous arena indexed 0..N-1 and are mutually
//! independent, so a batched call fans out over the pool with each worker
//! owning a disjoint range of slots and writing disjoint output indices.
//! Nothing inside the parallel region synchronizes; the call blocks at the
//! fan-in barrier and returns complete results. Because each slot's own
//! computation is sequential and self-contained, trajectories are
//! bit-identical for every worker count.

use rayon::prelude::*;
use tracing::debug;

use crate::core::{BatchStep, EngineError, Observation, Result};
use crate::dynamics::{self, DEFAULT_SEED, NUM_ACTIONS, SlotState};
use crate::params::SimParams;
use crate::utils::rng::derive_subseed;

/// N independent cart-pole instances behind a single batched step/reset
/// API. Caller-owned: multiple batches coexist without interference, there
/// is no process-wide state.
pub struct CartPoleBatch {
    slots: Vec<SlotState>,
    params: SimParams,
    pool: rayon::ThreadPool,
}

impl CartPoleBatch {
    /// Allocate and default-reset `n` slots. Validates `params` and builds
    /// the worker pool; both can only fail here, never during stepping.
    pub fn new(n: usize, params: SimParams) -> Result<Self> {
        params.validate()?;
        if n == 0 {
            return Err(EngineError::InvalidParams(
                "batch needs at least one environment".to_string(),
            ));
        }
        // More workers than slots would only idle.
        let workers = params.effective_workers().min(n);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .map_err(|e| EngineError::InvalidParams(format!("worker pool: {e}")))?;

        let mut slots = Vec::with_capacity(n);
        for i in 0..n {
            let mut slot = SlotState::new(derive_subseed(DEFAULT_SEED, i as u64));
            dynamics::reset_state(&mut slot);
            slots.push(slot);
        }
        debug!(n, workers, "created cart-pole batch");
        Ok(Self {
            slots,
            params,
            pool,
        })
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Size of the worker pool serving this batch.
    pub fn worker_count(&self) -> usize {
        self.pool.current_num_threads()
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    /// Get immutable access to the slot arena (advanced usage).
    pub fn slots(&self) -> &[SlotState] {
        &self.slots
    }

    /// Get mutable access to the slot arena (advanced usage).
    pub fn slots_mut(&mut self) -> &mut [SlotState] {
        &mut self.slots
    }

    /// Current observations of all slots, without stepping.
    pub fn observations(&self) -> Vec<Observation> {
        self.slots.iter().map(SlotState::observation).collect()
    }

    /// Reset every slot. Slot `i`'s RNG stream is reseeded with
    /// `derive_subseed(seed, i)`, so the same seed always reproduces the
    /// same N initial states regardless of worker count.
    pub fn reset_all(&mut self, seed: u64) -> Vec<Observation> {
        let Self { slots, pool, .. } = self;
        let mut obs = vec![[0.0; 4]; slots.len()];
        pool.install(|| {
            slots
                .par_iter_mut()
                .zip(obs.par_iter_mut())
                .enumerate()
                .for_each(|(i, (slot, out))| {
                    slot.reseed(derive_subseed(seed, i as u64));
                    *out = dynamics::reset_state(slot);
                });
        });
        obs
    }

    /// Reset a single slot with the same per-slot seed derivation as
    /// [`CartPoleBatch::reset_all`].
    pub fn reset_one(&mut self, index: usize, seed: u64) -> Result<Observation> {
        let n = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(EngineError::ShapeMismatch {
                expected: n,
                got: index,
            })?;
        slot.reseed(derive_subseed(seed, index as u64));
        Ok(dynamics::reset_state(slot))
    }

    /// Step every slot with its corresponding action.
    ///
    /// Validation runs before any slot is touched: a wrong-length action
    /// batch signals `ShapeMismatch` and an out-of-range action signals
    /// `InvalidAction`, in both cases with every slot left exactly as it
    /// was — partial results are never returned.
    ///
    /// Any slot whose episode ends on this step (termination or
    /// truncation) is auto-reset from its own RNG stream before the call
    /// returns. `observations[i]` for such a slot is the terminal,
    /// pre-reset observation; the fresh initial observation is carried in
    /// [`BatchStep::reset_observations`].
    pub fn step_all(&mut self, actions: &[u32]) -> Result<BatchStep> {
        let n = self.slots.len();
        if actions.len() != n {
            return Err(EngineError::ShapeMismatch {
                expected: n,
                got: actions.len(),
            });
        }
        if let Some(slot) = actions.iter().position(|&a| a >= NUM_ACTIONS) {
            return Err(EngineError::InvalidAction {
                slot,
                action: actions[slot],
            });
        }

        let Self {
            slots,
            params,
            pool,
        } = self;
        let params: &SimParams = params;
        let mut outcomes = Vec::new();
        pool.install(|| {
            slots
                .par_iter_mut()
                .zip(actions.par_iter())
                .map(|(slot, &action)| dynamics::advance(slot, action, params))
                .collect_into_vec(&mut outcomes);
        });

        // Fan-in: gather results and auto-reset finished slots. The
        // terminal observation is what the caller sees for this step.
        let mut step = BatchStep {
            observations: Vec::with_capacity(n),
            rewards: Vec::with_capacity(n),
            terminated: Vec::with_capacity(n),
            truncated: Vec::with_capacity(n),
            reset_observations: Vec::new(),
        };
        for (i, (slot, outcome)) in slots.iter_mut().zip(outcomes).enumerate() {
            step.observations.push(outcome.observation);
            step.rewards.push(outcome.reward);
            step.terminated.push(outcome.terminated);
            step.truncated.push(outcome.truncated);
            if outcome.done() {
                step.reset_observations
                    .push((i, dynamics::reset_state(slot)));
            }
        }
        Ok(step)
    }
}
