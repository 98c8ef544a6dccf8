//! Handle-based surface for host embeddings.
//!
//! A registry owns live batches behind opaque numeric handles, mirroring a
//! create/reset/step/destroy foreign interface without any process-wide
//! state: the embedding owns the registry, and multiple registries (and
//! multiple batches per registry) coexist independently.

use std::collections::HashMap;

use tracing::debug;

use crate::batch::CartPoleBatch;
use crate::core::{BatchStep, EngineError, Observation, Result};
use crate::params::SimParams;

/// Opaque identifier for a live batch inside an [`EngineRegistry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EngineHandle(u64);

impl EngineHandle {
    /// Raw id, e.g. for passing across a foreign boundary.
    pub fn id(self) -> u64 {
        self.0
    }

    /// Rebuild a handle from a raw id received back from a host.
    pub fn from_id(id: u64) -> Self {
        Self(id)
    }
}

/// Caller-owned table of live [`CartPoleBatch`] instances.
///
/// Handle ids are allocated from a monotonic counter and never reused
/// within a registry's lifetime, so a stale handle fails with
/// `InvalidHandle` instead of silently addressing a new batch.
#[derive(Default)]
pub struct EngineRegistry {
    next_id: u64,
    batches: HashMap<u64, CartPoleBatch>,
}

impl EngineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live batches.
    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Create a batch of `n_envs` slots; fails with `InvalidParams` on a
    /// non-physical configuration.
    pub fn create(&mut self, n_envs: usize, params: SimParams) -> Result<EngineHandle> {
        let batch = CartPoleBatch::new(n_envs, params)?;
        let id = self.next_id;
        self.next_id += 1;
        self.batches.insert(id, batch);
        debug!(id, n_envs, "registered batch");
        Ok(EngineHandle(id))
    }

    /// Reset all slots of the addressed batch with the given base seed.
    pub fn reset(&mut self, handle: EngineHandle, seed: u64) -> Result<Vec<Observation>> {
        Ok(self.get_mut(handle)?.reset_all(seed))
    }

    /// Step all slots of the addressed batch.
    pub fn step(&mut self, handle: EngineHandle, actions: &[u32]) -> Result<BatchStep> {
        self.get_mut(handle)?.step_all(actions)
    }

    /// Drop the addressed batch; its handle becomes permanently invalid.
    pub fn destroy(&mut self, handle: EngineHandle) -> Result<()> {
        self.batches
            .remove(&handle.0)
            .map(|_| debug!(id = handle.0, "destroyed batch"))
            .ok_or(EngineError::InvalidHandle(handle.0))
    }

    pub fn get(&self, handle: EngineHandle) -> Result<&CartPoleBatch> {
        self.batches
            .get(&handle.0)
            .ok_or(EngineError::InvalidHandle(handle.0))
    }

    pub fn get_mut(&mut self, handle: EngineHandle) -> Result<&mut CartPoleBatch> {
        self.batches
            .get_mut(&handle.0)
            .ok_or(EngineError::InvalidHandle(handle.0))
    }
}
