// Core types shared across the engine: error taxonomy, observation layout,
// and the per-step / per-batch result structs.

/// Observation of one cart-pole instance, in the fixed order
/// `[cart_position, cart_velocity, pole_angle, pole_angular_velocity]`.
///
/// This ordering is a compatibility contract for host bindings and must
/// never change.
pub type Observation = [f64; 4];

/// Outcome of advancing a single slot by one time step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepOutcome {
    pub observation: Observation,
    pub reward: f64,
    /// Failure: cart left the track or the pole fell past the angle limit.
    pub terminated: bool,
    /// Episode hit the step limit without failing.
    pub truncated: bool,
}

impl StepOutcome {
    /// Combined end-of-episode signal. Callers that bootstrap values at
    /// truncation should inspect `terminated`/`truncated` separately.
    pub fn done(&self) -> bool {
        self.terminated || self.truncated
    }
}

/// Results of one batched step over N slots. All vectors have length N and
/// are indexed by slot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchStep {
    /// Per-slot observation after this step. For a slot whose episode ended
    /// on this step this is the terminal, pre-reset observation.
    pub observations: Vec<Observation>,
    pub rewards: Vec<f64>,
    pub terminated: Vec<bool>,
    pub truncated: Vec<bool>,
    /// `(slot, observation)` pairs for every slot that was auto-reset during
    /// this call, carrying the fresh post-reset initial observation.
    pub reset_observations: Vec<(usize, Observation)>,
}

impl BatchStep {
    /// Number of slots in this batch result.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Combined done flag per slot (`terminated || truncated`).
    pub fn done(&self) -> Vec<bool> {
        self.terminated
            .iter()
            .zip(self.truncated.iter())
            .map(|(&t, &tr)| t || tr)
            .collect()
    }
}

/// Errors across the engine APIs. All are reported synchronously at the
/// offending call; a failed call leaves the engine's state untouched.
#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    #[error("invalid action {action} for slot {slot}")]
    InvalidAction { slot: usize, action: u32 },
    #[error("shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: usize, got: usize },
    #[error("invalid or destroyed handle {0}")]
    InvalidHandle(u64),
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
}

/// Convenience alias for results using EngineError.
pub type Result<T> = std::result::Result<T, EngineError>;
