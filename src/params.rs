// Shared, read-only simulation parameters.

use crate::core::{EngineError, Result};

/// Physics and episode configuration shared by every slot of a batch.
///
/// Constructed once, validated once, then shared read-only across all
/// workers for the lifetime of the orchestrator. Defaults match the
/// standard CartPole-v1 benchmark conventions.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimParams {
    /// Gravitational acceleration in m/s^2.
    pub gravity: f64,
    pub cart_mass: f64,
    pub pole_mass: f64,
    /// Half the pole's length, as in the reference equations of motion.
    pub pole_half_length: f64,
    /// Magnitude of the force applied to the cart by either action.
    pub force_mag: f64,
    /// Seconds of simulated time per step.
    pub tau: f64,
    /// Step limit after which an episode is truncated.
    pub max_episode_steps: u32,
    /// Episode fails once `|cart_position|` exceeds this.
    pub x_threshold: f64,
    /// Episode fails once `|pole_angle|` exceeds this (radians).
    pub theta_threshold: f64,
    /// Worker threads for batched calls; 0 means available hardware
    /// parallelism.
    pub worker_count: usize,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            gravity: 9.8,
            cart_mass: 1.0,
            pole_mass: 0.1,
            pole_half_length: 0.5,
            force_mag: 10.0,
            tau: 0.02,
            max_episode_steps: 500,
            x_threshold: 2.4,
            theta_threshold: 12.0_f64.to_radians(),
            worker_count: 0,
        }
    }
}

impl SimParams {
    /// Reject non-physical configurations. Called once at creation time;
    /// the engine has no other failure mode related to parameters.
    pub fn validate(&self) -> Result<()> {
        fn positive(name: &str, v: f64) -> Result<()> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(EngineError::InvalidParams(format!(
                    "{name} must be positive and finite, got {v}"
                )))
            }
        }
        positive("cart_mass", self.cart_mass)?;
        positive("pole_mass", self.pole_mass)?;
        positive("pole_half_length", self.pole_half_length)?;
        positive("force_mag", self.force_mag)?;
        positive("tau", self.tau)?;
        positive("x_threshold", self.x_threshold)?;
        positive("theta_threshold", self.theta_threshold)?;
        if !self.gravity.is_finite() {
            return Err(EngineError::InvalidParams(format!(
                "gravity must be finite, got {}",
                self.gravity
            )));
        }
        if self.max_episode_steps == 0 {
            return Err(EngineError::InvalidParams(
                "max_episode_steps must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    #[inline]
    pub(crate) fn total_mass(&self) -> f64 {
        self.cart_mass + self.pole_mass
    }

    #[inline]
    pub(crate) fn polemass_length(&self) -> f64 {
        self.pole_mass * self.pole_half_length
    }

    /// Worker count after resolving 0 to the available hardware parallelism.
    pub fn effective_workers(&self) -> usize {
        if self.worker_count > 0 {
            self.worker_count
        } else {
            std::thread::available_parallelism()
                .map(std::num::NonZeroUsize::get)
                .unwrap_or(1)
        }
    }
}
