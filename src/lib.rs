pub mod batch;
pub mod core;
pub mod dynamics;
pub mod env;
pub mod handle;
pub mod params;
pub mod utils;

pub use crate::batch::CartPoleBatch;
pub use crate::core::{BatchStep, EngineError, Observation, Result, StepOutcome};
pub use crate::dynamics::{NUM_ACTIONS, SlotState, advance, reset_state};
pub use crate::env::CartPoleEnv;
pub use crate::handle::{EngineHandle, EngineRegistry};
pub use crate::params::SimParams;
pub use crate::utils::rng::{derive_subseed, rng_from_seed, subseed_rng};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_env_runs() {
        let mut env = CartPoleEnv::default();
        let _obs = env.reset(Some(0));
        for _ in 0..10 {
            let s = env.step(1).expect("valid action");
            assert!(s.reward >= 1.0 - 1e-9);
            if s.done() {
                break;
            }
        }
    }

    #[test]
    fn batch_runs() {
        let mut batch = CartPoleBatch::new(4, SimParams::default()).expect("valid params");
        let obs = batch.reset_all(0);
        assert_eq!(obs.len(), 4);
        let step = batch.step_all(&[0, 1, 0, 1]).expect("valid actions");
        assert_eq!(step.observations.len(), 4);
        assert_eq!(step.rewards.len(), 4);
        assert_eq!(step.terminated.len(), 4);
        assert_eq!(step.truncated.len(), 4);
    }

    #[test]
    fn registry_runs() {
        let mut reg = EngineRegistry::new();
        let h = reg.create(2, SimParams::default()).expect("valid params");
        let obs = reg.reset(h, 1).expect("live handle");
        assert_eq!(obs.len(), 2);
        let step = reg.step(h, &[1, 0]).expect("live handle");
        assert_eq!(step.len(), 2);
        reg.destroy(h).expect("live handle");
    }

    #[test]
    fn observation_layout_is_stable() {
        let mut env = CartPoleEnv::default();
        env.reset(Some(3));
        let s = env.state();
        let obs = env.observation();
        assert_eq!(obs, [s.x, s.x_dot, s.theta, s.theta_dot]);
    }
}
