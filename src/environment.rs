use std::collections::BTreeMap;

use crate::action::{ActionSpace, RawAction};
use crate::error::Result;

/// Observation vector returned by the environments in this crate.
pub type Observation = Vec<f64>;

/// Auxiliary per-step information, keyed by name.
pub type Info = BTreeMap<String, f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct StepResult<S, R> {
    pub next_state: S,
    pub reward: R,
    pub done: bool,
    pub info: Info,
}

pub trait Environment {
    type State;
    type Action;
    type Reward: Copy + Into<f64>;

    /// Reseeds the random source, `None` draws a fresh seed. Returns the applied seed.
    fn seed(&mut self, seed: Option<u64>) -> Vec<u64>;

    fn reset(&mut self) -> Self::State;

    // (next_state, reward, if_done, info)
    fn step(&mut self, action: &Self::Action) -> Result<StepResult<Self::State, Self::Reward>>;

    /// 获取当前状态
    fn current_state(&self) -> Self::State;

    /// 动作空间
    fn action_space(&self) -> ActionSpace;

    /// 状态空间维度
    fn state_dim(&self) -> usize;
}

/// Environment as seen through the registry: vector observations, raw actions.
pub type BoxedEnvironment =
    Box<dyn Environment<State = Observation, Action = RawAction, Reward = f64>>;

impl<E: Environment + ?Sized> Environment for Box<E> {
    type State = E::State;
    type Action = E::Action;
    type Reward = E::Reward;

    fn seed(&mut self, seed: Option<u64>) -> Vec<u64> {
        (**self).seed(seed)
    }

    fn reset(&mut self) -> Self::State {
        (**self).reset()
    }

    fn step(&mut self, action: &Self::Action) -> Result<StepResult<Self::State, Self::Reward>> {
        (**self).step(action)
    }

    fn current_state(&self) -> Self::State {
        (**self).current_state()
    }

    fn action_space(&self) -> ActionSpace {
        (**self).action_space()
    }

    fn state_dim(&self) -> usize {
        (**self).state_dim()
    }
}

/// Draws a seed from OS entropy when none is given.
pub(crate) fn resolve_seed(seed: Option<u64>) -> u64 {
    use rand::Rng;
    seed.unwrap_or_else(|| rand::rng().random())
}
