use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::action::{ActionSpace, RawAction};
use crate::config::ChainConfig;
use crate::environment::{Environment, Info, Observation, StepResult, resolve_seed};
use crate::error::{EnvError, Result};

pub const FORWARD: i64 = 0;
pub const BACKWARD: i64 = 1;

/// Parametrized chain.
///
/// The agent walks along a line of `n` states with two actions:
///  0) forward, which moves one state up the chain and pays nothing, or stays
///     at the last state and pays `large`;
///  1) backward, which returns to the first state and pays `small`.
///
/// Every action carries a continuous parameter. The chance that the chosen
/// transition happens is a gaussian of the distance between that parameter
/// and a hidden mean drawn per (state, action) when the chain is seeded,
/// scaled by `1 - epsilon`. Otherwise the agent slips and the opposite
/// transition is taken. The observation is the one-hot encoded state.
pub struct PChainEnv {
    config: ChainConfig,
    state: usize,
    current_step: usize,
    /// Hidden gaussian means, indexed by `[state][action]`.
    means: Vec<[f64; 2]>,
    rng: StdRng,
    seed: u64,
}

impl PChainEnv {
    pub fn new(config: ChainConfig, seed: Option<u64>) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, seed))
    }

    pub fn with_defaults(seed: Option<u64>) -> Self {
        Self::build(ChainConfig::default(), seed)
    }

    fn build(config: ChainConfig, seed: Option<u64>) -> Self {
        let seed = resolve_seed(seed);
        let mut rng = StdRng::seed_from_u64(seed);
        let means = Self::sample_means(&mut rng, config.n);
        Self {
            config,
            state: 0,
            current_step: 0,
            means,
            rng,
            seed,
        }
    }

    fn sample_means(rng: &mut StdRng, n: usize) -> Vec<[f64; 2]> {
        (0..n)
            .map(|_| [rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)])
            .collect()
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    pub fn state(&self) -> usize {
        self.state
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn applied_seed(&self) -> u64 {
        self.seed
    }

    /// Parameter that maximises the success chance of `action` in `state`.
    pub fn best_parameter(&self, state: usize, action: i64) -> Option<f64> {
        let slot = usize::try_from(action).ok().filter(|&a| a < 2)?;
        self.means.get(state).map(|m| m[slot])
    }

    /// Chance that `action` with `parameter` does what it asks for in the current state.
    pub fn probability(&self, action: i64, parameter: f64) -> f64 {
        let Some(mean) = self.best_parameter(self.state, action) else {
            return 0.0;
        };
        let sigma = self.config.sigma;
        let gaussian = (-(parameter - mean).powi(2) / (2.0 * sigma * sigma)).exp();
        (1.0 - self.config.epsilon) * gaussian
    }

    pub fn one_hot_encoder(&self, n: usize) -> Observation {
        (0..self.config.n).map(|i| if i == n { 1.0 } else { 0.0 }).collect()
    }

    fn transition(&mut self, action: i64) -> f64 {
        if action == BACKWARD {
            self.state = 0;
            self.config.small
        } else if self.state < self.config.n - 1 {
            self.state += 1;
            0.0
        } else {
            self.config.large
        }
    }
}

impl Environment for PChainEnv {
    type State = Observation;
    type Action = RawAction; // 0: forward, 1: backward
    type Reward = f64;

    fn seed(&mut self, seed: Option<u64>) -> Vec<u64> {
        let seed = resolve_seed(seed);
        self.rng = StdRng::seed_from_u64(seed);
        self.means = Self::sample_means(&mut self.rng, self.config.n);
        self.seed = seed;
        vec![seed]
    }

    fn reset(&mut self) -> Self::State {
        self.state = 0;
        self.current_step = 0;
        debug!(n = self.config.n, "chain env reset");
        self.one_hot_encoder(self.state)
    }

    fn step(&mut self, action: &Self::Action) -> Result<StepResult<Self::State, Self::Reward>> {
        if action.id != FORWARD && action.id != BACKWARD {
            return Err(EnvError::InvalidActionKind {
                id: action.id,
                expected: 2,
            });
        }
        action.check_parameters(2)?;
        if self.current_step >= self.config.max_step {
            return Err(EnvError::EpisodeTerminated);
        }

        let parameter = action.parameter(action.id as usize)?;
        let probability = self.probability(action.id, parameter);
        let slipped = self.rng.random::<f64>() >= probability;
        let taken = if slipped { 1 - action.id } else { action.id };

        self.current_step += 1;
        let reward = self.transition(taken);
        let done = self.current_step >= self.config.max_step;

        trace!(
            step = self.current_step,
            action = action.id,
            probability,
            slipped,
            state = self.state,
            reward,
            "chain env step"
        );
        if done {
            debug!(step = self.current_step, "chain episode truncated");
        }

        Ok(StepResult {
            next_state: self.one_hot_encoder(self.state),
            reward,
            done,
            info: Info::new(),
        })
    }

    fn current_state(&self) -> Self::State {
        self.one_hot_encoder(self.state)
    }

    fn action_space(&self) -> ActionSpace {
        ActionSpace::new(2, vec![-1.0, -1.0], vec![1.0, 1.0])
    }

    fn state_dim(&self) -> usize {
        self.config.n
    }
}
