use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::action::{Action, ActionSpace, RawAction};
use crate::agent::MovingAgent;
use crate::config::MovingConfig;
use crate::environment::{Environment, Info, Observation, StepResult, resolve_seed};
use crate::error::{EnvError, Result};

// Observation layout
pub const OBS_AGENT_X: usize = 0;
pub const OBS_AGENT_Y: usize = 1;
pub const OBS_SPEED: usize = 2;
pub const OBS_COS_THETA: usize = 3;
pub const OBS_SIN_THETA: usize = 4;
pub const OBS_TARGET_X: usize = 5;
pub const OBS_TARGET_Y: usize = 6;
pub const OBS_DISTANCE: usize = 7;
pub const OBS_IN_TARGET: usize = 8;
pub const OBS_PROGRESS: usize = 9;
pub const OBSERVATION_DIM: usize = 10;

/// Step info key holding the radius of the current target.
pub const INFO_TARGET_RADIUS: &str = "target_radius";

/// Reward of a step that leaves the field or runs out of time.
const FAILURE_REWARD: f64 = -1.0;
const GOAL_BONUS: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

/// Why an episode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    GoalReached,
    OutOfBounds,
    StepLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Idle,
    Running,
    Terminated(Termination),
}

/// 平面移动环境: reach a target disc and stop inside it.
///
/// The agent steers with three primitives (turn, accelerate, brake). Each step
/// applies one primitive followed by one Euler integration of the position.
/// The dense reward is the progress made toward the target minus a constant
/// per-step penalty; stopping inside the target adds a bonus of 1, leaving the
/// field or exceeding `max_step` ends the episode with -1.
pub struct MovingEnv {
    config: MovingConfig,
    agent: MovingAgent,
    target: Target,
    current_step: usize,
    status: Status,
    rng: StdRng,
    seed: u64,
}

impl MovingEnv {
    pub fn new(config: MovingConfig, seed: Option<u64>) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, seed))
    }

    pub fn with_defaults(seed: Option<u64>) -> Self {
        Self::build(MovingConfig::default(), seed)
    }

    fn build(config: MovingConfig, seed: Option<u64>) -> Self {
        let seed = resolve_seed(seed);
        Self {
            agent: MovingAgent::new(config.break_value, config.delta_t),
            target: Target {
                x: 0.0,
                y: 0.0,
                radius: config.target_radius,
            },
            current_step: 0,
            status: Status::Idle,
            rng: StdRng::seed_from_u64(seed),
            seed,
            config,
        }
    }

    pub fn config(&self) -> &MovingConfig {
        &self.config
    }

    pub fn agent(&self) -> &MovingAgent {
        &self.agent
    }

    pub fn target(&self) -> Target {
        self.target
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    /// Seed currently driving the random source.
    pub fn applied_seed(&self) -> u64 {
        self.seed
    }

    /// Reason the current episode ended, `None` while it is running.
    pub fn termination(&self) -> Option<Termination> {
        match self.status {
            Status::Terminated(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self.status, Status::Terminated(_))
    }

    pub fn distance(&self) -> f64 {
        self.agent.distance_to(self.target.x, self.target.y)
    }

    pub fn get_state(&self) -> Observation {
        let distance = self.distance();
        let theta = self.agent.theta();
        vec![
            self.agent.x(),
            self.agent.y(),
            self.agent.speed(),
            theta.cos(),
            theta.sin(),
            self.target.x,
            self.target.y,
            distance,
            if distance > self.target.radius { 0.0 } else { 1.0 },
            self.current_step as f64 / self.config.max_step as f64,
        ]
    }

    /// Starts an episode from a chosen agent pose and target instead of
    /// sampling them.
    pub fn reset_with(&mut self, target: Target, x: f64, y: f64, direction: f64) -> Observation {
        self.target = target;
        self.agent.reset(x, y, direction);
        self.current_step = 0;
        self.status = Status::Running;
        debug!(?target, x, y, direction, "moving env reset");
        self.get_state()
    }

    fn sample_target(&mut self) -> Target {
        let radius = match self.config.target_radius_max {
            Some(max) => self.rng.random_range(self.config.target_radius..=max),
            None => self.config.target_radius,
        };
        let limit = self.config.field_size - radius;
        Target {
            x: self.rng.random_range(-limit..limit),
            y: self.rng.random_range(-limit..limit),
            radius,
        }
    }

    /// Applies one typed action. Lifecycle and parameter checks happen before
    /// any state is touched.
    pub fn step_action(&mut self, action: Action) -> Result<StepResult<Observation, f64>> {
        match self.status {
            Status::Idle => return Err(EnvError::NotReset),
            Status::Terminated(_) => return Err(EnvError::EpisodeTerminated),
            Status::Running => {}
        }
        // infinities clamp to the range ends, NaN has nowhere to go
        if let Action::Turn(v) | Action::Accelerate(v) = action {
            if v.is_nan() {
                return Err(EnvError::MalformedAction("parameter is NaN".to_string()));
            }
        }

        let last_distance = self.distance();
        self.current_step += 1;

        match action {
            Action::Turn(v) => {
                let rotation = v.clamp(-self.config.max_turn, self.config.max_turn);
                self.agent.turn(rotation);
            }
            Action::Accelerate(v) => {
                let acceleration = v.clamp(0.0, self.config.max_acceleration);
                self.agent.accelerate(acceleration);
            }
            Action::Brake => self.agent.brake(),
        }

        self.agent.step(self.agent.delta_t());

        let distance = self.distance();
        let field = self.config.field_size;

        // goal check first: stopping inside the target wins even on the last step
        let (reward, termination) = if distance < self.target.radius && self.agent.speed() == 0.0 {
            (self.reward(last_distance, distance, true), Some(Termination::GoalReached))
        } else if self.agent.x().abs() > field || self.agent.y().abs() > field {
            (FAILURE_REWARD, Some(Termination::OutOfBounds))
        } else if self.current_step > self.config.max_step {
            (FAILURE_REWARD, Some(Termination::StepLimit))
        } else {
            (self.reward(last_distance, distance, false), None)
        };

        trace!(step = self.current_step, ?action, distance, reward, "moving env step");
        if let Some(reason) = termination {
            self.status = Status::Terminated(reason);
            debug!(step = self.current_step, ?reason, reward, "episode terminated");
        }

        Ok(StepResult {
            next_state: self.get_state(),
            reward,
            done: termination.is_some(),
            info: Info::from([(INFO_TARGET_RADIUS.to_string(), self.target.radius)]),
        })
    }

    fn reward(&self, last_distance: f64, distance: f64, goal: bool) -> f64 {
        let bonus = if goal { GOAL_BONUS } else { 0.0 };
        last_distance - distance - self.config.penalty + bonus
    }
}

impl Environment for MovingEnv {
    type State = Observation;
    type Action = RawAction; // 0: turn, 1: accelerate, 2: brake
    type Reward = f64;

    fn seed(&mut self, seed: Option<u64>) -> Vec<u64> {
        let seed = resolve_seed(seed);
        self.rng = StdRng::seed_from_u64(seed);
        self.seed = seed;
        vec![seed]
    }

    fn reset(&mut self) -> Self::State {
        self.current_step = 0;
        self.target = self.sample_target();

        let field = self.config.field_size;
        let x = self.rng.random_range(-field..field);
        let y = self.rng.random_range(-field..field);
        let direction = self.rng.random_range(0.0..TAU);
        self.agent.reset(x, y, direction);
        self.status = Status::Running;

        debug!(target = ?self.target, x, y, direction, "moving env reset");
        self.get_state()
    }

    fn step(&mut self, action: &Self::Action) -> Result<StepResult<Self::State, Self::Reward>> {
        let action = Action::try_from(action)?;
        self.step_action(action)
    }

    fn current_state(&self) -> Self::State {
        self.get_state()
    }

    fn action_space(&self) -> ActionSpace {
        ActionSpace::new(
            3,
            vec![-self.config.max_turn, 0.0],
            vec![self.config.max_turn, self.config.max_acceleration],
        )
    }

    fn state_dim(&self) -> usize {
        OBSERVATION_DIM
    }
}
