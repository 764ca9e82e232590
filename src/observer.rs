//! Optional observers reading environment output after every step.
//!
//! The environments never call into this module. A [`Monitor`] sits between
//! the caller and an environment and forwards each reset and step to its
//! observer, so visualisation and recording can be switched on without
//! touching the simulation.

use std::path::Path;

use tracing::warn;

use crate::action::ActionSpace;
use crate::environment::{Environment, Observation, StepResult};
use crate::environments::moving::{
    INFO_TARGET_RADIUS, OBS_AGENT_X, OBS_AGENT_Y, OBS_TARGET_X, OBS_TARGET_Y, OBSERVATION_DIM,
};
use crate::error::Result;
use crate::utils::{Trajectory, plot_trajectories};

pub trait Observer<S, R> {
    fn on_reset(&mut self, state: &S);

    fn on_step(&mut self, result: &StepResult<S, R>);
}

/// Wraps an environment and notifies an observer of every transition.
pub struct Monitor<E, O> {
    env: E,
    observer: O,
}

impl<E, O> Monitor<E, O>
where
    E: Environment,
    O: Observer<E::State, E::Reward>,
{
    pub fn new(env: E, observer: O) -> Self {
        Self { env, observer }
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_parts(self) -> (E, O) {
        (self.env, self.observer)
    }
}

impl<E, O> Environment for Monitor<E, O>
where
    E: Environment,
    O: Observer<E::State, E::Reward>,
{
    type State = E::State;
    type Action = E::Action;
    type Reward = E::Reward;

    fn seed(&mut self, seed: Option<u64>) -> Vec<u64> {
        self.env.seed(seed)
    }

    fn reset(&mut self) -> Self::State {
        let state = self.env.reset();
        self.observer.on_reset(&state);
        state
    }

    fn step(&mut self, action: &Self::Action) -> Result<StepResult<Self::State, Self::Reward>> {
        // failed steps leave the environment untouched, nothing to report
        let result = self.env.step(action)?;
        self.observer.on_step(&result);
        Ok(result)
    }

    fn current_state(&self) -> Self::State {
        self.env.current_state()
    }

    fn action_space(&self) -> ActionSpace {
        self.env.action_space()
    }

    fn state_dim(&self) -> usize {
        self.env.state_dim()
    }
}

/// Records the agent path of every moving-environment episode.
///
/// The target radius is not part of the observation. It is read from the step
/// info; `target_radius` is only used for episodes that never step.
/// Observations of any other layout are ignored.
#[derive(Debug)]
pub struct TrajectoryRecorder {
    target_radius: f64,
    episodes: Vec<Trajectory>,
    recording: bool,
}

impl TrajectoryRecorder {
    pub fn new(target_radius: f64) -> Self {
        Self {
            target_radius,
            episodes: Vec::new(),
            recording: false,
        }
    }

    pub fn episodes(&self) -> &[Trajectory] {
        &self.episodes
    }

    pub fn clear(&mut self) {
        self.episodes.clear();
    }

    /// Renders every recorded episode to a PNG file.
    pub fn save_plot(&self, field_size: f64, path: impl AsRef<Path>) -> Result<()> {
        plot_trajectories(&self.episodes, field_size, path, "Moving agent trajectories")
    }

    fn record(&mut self, obs: &Observation) {
        if let Some(current) = self.episodes.last_mut() {
            current.points.push((obs[OBS_AGENT_X], obs[OBS_AGENT_Y]));
        }
    }
}

impl Observer<Observation, f64> for TrajectoryRecorder {
    fn on_reset(&mut self, state: &Observation) {
        if state.len() != OBSERVATION_DIM {
            warn!(len = state.len(), "not a moving observation, trajectory not recorded");
            self.recording = false;
            return;
        }
        self.recording = true;
        self.episodes.push(Trajectory {
            points: Vec::new(),
            target: (state[OBS_TARGET_X], state[OBS_TARGET_Y]),
            target_radius: self.target_radius,
        });
        self.record(state);
    }

    fn on_step(&mut self, result: &StepResult<Observation, f64>) {
        if !self.recording || result.next_state.len() != OBSERVATION_DIM {
            return;
        }
        if let (Some(current), Some(&radius)) =
            (self.episodes.last_mut(), result.info.get(INFO_TARGET_RADIUS))
        {
            current.target_radius = radius;
        }
        self.record(&result.next_state);
    }
}
