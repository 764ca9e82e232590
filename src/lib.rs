// detailed implementation
pub mod environments;
pub mod observer;
pub mod registry;
pub mod rollout;
pub mod utils;

// core types
pub mod action;
pub mod agent;
pub mod config;
pub mod environment; // environment trait
pub mod error;
pub mod policy;

pub use action::{Action, ActionSpace, RawAction};
pub use config::{ChainConfig, MovingConfig};
pub use environment::{BoxedEnvironment, Environment, Observation, StepResult};
pub use environments::{MovingEnv, PChainEnv};
pub use error::{EnvError, Result};
pub use registry::{EnvId, make};
