//! Construct environments by their registration id.

use std::fmt;
use std::str::FromStr;

use crate::config::{ChainConfig, MovingConfig};
use crate::environment::BoxedEnvironment;
use crate::environments::{MovingEnv, PChainEnv};
use crate::error::{EnvError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvId {
    Moving,
    NChain,
}

impl EnvId {
    pub const ALL: [EnvId; 2] = [EnvId::Moving, EnvId::NChain];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnvId::Moving => "Moving-v0",
            EnvId::NChain => "NChain-v0",
        }
    }

    /// Builds the environment, optionally overriding its defaults with a JSON config.
    pub fn build(&self, seed: Option<u64>, config_json: Option<&str>) -> Result<BoxedEnvironment> {
        let env: BoxedEnvironment = match self {
            EnvId::Moving => {
                let config = match config_json {
                    Some(json) => MovingConfig::from_json(json)?,
                    None => MovingConfig::default(),
                };
                Box::new(MovingEnv::new(config, seed)?)
            }
            EnvId::NChain => {
                let config = match config_json {
                    Some(json) => ChainConfig::from_json(json)?,
                    None => ChainConfig::default(),
                };
                Box::new(PChainEnv::new(config, seed)?)
            }
        };
        Ok(env)
    }
}

impl fmt::Display for EnvId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnvId {
    type Err = EnvError;

    fn from_str(s: &str) -> Result<Self> {
        EnvId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| EnvError::UnknownEnvironment(s.to_string()))
    }
}

/// Registered ids, in registration order.
pub fn registered_ids() -> Vec<&'static str> {
    EnvId::ALL.iter().map(EnvId::as_str).collect()
}

/// `make("Moving-v0", Some(0))`: default configuration, optional seed.
pub fn make(id: &str, seed: Option<u64>) -> Result<BoxedEnvironment> {
    id.parse::<EnvId>()?.build(seed, None)
}
