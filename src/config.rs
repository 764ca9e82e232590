use serde::{Deserialize, Serialize};

use crate::error::{EnvError, Result};

/// Moving 环境参数
///
/// Defaults are the constants the environment was tuned with. Every field can
/// be overridden from JSON; missing fields fall back to the default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovingConfig {
    // Agent
    pub max_turn: f64,
    pub max_acceleration: f64,
    pub break_value: f64,

    // Environment
    pub delta_t: f64,
    pub max_step: usize,
    /// Half-width of the square arena.
    pub field_size: f64,
    pub target_radius: f64,
    /// When set, the radius is drawn uniformly from `[target_radius, target_radius_max]`
    /// at every reset instead of staying fixed.
    pub target_radius_max: Option<f64>,
    pub penalty: f64,
}

impl Default for MovingConfig {
    fn default() -> Self {
        Self {
            max_turn: 1.0,
            max_acceleration: 0.5,
            break_value: 0.1,
            delta_t: 0.1,
            max_step: 200,
            field_size: 1.0,
            target_radius: 0.1,
            target_radius_max: None,
            penalty: 0.05,
        }
    }
}

impl MovingConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Largest radius a target can be given under this configuration.
    pub fn largest_radius(&self) -> f64 {
        self.target_radius_max.unwrap_or(self.target_radius)
    }

    pub fn validate(&self) -> Result<()> {
        non_negative("max_turn", self.max_turn)?;
        non_negative("max_acceleration", self.max_acceleration)?;
        non_negative("break_value", self.break_value)?;
        positive("delta_t", self.delta_t)?;
        positive("field_size", self.field_size)?;
        positive("target_radius", self.target_radius)?;
        non_negative("penalty", self.penalty)?;

        if self.max_step == 0 {
            return Err(EnvError::invalid_config("max_step", "must be at least 1"));
        }
        if let Some(max) = self.target_radius_max {
            if !max.is_finite() || max < self.target_radius {
                return Err(EnvError::invalid_config(
                    "target_radius_max",
                    format!("must be finite and >= target_radius ({})", self.target_radius),
                ));
            }
        }
        // the whole target disc has to fit inside the field
        if self.largest_radius() >= self.field_size {
            return Err(EnvError::invalid_config(
                "target_radius",
                format!("must be smaller than field_size ({})", self.field_size),
            ));
        }
        Ok(())
    }
}

/// Parametrized chain parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Number of states in the chain.
    pub n: usize,
    /// Payout for a successful backward move.
    pub small: f64,
    /// Payout for moving forward at the end of the chain.
    pub large: f64,
    /// Minimum slip probability.
    pub epsilon: f64,
    /// Width of the gaussian linking a parameter to its success probability.
    pub sigma: f64,
    pub max_step: usize,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            n: 4,
            small: 2.0,
            large: 10.0,
            epsilon: 0.25,
            sigma: 0.25,
            max_step: 1000,
        }
    }
}

impl ChainConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.n < 2 {
            return Err(EnvError::invalid_config("n", "chain needs at least 2 states"));
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(EnvError::invalid_config("epsilon", "must lie in [0, 1]"));
        }
        positive("sigma", self.sigma)?;
        if !self.small.is_finite() || !self.large.is_finite() {
            return Err(EnvError::invalid_config("small/large", "payouts must be finite"));
        }
        if self.max_step == 0 {
            return Err(EnvError::invalid_config("max_step", "must be at least 1"));
        }
        Ok(())
    }
}

fn positive(param: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EnvError::invalid_config(
            param,
            format!("must be a positive number, got {value}"),
        ))
    }
}

fn non_negative(param: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(EnvError::invalid_config(
            param,
            format!("must be a non-negative number, got {value}"),
        ))
    }
}
