use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{EnvError, Result};

// Action ids of the moving environment
pub const TURN: i64 = 0;
pub const ACCELERATE: i64 = 1;
pub const BRAKE: i64 = 2;

/// Length of the continuous parameter vector of a moving action.
pub const MOVING_PARAMETERS: usize = 2;

/// Action as it crosses the boundary: a discrete id plus the continuous
/// parameters of every action kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAction {
    pub id: i64,
    pub parameters: Vec<f64>,
}

impl RawAction {
    pub fn new(id: i64, parameters: Vec<f64>) -> Self {
        Self { id, parameters }
    }

    /// Checks the parameter vector has the expected length. Values are not
    /// inspected: only the slot of the chosen kind is ever read.
    pub fn check_parameters(&self, expected: usize) -> Result<()> {
        if self.parameters.len() != expected {
            return Err(EnvError::MalformedAction(format!(
                "expected {expected} parameters, got {}",
                self.parameters.len()
            )));
        }
        Ok(())
    }

    /// Reads one parameter slot. Infinities are left to the caller's clamping,
    /// NaN has no position on the range and is rejected.
    pub fn parameter(&self, slot: usize) -> Result<f64> {
        let value = self.parameters.get(slot).copied().ok_or_else(|| {
            EnvError::MalformedAction(format!(
                "no parameter in slot {slot} (got {})",
                self.parameters.len()
            ))
        })?;
        if value.is_nan() {
            return Err(EnvError::MalformedAction(format!("parameter {slot} is NaN")));
        }
        Ok(value)
    }
}

impl From<(i64, Vec<f64>)> for RawAction {
    fn from((id, parameters): (i64, Vec<f64>)) -> Self {
        Self { id, parameters }
    }
}

/// Motion primitive applied to the moving agent for one step.
///
/// Parameters are raw: clamping to the valid range is done by the environment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Turn(f64),
    Accelerate(f64),
    Brake,
}

impl Action {
    pub fn id(&self) -> i64 {
        match self {
            Action::Turn(_) => TURN,
            Action::Accelerate(_) => ACCELERATE,
            Action::Brake => BRAKE,
        }
    }
}

impl TryFrom<&RawAction> for Action {
    type Error = EnvError;

    fn try_from(raw: &RawAction) -> Result<Self> {
        // the kind is checked first so a bad id is never reported as a bad vector
        if !(TURN..=BRAKE).contains(&raw.id) {
            return Err(EnvError::InvalidActionKind {
                id: raw.id,
                expected: 3,
            });
        }
        raw.check_parameters(MOVING_PARAMETERS)?;

        Ok(match raw.id {
            TURN => Action::Turn(raw.parameter(0)?),
            ACCELERATE => Action::Accelerate(raw.parameter(1)?),
            _ => Action::Brake,
        })
    }
}

impl From<Action> for RawAction {
    fn from(action: Action) -> Self {
        let parameters = match action {
            Action::Turn(v) => vec![v, 0.0],
            Action::Accelerate(v) => vec![0.0, v],
            Action::Brake => vec![0.0, 0.0],
        };
        RawAction::new(action.id(), parameters)
    }
}

/// `Discrete(num_kinds) × Box(low, high)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionSpace {
    pub num_kinds: usize,
    pub low: Vec<f64>,
    pub high: Vec<f64>,
}

impl ActionSpace {
    pub fn new(num_kinds: usize, low: Vec<f64>, high: Vec<f64>) -> Self {
        debug_assert_eq!(low.len(), high.len());
        Self { num_kinds, low, high }
    }

    pub fn parameter_dim(&self) -> usize {
        self.low.len()
    }

    pub fn contains(&self, action: &RawAction) -> bool {
        let id_ok = action.id >= 0 && (action.id as usize) < self.num_kinds;
        id_ok
            && action.parameters.len() == self.parameter_dim()
            && action
                .parameters
                .iter()
                .zip(self.low.iter().zip(&self.high))
                .all(|(p, (lo, hi))| lo <= p && p <= hi)
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> RawAction {
        let id = rng.random_range(0..self.num_kinds) as i64;
        let parameters = self
            .low
            .iter()
            .zip(&self.high)
            .map(|(&lo, &hi)| rng.random_range(lo..=hi))
            .collect();
        RawAction { id, parameters }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn maps_ids_to_motion_primitives() {
        let turn = RawAction::new(0, vec![0.3, 0.9]);
        assert_eq!(Action::try_from(&turn).unwrap(), Action::Turn(0.3));

        let accelerate = RawAction::new(1, vec![0.3, 0.9]);
        assert_eq!(Action::try_from(&accelerate).unwrap(), Action::Accelerate(0.9));

        let brake = RawAction::from((2, vec![5.0, -5.0]));
        assert_eq!(Action::try_from(&brake).unwrap(), Action::Brake);
    }

    #[test]
    fn unknown_id_is_rejected() {
        for id in [-1, 3, 42] {
            let raw = RawAction::new(id, vec![0.0, 0.0]);
            assert!(matches!(
                Action::try_from(&raw),
                Err(EnvError::InvalidActionKind { expected: 3, .. })
            ));
        }
    }

    #[test]
    fn short_vectors_and_nan_are_malformed() {
        let short = RawAction::new(ACCELERATE, vec![0.1]);
        assert!(matches!(Action::try_from(&short), Err(EnvError::MalformedAction(_))));

        let empty = RawAction::new(BRAKE, vec![]);
        assert!(matches!(Action::try_from(&empty), Err(EnvError::MalformedAction(_))));

        let nan = RawAction::new(TURN, vec![f64::NAN, 0.0]);
        assert!(matches!(Action::try_from(&nan), Err(EnvError::MalformedAction(_))));
    }

    #[test]
    fn only_the_slot_of_the_kind_is_read() {
        let turn = RawAction::new(TURN, vec![0.3, f64::INFINITY]);
        assert_eq!(Action::try_from(&turn).unwrap(), Action::Turn(0.3));

        let accelerate = RawAction::new(ACCELERATE, vec![f64::NAN, 0.2]);
        assert_eq!(Action::try_from(&accelerate).unwrap(), Action::Accelerate(0.2));

        let brake = RawAction::new(BRAKE, vec![f64::NAN, f64::NEG_INFINITY]);
        assert_eq!(Action::try_from(&brake).unwrap(), Action::Brake);
    }

    #[test]
    fn infinite_parameters_pass_through() {
        let raw = RawAction::new(ACCELERATE, vec![0.0, f64::INFINITY]);
        assert_eq!(Action::try_from(&raw).unwrap(), Action::Accelerate(f64::INFINITY));

        let raw = RawAction::new(TURN, vec![f64::NEG_INFINITY, 0.0]);
        assert_eq!(Action::try_from(&raw).unwrap(), Action::Turn(f64::NEG_INFINITY));
    }

    #[test]
    fn typed_action_converts_back() {
        let raw: RawAction = Action::Accelerate(0.25).into();
        assert_eq!(raw, RawAction::new(ACCELERATE, vec![0.0, 0.25]));
        assert_eq!(Action::try_from(&raw).unwrap(), Action::Accelerate(0.25));
    }

    #[test]
    fn samples_stay_inside_the_space() {
        let space = ActionSpace::new(3, vec![-1.0, 0.0], vec![1.0, 0.5]);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let action = space.sample(&mut rng);
            assert!(space.contains(&action), "{action:?}");
        }
        assert!(!space.contains(&RawAction::new(3, vec![0.0, 0.0])));
        assert!(!space.contains(&RawAction::new(0, vec![2.0, 0.0])));
        assert!(!space.contains(&RawAction::new(0, vec![0.0])));
    }
}
