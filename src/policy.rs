use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::action::{ActionSpace, RawAction};

pub trait Policy<S, A> {
    // 根据状态选择动作
    fn select_action(&mut self, state: &S) -> A;
}

/// Uniform sampling of an action space, with its own seeded random source.
pub struct RandomPolicy {
    space: ActionSpace,
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(space: ActionSpace, seed: u64) -> Self {
        Self {
            space,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn space(&self) -> &ActionSpace {
        &self.space
    }
}

impl<S> Policy<S, RawAction> for RandomPolicy {
    fn select_action(&mut self, _state: &S) -> RawAction {
        self.space.sample(&mut self.rng)
    }
}
