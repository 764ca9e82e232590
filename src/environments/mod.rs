pub mod chain;
pub mod moving;

pub use chain::PChainEnv;
pub use moving::{MovingEnv, Target, Termination};
