use tracing::info;

use crate::environment::Environment;
use crate::error::Result;
use crate::policy::Policy;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeStats {
    pub total_reward: f64,
    pub steps: usize,
}

/// Runs one episode to completion, returning its return and length.
pub fn run_episode<E, P>(env: &mut E, policy: &mut P) -> Result<EpisodeStats>
where
    E: Environment,
    P: Policy<E::State, E::Action>,
{
    let mut state = env.reset();
    let mut total_reward = 0.0_f64;
    let mut steps = 0;

    loop {
        let action = policy.select_action(&state);
        let result = env.step(&action)?;
        let reward: f64 = result.reward.into();
        total_reward += reward;
        steps += 1;

        if result.done {
            break;
        }
        state = result.next_state;
    }

    Ok(EpisodeStats {
        total_reward,
        steps,
    })
}

pub fn run_episodes<E, P>(
    env: &mut E,
    policy: &mut P,
    num_episodes: usize,
) -> Result<Vec<EpisodeStats>>
where
    E: Environment,
    P: Policy<E::State, E::Action>,
{
    let mut all_stats = Vec::with_capacity(num_episodes);
    for episode in 0..num_episodes {
        let stats = run_episode(env, policy)?;
        info!(
            episode,
            total_reward = stats.total_reward,
            steps = stats.steps,
            "episode finished"
        );
        all_stats.push(stats);
    }
    Ok(all_stats)
}
