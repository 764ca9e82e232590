//! Runs random-policy episodes in a registered environment.
//!
//! ```text
//! rollout --env Moving-v0 --episodes 20 --seed 7 --trajectory-plot moving.png
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`; `debug` shows resets and
//! terminations, `trace` every step).

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pamdp::config::MovingConfig;
use pamdp::environment::Environment;
use pamdp::observer::{Monitor, TrajectoryRecorder};
use pamdp::policy::RandomPolicy;
use pamdp::registry::{EnvId, registered_ids};
use pamdp::rollout::run_episodes;
use pamdp::utils::plot_rewards;

#[derive(Parser, Debug)]
#[command(
    name = "rollout",
    about = "Run random-policy episodes in a parametrized-action environment"
)]
struct Args {
    /// Registered environment id
    #[arg(long, default_value = "Moving-v0")]
    env: String,

    #[arg(long, default_value_t = 10)]
    episodes: usize,

    /// Seed of the environment; the policy uses the next one
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file overriding the environment defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the agent paths to this PNG (Moving-v0 only)
    #[arg(long)]
    trajectory_plot: Option<PathBuf>,

    /// Write the per-episode returns to this PNG
    #[arg(long)]
    reward_plot: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let id: EnvId = args
        .env
        .parse()
        .with_context(|| format!("known environments: {}", registered_ids().join(", ")))?;

    let config_json = match &args.config {
        Some(path) => Some(
            std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?,
        ),
        None => None,
    };

    let mut env = id.build(args.seed, config_json.as_deref())?;
    let seed = env.seed(args.seed)[0];
    let mut policy = RandomPolicy::new(env.action_space(), seed.wrapping_add(1));
    tracing::info!(env = %id, seed, episodes = args.episodes, "starting rollout");

    let stats = match &args.trajectory_plot {
        Some(path) => {
            if id != EnvId::Moving {
                bail!("trajectory plots are only available for {}", EnvId::Moving);
            }
            let config = match &config_json {
                Some(json) => MovingConfig::from_json(json)?,
                None => MovingConfig::default(),
            };
            let mut monitor = Monitor::new(env, TrajectoryRecorder::new(config.target_radius));
            let stats = run_episodes(&mut monitor, &mut policy, args.episodes)?;
            monitor.observer().save_plot(config.field_size, path)?;
            stats
        }
        None => run_episodes(&mut env, &mut policy, args.episodes)?,
    };

    let rewards: Vec<f64> = stats.iter().map(|s| s.total_reward).collect();
    if !stats.is_empty() {
        let n = stats.len() as f64;
        let mean_reward = rewards.iter().sum::<f64>() / n;
        let mean_steps = stats.iter().map(|s| s.steps as f64).sum::<f64>() / n;
        tracing::info!(mean_reward, mean_steps, "rollout finished");
    }

    if let Some(path) = &args.reward_plot {
        plot_rewards(&rewards, path, &format!("{id} random policy"))?;
    }

    Ok(())
}
