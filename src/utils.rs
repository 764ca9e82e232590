use std::path::Path;

use plotters::prelude::*;

use crate::error::{EnvError, Result};

/// One recorded episode of the moving environment: the agent path and the target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    pub points: Vec<(f64, f64)>,
    pub target: (f64, f64),
    pub target_radius: f64,
}

fn plot_err(e: impl std::fmt::Display) -> EnvError {
    EnvError::Plot(e.to_string())
}

pub fn plot_rewards(rewards: &[f64], filename: impl AsRef<Path>, title: &str) -> Result<()> {
    let filename = filename.as_ref();
    let root = BitMapBackend::new(filename, (800, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    // returns can be negative here, keep both ends and avoid a flat range
    let max_reward = rewards.iter().cloned().fold(f64::MIN, f64::max).max(1.0);
    let min_reward = rewards.iter().cloned().fold(f64::MAX, f64::min).min(0.0);

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 32).into_font())
        .margin(30)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0..rewards.len().max(1), min_reward..max_reward)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Episode")
        .y_desc("Total Reward")
        .axis_desc_style(("sans-serif", 22))
        .label_style(("sans-serif", 18))
        .light_line_style(&WHITE.mix(0.3))
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(LineSeries::new(
            rewards.iter().enumerate().map(|(i, r)| (i, *r)),
            &BLUE,
        ))
        .map_err(plot_err)?
        .label("Reward")
        .legend(|(x, y)| PathElement::new([(x, y), (x + 20, y)], BLUE));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(("sans-serif", 18))
        .draw()
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    tracing::info!(path = %filename.display(), "saved reward plot");
    Ok(())
}

/// Draws agent paths and their targets on the square field `[-field_size, field_size]²`.
pub fn plot_trajectories(
    trajectories: &[Trajectory],
    field_size: f64,
    filename: impl AsRef<Path>,
    title: &str,
) -> Result<()> {
    let filename = filename.as_ref();
    let root = BitMapBackend::new(filename, (640, 640)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 26))
        .margin(20)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(-field_size..field_size, -field_size..field_size)
        .map_err(plot_err)?;

    chart.configure_mesh().draw().map_err(plot_err)?;

    for (i, trajectory) in trajectories.iter().enumerate() {
        let color = Palette99::pick(i).to_rgba();

        // target disc, approximated by a polygon in data coordinates
        let (tx, ty) = trajectory.target;
        let r = trajectory.target_radius;
        let disc: Vec<(f64, f64)> = (0..48)
            .map(|k| {
                let a = k as f64 / 48.0 * std::f64::consts::TAU;
                (tx + r * a.cos(), ty + r * a.sin())
            })
            .collect();
        chart
            .draw_series(std::iter::once(Polygon::new(disc, color.mix(0.25).filled())))
            .map_err(plot_err)?;

        chart
            .draw_series(LineSeries::new(trajectory.points.iter().copied(), &color))
            .map_err(plot_err)?;

        if let Some(&start) = trajectory.points.first() {
            chart
                .draw_series(std::iter::once(Circle::new(start, 4, color.filled())))
                .map_err(plot_err)?;
        }
    }

    root.present().map_err(plot_err)?;
    tracing::info!(
        path = %filename.display(),
        episodes = trajectories.len(),
        "saved trajectory plot"
    );
    Ok(())
}
