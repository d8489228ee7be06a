use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use obstacle_dynamics::config::ObstacleConfig;
use obstacle_dynamics::control::model::DiscreteStateSpaceModel;
use obstacle_dynamics::control::obstacle::Axes;
use obstacle_dynamics::control::simulator::system_simulate;
use obstacle_dynamics::control::trajectory::{generate_pulse_commands, generate_step_commands};
use plotters::prelude::*;
use tracing::info;

extern crate nalgebra as na;

#[derive(Parser)]
#[command(name = "obstacle-sim")]
#[command(about = "Predict obstacle motion with a sampled state-space model", long_about = None)]
struct Cli {
    /// Path to the obstacle YAML configuration (defaults are used if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of independent motion axes
    #[arg(long, value_enum, default_value_t = AxesArg::One)]
    axes: AxesArg,

    /// Number of samples to predict
    #[arg(long, default_value_t = 200)]
    steps: usize,

    /// Command amplitude applied on every axis
    #[arg(long, default_value_t = 1.0)]
    amplitude: f64,

    /// Shape of the command profile
    #[arg(long, value_enum, default_value_t = Profile::Step)]
    profile: Profile,

    /// Output SVG file
    #[arg(short, long, default_value = "obstacle_prediction.svg")]
    output: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum AxesArg {
    One,
    Two,
}

impl From<AxesArg> for Axes {
    fn from(arg: AxesArg) -> Axes {
        match arg {
            AxesArg::One => Axes::One,
            AxesArg::Two => Axes::Two,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Profile {
    Step,
    Pulse,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ObstacleConfig::from_path(path)?,
        None => ObstacleConfig::default(),
    };
    let axes = Axes::from(cli.axes);
    let model = config.build(axes)?;

    info!(
        axes = axes.count(),
        sampling_dt = config.sample_interval,
        steps = cli.steps,
        "running obstacle prediction"
    );

    let commands = match cli.profile {
        Profile::Step => generate_step_commands(model.input_dim(), cli.steps, cli.amplitude),
        Profile::Pulse => generate_pulse_commands(model.input_dim(), cli.steps, cli.amplitude),
    };
    let (_outputs, states) = system_simulate(&model, &commands, &model.rest_state())?;

    draw_positions(&cli.output, &states, config.sample_interval, axes.count())?;

    info!(output = %cli.output.display(), "wrote prediction chart");

    Ok(())
}

/// Plots the position component of every axis against time.
fn draw_positions(
    output: &Path,
    states: &na::DMatrix<f64>,
    sampling_dt: f64,
    n_axes: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = SVGBackend::new(output, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    // Position of axis `k` lives at state index `4 * k`.
    let series: Vec<Vec<(f64, f64)>> = (0..n_axes)
        .map(|k| {
            states
                .row(4 * k)
                .iter()
                .enumerate()
                .map(|(i, &val)| (i as f64 * sampling_dt, val))
                .collect()
        })
        .collect();

    let max_y = series
        .iter()
        .flatten()
        .map(|&(_, y)| y)
        .fold(f64::NEG_INFINITY, f64::max);
    let min_y = series
        .iter()
        .flatten()
        .map(|&(_, y)| y)
        .fold(f64::INFINITY, f64::min);
    let (min_y, max_y) = if max_y > min_y {
        (min_y, max_y)
    } else {
        (min_y - 1.0, min_y + 1.0)
    };
    let horizon = (states.ncols().saturating_sub(1)) as f64 * sampling_dt;

    let mut chart = ChartBuilder::on(&root)
        .caption("Predicted obstacle position", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(0.0..horizon.max(sampling_dt), min_y..max_y)?;

    chart.configure_mesh().draw()?;

    for (k, points) in series.into_iter().enumerate() {
        chart
            .draw_series(LineSeries::new(points, &Palette99::pick(k)))?
            .label(format!("Axis {k}"))
            .legend(move |(x, y)| PathElement::new([(x, y), (x + 20, y)], &Palette99::pick(k)));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE)
        .border_style(&BLACK)
        .draw()?;

    root.present()?;

    Ok(())
}
