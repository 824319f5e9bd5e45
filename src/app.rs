//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the load/merge/order/fit pipeline
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;

use crate::cli::{AnalyzeArgs, Command, PlotArgs, SampleArgs};
use crate::data::SampleConfig;
use crate::domain::{AnalysisConfig, Direction};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `soc` binary.
pub fn run() -> Result<(), AppError> {
    env_logger::init();

    let cli = crate::cli::Cli::parse();
    match cli.command {
        Command::Charge(args) => handle_analyze(args, Direction::Ascending),
        Command::Discharge(args) => handle_analyze(args, Direction::Descending),
        Command::Plot(args) => handle_plot(args),
        Command::Sample(args) => handle_sample(args),
    }
}

fn handle_analyze(args: AnalyzeArgs, direction: Direction) -> Result<(), AppError> {
    let config = analysis_config_from_args(&args, direction);
    let run = pipeline::run_analysis(&config)?;

    println!(
        "{}",
        crate::report::format_run_summary(
            config.direction,
            &run.reference_stats,
            &run.secondary_stats,
            &run.merged_stats,
            &run.merge,
            &run.trend,
        )
    );

    if config.plot {
        let plot = crate::plot::render_merged_plot(
            &run.ordered,
            &run.trend,
            config.plot_width,
            config.plot_height,
        )?;
        println!("{plot}");
    }

    // Optional exports.
    if let Some(path) = &config.export {
        crate::io::export::write_dataset_csv(path, &run.ordered)?;
    }
    if let Some(path) = &config.export_curve {
        crate::io::curve::write_trend_json(
            path,
            &run.trend,
            config.direction,
            run.merged_stats.soc_min,
            run.merged_stats.soc_max,
        )?;
    }

    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let curve = crate::io::curve::read_trend_json(&args.curve)?;
    let plot = crate::plot::render_trend_file_plot(&curve, args.width, args.height);
    println!("{plot}");
    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let config = SampleConfig {
        seed: args.seed,
        reference_count: args.reference_count,
        secondary_count: args.secondary_count,
        noise: args.noise,
    };
    let (reference, secondary) = crate::data::generate_sample_pair(&config)?;

    let reference_path = args.out_dir.join("reference.csv");
    let secondary_path = args.out_dir.join("secondary.csv");
    crate::io::export::write_dataset_csv(&reference_path, &reference)?;
    crate::io::export::write_dataset_csv(&secondary_path, &secondary)?;

    println!(
        "Wrote {} ({} rows) and {} ({} rows)",
        reference_path.display(),
        reference.len(),
        secondary_path.display(),
        secondary.len()
    );
    Ok(())
}

pub fn analysis_config_from_args(args: &AnalyzeArgs, direction: Direction) -> AnalysisConfig {
    AnalysisConfig {
        dataset1: args.dataset1.clone(),
        dataset2: args.dataset2.clone(),
        key: args.key.clone(),
        direction,
        export: args.export.clone(),
        export_curve: args.export_curve.clone(),
        plot: args.plot && !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
    }
}
