//! Command-line parsing for the charge-curve analyzer.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the merge/fitting code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "soc", version, about = "Battery charge-curve merge and trend analyzer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze a charging run (merged records ordered by ascending SOC).
    Charge(AnalyzeArgs),
    /// Analyze a discharging run (merged records ordered by descending SOC).
    Discharge(AnalyzeArgs),
    /// Plot a previously exported trend JSON.
    Plot(PlotArgs),
    /// Write a synthetic reference/secondary CSV pair for experimentation.
    Sample(SampleArgs),
}

/// Common options for charge/discharge analysis.
#[derive(Debug, Parser, Clone)]
pub struct AnalyzeArgs {
    /// Reference dataset CSV (kept in full; defines the overlap window).
    pub dataset1: PathBuf,

    /// Secondary dataset CSV (records inside the window are dropped).
    pub dataset2: PathBuf,

    /// Merge key column (resolved against known aliases).
    #[arg(long, default_value = "SOC")]
    pub key: String,

    /// Export the ordered merged records to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the fitted trend (model + evaluated grid) to JSON.
    #[arg(long = "export-curve")]
    pub export_curve: Option<PathBuf>,

    /// Render an ASCII plot in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

/// Options for plotting a saved trend.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Trend JSON file produced by `soc charge --export-curve`.
    #[arg(long, value_name = "JSON")]
    pub curve: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

/// Options for synthetic sample generation.
#[derive(Debug, Parser)]
pub struct SampleArgs {
    /// Directory to write reference.csv and secondary.csv into.
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Random seed for reproducible samples.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Number of reference records (mid-SOC sweep).
    #[arg(long, default_value_t = 61)]
    pub reference_count: usize,

    /// Number of secondary records (full-range sweep).
    #[arg(long, default_value_t = 21)]
    pub secondary_count: usize,

    /// Gaussian voltage noise (standard deviation, volts).
    #[arg(long, default_value_t = 0.005)]
    pub noise: f64,
}
