// src/main.rs
mod config;
mod drivers;
mod types;
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use crate::config::PipelineConfig;
use crate::drivers::Pipeline;

#[derive(Parser, Debug)]
#[command(name = "perfusion-report")]
#[command(version = "0.1")]
#[command(about = "Windowed statistics and per-channel plots for 8-channel temperature/perfusion logs")]
struct Cli {
    /// Tab-separated sensor log (decimal comma, `#` comment lines)
    input: Option<PathBuf>,

    /// JSON configuration file; command-line options take precedence
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Window start, seconds (inclusive)
    #[arg(long, value_name = "SECS", allow_negative_numbers = true)]
    start: Option<f64>,

    /// Window end, seconds (inclusive)
    #[arg(long, value_name = "SECS", allow_negative_numbers = true)]
    end: Option<f64>,

    /// Median filter size for the smoothed average
    #[arg(long, value_name = "N")]
    filter_window: Option<usize>,

    /// Directory receiving one PNG chart per channel
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Skip chart export
    #[arg(long = "no-plots")]
    no_plots: bool,
}

impl Cli {
    // defaults < config file < command line
    fn resolve_config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_json_file(path)
                .with_context(|| format!("loading configuration from {}", path.display()))?,
            None => PipelineConfig::default(),
        };
        if let Some(input) = &self.input {
            config.input_path = input.clone();
        }
        if let Some(start) = self.start {
            config.window.start_s = start;
        }
        if let Some(end) = self.end {
            config.window.end_s = end;
        }
        if let Some(size) = self.filter_window {
            config.filter_window = size;
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    let mut pipeline = Pipeline::new(config).context("invalid pipeline configuration")?;
    if cli.no_plots {
        pipeline = pipeline.without_plots();
    }
    let input = pipeline.config().input_path.clone();
    let outcome = pipeline
        .run()
        .with_context(|| format!("processing {}", input.display()))?;
    info!(
        "done: {} rows loaded, {} in window, {} charts written",
        outcome.load.accepted,
        outcome.windowed_rows,
        outcome.plots.len()
    );
    for (group, stats) in &outcome.groups {
        let without_data: Vec<String> = group
            .channels
            .iter()
            .filter(|c| stats.get(**c).map_or(true, |s| s.average.is_nan()))
            .map(|c| c.to_string())
            .collect();
        if !without_data.is_empty() {
            warn!("{}: no samples in window for {}", group.name, without_data.join(", "));
        }
    }
    Ok(())
}
