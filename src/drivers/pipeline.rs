use std::io::{self, Write};
use std::path::PathBuf;
use log::{debug, info, warn};
use crate::config::PipelineConfig;
use crate::drivers::error::PipelineError;
use crate::drivers::loader::{load_table, LoadSummary};
use crate::drivers::plot::{ensure_output_dir, export_channel_plots, PlotStyle};
use crate::drivers::report::{render_group_report, render_trace};
use crate::drivers::stats::{GroupStatistics, StatisticsEngine};
use crate::drivers::table::extract_section;
use crate::types::ChannelGroup;
/// What one run produced, besides the printed report and the files on disk.
#[derive(Clone, Debug)]
pub struct PipelineOutcome {
    pub load: LoadSummary,
    pub windowed_rows: usize,
    pub groups: Vec<(ChannelGroup, GroupStatistics)>,
    pub plots: Vec<PathBuf>,
}
/// Load, window, summarize per channel group, report, then chart every channel.
pub struct Pipeline {
    config: PipelineConfig,
    engine: StatisticsEngine,
    plot_style: PlotStyle,
    export_plots: bool,
}
impl Pipeline {
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        let engine = StatisticsEngine::with_window(config.filter_window)?
            .with_trace_len(config.trace_len);
        Ok(Self {
            config,
            engine,
            plot_style: PlotStyle::default(),
            export_plots: true,
        })
    }
    pub fn without_plots(mut self) -> Self {
        self.export_plots = false;
        self
    }
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }
    pub fn run(&self) -> Result<PipelineOutcome, PipelineError> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.run_with_output(&mut handle)
    }
    pub fn run_with_output<W: Write>(&self, out: &mut W) -> Result<PipelineOutcome, PipelineError> {
        let (table, load) = load_table(&self.config.input_path)?;
        let window = self.config.window;
        let section = extract_section(&table, window.start_s, window.end_s);
        if section.is_empty() {
            warn!(
                "window [{}, {}] s selected no rows out of {}",
                window.start_s,
                window.end_s,
                table.len()
            );
        } else if let Some((first, last)) = section.time_span() {
            info!(
                "window [{}, {}] s kept {} of {} rows ({first} s to {last} s)",
                window.start_s,
                window.end_s,
                section.len(),
                table.len()
            );
        }
        // Directory problems must surface before anything is reported.
        if self.export_plots {
            ensure_output_dir(&self.config.output_dir)?;
        }
        let groups: Vec<(ChannelGroup, GroupStatistics)> = self
            .config
            .groups
            .iter()
            .map(|group| {
                let stats = self.engine.compute(&section, group);
                for trace in &stats.traces {
                    debug!("{}", render_trace(trace));
                }
                (group.clone(), stats)
            })
            .collect();
        for (group, stats) in &groups {
            out.write_all(render_group_report(&group.label, stats).as_bytes())
                .map_err(PipelineError::WriteReport)?;
        }
        out.flush().map_err(PipelineError::WriteReport)?;
        let plots = if self.export_plots {
            export_channel_plots(&section, &self.config.output_dir, &self.plot_style)?
        } else {
            Vec::new()
        };
        Ok(PipelineOutcome {
            load,
            windowed_rows: section.len(),
            groups,
            plots,
        })
    }
}
