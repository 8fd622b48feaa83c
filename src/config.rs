use std::fs;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::drivers::filter::MAX_FILTER_WINDOW;
use crate::drivers::PipelineError;
use crate::types::ChannelGroup;

/// Closed time interval, in seconds, selected from the recording.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start_s: f64,
    pub end_s: f64,
}

impl TimeWindow {
    pub fn new(start_s: f64, end_s: f64) -> Self {
        Self { start_s, end_s }
    }

    pub fn contains(&self, time_s: f64) -> bool {
        self.start_s <= time_s && time_s <= self.end_s
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        // Section of interest in the reference recordings.
        TimeWindow {
            start_s: 3.25,
            end_s: 604.7495,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub input_path: PathBuf,
    pub window: TimeWindow,
    pub groups: Vec<ChannelGroup>,
    /// Median filter size used for the smoothed average.
    pub filter_window: usize,
    pub output_dir: PathBuf,
    /// Head samples kept per channel in the smoothing diagnostics; 0 disables them.
    pub trace_len: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("recording.txt"),
            window: TimeWindow::default(),
            groups: vec![ChannelGroup::temperature(), ChannelGroup::perfusion()],
            filter_window: 5,
            output_dir: PathBuf::from("channel_plots"),
            trace_len: 10,
        }
    }
}

impl PipelineConfig {
    pub fn from_json_file(path: &Path) -> Result<Self, PipelineError> {
        let text = fs::read_to_string(path).map_err(|source| PipelineError::ReadInput {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| PipelineError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.filter_window == 0 || self.filter_window > MAX_FILTER_WINDOW {
            return Err(PipelineError::InvalidFilterWindow(self.filter_window));
        }
        for group in &self.groups {
            if group.channels.is_empty() {
                return Err(PipelineError::InvalidConfig(format!(
                    "channel group `{}` has no channels",
                    group.name
                )));
            }
            for (idx, channel) in group.channels.iter().enumerate() {
                if group.channels[..idx].contains(channel) {
                    return Err(PipelineError::InvalidConfig(format!(
                        "channel {channel} listed twice in group `{}`",
                        group.name
                    )));
                }
            }
        }
        Ok(())
    }
}
