use ndarray::Array1;
use crate::drivers::error::PipelineError;
use crate::drivers::filter::{fill_gaps, MedianFilter};
use crate::drivers::table::Table;
use crate::types::{Channel, ChannelGroup};
/// Descriptive statistics for one channel. Undefined values are NaN.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChannelStats {
    pub average: f64,
    pub std_dev: f64,
    pub smoothed: f64,
}
/// Head of the raw and median-filtered series, kept for inspection.
#[derive(Clone, Debug, PartialEq)]
pub struct SmoothingTrace {
    pub channel: Channel,
    pub raw_head: Vec<Option<f64>>,
    pub filtered_head: Vec<f64>,
}
/// Per-channel results for one group, in the group's channel order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GroupStatistics {
    pub entries: Vec<(Channel, ChannelStats)>,
    pub traces: Vec<SmoothingTrace>,
}
impl GroupStatistics {
    pub fn get(&self, channel: Channel) -> Option<&ChannelStats> {
        self.entries
            .iter()
            .find(|(c, _)| *c == channel)
            .map(|(_, stats)| stats)
    }
}
/// Mean of the present values; NaN when there are none.
pub fn mean(values: &[f64]) -> f64 {
    Array1::from(values.to_vec()).mean().unwrap_or(f64::NAN)
}
/// Sample standard deviation (N - 1); NaN below two values.
pub fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    Array1::from(values.to_vec()).std(1.0)
}
/// Computes average, standard deviation and median-smoothed average per channel.
pub struct StatisticsEngine {
    filter: MedianFilter,
    trace_len: usize,
}
impl StatisticsEngine {
    pub fn with_window(filter_window: usize) -> Result<Self, PipelineError> {
        Ok(Self {
            filter: MedianFilter::new(filter_window)?,
            trace_len: 0,
        })
    }
    /// Keep the first `trace_len` raw and filtered samples of every channel.
    pub fn with_trace_len(mut self, trace_len: usize) -> Self {
        self.trace_len = trace_len;
        self
    }
    pub fn compute(&self, table: &Table, group: &ChannelGroup) -> GroupStatistics {
        let mut result = GroupStatistics::default();
        for &channel in &group.channels {
            let column = table.column(channel);
            let present: Vec<f64> = column.iter().flatten().copied().collect();
            let filtered = self.filter.apply(&fill_gaps(&column));
            let stats = ChannelStats {
                average: mean(&present),
                std_dev: sample_std_dev(&present),
                smoothed: mean(&filtered),
            };
            if self.trace_len > 0 {
                result.traces.push(SmoothingTrace {
                    channel,
                    raw_head: column.iter().take(self.trace_len).copied().collect(),
                    filtered_head: filtered.iter().take(self.trace_len).copied().collect(),
                });
            }
            result.entries.push((channel, stats));
        }
        result
    }
}
