use std::fmt::Write as _;
use crate::drivers::stats::{GroupStatistics, SmoothingTrace};
/// Human-readable block for one channel group, two decimals per value.
/// Undefined values print as `NaN`.
pub fn render_group_report(label: &str, stats: &GroupStatistics) -> String {
    let mut out = String::new();
    writeln!(out, "\n{label}:").ok();
    for (channel, s) in &stats.entries {
        writeln!(
            out,
            "{channel}: Avg={:.2}, StdDev={:.2}, Smoothed={:.2}",
            s.average, s.std_dev, s.smoothed
        )
        .ok();
    }
    out
}
pub fn render_trace(trace: &SmoothingTrace) -> String {
    let raw: Vec<String> = trace
        .raw_head
        .iter()
        .map(|v| v.map_or_else(|| "NaN".to_owned(), |v| v.to_string()))
        .collect();
    let filtered: Vec<String> = trace.filtered_head.iter().map(|v| v.to_string()).collect();
    format!(
        "raw data ({0}): [{1}] / smoothed data ({0}): [{2}]",
        trace.channel,
        raw.join(", "),
        filtered.join(", ")
    )
}
