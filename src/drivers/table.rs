use crate::config::TimeWindow;
use crate::types::{Channel, CHANNEL_COUNT};
/// One line of the sensor log. A channel slot is `None` when its field was not a number.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reading {
    pub time_s: f64,
    pub channels: [Option<f64>; CHANNEL_COUNT],
}
impl Reading {
    pub fn new(time_s: f64, channels: [Option<f64>; CHANNEL_COUNT]) -> Self {
        Self { time_s, channels }
    }
    pub fn value(&self, channel: Channel) -> Option<f64> {
        self.channels[channel.index()]
    }
}
/// Readings in source line order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    readings: Vec<Reading>,
}
impl Table {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn push(&mut self, reading: Reading) {
        self.readings.push(reading);
    }
    pub fn len(&self) -> usize {
        self.readings.len()
    }
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }
    pub fn column(&self, channel: Channel) -> Vec<Option<f64>> {
        self.readings.iter().map(|r| r.value(channel)).collect()
    }
    /// First and last timestamp, if any rows exist.
    pub fn time_span(&self) -> Option<(f64, f64)> {
        let first = self.readings.first()?;
        let last = self.readings.last()?;
        Some((first.time_s, last.time_s))
    }
    /// Rows with `start_s <= time <= end_s`, in their original order.
    pub fn extract_section(&self, start_s: f64, end_s: f64) -> Table {
        let window = TimeWindow::new(start_s, end_s);
        self.readings
            .iter()
            .filter(|r| window.contains(r.time_s))
            .copied()
            .collect()
    }
}
#[cfg(test)]
impl Table {
    pub fn times(&self) -> Vec<f64> {
        self.readings.iter().map(|r| r.time_s).collect()
    }
}
impl FromIterator<Reading> for Table {
    fn from_iter<I: IntoIterator<Item = Reading>>(iter: I) -> Self {
        Self {
            readings: iter.into_iter().collect(),
        }
    }
}
pub fn extract_section(table: &Table, start_s: f64, end_s: f64) -> Table {
    table.extract_section(start_s, end_s)
}
