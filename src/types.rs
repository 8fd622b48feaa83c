// src/types.rs
use std::fmt;
use serde::{Deserialize, Serialize};

// Sensor channel, fixed column position after Time
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Channel {
    Ch1,
    Ch2,
    Ch3,
    Ch4,
    Ch5,
    Ch6,
    Ch7,
    Ch8,
}

pub const CHANNEL_COUNT: usize = 8;

impl Channel {
    pub const ALL: [Channel; CHANNEL_COUNT] = [
        Channel::Ch1,
        Channel::Ch2,
        Channel::Ch3,
        Channel::Ch4,
        Channel::Ch5,
        Channel::Ch6,
        Channel::Ch7,
        Channel::Ch8,
    ];

    /// Zero-based slot inside a reading (column index minus the Time column).
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Channel::Ch1 => "Ch1",
            Channel::Ch2 => "Ch2",
            Channel::Ch3 => "Ch3",
            Channel::Ch4 => "Ch4",
            Channel::Ch5 => "Ch5",
            Channel::Ch6 => "Ch6",
            Channel::Ch7 => "Ch7",
            Channel::Ch8 => "Ch8",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Named set of channels reported together
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChannelGroup {
    pub name: String,
    pub label: String,
    pub channels: Vec<Channel>,
}

impl ChannelGroup {
    pub fn new(name: &str, label: &str, channels: &[Channel]) -> Self {
        Self {
            name: name.to_owned(),
            label: label.to_owned(),
            channels: channels.to_vec(),
        }
    }

    pub fn temperature() -> Self {
        Self::new(
            "temperature",
            "Blood Temperature (in °C)",
            &[Channel::Ch1, Channel::Ch4, Channel::Ch6, Channel::Ch8],
        )
    }

    pub fn perfusion() -> Self {
        Self::new(
            "perfusion",
            "Blood Perfusion (in Perfusion Units)",
            &[Channel::Ch2, Channel::Ch3, Channel::Ch5, Channel::Ch7],
        )
    }
}
