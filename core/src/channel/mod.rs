//! channel/mod.rs
//! The four fixed-record-size channels of a decoded payload.
//!
//! Channels always appear in the order of `ChannelKind::ALL`; the header's
//! counts say how many bytes each one spans.

pub mod splitter;
pub mod reader;

pub use splitter::*;
pub use reader::*;

use std::fmt;
use serde::{Deserialize, Serialize};

use crate::constants::{GEO_RECORD_SIZE, POINT_RECORD_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChannelKind {
    Location,
    Acceleration,
    Rotation,
    Direction,
}

impl ChannelKind {
    /// Wire order.
    pub const ALL: [ChannelKind; 4] = [
        ChannelKind::Location,
        ChannelKind::Acceleration,
        ChannelKind::Rotation,
        ChannelKind::Direction,
    ];

    pub fn record_size(self) -> usize {
        match self {
            ChannelKind::Location => GEO_RECORD_SIZE,
            _ => POINT_RECORD_SIZE,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChannelKind::Location     => "location",
            ChannelKind::Acceleration => "acceleration",
            ChannelKind::Rotation     => "rotation",
            ChannelKind::Direction    => "direction",
        };
        f.write_str(name)
    }
}
