//! headers/types.rs
//! The 18-byte Cyface header and the channel offsets derived from it.
//!
//! Offsets are computed, never stored: `geo_begin` is always 18 and every
//! later channel begins where the previous one's `count * record_size` ends.
//! Arithmetic is done in `u64` so large counts cannot overflow.

use std::fmt;
use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};

use crate::channel::ChannelKind;
use crate::constants::HEADER_LEN;
use crate::utils::enum_name_or_hex;

/// Format versions this crate knows the layout of.
///
/// Unknown versions are not rejected; the header only reports them.
#[repr(u16)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive)]
pub enum FormatVersion {
    V1 = 0x0001,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Header {
    pub format_version: u16,
    pub geo_location_count: u32,
    pub acceleration_count: u32,
    pub rotation_count: u32,
    pub direction_count: u32,
}

impl Header {
    pub const LEN: usize = HEADER_LEN;

    pub fn known_version(&self) -> Option<FormatVersion> {
        FormatVersion::try_from_primitive(self.format_version).ok()
    }

    pub fn count(&self, channel: ChannelKind) -> u32 {
        match channel {
            ChannelKind::Location     => self.geo_location_count,
            ChannelKind::Acceleration => self.acceleration_count,
            ChannelKind::Rotation     => self.rotation_count,
            ChannelKind::Direction    => self.direction_count,
        }
    }

    /// Bytes occupied by `channel` in the payload.
    pub fn channel_len(&self, channel: ChannelKind) -> u64 {
        self.count(channel) as u64 * channel.record_size() as u64
    }

    /// Payload offset of the first byte of `channel`.
    pub fn channel_begin(&self, channel: ChannelKind) -> u64 {
        ChannelKind::ALL
            .iter()
            .take_while(|&&c| c != channel)
            .fold(Self::LEN as u64, |off, &c| off + self.channel_len(c))
    }

    pub fn geo_begin(&self) -> u64 {
        self.channel_begin(ChannelKind::Location)
    }

    pub fn accel_begin(&self) -> u64 {
        self.channel_begin(ChannelKind::Acceleration)
    }

    pub fn rotation_begin(&self) -> u64 {
        self.channel_begin(ChannelKind::Rotation)
    }

    pub fn direction_begin(&self) -> u64 {
        self.channel_begin(ChannelKind::Direction)
    }

    /// Minimum decoded payload length this header describes.
    pub fn payload_end(&self) -> u64 {
        self.direction_begin() + self.channel_len(ChannelKind::Direction)
    }

    /// Sum of all channel byte ranges (payload minus header).
    pub fn channels_len(&self) -> u64 {
        self.payload_end() - Self::LEN as u64
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "format={} geo={} acc={} rot={} dir={}",
            enum_name_or_hex::<FormatVersion>(self.format_version),
            self.geo_location_count,
            self.acceleration_count,
            self.rotation_count,
            self.direction_count,
        )
    }
}
