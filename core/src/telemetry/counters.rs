//! telemetry/counters.rs
//! Byte and record counters collected while one upload is decoded.
//!
//! Converted into an immutable `TelemetrySnapshot` on demand.

use std::ops::AddAssign;
use serde::{Deserialize, Serialize};

use crate::channel::{ChannelKind, SplitSummary};
use crate::compression::{DecompressOutcome, InflateMode};

#[derive(Default, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TelemetryCounters {
    /// Bytes received from the caller (compressed or not).
    pub bytes_input: u64,
    /// Length of the decoded payload, header included.
    pub bytes_decoded: u64,
    pub inflate_attempts: u64,
    /// Framing that decoded the payload; `None` for plain input.
    pub inflate_mode: Option<InflateMode>,
    /// Bytes written per channel artifact, by `ChannelKind::index()`.
    pub bytes_channel: [u64; 4],
    /// Records handed out per channel, by `ChannelKind::index()`.
    pub records_polled: [u64; 4],
    /// Payload bytes beyond the last declared channel.
    pub bytes_trailing: u64,
}

impl TelemetryCounters {
    pub fn add_input(&mut self, len: u64) {
        self.bytes_input += len;
    }

    /// Plain input: the payload is the input.
    pub fn add_plain_payload(&mut self, len: u64) {
        self.bytes_decoded += len;
    }

    pub fn add_inflate(&mut self, outcome: &DecompressOutcome) {
        self.inflate_attempts += outcome.attempts as u64;
        self.inflate_mode = Some(outcome.mode);
        self.bytes_decoded += outcome.decoded_len;
    }

    pub fn add_split(&mut self, summary: &SplitSummary) {
        for kind in ChannelKind::ALL {
            self.bytes_channel[kind.index()] += summary.copied(kind);
        }
        self.bytes_trailing += summary.trailing;
    }

    pub fn add_record(&mut self, kind: ChannelKind) {
        self.records_polled[kind.index()] += 1;
    }

    pub fn records(&self, kind: ChannelKind) -> u64 {
        self.records_polled[kind.index()]
    }

    pub fn total_records(&self) -> u64 {
        self.records_polled.iter().sum()
    }

    /// True when the raw DEFLATE fallback was needed.
    pub fn used_fallback(&self) -> bool {
        self.inflate_mode == Some(InflateMode::Raw)
    }
}

/// Aggregation across processors; keeps the later inflate mode.
impl AddAssign for TelemetryCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.bytes_input      += rhs.bytes_input;
        self.bytes_decoded    += rhs.bytes_decoded;
        self.inflate_attempts += rhs.inflate_attempts;
        self.bytes_trailing   += rhs.bytes_trailing;
        if rhs.inflate_mode.is_some() {
            self.inflate_mode = rhs.inflate_mode;
        }
        for i in 0..4 {
            self.bytes_channel[i]  += rhs.bytes_channel[i];
            self.records_polled[i] += rhs.records_polled[i];
        }
    }
}
