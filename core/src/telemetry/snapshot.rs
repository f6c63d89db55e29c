//! telemetry/snapshot.rs
//!
//! Immutable view of one processor's counters and timings.

use std::time::Duration;
use serde::{Deserialize, Serialize};

use crate::channel::ChannelKind;
use crate::compression::InflateMode;
use crate::telemetry::counters::TelemetryCounters;
use crate::telemetry::timers::{Stage, StageTimes, TelemetryTimer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub bytes_input: u64,
    pub bytes_decoded: u64,
    pub inflate_attempts: u64,
    pub inflate_mode: Option<InflateMode>,
    pub bytes_channel: [u64; 4],
    pub records_polled: [u64; 4],
    pub bytes_trailing: u64,
    /// `bytes_input / bytes_decoded`; 0.0 before anything was decoded.
    pub compression_ratio: f64,
    pub elapsed: Duration,
    pub stage_times: StageTimes,
}

impl TelemetrySnapshot {
    pub fn from(counters: &TelemetryCounters, timer: &TelemetryTimer) -> Self {
        let compression_ratio = if counters.bytes_decoded > 0 {
            counters.bytes_input as f64 / counters.bytes_decoded as f64
        } else {
            0.0
        };

        Self {
            bytes_input: counters.bytes_input,
            bytes_decoded: counters.bytes_decoded,
            inflate_attempts: counters.inflate_attempts,
            inflate_mode: counters.inflate_mode,
            bytes_channel: counters.bytes_channel,
            records_polled: counters.records_polled,
            bytes_trailing: counters.bytes_trailing,
            compression_ratio,
            elapsed: timer.elapsed(),
            stage_times: timer.stage_times.clone(),
        }
    }

    pub fn channel_bytes(&self, kind: ChannelKind) -> u64 {
        self.bytes_channel[kind.index()]
    }

    pub fn records(&self, kind: ChannelKind) -> u64 {
        self.records_polled[kind.index()]
    }

    pub fn total_stage_time(&self) -> Duration {
        self.stage_times.total()
    }

    pub fn has_all_stages(&self, expected: &[Stage]) -> bool {
        expected.iter().all(|s| self.stage_times.contains(*s))
    }

    /// Channel bytes plus header plus trailing bytes never exceed the payload.
    pub fn sanity_check(&self) -> bool {
        let accounted: u64 = self.bytes_channel.iter().sum::<u64>() + self.bytes_trailing;
        accounted <= self.bytes_decoded && self.total_stage_time() <= self.elapsed
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
