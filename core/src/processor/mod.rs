//! processor/mod.rs
//! The decode state machine: `Raw -> Decoded -> Prepared -> Closed`.
//!
//! A `Processor` owns one upload. Construction consumes the caller's byte
//! source into storage; `decompress` inflates it, `prepare` parses the
//! header and splits the channels, and the `poll_next_*` methods hand out
//! records one at a time. `close` releases every artifact and is safe to
//! call any number of times.
//!
//! The processor is generic over its `StorageStrategy`, so both back-ends
//! share this code without dynamic dispatch.

pub mod state;
pub mod builder;

pub use state::*;
pub use builder::*;

use std::fmt;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::channel::{split, ChannelKind, ChannelReader};
use crate::compression::decompress_payload;
use crate::config::ProcessorConfig;
use crate::headers::{read_header, Header};
use crate::io::{open_input, InputSource};
use crate::records::{GeoLocationLayout, GeoLocationRecord, Point3D, Point3DLayout, PointKind, RecordLayout};
use crate::storage::{Artifact, InMemoryStorage, OnDiskStorage, StorageError, StorageStrategy};
use crate::telemetry::{Stage, TelemetryCounters, TelemetrySnapshot, TelemetryTimer};
use crate::types::{ProcessorError, Result};

pub type InMemoryProcessor = Processor<InMemoryStorage>;
pub type OnDiskProcessor = Processor<OnDiskStorage>;

pub struct Processor<S: StorageStrategy> {
    storage: S,
    config: ProcessorConfig,
    state: ProcessorState,
    header: Option<Header>,
    /// Payload source left just past the header by `header()`, reused by `prepare()`.
    payload: Option<S::Source>,
    location: Option<ChannelReader<S::Source, GeoLocationLayout>>,
    acceleration: Option<ChannelReader<S::Source, Point3DLayout>>,
    rotation: Option<ChannelReader<S::Source, Point3DLayout>>,
    direction: Option<ChannelReader<S::Source, Point3DLayout>>,
    counters: TelemetryCounters,
    timer: TelemetryTimer,
}

impl<S: StorageStrategy> Processor<S> {
    /// Store `input` through `storage` and start in `Raw` (compressed) or
    /// `Decoded` (plain). The input is fully consumed before this returns.
    pub fn new(input: InputSource, compressed: bool, mut storage: S, config: ProcessorConfig) -> Result<Self> {
        config.validate()?;
        let mut timer = TelemetryTimer::new();
        let artifact = if compressed { Artifact::Raw } else { Artifact::Payload };

        let stored = timer.time(Stage::Store, || -> Result<u64> {
            let mut reader = open_input(input)?;
            storage.store_from(artifact, &mut reader, config.copy_chunk_size)
        });
        let len = match stored {
            Ok(len) => len,
            Err(e) => {
                if let Err(release) = storage.release() {
                    warn!(error = %release, "cleanup after failed construction");
                }
                return Err(e);
            }
        };

        let mut counters = TelemetryCounters::default();
        counters.add_input(len);
        let state = if compressed {
            ProcessorState::Raw
        } else {
            counters.add_plain_payload(len);
            ProcessorState::Decoded
        };
        debug!(backend = storage.name(), bytes = len, %state, "processor created");

        Ok(Self {
            storage,
            config,
            state,
            header: None,
            payload: None,
            location: None,
            acceleration: None,
            rotation: None,
            direction: None,
            counters,
            timer,
        })
    }

    pub fn state(&self) -> ProcessorState {
        self.state
    }

    pub fn is_decoded(&self) -> bool {
        self.state.is_decoded()
    }

    pub fn is_prepared(&self) -> bool {
        self.state.is_prepared()
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn telemetry(&self) -> TelemetrySnapshot {
        TelemetrySnapshot::from(&self.counters, &self.timer)
    }

    fn transition(&mut self, next: ProcessorState) {
        debug!(from = %self.state, to = %next, "state transition");
        self.state = next;
    }

    /// Inflate the stored input. No-op once decoded.
    ///
    /// On failure the processor stays `Raw`.
    pub fn decompress(&mut self) -> Result<&mut Self> {
        match self.state {
            ProcessorState::Closed => return Err(ProcessorError::Closed),
            ProcessorState::Decoded | ProcessorState::Prepared => return Ok(self),
            ProcessorState::Raw => {}
        }

        let buffer_size = self.config.inflate_buffer_size;
        let outcome = self
            .timer
            .time(Stage::Decompress, || decompress_payload(&mut self.storage, buffer_size))?;
        self.counters.add_inflate(&outcome);
        info!(
            mode = %outcome.mode,
            attempts = outcome.attempts,
            bytes_in = self.counters.bytes_input,
            bytes_out = outcome.decoded_len,
            "payload decoded"
        );
        self.transition(ProcessorState::Decoded);
        Ok(self)
    }

    /// Parse the header and split the payload into channel artifacts.
    pub fn prepare(&mut self) -> Result<&mut Self> {
        match self.state {
            ProcessorState::Closed => return Err(ProcessorError::Closed),
            ProcessorState::Raw => return Err(ProcessorError::NotDecoded),
            ProcessorState::Prepared => return Ok(self),
            ProcessorState::Decoded => {}
        }

        let header = self.header()?;
        let mut payload = match self.payload.take() {
            Some(p) => p,
            None => {
                // A previous split attempt consumed it; start over past the header.
                let mut p = self.open_payload()?;
                read_header(&mut p)?;
                p
            }
        };

        let chunk = self.config.copy_chunk_size;
        let strict = self.config.strict_records;
        let summary = self
            .timer
            .time(Stage::Split, || split(&mut payload, &header, &mut self.storage, chunk, strict))?;
        self.counters.add_split(&summary);
        info!(
            location = summary.copied(ChannelKind::Location),
            acceleration = summary.copied(ChannelKind::Acceleration),
            rotation = summary.copied(ChannelKind::Rotation),
            direction = summary.copied(ChannelKind::Direction),
            trailing = summary.trailing,
            "payload prepared"
        );
        self.transition(ProcessorState::Prepared);
        Ok(self)
    }

    pub fn decompress_and_prepare(&mut self) -> Result<&mut Self> {
        self.decompress()?.prepare()
    }

    /// Header of the decoded payload, parsed on first use.
    ///
    /// Needs `Decoded` but not `Prepared`.
    pub fn header(&mut self) -> Result<Header> {
        match self.state {
            ProcessorState::Closed => return Err(ProcessorError::Closed),
            ProcessorState::Raw => return Err(ProcessorError::NotDecoded),
            ProcessorState::Decoded | ProcessorState::Prepared => {}
        }
        if let Some(h) = self.header {
            return Ok(h);
        }

        let t = Instant::now();
        let mut src = self.open_payload()?;
        let header = read_header(&mut src);
        self.timer.add_stage_time(Stage::Header, t.elapsed());
        let header = header?;

        debug!(%header, "header parsed");
        self.payload = Some(src);
        self.header = Some(header);
        Ok(header)
    }

    /// The whole decoded payload in one buffer. Memory-bound.
    pub fn decoded_payload_as_bytes(&mut self) -> Result<Vec<u8>> {
        match self.state {
            ProcessorState::Closed => Err(ProcessorError::Closed),
            ProcessorState::Raw => Err(ProcessorError::NotDecoded),
            ProcessorState::Decoded | ProcessorState::Prepared => {
                Ok(self.storage.read_to_vec(Artifact::Payload)?)
            }
        }
    }

    pub fn poll_next_location(&mut self) -> Result<Option<GeoLocationRecord>> {
        self.ensure_prepared()?;
        poll_channel(
            &mut self.location,
            &self.storage,
            &self.config,
            GeoLocationLayout,
            &mut self.counters,
        )
    }

    pub fn poll_next_acceleration(&mut self) -> Result<Option<Point3D>> {
        self.ensure_prepared()?;
        poll_channel(
            &mut self.acceleration,
            &self.storage,
            &self.config,
            Point3DLayout(PointKind::Acceleration),
            &mut self.counters,
        )
    }

    pub fn poll_next_rotation(&mut self) -> Result<Option<Point3D>> {
        self.ensure_prepared()?;
        poll_channel(
            &mut self.rotation,
            &self.storage,
            &self.config,
            Point3DLayout(PointKind::Rotation),
            &mut self.counters,
        )
    }

    pub fn poll_next_direction(&mut self) -> Result<Option<Point3D>> {
        self.ensure_prepared()?;
        poll_channel(
            &mut self.direction,
            &self.storage,
            &self.config,
            Point3DLayout(PointKind::Direction),
            &mut self.counters,
        )
    }

    /// Release every artifact. Idempotent; valid from any state.
    ///
    /// The processor is `Closed` afterwards even when some artifact could
    /// not be released; those failures come back as one aggregated error.
    pub fn close(&mut self) -> Result<()> {
        if self.state == ProcessorState::Closed {
            return Ok(());
        }

        self.location = None;
        self.acceleration = None;
        self.rotation = None;
        self.direction = None;
        self.payload = None;

        let released = self.timer.time(Stage::Release, || self.storage.release());
        self.timer.finish();
        self.transition(ProcessorState::Closed);

        released.map_err(|e| {
            warn!(error = %e, "failed to release artifacts on close");
            ProcessorError::from(e)
        })
    }

    fn ensure_prepared(&self) -> Result<()> {
        if self.state.is_prepared() {
            Ok(())
        } else {
            Err(ProcessorError::NotPrepared)
        }
    }

    fn open_payload(&self) -> Result<S::Source> {
        Ok(self
            .storage
            .open(Artifact::Payload)?
            .ok_or(StorageError::MissingArtifact(Artifact::Payload))?)
    }
}

/// Poll one channel, opening its reader on first use.
fn poll_channel<S, L>(
    slot: &mut Option<ChannelReader<S::Source, L>>,
    storage: &S,
    config: &ProcessorConfig,
    layout: L,
    counters: &mut TelemetryCounters,
) -> Result<Option<L::Record>>
where
    S: StorageStrategy,
    L: RecordLayout,
{
    if slot.is_none() {
        let reader = match storage.open(Artifact::Channel(layout.channel()))? {
            Some(src) => ChannelReader::new(src, layout, config.records_per_read, config.strict_records),
            None => ChannelReader::empty(layout),
        };
        *slot = Some(reader);
    }
    let Some(reader) = slot.as_mut() else {
        return Ok(None);
    };
    let record = reader.poll_next()?;
    if record.is_some() {
        counters.add_record(reader.channel());
    }
    Ok(record)
}

impl<S: StorageStrategy> fmt::Debug for Processor<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Processor")
            .field("backend", &self.storage.name())
            .field("state", &self.state)
            .field("header", &self.header)
            .finish_non_exhaustive()
    }
}

impl<S: StorageStrategy> Drop for Processor<S> {
    fn drop(&mut self) {
        if self.state == ProcessorState::Closed {
            return;
        }
        warn!(state = %self.state, "processor dropped without close; closing now");
        if let Err(e) = self.close() {
            warn!(error = %e, "implicit close failed");
        }
    }
}
