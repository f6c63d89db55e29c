//! storage/mod.rs
//! Where decoded bytes live between pipeline stages.
//!
//! A `StorageStrategy` hands out sinks to write an artifact once and sources
//! to read it back. The processor only ever talks to this trait, so the
//! in-memory and on-disk back-ends are interchangeable and must yield
//! byte-identical artifacts for the same input.
//!
//! Artifact lifecycle: `create` -> write -> `commit` -> any number of `open`
//! -> `release`. Re-creating an artifact truncates it. An artifact that was
//! never committed opens as `None`.

pub mod memory;
pub mod disk;

pub use memory::*;
pub use disk::*;

use std::fmt;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use thiserror::Error;

use crate::channel::ChannelKind;
use crate::constants::artifact_suffixes;
use crate::types::ProcessorError;
use crate::utils::{copy_all, CopyError};

/// Everything a processor may materialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Artifact {
    /// The caller's input exactly as received (compressed inputs only).
    Raw,
    /// Fully decoded payload: header followed by all channels.
    Payload,
    Channel(ChannelKind),
}

impl Artifact {
    pub fn suffix(self) -> &'static str {
        match self {
            Artifact::Raw     => artifact_suffixes::RAW,
            Artifact::Payload => artifact_suffixes::PAYLOAD,
            Artifact::Channel(ChannelKind::Location)     => artifact_suffixes::LOCATION,
            Artifact::Channel(ChannelKind::Acceleration) => artifact_suffixes::ACCELERATION,
            Artifact::Channel(ChannelKind::Rotation)     => artifact_suffixes::ROTATION,
            Artifact::Channel(ChannelKind::Direction)    => artifact_suffixes::DIRECTION,
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Artifact::Raw        => f.write_str("raw input"),
            Artifact::Payload    => f.write_str("decoded payload"),
            Artifact::Channel(c) => write!(f, "{} channel", c),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOp {
    Create,
    Write,
    Commit,
    Open,
    Read,
    Delete,
}

impl fmt::Display for StorageOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StorageOp::Create => "create",
            StorageOp::Write  => "write",
            StorageOp::Commit => "commit",
            StorageOp::Open   => "open",
            StorageOp::Read   => "read",
            StorageOp::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// One artifact that could not be released on close.
#[derive(Debug)]
pub struct ReleaseFailure {
    pub artifact: Artifact,
    pub path: PathBuf,
    pub source: io::Error,
}

impl fmt::Display for ReleaseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.artifact, self.path.display(), self.source)
    }
}

fn join_failures(failures: &[ReleaseFailure]) -> String {
    failures.iter().map(|r| r.to_string()).collect::<Vec<_>>().join("; ")
}

#[derive(Debug, Error)]
pub enum StorageError {
    /// A temp file could not be created, opened, flushed or read.
    #[error("temp file {op} failed for {}: {source}", path.display())]
    TempFileIo { op: StorageOp, path: PathBuf, source: io::Error },

    /// Streaming into or out of an artifact failed.
    #[error("{op} of {artifact} failed: {source}")]
    ArtifactIo { op: StorageOp, artifact: Artifact, source: io::Error },

    #[error("{0} was opened before it was written")]
    MissingArtifact(Artifact),

    /// Close-time failures, after every other artifact was released.
    #[error("could not release {} artifact(s): {}", failures.len(), join_failures(failures))]
    Release { failures: Vec<ReleaseFailure> },
}

/// Sink/source factory behind a processor.
pub trait StorageStrategy {
    type Sink: Write;
    type Source: Read;

    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Start (or restart) writing `artifact`.
    fn create(&mut self, artifact: Artifact) -> Result<Self::Sink, StorageError>;

    /// Finish writing `artifact`; returns its final length.
    fn commit(&mut self, artifact: Artifact, sink: Self::Sink) -> Result<u64, StorageError>;

    /// Fresh source positioned at the start of a committed artifact.
    fn open(&self, artifact: Artifact) -> Result<Option<Self::Source>, StorageError>;

    /// Length of a committed artifact.
    fn len(&self, artifact: Artifact) -> Option<u64>;

    /// Drop every artifact. Must be safe to call more than once.
    fn release(&mut self) -> Result<(), StorageError>;

    /// Stream all of `r` into `artifact` and commit it.
    ///
    /// Read failures belong to the caller's source and surface as
    /// `ProcessorError::Io`; write failures are storage errors.
    fn store_from<R: Read + ?Sized>(
        &mut self,
        artifact: Artifact,
        r: &mut R,
        chunk: usize,
    ) -> Result<u64, ProcessorError> {
        let mut sink = self.create(artifact)?;
        match copy_all(r, &mut sink, chunk) {
            Ok(_) => {}
            Err(CopyError::Read(e)) => return Err(ProcessorError::Io(e)),
            Err(CopyError::Write(source)) => {
                return Err(StorageError::ArtifactIo { op: StorageOp::Write, artifact, source }.into());
            }
        }
        Ok(self.commit(artifact, sink)?)
    }

    /// Whole artifact as one buffer. Memory-bound; small inputs only.
    fn read_to_vec(&self, artifact: Artifact) -> Result<Vec<u8>, StorageError> {
        let mut src = self.open(artifact)?.ok_or(StorageError::MissingArtifact(artifact))?;
        let mut out = Vec::with_capacity(self.len(artifact).unwrap_or(0) as usize);
        src.read_to_end(&mut out)
            .map_err(|source| StorageError::ArtifactIo { op: StorageOp::Read, artifact, source })?;
        Ok(out)
    }
}
