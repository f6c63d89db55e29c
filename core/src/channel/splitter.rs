//! channel/splitter.rs
//! Cut the decoded payload into one artifact per channel.
//!
//! The payload source must already be positioned just after the header.
//! Channels are copied in wire order, each bounded by `count * record_size`
//! bytes, so only one copy chunk is ever resident. A channel whose count is
//! zero gets no artifact at all.

use std::io::{self, Read};
use tracing::{debug, warn};

use crate::channel::ChannelKind;
use crate::headers::Header;
use crate::storage::{Artifact, StorageError, StorageOp, StorageStrategy};
use crate::types::{DecodeError, ProcessorError};
use crate::utils::{copy_bounded, CopyError};

/// Byte accounting of one split.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitSummary {
    /// Bytes actually copied per channel, indexed by `ChannelKind::index()`.
    pub copied: [u64; 4],
    /// Bytes the header declared per channel.
    pub expected: [u64; 4],
    /// Payload bytes after the last declared channel.
    pub trailing: u64,
}

impl SplitSummary {
    pub fn copied(&self, kind: ChannelKind) -> u64 {
        self.copied[kind.index()]
    }
}

pub fn split<R, S>(
    payload: &mut R,
    header: &Header,
    storage: &mut S,
    chunk: usize,
    strict: bool,
) -> Result<SplitSummary, ProcessorError>
where
    R: Read + ?Sized,
    S: StorageStrategy,
{
    let mut summary = SplitSummary::default();

    for kind in ChannelKind::ALL {
        let expected = header.channel_len(kind);
        summary.expected[kind.index()] = expected;
        if expected == 0 {
            continue;
        }

        let artifact = Artifact::Channel(kind);
        let mut sink = storage.create(artifact)?;
        let copied = copy_bounded(payload, &mut sink, expected, chunk).map_err(|e| match e {
            CopyError::Read(source) => StorageError::ArtifactIo { op: StorageOp::Read, artifact: Artifact::Payload, source },
            CopyError::Write(source) => StorageError::ArtifactIo { op: StorageOp::Write, artifact, source },
        })?;
        storage.commit(artifact, sink)?;
        summary.copied[kind.index()] = copied;
        debug!(channel = %kind, bytes = copied, "split channel");

        if copied < expected {
            if strict {
                return Err(DecodeError::TruncatedChannel { channel: kind, expected, actual: copied }.into());
            }
            warn!(channel = %kind, expected, actual = copied, "payload ended inside channel");
        }
    }

    summary.trailing = io::copy(payload, &mut io::sink()).map_err(|source| StorageError::ArtifactIo {
        op: StorageOp::Read,
        artifact: Artifact::Payload,
        source,
    })?;
    if summary.trailing > 0 {
        debug!(bytes = summary.trailing, "ignoring bytes after last channel");
    }

    Ok(summary)
}
