//! compression/stream.rs
//! Raw artifact -> decoded payload, with the zlib-then-raw fallback.
//!
//! Uploads are normally zlib-wrapped, but some clients emit bare DEFLATE.
//! The first attempt assumes the wrapper; if and only if the zlib header
//! check fails, the stream is retried from byte 0 without it. Any other
//! failure ends the stage.

use tracing::{debug, warn};

use crate::compression::deflate::inflate;
use crate::compression::types::{InflateError, InflateMode};
use crate::constants::MAX_INFLATE_ATTEMPTS;
use crate::storage::{Artifact, StorageError, StorageOp, StorageStrategy};
use crate::types::{DecodeError, ProcessorError};

const ATTEMPT_ORDER: [InflateMode; MAX_INFLATE_ATTEMPTS] = [InflateMode::Zlib, InflateMode::Raw];

/// What the decompression stage did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecompressOutcome {
    /// Framing that finally succeeded.
    pub mode: InflateMode,
    pub attempts: usize,
    pub decoded_len: u64,
}

/// Inflate `Artifact::Raw` into `Artifact::Payload`.
///
/// Each attempt re-opens the raw artifact and re-creates (truncates) the
/// payload sink, so a failed first attempt leaves nothing behind.
pub fn decompress_payload<S: StorageStrategy>(
    storage: &mut S,
    buffer_size: usize,
) -> Result<DecompressOutcome, ProcessorError> {
    for (i, mode) in ATTEMPT_ORDER.iter().copied().enumerate() {
        let attempts = i + 1;
        let raw = storage
            .open(Artifact::Raw)?
            .ok_or(StorageError::MissingArtifact(Artifact::Raw))?;
        let mut sink = storage.create(Artifact::Payload)?;
        debug!(%mode, attempt = attempts, backend = storage.name(), "inflating");

        match inflate(raw, &mut sink, mode, buffer_size) {
            Ok(_) => {
                let decoded_len = storage.commit(Artifact::Payload, sink)?;
                return Ok(DecompressOutcome { mode, attempts, decoded_len });
            }
            Err(InflateError::HeaderCheck) if attempts < MAX_INFLATE_ATTEMPTS => {
                warn!(failed = %mode, "zlib header check failed; retrying as raw DEFLATE");
            }
            Err(InflateError::HeaderCheck) => {
                return Err(DecodeError::CorruptStream {
                    mode,
                    reason: "incorrect header check".into(),
                }
                .into());
            }
            Err(InflateError::Corrupt { mode, reason }) => {
                return Err(DecodeError::CorruptStream { mode, reason }.into());
            }
            Err(InflateError::Read(source)) => {
                return Err(StorageError::ArtifactIo { op: StorageOp::Read, artifact: Artifact::Raw, source }.into());
            }
            Err(InflateError::Write(source)) => {
                return Err(StorageError::ArtifactIo { op: StorageOp::Write, artifact: Artifact::Payload, source }.into());
            }
        }
    }

    Err(DecodeError::CorruptStream {
        mode: InflateMode::Raw,
        reason: format!("no framing accepted after {} attempts", MAX_INFLATE_ATTEMPTS),
    }
    .into())
}
