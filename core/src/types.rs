//! types.rs
//! Crate-wide error taxonomy.
//!
//! `ProcessorError` is what every public operation returns. Stage-specific
//! errors (`DecodeError`, `StorageError`) convert into it through `From`, so
//! `?` works across the whole decode path.

use std::io;
use thiserror::Error;

use crate::channel::ChannelKind;
use crate::compression::InflateMode;
use crate::storage::StorageError;

pub type Result<T> = std::result::Result<T, ProcessorError>;

/// Failures while turning bytes into a header, channels or records.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Inflate failed for a reason other than the missing-zlib-header quirk,
    /// or the raw DEFLATE retry failed as well.
    #[error("corrupt {mode} stream: {reason}")]
    CorruptStream { mode: InflateMode, reason: String },

    /// Fewer than 18 bytes of decoded payload.
    #[error("truncated header: {have} < {need} bytes")]
    TruncatedHeader { have: usize, need: usize },

    /// Payload ended before a channel's declared byte range (strict mode only).
    #[error("truncated {channel} channel: expected {expected} bytes, got {actual}")]
    TruncatedChannel { channel: ChannelKind, expected: u64, actual: u64 },

    /// Channel ended inside a record (strict mode only).
    #[error("truncated {channel} record: {have} < {need} bytes")]
    TruncatedRecord { channel: ChannelKind, have: usize, need: usize },
}

/// Unified processor error.
#[derive(Debug, Error)]
pub enum ProcessorError {
    /// The processor was built without a byte source.
    #[error("no input byte source was provided")]
    NullInput,

    /// Operation needs a decoded payload; call `decompress()` first.
    #[error("binary has to be decompressed before this operation can be used")]
    NotDecoded,

    /// Operation needs split channels; call `prepare()` first.
    #[error("binary has to be prepared before this operation can be used")]
    NotPrepared,

    /// The processor was closed and its storage released.
    #[error("processor is closed")]
    Closed,

    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Reading the caller-supplied byte source failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
