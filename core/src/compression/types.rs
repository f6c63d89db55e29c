// src/compression/types.rs

use std::fmt;
use std::io;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Framing of a DEFLATE stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InflateMode {
    /// RFC 1950: 2-byte header, DEFLATE body, Adler-32 trailer.
    Zlib,
    /// RFC 1951 body with no wrapper.
    Raw,
}

impl InflateMode {
    pub fn is_wrapped(self) -> bool {
        matches!(self, InflateMode::Zlib)
    }
}

impl fmt::Display for InflateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InflateMode::Zlib => f.write_str("zlib"),
            InflateMode::Raw  => f.write_str("raw DEFLATE"),
        }
    }
}

/// One inflate attempt's failure.
///
/// `HeaderCheck` is the only variant that lets the caller retry in another
/// mode; everything else is final.
#[derive(Debug, Error)]
pub enum InflateError {
    #[error("incorrect zlib header check")]
    HeaderCheck,

    #[error("corrupt {mode} stream: {reason}")]
    Corrupt { mode: InflateMode, reason: String },

    #[error("reading compressed input failed: {0}")]
    Read(#[source] io::Error),

    #[error("writing decoded payload failed: {0}")]
    Write(#[source] io::Error),
}
