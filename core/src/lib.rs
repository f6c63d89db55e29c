//! cyface-core
//!
//! Streaming decoder for Cyface binary measurement uploads: a zlib or raw
//! DEFLATE compressed payload made of an 18-byte header and four
//! fixed-record-size sensor channels.
//!
//! ```no_run
//! use cyface_core::prelude::*;
//!
//! # fn main() -> cyface_core::Result<()> {
//! let mut p = ProcessorBuilder::new()
//!     .input(std::path::PathBuf::from("upload.ccyf"))
//!     .build_in_memory()?;
//! p.decompress_and_prepare()?;
//! while let Some(loc) = p.poll_next_location()? {
//!     println!("{loc}");
//! }
//! p.close()?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;
pub mod config;
pub mod io;

// Format
pub mod records;
pub mod headers;
pub mod compression;
pub mod channel;

// Pipeline
pub mod storage;
pub mod telemetry;
pub mod processor;

pub use types::{DecodeError, ProcessorError, Result};

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::channel::ChannelKind;
    pub use crate::config::ProcessorConfig;
    pub use crate::headers::Header;
    pub use crate::io::InputSource;
    pub use crate::processor::{
        InMemoryProcessor, OnDiskProcessor, Processor, ProcessorBuilder, ProcessorState,
    };
    pub use crate::records::{GeoLocationRecord, Point3D, PointKind};
    pub use crate::storage::{InMemoryStorage, OnDiskStorage, StorageStrategy};
    pub use crate::types::{DecodeError, ProcessorError, Result};
}
