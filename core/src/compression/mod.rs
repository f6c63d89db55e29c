//! compression/mod.rs
//! DEFLATE handling for compressed uploads.
//!
//! - `deflate`: inflate pump, zlib header check, fixture encoder.
//! - `stream`: the storage-backed decompression stage with its single
//!   zlib -> raw fallback.

pub mod types;
pub mod deflate;
pub mod stream;

pub use types::*;
pub use deflate::*;
pub use stream::*;
