//! records/mod.rs
//! Typed records and their fixed big-endian wire layout.
//!
//! Layouts:
//! - Geolocation: `[timestamp:i64][latitude:f64][longitude:f64][speed:f64][accuracy:i32]` (36 bytes)
//! - Point3D:     `[timestamp:i64][x:f64][y:f64][z:f64]` (32 bytes)

pub mod types;
pub mod decode;
pub mod encode;

pub use types::*;
pub use decode::*;
pub use encode::*;
