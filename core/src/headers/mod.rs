//! headers/mod.rs
//! The fixed Cyface preamble.
//!
//! | Offset | Size | Field |
//! |---|---|---|
//! | 0  | 2 | format version (u16) |
//! | 2  | 4 | geolocation count (u32) |
//! | 6  | 4 | acceleration count (u32) |
//! | 10 | 4 | rotation count (u32) |
//! | 14 | 4 | direction count (u32) |
//!
//! Big-endian throughout.

pub mod types;
pub mod encode;
pub mod decode;

pub use types::*;
pub use encode::*;
pub use decode::*;
