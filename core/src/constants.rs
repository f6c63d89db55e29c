//! constants.rs
//! Byte-layout geometry of the Cyface binary format plus processing defaults.
//!
//! All multi-byte fields on the wire are big-endian.

/// Size of an `i64` field on the wire.
pub const LONG_BYTES: usize = 8;
/// Size of an `i32` field on the wire.
pub const INT_BYTES: usize = 4;
/// Size of an `f64` field on the wire.
pub const DOUBLE_BYTES: usize = 8;

/// One geolocation record: timestamp, lat, lon, speed, accuracy.
pub const GEO_RECORD_SIZE: usize = LONG_BYTES + 3 * DOUBLE_BYTES + INT_BYTES; // 36
/// One acceleration / rotation / direction record: timestamp, x, y, z.
pub const POINT_RECORD_SIZE: usize = LONG_BYTES + 3 * DOUBLE_BYTES; // 32

/// Fixed header preamble: version (u16) + four u32 counts.
pub const HEADER_LEN: usize = 2 + 4 * 4; // 18

/// Chunk used when streaming bytes between artifacts (splitter, raw copy).
pub const DEFAULT_COPY_CHUNK_SIZE: usize = 4096;
/// Buffered reader capacity in front of the inflater.
pub const DEFAULT_INFLATE_BUFFER_SIZE: usize = 4096;
/// Channel readers buffer this many records per underlying read.
pub const DEFAULT_RECORDS_PER_READ: usize = 128;
/// Working-directory folder used by the on-disk strategy when none is configured.
pub const DEFAULT_TEMP_DIR: &str = "decompressed-temp";

/// zlib-wrapped first, raw DEFLATE second. Never more.
pub const MAX_INFLATE_ATTEMPTS: usize = 2;

/// Default level for the writer side (`compression::deflate::compress`).
pub const DEFAULT_LEVEL_DEFLATE: u32 = 6;

/// File-name suffixes for on-disk artifacts, appended to the per-processor id.
pub mod artifact_suffixes {
    pub const PAYLOAD: &str = "";
    pub const RAW: &str = "_compressed";
    pub const LOCATION: &str = "_loc";
    pub const ACCELERATION: &str = "_acc";
    pub const ROTATION: &str = "_rot";
    pub const DIRECTION: &str = "_dir";
}

/// Random bytes behind a temp artifact id (hex-encoded to 32 chars).
pub const ARTIFACT_ID_BYTES: usize = 16;
