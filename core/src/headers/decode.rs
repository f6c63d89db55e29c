//! headers/decode.rs
//!
//! Header decoding.
//!
//! Notes:
//! - Reads exactly the first 18 bytes; anything after is channel data.
//! - Derived offsets are not checked against the payload length here. A
//!   payload shorter than the header promises surfaces later, as a short
//!   channel during the split.

use std::io::Read;

use crate::headers::types::Header;
use crate::types::{DecodeError, ProcessorError};
use crate::utils::read_exact_or_eof;

/// Deserialize an 18-byte big-endian header.
///
/// # Returns
/// - `Ok(Header)` when `buf` holds at least `Header::LEN` bytes.
/// - `Err(DecodeError::TruncatedHeader)` otherwise.
#[inline]
pub fn decode_header_be(buf: &[u8]) -> Result<Header, DecodeError> {
    if buf.len() < Header::LEN {
        return Err(DecodeError::TruncatedHeader { have: buf.len(), need: Header::LEN });
    }

    let mut i = 0usize;
    #[inline] fn get_u16(buf: &[u8], i: &mut usize) -> u16 {
        let v = u16::from_be_bytes([buf[*i], buf[*i + 1]]); *i += 2; v
    }
    #[inline] fn get_u32(buf: &[u8], i: &mut usize) -> u32 {
        let v = u32::from_be_bytes([buf[*i], buf[*i + 1], buf[*i + 2], buf[*i + 3]]); *i += 4; v
    }

    let h = Header {
        format_version:     get_u16(buf, &mut i), // 0..2
        geo_location_count: get_u32(buf, &mut i), // 2..6
        acceleration_count: get_u32(buf, &mut i), // 6..10
        rotation_count:     get_u32(buf, &mut i), // 10..14
        direction_count:    get_u32(buf, &mut i), // 14..18
    };
    debug_assert_eq!(i, Header::LEN);

    Ok(h)
}

/// Read and decode the header from the start of a payload stream.
///
/// Consumes exactly `Header::LEN` bytes (fewer only at EOF), leaving `r`
/// positioned at the first geolocation record.
pub fn read_header<R: Read + ?Sized>(r: &mut R) -> Result<Header, ProcessorError> {
    let mut buf = [0u8; Header::LEN];
    let n = read_exact_or_eof(r, &mut buf)?;
    Ok(decode_header_be(&buf[..n])?)
}
