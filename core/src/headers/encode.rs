//! headers/encode.rs
//!
//! Header encoding. Field order must match `decode.rs` exactly.

use crate::headers::types::Header;

/// Serialize a `Header` into its fixed 18-byte big-endian form.
#[inline]
pub fn encode_header_be(h: &Header) -> [u8; Header::LEN] {
    let mut out = [0u8; Header::LEN];
    let mut i = 0usize;

    fn put_u16(out: &mut [u8], i: &mut usize, v: u16) {
        out[*i..*i + 2].copy_from_slice(&v.to_be_bytes());
        *i += 2;
    }
    fn put_u32(out: &mut [u8], i: &mut usize, v: u32) {
        out[*i..*i + 4].copy_from_slice(&v.to_be_bytes());
        *i += 4;
    }

    put_u16(&mut out, &mut i, h.format_version);     // 0..2
    put_u32(&mut out, &mut i, h.geo_location_count); // 2..6
    put_u32(&mut out, &mut i, h.acceleration_count); // 6..10
    put_u32(&mut out, &mut i, h.rotation_count);     // 10..14
    put_u32(&mut out, &mut i, h.direction_count);    // 14..18

    debug_assert_eq!(i, Header::LEN, "encoding wrote incorrect length");
    out
}
