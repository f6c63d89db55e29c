// Header parse, offsets and display.

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use cyface_core::headers::{decode_header_be, encode_header_be, read_header, FormatVersion, Header};
    use cyface_core::prelude::*;

    const TWO_GEOS: [u8; 18] = [0x00, 0x01, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];

    #[test]
    fn decodes_big_endian_fields() {
        let h = decode_header_be(&TWO_GEOS).unwrap();
        assert_eq!(h.format_version, 1);
        assert_eq!(h.geo_location_count, 2);
        assert_eq!(h.acceleration_count, 0);
        assert_eq!(h.rotation_count, 0);
        assert_eq!(h.direction_count, 0);
        assert_eq!(h.known_version(), Some(FormatVersion::V1));
    }

    #[test]
    fn counts_are_not_little_endian() {
        let mut bytes = [0u8; 18];
        bytes[2..6].copy_from_slice(&[0x01, 0x02, 0x03, 0x04]);
        let h = decode_header_be(&bytes).unwrap();
        assert_eq!(h.geo_location_count, 0x0102_0304);
    }

    #[test]
    fn offsets_follow_counts() {
        let h = Header {
            format_version: 1,
            geo_location_count: 3,
            acceleration_count: 4,
            rotation_count: 5,
            direction_count: 6,
        };
        assert_eq!(h.geo_begin(), 18);
        assert_eq!(h.accel_begin(), 18 + 3 * 36);
        assert_eq!(h.rotation_begin(), h.accel_begin() + 4 * 32);
        assert_eq!(h.direction_begin(), h.rotation_begin() + 5 * 32);
        assert_eq!(h.payload_end(), h.direction_begin() + 6 * 32);
        assert_eq!(h.channels_len(), 3 * 36 + (4 + 5 + 6) * 32);
        assert_eq!(h.count(ChannelKind::Rotation), 5);
    }

    #[test]
    fn max_counts_do_not_overflow() {
        let h = Header {
            format_version: 1,
            geo_location_count: u32::MAX,
            acceleration_count: u32::MAX,
            rotation_count: u32::MAX,
            direction_count: u32::MAX,
        };
        let expected = 18 + u32::MAX as u64 * 36 + 3 * u32::MAX as u64 * 32;
        assert_eq!(h.payload_end(), expected);
    }

    #[test]
    fn short_buffer_is_truncated_header() {
        let err = decode_header_be(&TWO_GEOS[..17]).unwrap_err();
        assert!(matches!(err, DecodeError::TruncatedHeader { have: 17, need: 18 }));

        let mut r = Cursor::new(vec![0u8; 5]);
        let err = read_header(&mut r).unwrap_err();
        assert!(matches!(
            err,
            ProcessorError::Decode(DecodeError::TruncatedHeader { have: 5, need: 18 })
        ));
    }

    #[test]
    fn read_header_leaves_reader_at_first_record() {
        let mut bytes = TWO_GEOS.to_vec();
        bytes.extend_from_slice(&[0xAB; 4]);
        let mut r = Cursor::new(bytes);
        read_header(&mut r).unwrap();
        assert_eq!(r.position(), 18);
    }

    #[test]
    fn encode_matches_wire_bytes() {
        let h = decode_header_be(&TWO_GEOS).unwrap();
        assert_eq!(encode_header_be(&h), TWO_GEOS);
    }

    #[test]
    fn unknown_versions_are_reported_not_rejected() {
        let mut bytes = TWO_GEOS;
        bytes[1] = 0x2a;
        let h = decode_header_be(&bytes).unwrap();
        assert_eq!(h.known_version(), None);
        assert_eq!(h.to_string(), "format=0x2a geo=2 acc=0 rot=0 dir=0");
        assert_eq!(decode_header_be(&TWO_GEOS).unwrap().to_string(), "format=V1 geo=2 acc=0 rot=0 dir=0");
    }
}
