// Cross-checks: split byte accounting, framing and back-end equivalence.

mod common;

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::common::*;

    use cyface_core::prelude::*;
    use cyface_core::records::PayloadBuilder;

    fn arb_geo() -> impl Strategy<Value = GeoLocationRecord> {
        (any::<i64>(), -90.0..90.0f64, -180.0..180.0f64, 0.0..80.0f64, any::<i32>()).prop_map(
            |(timestamp, latitude, longitude, speed, accuracy)| GeoLocationRecord {
                timestamp,
                latitude,
                longitude,
                speed,
                accuracy,
            },
        )
    }

    fn arb_points(kind: PointKind, max: usize) -> impl Strategy<Value = Vec<Point3D>> {
        prop::collection::vec(
            (any::<i64>(), -50.0..50.0f64, -50.0..50.0f64, -50.0..50.0f64)
                .prop_map(move |(timestamp, x, y, z)| Point3D { kind, timestamp, x, y, z }),
            0..max,
        )
    }

    fn arb_payload() -> impl Strategy<Value = PayloadBuilder> {
        (
            prop::collection::vec(arb_geo(), 0..20),
            arb_points(PointKind::Acceleration, 40),
            arb_points(PointKind::Rotation, 40),
            arb_points(PointKind::Direction, 40),
        )
            .prop_map(|(g, a, r, d)| {
                PayloadBuilder::new(1).locations(g).points(a).points(r).points(d)
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn split_bytes_sum_to_channel_lengths(builder in arb_payload()) {
            let plain = builder.build();
            let h = builder.header();
            let mut p = in_memory(zlib(&plain), true);
            p.decompress_and_prepare().unwrap();

            let t = p.telemetry();
            let copied: u64 = ChannelKind::ALL.iter().map(|&k| t.channel_bytes(k)).sum();
            let declared = h.geo_location_count as u64 * 36
                + (h.acceleration_count + h.rotation_count + h.direction_count) as u64 * 32;
            prop_assert_eq!(copied, declared);
            prop_assert_eq!(copied, plain.len() as u64 - 18);
            p.close().unwrap();
        }

        #[test]
        fn memory_and_disk_agree(builder in arb_payload()) {
            let plain = builder.build();
            let packed = zlib(&plain);
            let dir = tempfile::tempdir().unwrap();

            let mut mem = in_memory(packed.clone(), true);
            let mut disk = on_disk(packed, true, dir.path());
            mem.decompress_and_prepare().unwrap();
            disk.decompress_and_prepare().unwrap();

            prop_assert_eq!(mem.decoded_payload_as_bytes().unwrap(), disk.decoded_payload_as_bytes().unwrap());
            prop_assert_eq!(mem.header().unwrap(), disk.header().unwrap());
            prop_assert_eq!(drain(&mut mem), drain(&mut disk));
            mem.close().unwrap();
            disk.close().unwrap();
        }

        #[test]
        fn raw_and_zlib_framing_agree(builder in arb_payload(), level in 0u32..=9) {
            let plain = builder.build();
            let raw = cyface_core::compression::compress(&plain, cyface_core::compression::InflateMode::Raw, level).unwrap();
            prop_assume!(!looks_like_zlib(&raw));

            let mut a = in_memory(zlib(&plain), true);
            let mut b = in_memory(raw, true);
            a.decompress_and_prepare().unwrap();
            b.decompress_and_prepare().unwrap();
            prop_assert_eq!(a.decoded_payload_as_bytes().unwrap(), plain);
            prop_assert_eq!(drain(&mut a), drain(&mut b));
            a.close().unwrap();
            b.close().unwrap();
        }
    }

    #[test]
    fn polled_records_match_builder_input() {
        let builder = payload(6, 3, 8, 2);
        let mut p = in_memory(zlib(&builder.build()), true);
        p.decompress_and_prepare().unwrap();
        let (loc, _, rot, _) = drain(&mut p);
        assert_eq!(loc, (0..6).map(geo).collect::<Vec<_>>());
        assert_eq!(rot.len(), 8);
        p.close().unwrap();
    }
}
