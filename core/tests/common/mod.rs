// Shared fixtures for the integration suites.
#![allow(dead_code)]

use cyface_core::compression::{compress, InflateMode};
use cyface_core::constants::DEFAULT_LEVEL_DEFLATE;
use cyface_core::prelude::*;
use cyface_core::records::PayloadBuilder;

pub fn geo(ts: i64) -> GeoLocationRecord {
    GeoLocationRecord {
        timestamp: 1_600_000_000_000 + ts,
        latitude: 51.05 + ts as f64 * 1e-4,
        longitude: 13.73 - ts as f64 * 1e-4,
        speed: 2.5 + ts as f64,
        accuracy: 300 + ts as i32,
    }
}

pub fn point(kind: PointKind, ts: i64) -> Point3D {
    Point3D {
        kind,
        timestamp: 1_600_000_000_000 + ts,
        x: ts as f64 * 0.5,
        y: -(ts as f64),
        z: 9.81,
    }
}

/// Payload with `g` geolocations and `a`/`r`/`d` points per sensor channel.
pub fn payload(g: usize, a: usize, r: usize, d: usize) -> PayloadBuilder {
    PayloadBuilder::new(1)
        .locations((0..g as i64).map(geo))
        .points((0..a as i64).map(|t| point(PointKind::Acceleration, t)))
        .points((0..r as i64).map(|t| point(PointKind::Rotation, t)))
        .points((0..d as i64).map(|t| point(PointKind::Direction, t)))
}

/// Two geolocations, nothing else.
pub fn two_locations() -> Vec<u8> {
    payload(2, 0, 0, 0).build()
}

pub fn zlib(bytes: &[u8]) -> Vec<u8> {
    compress(bytes, InflateMode::Zlib, DEFAULT_LEVEL_DEFLATE).unwrap()
}

/// FCHECK of the first two bytes passes for roughly one stream in 31.
pub fn looks_like_zlib(packed: &[u8]) -> bool {
    packed.len() >= 2 && (u16::from(packed[0]) * 256 + u16::from(packed[1])) % 31 == 0
}

/// Raw DEFLATE whose first two bytes fail the zlib header check.
pub fn raw_deflate(bytes: &[u8]) -> Vec<u8> {
    for level in (0..=9).rev() {
        let packed = compress(bytes, InflateMode::Raw, level).unwrap();
        if !looks_like_zlib(&packed) {
            return packed;
        }
    }
    panic!("every level produced a zlib-looking prefix");
}

pub fn in_memory(input: Vec<u8>, compressed: bool) -> InMemoryProcessor {
    ProcessorBuilder::new()
        .input(input)
        .compressed(compressed)
        .build_in_memory()
        .unwrap()
}

pub fn on_disk(input: Vec<u8>, compressed: bool, dir: &std::path::Path) -> OnDiskProcessor {
    ProcessorBuilder::new()
        .input(input)
        .compressed(compressed)
        .config(ProcessorConfig::default().with_temp_dir(dir))
        .build_on_disk()
        .unwrap()
}

/// Drain every channel in wire order.
pub fn drain<S: StorageStrategy>(
    p: &mut Processor<S>,
) -> (Vec<GeoLocationRecord>, Vec<Point3D>, Vec<Point3D>, Vec<Point3D>) {
    let mut loc = Vec::new();
    while let Some(r) = p.poll_next_location().unwrap() {
        loc.push(r);
    }
    let mut acc = Vec::new();
    while let Some(r) = p.poll_next_acceleration().unwrap() {
        acc.push(r);
    }
    let mut rot = Vec::new();
    while let Some(r) = p.poll_next_rotation().unwrap() {
        rot.push(r);
    }
    let mut dir = Vec::new();
    while let Some(r) = p.poll_next_direction().unwrap() {
        dir.push(r);
    }
    (loc, acc, rot, dir)
}
