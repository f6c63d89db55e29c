//! records/decode.rs
//!
//! Fixed-layout record deserialization.
//!
//! Field order is the wire order: timestamp first, then the doubles, then
//! (geolocation only) the trailing `i32` accuracy. Every read is big-endian.

use std::io;
use byteorder::{BigEndian, ReadBytesExt};

use crate::channel::ChannelKind;
use crate::constants::{GEO_RECORD_SIZE, POINT_RECORD_SIZE};
use crate::records::types::{GeoLocationRecord, Point3D, PointKind};

/// Geometry and decoder of one channel's records.
///
/// Implementors are tiny value types; a `ChannelReader` owns one and calls
/// `decode` with a buffer of exactly `SIZE` bytes.
pub trait RecordLayout {
    type Record;
    const SIZE: usize;

    fn channel(&self) -> ChannelKind;
    fn decode(&self, bytes: &[u8]) -> io::Result<Self::Record>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GeoLocationLayout;

impl RecordLayout for GeoLocationLayout {
    type Record = GeoLocationRecord;
    const SIZE: usize = GEO_RECORD_SIZE;

    fn channel(&self) -> ChannelKind {
        ChannelKind::Location
    }

    fn decode(&self, bytes: &[u8]) -> io::Result<GeoLocationRecord> {
        decode_geo_location(bytes)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Point3DLayout(pub PointKind);

impl RecordLayout for Point3DLayout {
    type Record = Point3D;
    const SIZE: usize = POINT_RECORD_SIZE;

    fn channel(&self) -> ChannelKind {
        self.0.channel()
    }

    fn decode(&self, bytes: &[u8]) -> io::Result<Point3D> {
        decode_point3d(bytes, self.0)
    }
}

/// Decode one 36-byte geolocation record.
#[inline]
pub fn decode_geo_location(bytes: &[u8]) -> io::Result<GeoLocationRecord> {
    let mut rdr = bytes;
    let timestamp = rdr.read_i64::<BigEndian>()?;
    let latitude  = rdr.read_f64::<BigEndian>()?;
    let longitude = rdr.read_f64::<BigEndian>()?;
    let speed     = rdr.read_f64::<BigEndian>()?;
    let accuracy  = rdr.read_i32::<BigEndian>()?;
    Ok(GeoLocationRecord { timestamp, latitude, longitude, speed, accuracy })
}

/// Decode one 32-byte acceleration/rotation/direction record.
#[inline]
pub fn decode_point3d(bytes: &[u8], kind: PointKind) -> io::Result<Point3D> {
    let mut rdr = bytes;
    let timestamp = rdr.read_i64::<BigEndian>()?;
    let x = rdr.read_f64::<BigEndian>()?;
    let y = rdr.read_f64::<BigEndian>()?;
    let z = rdr.read_f64::<BigEndian>()?;
    Ok(Point3D { kind, timestamp, x, y, z })
}
