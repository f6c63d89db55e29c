//! records/encode.rs
//!
//! Writer side of the record layout, plus `PayloadBuilder` which assembles a
//! complete decoded payload (header + four channels). Field order must match
//! `decode.rs` exactly.

use std::io::{self, Write};
use byteorder::{BigEndian, WriteBytesExt};

use crate::constants::{GEO_RECORD_SIZE, HEADER_LEN, POINT_RECORD_SIZE};
use crate::headers::{encode_header_be, Header};
use crate::records::types::{GeoLocationRecord, Point3D, PointKind};

impl GeoLocationRecord {
    pub fn write_to<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<()> {
        w.write_i64::<BigEndian>(self.timestamp)?;
        w.write_f64::<BigEndian>(self.latitude)?;
        w.write_f64::<BigEndian>(self.longitude)?;
        w.write_f64::<BigEndian>(self.speed)?;
        w.write_i32::<BigEndian>(self.accuracy)?;
        Ok(())
    }
}

impl Point3D {
    /// The kind is implied by the channel and not written.
    pub fn write_to<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<()> {
        w.write_i64::<BigEndian>(self.timestamp)?;
        w.write_f64::<BigEndian>(self.x)?;
        w.write_f64::<BigEndian>(self.y)?;
        w.write_f64::<BigEndian>(self.z)?;
        Ok(())
    }
}

/// Builds a decoded Cyface payload in memory.
///
/// Counts in the header are taken from the pushed records. Points are routed
/// to their channel by `Point3D::kind`.
#[derive(Debug, Clone)]
pub struct PayloadBuilder {
    format_version: u16,
    locations: Vec<GeoLocationRecord>,
    accelerations: Vec<Point3D>,
    rotations: Vec<Point3D>,
    directions: Vec<Point3D>,
}

impl PayloadBuilder {
    pub fn new(format_version: u16) -> Self {
        Self {
            format_version,
            locations: Vec::new(),
            accelerations: Vec::new(),
            rotations: Vec::new(),
            directions: Vec::new(),
        }
    }

    pub fn location(mut self, record: GeoLocationRecord) -> Self {
        self.locations.push(record);
        self
    }

    pub fn locations(mut self, records: impl IntoIterator<Item = GeoLocationRecord>) -> Self {
        self.locations.extend(records);
        self
    }

    pub fn point(mut self, point: Point3D) -> Self {
        match point.kind {
            PointKind::Acceleration => self.accelerations.push(point),
            PointKind::Rotation     => self.rotations.push(point),
            PointKind::Direction    => self.directions.push(point),
        }
        self
    }

    pub fn points(self, points: impl IntoIterator<Item = Point3D>) -> Self {
        points.into_iter().fold(self, |b, p| b.point(p))
    }

    pub fn header(&self) -> Header {
        Header {
            format_version: self.format_version,
            geo_location_count: self.locations.len() as u32,
            acceleration_count: self.accelerations.len() as u32,
            rotation_count: self.rotations.len() as u32,
            direction_count: self.directions.len() as u32,
        }
    }

    /// Serialize header and channels in wire order.
    pub fn build(&self) -> Vec<u8> {
        let len = HEADER_LEN
            + self.locations.len() * GEO_RECORD_SIZE
            + (self.accelerations.len() + self.rotations.len() + self.directions.len()) * POINT_RECORD_SIZE;
        let mut out = Vec::with_capacity(len);
        out.extend_from_slice(&encode_header_be(&self.header()));
        // Writing into a Vec cannot fail.
        for r in &self.locations {
            let _ = r.write_to(&mut out);
        }
        for p in self.accelerations.iter().chain(&self.rotations).chain(&self.directions) {
            let _ = p.write_to(&mut out);
        }
        debug_assert_eq!(out.len(), len);
        out
    }
}
