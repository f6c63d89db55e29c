//! records/types.rs
//! Typed sensor records carried by the four channels.

use std::fmt;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::channel::ChannelKind;

/// One fix from the location provider.
///
/// `timestamp` is milliseconds since the Unix epoch; `accuracy` is in the
/// producer's native unit (centimetres on the Android client).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocationRecord {
    pub timestamp: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub speed: f64,
    pub accuracy: i32,
}

impl GeoLocationRecord {
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

impl fmt::Display for GeoLocationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "timestamp={},lon={:?},lat={:?},speed={:?},accuracy={}",
            self.timestamp, self.longitude, self.latitude, self.speed, self.accuracy
        )
    }
}

/// Which inertial sensor produced a `Point3D`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointKind {
    Acceleration,
    Rotation,
    Direction,
}

impl PointKind {
    pub fn channel(self) -> ChannelKind {
        match self {
            PointKind::Acceleration => ChannelKind::Acceleration,
            PointKind::Rotation     => ChannelKind::Rotation,
            PointKind::Direction    => ChannelKind::Direction,
        }
    }
}

impl fmt::Display for PointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            PointKind::Acceleration => "ACC",
            PointKind::Rotation     => "ROT",
            PointKind::Direction    => "DIR",
        };
        f.write_str(tag)
    }
}

/// A three-axis sample from the accelerometer, gyroscope or magnetometer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3D {
    pub kind: PointKind,
    pub timestamp: i64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

impl fmt::Display for Point3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "timestamp={},x={:?},y={:?},z={:?},sensortype={}",
            self.timestamp, self.x, self.y, self.z, self.kind
        )
    }
}
