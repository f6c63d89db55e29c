//! channel/reader.rs
//! Buffered, record-at-a-time reader over one channel artifact.

use std::io::{BufReader, Read};
use tracing::warn;

use crate::channel::ChannelKind;
use crate::records::RecordLayout;
use crate::storage::{Artifact, StorageError, StorageOp};
use crate::types::{DecodeError, ProcessorError};
use crate::utils::read_exact_or_eof;

/// Yields one decoded record per `poll_next` until the channel runs dry.
///
/// The underlying source is dropped as soon as it is exhausted, so a fully
/// read channel holds no file handle. A trailing partial record is dropped
/// with a warning, or reported as `TruncatedRecord` when `strict` is set.
pub struct ChannelReader<R: Read, L: RecordLayout> {
    layout: L,
    source: Option<BufReader<R>>,
    record: Vec<u8>,
    strict: bool,
    polled: u64,
}

impl<R: Read, L: RecordLayout> ChannelReader<R, L> {
    pub fn new(source: R, layout: L, records_per_read: usize, strict: bool) -> Self {
        let capacity = L::SIZE * records_per_read.max(1);
        Self {
            layout,
            source: Some(BufReader::with_capacity(capacity, source)),
            record: vec![0u8; L::SIZE],
            strict,
            polled: 0,
        }
    }

    /// A reader for a channel with no artifact (zero records declared).
    pub fn empty(layout: L) -> Self {
        Self {
            layout,
            source: None,
            record: vec![0u8; L::SIZE],
            strict: false,
            polled: 0,
        }
    }

    pub fn channel(&self) -> ChannelKind {
        self.layout.channel()
    }

    pub fn is_exhausted(&self) -> bool {
        self.source.is_none()
    }

    /// Records handed out so far.
    pub fn polled(&self) -> u64 {
        self.polled
    }

    pub fn poll_next(&mut self) -> Result<Option<L::Record>, ProcessorError> {
        let channel = self.layout.channel();
        let Some(src) = self.source.as_mut() else {
            return Ok(None);
        };

        let n = match read_exact_or_eof(src, &mut self.record) {
            Ok(n) => n,
            Err(source) => {
                self.source = None;
                return Err(StorageError::ArtifactIo {
                    op: StorageOp::Read,
                    artifact: Artifact::Channel(channel),
                    source,
                }
                .into());
            }
        };

        if n < L::SIZE {
            self.source = None;
            if n > 0 {
                if self.strict {
                    return Err(DecodeError::TruncatedRecord { channel, have: n, need: L::SIZE }.into());
                }
                warn!(%channel, dropped = n, record_size = L::SIZE, "discarding partial trailing record");
            }
            return Ok(None);
        }

        let record = self.layout.decode(&self.record)?;
        self.polled += 1;
        Ok(Some(record))
    }
}

impl<R: Read, L: RecordLayout> Iterator for ChannelReader<R, L> {
    type Item = Result<L::Record, ProcessorError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.poll_next().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{GeoLocationLayout, GeoLocationRecord, Point3D, Point3DLayout, PointKind};

    fn geo(ts: i64) -> GeoLocationRecord {
        GeoLocationRecord { timestamp: ts, latitude: 51.0, longitude: 13.7, speed: 1.5, accuracy: 300 }
    }

    #[test]
    fn yields_records_then_none_forever() {
        let mut bytes = Vec::new();
        for ts in 0..3 {
            geo(ts).write_to(&mut bytes).unwrap();
        }
        let mut r = ChannelReader::new(&bytes[..], GeoLocationLayout, 2, false);
        for ts in 0..3 {
            assert_eq!(r.poll_next().unwrap(), Some(geo(ts)));
        }
        assert_eq!(r.poll_next().unwrap(), None);
        assert!(r.is_exhausted());
        assert_eq!(r.poll_next().unwrap(), None);
        assert_eq!(r.polled(), 3);
    }

    #[test]
    fn partial_tail_lenient_vs_strict() {
        let p = Point3D { kind: PointKind::Rotation, timestamp: 9, x: 1.0, y: 2.0, z: 3.0 };
        let mut bytes = Vec::new();
        p.write_to(&mut bytes).unwrap();
        bytes.extend_from_slice(&[0u8; 5]);

        let mut lenient = ChannelReader::new(&bytes[..], Point3DLayout(PointKind::Rotation), 1, false);
        assert_eq!(lenient.poll_next().unwrap(), Some(p));
        assert_eq!(lenient.poll_next().unwrap(), None);

        let mut strict = ChannelReader::new(&bytes[..], Point3DLayout(PointKind::Rotation), 1, true);
        assert_eq!(strict.poll_next().unwrap(), Some(p));
        let err = strict.poll_next().unwrap_err();
        assert!(matches!(
            err,
            ProcessorError::Decode(DecodeError::TruncatedRecord { have: 5, need: 32, .. })
        ));
        assert_eq!(strict.poll_next().unwrap(), None);
    }

    #[test]
    fn empty_reader_never_yields() {
        let mut r: ChannelReader<&[u8], _> = ChannelReader::empty(Point3DLayout(PointKind::Direction));
        assert_eq!(r.poll_next().unwrap(), None);
        assert_eq!(r.count(), 0);
    }
}
