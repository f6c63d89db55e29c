//! storage/disk.rs
//! Temp-file-backed artifacts for traces too large to hold in memory.
//!
//! Every artifact of one processor shares a random hex id; the suffix tells
//! them apart (`<id>`, `<id>_compressed`, `<id>_loc`, ...). Files are deleted
//! on `release`, and again best-effort on drop if nobody released them.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use rand::Rng;
use tracing::{debug, warn};

use crate::constants::ARTIFACT_ID_BYTES;
use crate::storage::{Artifact, ReleaseFailure, StorageError, StorageOp, StorageStrategy};

/// Random hex id shared by all artifacts of one processor.
pub fn unique_id() -> String {
    let mut bytes = [0u8; ARTIFACT_ID_BYTES];
    rand::thread_rng().fill(&mut bytes[..]);
    hex::encode(bytes)
}

#[derive(Debug)]
pub struct OnDiskStorage {
    dir: PathBuf,
    id: String,
    buffer_size: usize,
    /// Every path ever created, committed or not. This is what `release` deletes.
    created: BTreeMap<Artifact, PathBuf>,
    committed: BTreeMap<Artifact, u64>,
}

impl OnDiskStorage {
    /// Use (and create if needed) `dir` with a fresh random id.
    pub fn new(dir: impl AsRef<Path>, buffer_size: usize) -> Result<Self, StorageError> {
        Self::with_id(dir, unique_id(), buffer_size)
    }

    pub fn with_id(
        dir: impl AsRef<Path>,
        id: impl Into<String>,
        buffer_size: usize,
    ) -> Result<Self, StorageError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|source| StorageError::TempFileIo {
            op: StorageOp::Create,
            path: dir.clone(),
            source,
        })?;
        let id = id.into();
        debug!(dir = %dir.display(), %id, "on-disk storage ready");
        Ok(Self {
            dir,
            id,
            buffer_size: buffer_size.max(1),
            created: BTreeMap::new(),
            committed: BTreeMap::new(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn path_of(&self, artifact: Artifact) -> PathBuf {
        self.dir.join(format!("{}{}", self.id, artifact.suffix()))
    }
}

impl StorageStrategy for OnDiskStorage {
    type Sink = BufWriter<File>;
    type Source = BufReader<File>;

    fn name(&self) -> &'static str {
        "disk"
    }

    fn create(&mut self, artifact: Artifact) -> Result<BufWriter<File>, StorageError> {
        let path = self.path_of(artifact);
        let file = File::create(&path).map_err(|source| StorageError::TempFileIo {
            op: StorageOp::Create,
            path: path.clone(),
            source,
        })?;
        debug!(%artifact, path = %path.display(), "created temp file");
        self.committed.remove(&artifact);
        self.created.insert(artifact, path);
        Ok(BufWriter::with_capacity(self.buffer_size, file))
    }

    fn commit(&mut self, artifact: Artifact, sink: BufWriter<File>) -> Result<u64, StorageError> {
        let path = self.path_of(artifact);
        let file = sink.into_inner().map_err(|e| StorageError::TempFileIo {
            op: StorageOp::Commit,
            path: path.clone(),
            source: e.into_error(),
        })?;
        let len = file
            .metadata()
            .map_err(|source| StorageError::TempFileIo { op: StorageOp::Commit, path, source })?
            .len();
        self.committed.insert(artifact, len);
        Ok(len)
    }

    fn open(&self, artifact: Artifact) -> Result<Option<BufReader<File>>, StorageError> {
        if !self.committed.contains_key(&artifact) {
            return Ok(None);
        }
        let path = self.path_of(artifact);
        let file = File::open(&path)
            .map_err(|source| StorageError::TempFileIo { op: StorageOp::Open, path, source })?;
        Ok(Some(BufReader::with_capacity(self.buffer_size, file)))
    }

    fn len(&self, artifact: Artifact) -> Option<u64> {
        self.committed.get(&artifact).copied()
    }

    /// Deletes every created file, including uncommitted ones. A file that
    /// vanished behind our back counts as a failure too. Failures are
    /// collected so one stuck file does not keep the others around.
    fn release(&mut self) -> Result<(), StorageError> {
        self.committed.clear();
        let created = std::mem::take(&mut self.created);
        let mut failures = Vec::new();
        for (artifact, path) in created {
            match fs::remove_file(&path) {
                Ok(()) => debug!(%artifact, path = %path.display(), "deleted temp file"),
                Err(source) => failures.push(ReleaseFailure { artifact, path, source }),
            }
        }
        if failures.is_empty() {
            Ok(())
        } else {
            Err(StorageError::Release { failures })
        }
    }
}

impl Drop for OnDiskStorage {
    fn drop(&mut self) {
        if self.created.is_empty() {
            return;
        }
        warn!(id = %self.id, files = self.created.len(), "on-disk storage dropped without release");
        if let Err(e) = self.release() {
            warn!(error = %e, "temp file cleanup on drop failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use crate::channel::ChannelKind;

    #[test]
    fn ids_are_hex_and_distinct() {
        let a = unique_id();
        let b = unique_id();
        assert_eq!(a.len(), ARTIFACT_ID_BYTES * 2);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn uncommitted_artifact_is_deleted_but_not_openable() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = OnDiskStorage::with_id(dir.path(), "abc", 64).unwrap();

        let mut sink = s.create(Artifact::Channel(ChannelKind::Rotation)).unwrap();
        sink.write_all(b"partial").unwrap();
        drop(sink);

        assert!(s.open(Artifact::Channel(ChannelKind::Rotation)).unwrap().is_none());
        assert_eq!(s.dir(), dir.path());
        assert_eq!(s.path_of(Artifact::Channel(ChannelKind::Rotation)), dir.path().join("abc_rot"));
        assert!(dir.path().join("abc_rot").exists());

        s.release().unwrap();
        assert!(!dir.path().join("abc_rot").exists());
    }

    #[test]
    fn recreate_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = OnDiskStorage::with_id(dir.path(), "t", 8).unwrap();

        let mut sink = s.create(Artifact::Payload).unwrap();
        sink.write_all(&[1u8; 100]).unwrap();
        s.commit(Artifact::Payload, sink).unwrap();

        let mut sink = s.create(Artifact::Payload).unwrap();
        sink.write_all(&[2u8; 3]).unwrap();
        assert_eq!(s.commit(Artifact::Payload, sink).unwrap(), 3);

        let mut out = Vec::new();
        s.open(Artifact::Payload).unwrap().unwrap().read_to_end(&mut out).unwrap();
        assert_eq!(out, vec![2u8; 3]);
        s.release().unwrap();
    }
}
