//! storage/memory.rs
//! Heap-backed artifacts.
//!
//! Sinks are plain `Vec<u8>`s; committing freezes them into `Bytes`, so every
//! `open` is a cheap reference-counted view rather than a copy. No filesystem
//! access at all, which makes this the fast path for traces that fit in RAM.

use std::collections::HashMap;
use bytes::{buf::Reader, Buf, Bytes};
use tracing::debug;

use crate::storage::{Artifact, StorageError, StorageStrategy};

#[derive(Debug, Default)]
pub struct InMemoryStorage {
    slots: HashMap<Artifact, Bytes>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

}

impl StorageStrategy for InMemoryStorage {
    type Sink = Vec<u8>;
    type Source = Reader<Bytes>;

    fn name(&self) -> &'static str {
        "memory"
    }

    fn create(&mut self, artifact: Artifact) -> Result<Vec<u8>, StorageError> {
        self.slots.remove(&artifact);
        Ok(Vec::new())
    }

    fn commit(&mut self, artifact: Artifact, sink: Vec<u8>) -> Result<u64, StorageError> {
        let len = sink.len() as u64;
        debug!(%artifact, len, "committed in-memory artifact");
        self.slots.insert(artifact, Bytes::from(sink));
        Ok(len)
    }

    fn open(&self, artifact: Artifact) -> Result<Option<Reader<Bytes>>, StorageError> {
        Ok(self.slots.get(&artifact).map(|b| b.clone().reader()))
    }

    fn len(&self, artifact: Artifact) -> Option<u64> {
        self.slots.get(&artifact).map(|b| b.len() as u64)
    }

    fn release(&mut self) -> Result<(), StorageError> {
        if !self.slots.is_empty() {
            debug!(artifacts = self.slots.len(), "releasing in-memory artifacts");
        }
        self.slots.clear();
        Ok(())
    }

    fn read_to_vec(&self, artifact: Artifact) -> Result<Vec<u8>, StorageError> {
        self.slots
            .get(&artifact)
            .map(|b| b.to_vec())
            .ok_or(StorageError::MissingArtifact(artifact))
    }
}
