//! processor/builder.rs
//! Fluent construction of processors over either storage back-end.

use crate::config::ProcessorConfig;
use crate::io::InputSource;
use crate::processor::{InMemoryProcessor, OnDiskProcessor, Processor};
use crate::storage::{InMemoryStorage, OnDiskStorage, StorageStrategy};
use crate::types::{ProcessorError, Result};

/// Input is assumed compressed unless `compressed(false)` is called.
#[derive(Debug)]
pub struct ProcessorBuilder {
    input: Option<InputSource>,
    compressed: bool,
    config: ProcessorConfig,
}

impl Default for ProcessorBuilder {
    fn default() -> Self {
        Self {
            input: None,
            compressed: true,
            config: ProcessorConfig::default(),
        }
    }
}

impl ProcessorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(mut self, input: impl Into<InputSource>) -> Self {
        self.input = Some(input.into());
        self
    }

    pub fn compressed(mut self, compressed: bool) -> Self {
        self.compressed = compressed;
        self
    }

    pub fn config(mut self, config: ProcessorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build_in_memory(self) -> Result<InMemoryProcessor> {
        self.build_with(InMemoryStorage::new())
    }

    /// Creates `config.temp_dir` if needed. Nothing touches the filesystem
    /// when the input is missing or the config is invalid.
    pub fn build_on_disk(self) -> Result<OnDiskProcessor> {
        if self.input.is_none() {
            return Err(ProcessorError::NullInput);
        }
        self.config.validate()?;
        let storage = OnDiskStorage::new(&self.config.temp_dir, self.config.inflate_buffer_size)?;
        self.build_with(storage)
    }

    pub fn build_with<S: StorageStrategy>(self, storage: S) -> Result<Processor<S>> {
        let input = self.input.ok_or(ProcessorError::NullInput)?;
        Processor::new(input, self.compressed, storage, self.config)
    }
}
