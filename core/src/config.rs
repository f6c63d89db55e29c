//! config.rs
//! Processor tuning knobs.
//!
//! Every field has a default, so a partial JSON document (or `{}`) is a
//! valid configuration.

use std::path::PathBuf;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::types::ProcessorError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Directory for on-disk artifacts. Created on demand.
    #[serde(default = "default_temp_dir")]
    pub temp_dir: PathBuf,

    /// Buffer used when streaming bytes between artifacts.
    #[serde(default = "default_copy_chunk_size")]
    pub copy_chunk_size: usize,

    /// Buffer in front of the inflater and around temp files.
    #[serde(default = "default_inflate_buffer_size")]
    pub inflate_buffer_size: usize,

    /// Records fetched per underlying read by channel readers.
    #[serde(default = "default_records_per_read")]
    pub records_per_read: usize,

    /// Treat truncated channels and partial trailing records as errors
    /// instead of logging and dropping them.
    #[serde(default)]
    pub strict_records: bool,
}

fn default_temp_dir() -> PathBuf {
    PathBuf::from(DEFAULT_TEMP_DIR)
}

fn default_copy_chunk_size() -> usize {
    DEFAULT_COPY_CHUNK_SIZE
}

fn default_inflate_buffer_size() -> usize {
    DEFAULT_INFLATE_BUFFER_SIZE
}

fn default_records_per_read() -> usize {
    DEFAULT_RECORDS_PER_READ
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            temp_dir: default_temp_dir(),
            copy_chunk_size: DEFAULT_COPY_CHUNK_SIZE,
            inflate_buffer_size: DEFAULT_INFLATE_BUFFER_SIZE,
            records_per_read: DEFAULT_RECORDS_PER_READ,
            strict_records: false,
        }
    }
}

impl ProcessorConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ProcessorError> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| ProcessorError::InvalidConfig(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ProcessorError> {
        let sizes = [
            ("copy_chunk_size", self.copy_chunk_size),
            ("inflate_buffer_size", self.inflate_buffer_size),
            ("records_per_read", self.records_per_read),
        ];
        for (name, value) in sizes {
            if value == 0 {
                return Err(ProcessorError::InvalidConfig(format!("{} must be non-zero", name)));
            }
        }
        if self.temp_dir.as_os_str().is_empty() {
            return Err(ProcessorError::InvalidConfig("temp_dir must not be empty".into()));
        }
        Ok(())
    }

    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = dir.into();
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict_records = strict;
        self
    }
}
