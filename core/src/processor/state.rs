// src/processor/state.rs

use std::fmt;
use serde::{Deserialize, Serialize};

/// Lifecycle of a processor. Only moves forward; `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProcessorState {
    /// Compressed input stored, nothing decoded yet.
    Raw,
    /// Decoded payload available.
    Decoded,
    /// Payload split into channel artifacts; records can be polled.
    Prepared,
    /// Storage released.
    Closed,
}

impl ProcessorState {
    pub fn is_decoded(self) -> bool {
        matches!(self, ProcessorState::Decoded | ProcessorState::Prepared)
    }

    pub fn is_prepared(self) -> bool {
        self == ProcessorState::Prepared
    }
}

impl fmt::Display for ProcessorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProcessorState::Raw      => "raw",
            ProcessorState::Decoded  => "decoded",
            ProcessorState::Prepared => "prepared",
            ProcessorState::Closed   => "closed",
        };
        f.write_str(name)
    }
}
