// ## src/io.rs

use std::fmt;
use std::io::{Cursor, Read};
use std::path::PathBuf;

use crate::types::ProcessorError;

/// Where the bytes of one measurement upload come from.
pub enum InputSource {
    Reader(Box<dyn Read + Send>),
    File(PathBuf),
    Memory(Vec<u8>),
}

impl InputSource {
    pub fn reader<R: Read + Send + 'static>(r: R) -> Self {
        InputSource::Reader(Box::new(r))
    }
}

impl fmt::Debug for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Reader(_) => f.write_str("InputSource::Reader(..)"),
            InputSource::File(p)   => write!(f, "InputSource::File({})", p.display()),
            InputSource::Memory(b) => write!(f, "InputSource::Memory({} bytes)", b.len()),
        }
    }
}

impl From<Vec<u8>> for InputSource {
    fn from(bytes: Vec<u8>) -> Self {
        InputSource::Memory(bytes)
    }
}

impl From<PathBuf> for InputSource {
    fn from(path: PathBuf) -> Self {
        InputSource::File(path)
    }
}

/// Normalize an input source into a boxed reader.
pub fn open_input(src: InputSource) -> Result<Box<dyn Read + Send>, ProcessorError> {
    let reader: Box<dyn Read + Send> = match src {
        InputSource::Reader(r) => r,
        InputSource::File(p)   => Box::new(std::fs::File::open(p)?),
        InputSource::Memory(b) => Box::new(Cursor::new(b)),
    };
    Ok(reader)
}
