//! compression/deflate.rs
//! Streaming inflate over flate2's low-level `Decompress`, plus the matching
//! encoder used to produce test and bench fixtures.
//!
//! The high-level flate2 readers stop silently on a truncated stream, so the
//! pump here drives `Decompress` by hand and insists on `Status::StreamEnd`.

use std::io::{self, BufRead, BufReader, Cursor, Read, Write};
use flate2::{Compression, Decompress, FlushDecompress, Status};
use flate2::write::{DeflateEncoder, ZlibEncoder};

use crate::compression::types::{InflateError, InflateMode};
use crate::utils::read_exact_or_eof;

/// Compression method 8 (deflate) in the low nibble of CMF.
const CM_DEFLATE: u8 = 8;
/// CINFO above 7 means a window larger than 32K.
const MAX_CINFO: u8 = 7;
const FDICT: u8 = 0x20;

/// Validate the two zlib header bytes in the same order zlib does.
///
/// Only a failed FCHECK reports `HeaderCheck`; a header that passes FCHECK
/// but is otherwise unusable is a corrupt zlib stream, not a cue to retry.
pub fn check_zlib_header(cmf: u8, flg: u8) -> Result<(), InflateError> {
    let corrupt = |reason: &str| InflateError::Corrupt {
        mode: InflateMode::Zlib,
        reason: reason.to_string(),
    };
    if (u16::from(cmf) * 256 + u16::from(flg)) % 31 != 0 {
        return Err(InflateError::HeaderCheck);
    }
    if cmf & 0x0f != CM_DEFLATE {
        return Err(corrupt("unknown compression method"));
    }
    if cmf >> 4 > MAX_CINFO {
        return Err(corrupt("invalid window size"));
    }
    if flg & FDICT != 0 {
        return Err(corrupt("preset dictionary required"));
    }
    Ok(())
}

fn classify_read(mode: InflateMode, e: io::Error) -> InflateError {
    match e.kind() {
        io::ErrorKind::InvalidInput | io::ErrorKind::InvalidData | io::ErrorKind::UnexpectedEof => {
            InflateError::Corrupt { mode, reason: e.to_string() }
        }
        _ => InflateError::Read(e),
    }
}

/// Inflate all of `input` into `out`. Returns decoded byte count.
///
/// Bytes after the end of the DEFLATE stream are not read.
pub fn inflate<R: Read, W: Write + ?Sized>(
    mut input: R,
    out: &mut W,
    mode: InflateMode,
    buffer_size: usize,
) -> Result<u64, InflateError> {
    let cap = buffer_size.max(1);

    // Peek the zlib header without losing it; `Decompress` re-reads it.
    let mut prefix = Vec::new();
    if mode.is_wrapped() {
        let mut hdr = [0u8; 2];
        let n = read_exact_or_eof(&mut input, &mut hdr).map_err(|e| classify_read(mode, e))?;
        if n < hdr.len() {
            return Err(InflateError::Corrupt {
                mode,
                reason: "unexpected end of zlib input stream".into(),
            });
        }
        check_zlib_header(hdr[0], hdr[1])?;
        prefix.extend_from_slice(&hdr);
    }

    let mut src = BufReader::with_capacity(cap, Cursor::new(prefix).chain(input));
    let mut inflater = Decompress::new(mode.is_wrapped());
    let mut buf = vec![0u8; cap];

    loop {
        let (consumed, produced, status, eof) = {
            let avail = src.fill_buf().map_err(|e| classify_read(mode, e))?;
            let eof = avail.is_empty();
            let flush = if eof { FlushDecompress::Finish } else { FlushDecompress::None };
            let in_before = inflater.total_in();
            let out_before = inflater.total_out();
            let status = inflater
                .decompress(avail, &mut buf, flush)
                .map_err(|e| InflateError::Corrupt { mode, reason: e.to_string() })?;
            (
                (inflater.total_in() - in_before) as usize,
                (inflater.total_out() - out_before) as usize,
                status,
                eof,
            )
        };
        src.consume(consumed);
        if produced > 0 {
            out.write_all(&buf[..produced]).map_err(InflateError::Write)?;
        }

        match status {
            Status::StreamEnd => break,
            Status::Ok | Status::BufError if consumed == 0 && produced == 0 => {
                let reason = if eof {
                    format!("unexpected end of {} input stream", mode)
                } else {
                    "inflater made no progress".to_string()
                };
                return Err(InflateError::Corrupt { mode, reason });
            }
            Status::Ok | Status::BufError => {}
        }
    }

    out.flush().map_err(InflateError::Write)?;
    Ok(inflater.total_out())
}

/// Compress `data` in the given framing. `level` is clamped to 0..=9.
pub fn compress(data: &[u8], mode: InflateMode, level: u32) -> io::Result<Vec<u8>> {
    let level = Compression::new(level.min(9));
    match mode {
        InflateMode::Zlib => {
            let mut enc = ZlibEncoder::new(Vec::new(), level);
            enc.write_all(data)?;
            enc.finish()
        }
        InflateMode::Raw => {
            let mut enc = DeflateEncoder::new(Vec::new(), level);
            enc.write_all(data)?;
            enc.finish()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_LEVEL_DEFLATE;

    fn sample() -> Vec<u8> {
        (0..10_000u32).flat_map(|i| (i % 251).to_be_bytes()).collect()
    }

    #[test]
    fn header_checks_follow_zlib_order() {
        // 0x78 0x9c is the common default header.
        assert!(check_zlib_header(0x78, 0x9c).is_ok());
        assert!(matches!(check_zlib_header(0x78, 0x00), Err(InflateError::HeaderCheck)));
        // CM = 7, FCHECK valid.
        let cmf = 0x77u8;
        let flg = (31 - (u16::from(cmf) * 256) % 31) as u8;
        assert!(matches!(check_zlib_header(cmf, flg), Err(InflateError::Corrupt { .. })));
    }

    #[test]
    fn inflates_both_framings() {
        let data = sample();
        for mode in [InflateMode::Zlib, InflateMode::Raw] {
            let packed = compress(&data, mode, DEFAULT_LEVEL_DEFLATE).unwrap();
            let mut out = Vec::new();
            let n = inflate(&packed[..], &mut out, mode, 64).unwrap();
            assert_eq!(n as usize, data.len());
            assert_eq!(out, data);
        }
    }

    #[test]
    fn raw_stream_fails_zlib_header_check() {
        // Level 0 gives a stored block: 0x01, then LEN=100 little-endian.
        let data = b"cyface raw".repeat(10);
        let packed = compress(&data, InflateMode::Raw, 0).unwrap();
        assert_ne!((u16::from(packed[0]) * 256 + u16::from(packed[1])) % 31, 0);
        let mut out = Vec::new();
        let err = inflate(&packed[..], &mut out, InflateMode::Zlib, 4096).unwrap_err();
        assert!(matches!(err, InflateError::HeaderCheck), "{err:?}");
    }

    #[test]
    fn truncated_stream_is_corrupt() {
        let data = sample();
        let packed = compress(&data, InflateMode::Zlib, DEFAULT_LEVEL_DEFLATE).unwrap();
        let cut = &packed[..packed.len() / 2];
        let mut out = Vec::new();
        let err = inflate(cut, &mut out, InflateMode::Zlib, 256).unwrap_err();
        assert!(matches!(err, InflateError::Corrupt { mode: InflateMode::Zlib, .. }), "{err:?}");
    }

    #[test]
    fn trailing_garbage_after_stream_end_is_ignored() {
        let data = b"hello cyface".to_vec();
        let mut packed = compress(&data, InflateMode::Zlib, 9).unwrap();
        packed.extend_from_slice(b"junk");
        let mut out = Vec::new();
        inflate(&packed[..], &mut out, InflateMode::Zlib, 4096).unwrap();
        assert_eq!(out, data);
    }
}
