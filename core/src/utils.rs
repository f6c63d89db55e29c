use std::fmt;
use std::io::{self, Read, Write};
use num_enum::TryFromPrimitive;

pub fn enum_name_or_hex<T>(raw: T::Primitive) -> String
where
    T: TryFromPrimitive + fmt::Debug,
    T::Primitive: fmt::LowerHex,
{
    match T::try_from_primitive(raw) {
        Ok(variant) => format!("{:?}", variant),
        Err(_) => format!("0x{:x}", raw),
    }
}

/// Fill `buf` from `r`, stopping early only at EOF.
///
/// Returns how many bytes landed in `buf`. Unlike `read_exact`, a short count
/// is not an error; callers decide what a partial fill means.
pub fn read_exact_or_eof<R: Read + ?Sized>(r: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut off = 0;
    while off < buf.len() {
        match r.read(&mut buf[off..]) {
            Ok(0) => break,
            Ok(n) => off += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(off)
}

/// Which side of a copy failed.
#[derive(Debug)]
pub enum CopyError {
    Read(io::Error),
    Write(io::Error),
}

/// Copy at most `limit` bytes from `r` to `w` through a `chunk`-sized buffer.
///
/// Returns the number of bytes copied, which is below `limit` only if `r` hit
/// EOF first. Peak memory is one chunk regardless of `limit`.
pub fn copy_bounded<R, W>(r: &mut R, w: &mut W, limit: u64, chunk: usize) -> Result<u64, CopyError>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut buf = vec![0u8; chunk.max(1)];
    let mut copied = 0u64;
    while copied < limit {
        let want = (limit - copied).min(buf.len() as u64) as usize;
        let n = read_exact_or_eof(r, &mut buf[..want]).map_err(CopyError::Read)?;
        if n == 0 {
            break;
        }
        w.write_all(&buf[..n]).map_err(CopyError::Write)?;
        copied += n as u64;
        if n < want {
            break;
        }
    }
    Ok(copied)
}

/// Copy everything from `r` to `w` through a `chunk`-sized buffer.
pub fn copy_all<R, W>(r: &mut R, w: &mut W, chunk: usize) -> Result<u64, CopyError>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    copy_bounded(r, w, u64::MAX, chunk)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reader that hands out at most `step` bytes per call.
    struct Trickle<'a> {
        data: &'a [u8],
        step: usize,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.step.min(buf.len()).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn read_exact_or_eof_survives_short_reads() {
        let data = [7u8; 10];
        let mut r = Trickle { data: &data, step: 3 };
        let mut buf = [0u8; 8];
        assert_eq!(read_exact_or_eof(&mut r, &mut buf).unwrap(), 8);
        let mut rest = [0u8; 8];
        assert_eq!(read_exact_or_eof(&mut r, &mut rest).unwrap(), 2);
    }

    #[test]
    fn copy_bounded_stops_at_limit() {
        let data: Vec<u8> = (0..=255u8).collect();
        let mut r = Trickle { data: &data, step: 5 };
        let mut out = Vec::new();
        let n = copy_bounded(&mut r, &mut out, 100, 16).unwrap();
        assert_eq!(n, 100);
        assert_eq!(out, &data[..100]);
    }

    #[test]
    fn copy_bounded_reports_early_eof() {
        let data = [1u8; 40];
        let mut r: &[u8] = &data;
        let mut out = Vec::new();
        let n = copy_bounded(&mut r, &mut out, 72, 7).unwrap();
        assert_eq!(n, 40);
    }

    #[test]
    fn copy_all_drains_reader() {
        let data = vec![9u8; 10_000];
        let mut r: &[u8] = &data;
        let mut out = Vec::new();
        assert_eq!(copy_all(&mut r, &mut out, 4096).unwrap(), 10_000);
        assert_eq!(out, data);
    }
}
