use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Read until `buf` is full or the reader reports EOF.
///
/// Returns the number of bytes read plus the error that stopped the read, if
/// any. Bytes read before an error are still reported.
pub fn read_up_to<R: Read + ?Sized>(r: &mut R, buf: &mut [u8]) -> (usize, Option<io::Error>) {
    let mut off = 0;
    while off < buf.len() {
        match r.read(&mut buf[off..]) {
            Ok(0) => break,
            Ok(n) => off += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return (off, Some(e)),
        }
    }
    (off, None)
}

/// Absolute, symlink-free form of `path` (the origin must exist).
pub fn resolve_origin_path(path: &str) -> io::Result<PathBuf> {
    if path.trim().is_empty() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "empty path"));
    }
    fs::canonicalize(Path::new(path))
}
