//! Byte-oriented line reading shared by both input formats.
//!
//! Lines are handed out as raw bytes so that non UTF-8 content passes through
//! untouched.

use crate::error::{Error, Result};

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Drop one trailing `\n`, then one trailing `\r`.
pub fn strip_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Call `f(lno, line)` for every line, `lno` starting at 1.
///
/// Read failures are reported as `FileAccess` on `path`.
pub fn for_each_line<R, F>(mut reader: R, path: &Path, mut f: F) -> Result<()>
where
    R: BufRead,
    F: FnMut(usize, &[u8]) -> Result<()>,
{
    let mut buf = Vec::new();
    let mut lno = 0;
    loop {
        buf.clear();
        let n = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| Error::file_access(path, e))?;
        if n == 0 {
            return Ok(());
        }
        lno += 1;
        f(lno, strip_terminator(&buf))?;
    }
}

/// Build a path from raw line bytes, without any decoding on unix.
#[cfg(unix)]
pub fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    use std::os::unix::ffi::OsStrExt;
    PathBuf::from(std::ffi::OsStr::from_bytes(bytes))
}

#[cfg(not(unix))]
pub fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
}

/// Write `path` followed by `\n`, byte for byte on unix.
pub fn write_path_line<W: Write>(writer: &mut W, path: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::ffi::OsStrExt;
        writer.write_all(path.as_os_str().as_bytes())?;
    }
    #[cfg(not(unix))]
    write!(writer, "{}", path.display())?;
    writer.write_all(b"\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn collect(input: &[u8]) -> Vec<(usize, Vec<u8>)> {
        let mut out = Vec::new();
        for_each_line(input, Path::new("in.txt"), |lno, line| {
            out.push((lno, line.to_vec()));
            Ok(())
        })
        .unwrap();
        out
    }

    #[test]
    fn terminators() {
        assert_eq!(strip_terminator(b"abc\r\n"), b"abc");
        assert_eq!(strip_terminator(b"abc\n"), b"abc");
        assert_eq!(strip_terminator(b"abc"), b"abc");
        assert_eq!(strip_terminator(b"\n"), b"");
    }

    #[test]
    fn keeps_raw_bytes_and_last_unterminated_line() {
        assert_eq!(
            collect(b"GPS \xe9\n\nlast"),
            vec![
                (1, b"GPS \xe9".to_vec()),
                (2, b"".to_vec()),
                (3, b"last".to_vec()),
            ]
        );
        assert!(collect(b"").is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn paths_keep_raw_bytes() {
        let path = path_from_bytes(b"/data/\xe9.11o");
        let mut out = Vec::new();
        write_path_line(&mut out, &path).unwrap();
        assert_eq!(out, b"/data/\xe9.11o\n".to_vec());
    }
}
