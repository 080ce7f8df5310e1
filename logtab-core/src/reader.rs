/// Incremental file reads — pick up where the last tick left off.
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadError {
    /// The file vanished between the scan and the read. Expected under
    /// polling; the next tick's scan evicts the file.
    #[error("file vanished before read: {0}")]
    Vanished(String),
    #[error("read failed for {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Bytes appended since the stored offset, plus the offset to store for
/// the next tick.
#[derive(Debug)]
pub struct ReadOutcome {
    pub fragment: String,
    pub offset: u64,
    /// True when the file was shorter than the stored offset and was
    /// re-read from the start (truncation or rotation).
    pub truncated: bool,
}

/// Read everything from `offset` to end-of-file.
///
/// Zero new bytes yields an empty fragment and the unchanged offset. A
/// file shorter than `offset` is treated as truncated: the stored
/// position is discarded and the whole file comes back as one fragment.
///
/// A trailing incomplete UTF-8 sequence (a multi-byte character whose
/// writer got cut off mid-character, or whose tail lands in the next
/// tick) is held back: the offset stops before it and the bytes are
/// delivered whole once complete. Invalid UTF-8 elsewhere is replaced
/// rather than failing the tick.
pub fn read_new(path: &Path, name: &str, offset: u64) -> Result<ReadOutcome, ReadError> {
    let io_err = |source| ReadError::Io {
        name: name.to_string(),
        source,
    };

    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ReadError::Vanished(name.to_string()));
        }
        Err(e) => return Err(io_err(e)),
    };

    let len = file.metadata().map_err(io_err)?.len();
    let (start, truncated) = if len < offset { (0, true) } else { (offset, false) };

    file.seek(SeekFrom::Start(start)).map_err(io_err)?;
    let mut buf = Vec::new();
    file.read_to_end(&mut buf).map_err(io_err)?;

    let fragment = match std::str::from_utf8(&buf) {
        Ok(s) => s.to_string(),
        // error_len() of None means the only problem is an incomplete
        // sequence at the very end; hold those bytes for the next tick.
        Err(e) if e.error_len().is_none() => {
            buf.truncate(e.valid_up_to());
            String::from_utf8_lossy(&buf).into_owned()
        }
        Err(_) => String::from_utf8_lossy(&buf).into_owned(),
    };

    Ok(ReadOutcome {
        offset: start + buf.len() as u64,
        fragment,
        truncated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn reads_from_stored_offset() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.log");
        fs::write(&path, "line1\nline2\n").unwrap();

        let first = read_new(&path, "a.log", 0).unwrap();
        assert_eq!(first.fragment, "line1\nline2\n");
        assert_eq!(first.offset, 12);

        let second = read_new(&path, "a.log", first.offset).unwrap();
        assert!(second.fragment.is_empty());
        assert_eq!(second.offset, 12);

        fs::write(&path, "line1\nline2\nline3\n").unwrap();
        let third = read_new(&path, "a.log", second.offset).unwrap();
        assert_eq!(third.fragment, "line3\n");
        assert_eq!(third.offset, 18);
    }

    #[test]
    fn missing_file_is_vanished() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gone.log");
        match read_new(&path, "gone.log", 7) {
            Err(ReadError::Vanished(name)) => assert_eq!(name, "gone.log"),
            other => panic!("expected Vanished, got {other:?}"),
        }
    }

    #[test]
    fn split_multibyte_char_is_held_until_complete() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.log");

        // "café" with the 'é' (0xc3 0xa9) cut after its first byte.
        fs::write(&path, b"caf\xc3").unwrap();
        let first = read_new(&path, "a.log", 0).unwrap();
        assert_eq!(first.fragment, "caf");
        assert_eq!(first.offset, 3);

        fs::write(&path, "café au lait\n".as_bytes()).unwrap();
        let second = read_new(&path, "a.log", first.offset).unwrap();
        assert_eq!(second.fragment, "é au lait\n");
    }

    #[test]
    fn invalid_utf8_mid_fragment_is_replaced() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.log");
        fs::write(&path, b"ok \xff ok\n").unwrap();

        let outcome = read_new(&path, "a.log", 0).unwrap();
        assert_eq!(outcome.fragment, "ok \u{fffd} ok\n");
        assert_eq!(outcome.offset, 8);
    }

    #[test]
    fn shrunken_file_rereads_from_start() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.log");
        fs::write(&path, "a fairly long first version\n").unwrap();
        let first = read_new(&path, "a.log", 0).unwrap();

        fs::write(&path, "short\n").unwrap();
        let second = read_new(&path, "a.log", first.offset).unwrap();
        assert!(second.truncated);
        assert_eq!(second.fragment, "short\n");
        assert_eq!(second.offset, 6);
    }
}
