//! File I/O utilities with atomic writes
//!
//! The settings, status and patterns files are shared by several processes.
//! Writes replace the whole file with a rename so readers only ever see the
//! previous or the new content, never a partial one.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::MinarcaError;

/// Read a file as bytes, returning `None` if it doesn't exist
pub fn read_bytes<P: AsRef<Path>>(path: P) -> Result<Option<Vec<u8>>, MinarcaError> {
    let path = path.as_ref();
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(MinarcaError::Storage(format!(
            "Failed to read {}: {}",
            path.display(),
            e
        ))),
    }
}

/// Read a Latin-1 encoded file, returning `None` if it doesn't exist
///
/// Every byte maps to the code point of the same value, so decoding never fails.
pub fn read_latin1<P: AsRef<Path>>(path: P) -> Result<Option<String>, MinarcaError> {
    Ok(read_bytes(path)?.map(|bytes| bytes.into_iter().map(char::from).collect()))
}

/// Read a UTF-8 encoded file, returning `None` if it doesn't exist
pub fn read_utf8<P: AsRef<Path>>(path: P) -> Result<Option<String>, MinarcaError> {
    let path = path.as_ref();
    match read_bytes(path)? {
        Some(bytes) => String::from_utf8(bytes).map(Some).map_err(|e| {
            MinarcaError::Storage(format!("{} is not valid UTF-8: {}", path.display(), e))
        }),
        None => Ok(None),
    }
}

/// Encode text as Latin-1
///
/// Fails on characters above U+00FF; callers escape those beforehand.
pub fn encode_latin1(text: &str) -> Result<Vec<u8>, MinarcaError> {
    text.chars()
        .map(|c| {
            u8::try_from(u32::from(c)).map_err(|_| {
                MinarcaError::Storage(format!("Character {:?} cannot be encoded as Latin-1", c))
            })
        })
        .collect()
}

/// Write bytes to a file atomically (write to temp, then rename)
///
/// The temporary file is created in the destination directory so the final
/// rename never crosses filesystems.
pub fn write_atomic<P: AsRef<Path>>(path: P, contents: &[u8]) -> Result<(), MinarcaError> {
    let path = path.as_ref();

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| {
        MinarcaError::Storage(format!(
            "Failed to create directory {}: {}",
            parent.display(),
            e
        ))
    })?;

    let mut temp = NamedTempFile::new_in(parent)
        .map_err(|e| MinarcaError::Storage(format!("Failed to create temp file: {}", e)))?;

    temp.write_all(contents)
        .map_err(|e| MinarcaError::Storage(format!("Failed to write data: {}", e)))?;

    temp.flush()
        .map_err(|e| MinarcaError::Storage(format!("Failed to flush data: {}", e)))?;

    // Sync to disk before rename
    temp.as_file()
        .sync_all()
        .map_err(|e| MinarcaError::Storage(format!("Failed to sync data: {}", e)))?;

    // The temp file is removed on drop if persisting fails
    temp.persist(path).map_err(|e| {
        MinarcaError::Storage(format!(
            "Failed to replace {}: {}",
            path.display(),
            e.error
        ))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_nonexistent_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nonexistent");

        assert!(read_bytes(&path).unwrap().is_none());
        assert!(read_latin1(&path).unwrap().is_none());
        assert!(read_utf8(&path).unwrap().is_none());
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.properties");

        write_atomic(&path, b"username=test\n").unwrap();
        assert_eq!(read_utf8(&path).unwrap().unwrap(), "username=test\n");
    }

    #[test]
    fn test_atomic_write_replaces_and_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("status.properties");

        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"second");
        let entries: Vec<_> = fs::read_dir(temp_dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("patterns");

        write_atomic(&path, b"+/home\n").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_latin1_decoding() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("latin1");
        fs::write(&path, [b'c', b'a', b'f', 0xE9]).unwrap();

        assert_eq!(read_latin1(&path).unwrap().unwrap(), "café");
        assert!(read_utf8(&path).is_err());
    }

    #[test]
    fn test_encode_latin1() {
        assert_eq!(encode_latin1("café").unwrap(), vec![b'c', b'a', b'f', 0xE9]);
        assert!(encode_latin1("€").is_err());
    }
}
