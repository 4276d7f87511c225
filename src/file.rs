use crate::error::{FobError, Result};
use std::io::ErrorKind;
use std::path::Path;

/// Load the whole file at `path` into memory
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    match std::fs::read(path) {
        Ok(data) => Ok(data),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(FobError::NotFound(path.to_path_buf())),
        Err(e) => Err(FobError::Io(e)),
    }
}

/// Overwrite `path` with `data`, creating it if needed
pub fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    std::fs::write(path, data)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.bin");
        match read_file(&missing) {
            Err(FobError::NotFound(path)) => assert_eq!(path, missing),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_read_directory_is_io_error() {
        let dir = tempdir().unwrap();
        assert!(matches!(read_file(dir.path()), Err(FobError::Io(_))));
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.bin");
        write_file(&path, b"abc").unwrap();
        assert_eq!(read_file(&path).unwrap(), b"abc");

        // Full overwrite, no trailing bytes from the longer file
        write_file(&path, b"z").unwrap();
        assert_eq!(read_file(&path).unwrap(), b"z");
    }

    #[test]
    fn test_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.bin");
        write_file(&path, &[]).unwrap();
        assert!(read_file(&path).unwrap().is_empty());
    }
}
