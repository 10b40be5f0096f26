use std::path::Path;

use crate::error::{Error, Result};

pub fn create_dir_all<P: AsRef<Path>>(dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    std::fs::create_dir_all(dest_path).map_err(|source| Error::WriteError {
        path: dest_path.display().to_string(),
        source,
    })
}

/// Writes `content` to `dest_path`, creating parent directories if needed.
pub fn write_file<P: AsRef<Path>>(content: &str, dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    if let Some(parent) = dest_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir_all(parent)?;
    }
    std::fs::write(dest_path, content).map_err(|source| Error::WriteError {
        path: dest_path.display().to_string(),
        source,
    })
}

/// Reads a previously generated file; `None` if it does not exist.
pub fn read_existing<P: AsRef<Path>>(path: P) -> Result<Option<String>> {
    match std::fs::read_to_string(path.as_ref()) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        // Unreadable or binary targets are simply overwritten.
        Err(e) if e.kind() == std::io::ErrorKind::InvalidData => Ok(Some(String::new())),
        Err(e) => Err(Error::IoError(e)),
    }
}

pub fn read_from(mut reader: impl std::io::Read) -> Result<String> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf).map_err(Error::IoError)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_file_creates_parents() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("nested/dir/user_map.go");
        write_file("package user\n", &target).unwrap();
        assert_eq!(std::fs::read_to_string(target).unwrap(), "package user\n");
    }

    #[test]
    fn read_existing_missing_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(read_existing(tmp.path().join("absent.go")).unwrap(), None);
    }

    #[test]
    fn write_into_a_file_path_is_a_write_error() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let result = write_file("x", blocker.join("user_map.go"));
        assert!(matches!(result, Err(Error::WriteError { .. })));
    }

    #[test]
    fn read_from_reader() {
        assert_eq!(read_from("package p".as_bytes()).unwrap(), "package p");
    }
}
