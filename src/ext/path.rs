use std::path::Path;

use crate::error::{Error, Result};

/// Extension trait for Path to provide checked string conversions
pub trait PathExt {
    /// Converts a path to a string slice, returning an error if the path contains invalid Unicode characters.
    ///
    /// # Examples
    /// ```
    /// use typegen::ext::PathExt;
    /// use std::path::Path;
    ///
    /// let path = Path::new("iterator");
    /// assert_eq!(path.to_str_checked().unwrap(), "iterator");
    /// ```
    fn to_str_checked(&self) -> Result<&str>;

    /// Final component of the path as a string slice.
    ///
    /// # Examples
    /// ```
    /// use typegen::ext::PathExt;
    /// use std::path::Path;
    ///
    /// assert_eq!(Path::new("templates/iterator/map.go").base_name().unwrap(), "map.go");
    /// ```
    fn base_name(&self) -> Result<&str>;
}

impl PathExt for Path {
    fn to_str_checked(&self) -> Result<&str> {
        self.to_str().ok_or_else(|| {
            Error::Other(anyhow::anyhow!(
                "Path '{}' contains invalid Unicode characters",
                self.display()
            ))
        })
    }

    fn base_name(&self) -> Result<&str> {
        let name = self.file_name().ok_or_else(|| {
            Error::Other(anyhow::anyhow!("Path '{}' has no file name", self.display()))
        })?;
        Path::new(name).to_str_checked()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_str_checked_valid() {
        let path = Path::new("valid_path");
        assert_eq!(path.to_str_checked().unwrap(), "valid_path");
    }

    #[test]
    fn test_base_name() {
        assert_eq!(Path::new("/tpl/iterator/map.go").base_name().unwrap(), "map.go");
        assert_eq!(Path::new("map.go").base_name().unwrap(), "map.go");
        assert!(Path::new("/").base_name().is_err());
    }
}
