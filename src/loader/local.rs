use crate::error::{Error, Result};
use crate::loader::interface::TemplateLoader;
use std::path::PathBuf;

/// Loader for templates given as a directory path.
pub struct LocalLoader<P: AsRef<std::path::Path>> {
    path: P,
}

impl<P: AsRef<std::path::Path>> LocalLoader<P> {
    /// Creates a new LocalLoader instance.
    pub fn new(path: P) -> Self {
        Self { path }
    }
}

impl<P: AsRef<std::path::Path>> TemplateLoader for LocalLoader<P> {
    fn load(&self) -> Result<PathBuf> {
        let path = self.path.as_ref();
        if !path.is_dir() {
            return Err(Error::TemplateNotFound {
                location: path.display().to_string(),
                reason: "not a directory".to_string(),
            });
        }
        Ok(path.to_path_buf())
    }
}
