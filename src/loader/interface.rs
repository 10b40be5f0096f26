use crate::error::Result;
use std::path::PathBuf;

/// Trait for locating template packages.
pub trait TemplateLoader {
    /// Resolves the template to a readable directory.
    ///
    /// # Returns
    /// * `Result<PathBuf>` - Path to the template directory
    fn load(&self) -> Result<PathBuf>;
}
