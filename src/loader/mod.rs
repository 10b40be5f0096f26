use crate::constants::TEMPLATE_EXTENSION;
use crate::error::{Error, Result};
use crate::ignore::parse_ignore_patterns;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub mod gopath;
pub mod interface;
pub mod local;

pub use gopath::GoPathLoader;
pub use interface::TemplateLoader;
pub use local::LocalLoader;

#[derive(Debug)]
pub enum TemplateSource {
    /// Template directory on the local filesystem
    FileSystem(PathBuf),
    /// Import path resolved under `$GOPATH/src`
    GoPath(String),
}

impl std::fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateSource::FileSystem(path) => {
                write!(f, "local path: '{}'", path.display())
            }
            TemplateSource::GoPath(import_path) => write!(f, "import path: '{import_path}'"),
        }
    }
}

impl TemplateSource {
    /// An existing directory is used as is; anything else is an import path.
    pub fn from_location(location: &str) -> Self {
        let path = PathBuf::from(location);
        if path.is_dir() {
            TemplateSource::FileSystem(path)
        } else {
            TemplateSource::GoPath(location.to_string())
        }
    }
}

/// Resolves a template location to its directory.
///
/// # Arguments
/// * `location` - Directory path or Go import path
///
/// # Returns
/// * `Result<PathBuf>` - Path to the template directory
pub fn get_template(location: &str) -> Result<PathBuf> {
    let source = TemplateSource::from_location(location);
    log::debug!("Loading template from {source}");
    match source {
        TemplateSource::FileSystem(path) => LocalLoader::new(path).load(),
        TemplateSource::GoPath(import_path) => GoPathLoader::from_env(import_path).load(),
    }
}

/// Go source files directly inside `template_dir`, sorted by name, minus
/// those matching `ignore`.
pub fn template_files<S: AsRef<str>>(template_dir: &Path, ignore: &[S]) -> Result<Vec<PathBuf>> {
    let ignore = parse_ignore_patterns(ignore)?;
    let mut files = Vec::new();
    for entry in WalkDir::new(template_dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::IoError(e.into()))?;
        let path = entry.path();
        let is_source = entry.file_type().is_file()
            && path.extension().is_some_and(|ext| ext == TEMPLATE_EXTENSION);
        if !is_source {
            continue;
        }
        if ignore.is_match(entry.file_name()) {
            log::debug!("Ignoring '{}' (matches ignore pattern)", path.display());
            continue;
        }
        files.push(path.to_path_buf());
    }
    Ok(files)
}
