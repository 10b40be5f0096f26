use crate::constants::env;
use crate::error::{Error, Result};
use crate::loader::interface::TemplateLoader;
use std::path::{Path, PathBuf};

/// Loader for templates given as an import path under `$GOPATH/src`.
pub struct GoPathLoader<S: AsRef<str>> {
    import_path: S,
    gopath: Option<PathBuf>,
}

impl<S: AsRef<str>> GoPathLoader<S> {
    pub fn new(import_path: S, gopath: Option<PathBuf>) -> Self {
        Self { import_path, gopath }
    }

    /// Resolves the Go path from the environment.
    pub fn from_env(import_path: S) -> Self {
        Self::new(import_path, gopath_from_env())
    }
}

impl<S: AsRef<str>> TemplateLoader for GoPathLoader<S> {
    fn load(&self) -> Result<PathBuf> {
        let import_path = self.import_path.as_ref();
        let not_found = |reason: String| Error::TemplateNotFound {
            location: import_path.to_string(),
            reason,
        };

        let gopath = self.gopath.as_ref().ok_or_else(|| not_found("GOPATH not set".into()))?;
        let path = gopath.join(env::SOURCE_DIR).join(import_path);
        log::debug!("Resolved '{import_path}' to {}", path.display());
        if !path.is_dir() {
            return Err(not_found(format!("'{}' does not exist", path.display())));
        }
        Ok(path)
    }
}

/// `$GOPATH` (its first entry), or `$HOME/go` unless that is `$GOROOT`.
pub fn gopath_from_env() -> Option<PathBuf> {
    let configured = std::env::var_os(env::GOPATH)
        .and_then(|value| std::env::split_paths(&value).find(|p| !p.as_os_str().is_empty()));
    if configured.is_some() {
        return configured;
    }
    let goroot = std::env::var_os(env::GOROOT).map(PathBuf::from);
    default_gopath(home_dir().as_deref(), goroot.as_deref())
}

fn home_dir() -> Option<PathBuf> {
    let var = if cfg!(windows) {
        "USERPROFILE"
    } else if cfg!(target_os = "plan9") {
        "home"
    } else {
        "HOME"
    };
    std::env::var_os(var).filter(|v| !v.is_empty()).map(PathBuf::from)
}

/// Default Go path under `home`; never the Go root itself.
fn default_gopath(home: Option<&Path>, goroot: Option<&Path>) -> Option<PathBuf> {
    let candidate = home?.join(env::DEFAULT_GOPATH_DIR);
    if goroot.is_some_and(|root| root == candidate) {
        return None;
    }
    Some(candidate)
}
