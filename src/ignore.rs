use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;

use crate::error::Result;

/// Builds the set of template file patterns to skip. Patterns match file
/// names inside the template directory, e.g. `*_test.go`.
pub fn parse_ignore_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        debug!("Adding ignore pattern: {} to globset", pattern.as_ref());
        builder.add(Glob::new(pattern.as_ref())?);
    }
    Ok(builder.build()?)
}
