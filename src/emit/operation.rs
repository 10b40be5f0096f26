use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmitOperation {
    Write { target: PathBuf, content: String, target_exists: bool },
    /// The target already holds exactly this content.
    Unchanged { target: PathBuf },
}

impl EmitOperation {
    pub fn target(&self) -> &PathBuf {
        match self {
            EmitOperation::Write { target, .. } | EmitOperation::Unchanged { target } => {
                target
            }
        }
    }

    /// Gets a message describing the operation.
    ///
    /// # Arguments
    /// * `dry_run` - Whether this is a dry run (no actual file operations)
    pub fn get_message(&self, dry_run: bool) -> String {
        let prefix = if dry_run { "[DRY RUN] " } else { "" };

        match self {
            EmitOperation::Write { target, target_exists, .. } => {
                if *target_exists {
                    format!("{}Writing to '{}' (overwriting existing file)", prefix, target.display())
                } else {
                    format!("{}Writing to '{}'", prefix, target.display())
                }
            }
            EmitOperation::Unchanged { target } => {
                format!("{}Skipping '{}' (already up to date)", prefix, target.display())
            }
        }
    }
}
