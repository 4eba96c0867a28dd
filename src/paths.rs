//! Display formatting for file paths in diagnostics
//!
//! Paths under the workspace root are shown relative to it, anything else is
//! shown as given. Resolution never fails.

use std::path::{Path, PathBuf};

/// Renders a path for human-readable messages
pub trait DisplayPathResolver: Send + Sync {
    fn resolve_for_display(&self, path: &Path) -> String;
}

/// Resolves absolute paths relative to a base directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelativeFilePathResolver {
    base_dir: Option<PathBuf>,
}

impl RelativeFilePathResolver {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    /// Resolver anchored at the process working directory
    ///
    /// Reads the working directory once. If it cannot be read, paths are
    /// rendered verbatim.
    pub fn from_current_dir() -> Self {
        match std::env::current_dir() {
            Ok(dir) => Self::new(dir),
            Err(e) => {
                tracing::debug!("Could not read current directory for path display: {}", e);
                Self::verbatim()
            }
        }
    }

    /// Resolver that renders every path unchanged
    pub fn verbatim() -> Self {
        Self { base_dir: None }
    }

    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }
}

impl DisplayPathResolver for RelativeFilePathResolver {
    fn resolve_for_display(&self, path: &Path) -> String {
        if let Some(base) = &self.base_dir {
            if path.is_absolute() {
                if let Ok(relative) = path.strip_prefix(base) {
                    if relative.as_os_str().is_empty() {
                        return ".".to_string();
                    }
                    return relative.display().to_string();
                }
            }
        }
        path.display().to_string()
    }
}
