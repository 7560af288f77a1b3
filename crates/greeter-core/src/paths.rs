//! Where the plain and encrypted documents are written.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

pub const PLAIN_FILE_NAME: &str = "config.toml";
pub const CONTAINER_FILE_NAME: &str = "config.enc";

/// Plain-document and encrypted-container locations, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoragePaths {
    plain: PathBuf,
    container: PathBuf,
    #[serde(skip)]
    create_directory: bool,
}

impl StoragePaths {
    /// Both documents inside `directory`, which must already exist.
    pub fn in_directory(directory: impl AsRef<Path>) -> Self {
        let directory = directory.as_ref();
        Self {
            plain: directory.join(PLAIN_FILE_NAME),
            container: directory.join(CONTAINER_FILE_NAME),
            create_directory: false,
        }
    }

    /// Both documents inside `directory`, creating it on first write.
    pub fn in_managed_directory(directory: impl AsRef<Path>) -> Self {
        Self {
            create_directory: true,
            ..Self::in_directory(directory)
        }
    }

    /// Whether writes create the directory when it is missing.
    pub fn creates_directory(&self) -> bool {
        self.create_directory
    }

    /// Create the parent of `path` if this is a managed location.
    pub(crate) fn prepare(&self, path: &Path) -> io::Result<()> {
        match path.parent() {
            Some(parent) if self.create_directory && !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent)
            }
            _ => Ok(()),
        }
    }

    pub fn plain(&self) -> &Path {
        &self.plain
    }

    pub fn container(&self) -> &Path {
        &self.container
    }
}

impl Default for StoragePaths {
    /// Both documents inside [`default_directory`], created on first write.
    fn default() -> Self {
        Self::in_managed_directory(default_directory())
    }
}

/// Per-user data directory: `$XDG_DATA_HOME/greeter`, else
/// `$HOME/.local/share/greeter`, else the current directory.
pub fn default_directory() -> PathBuf {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return PathBuf::from(value).join("greeter");
        }
    }
    match std::env::var("HOME") {
        Ok(home) if !home.trim().is_empty() => PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("greeter"),
        _ => {
            tracing::warn!("HOME is not set; storing documents in the current directory");
            PathBuf::from(".")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_directory_joins_both() {
        let paths = StoragePaths::in_directory("/srv/greeter");
        assert_eq!(paths.plain(), Path::new("/srv/greeter/config.toml"));
        assert_eq!(paths.container(), Path::new("/srv/greeter/config.enc"));
        assert!(!paths.creates_directory());
    }

    #[test]
    fn test_managed_directory_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let paths = StoragePaths::in_managed_directory(&nested);

        paths.prepare(paths.plain()).unwrap();

        assert!(nested.is_dir());
    }

    #[test]
    fn test_caller_directory_is_not_created() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let paths = StoragePaths::in_directory(&missing);

        paths.prepare(paths.plain()).unwrap();

        assert!(!missing.exists());
    }

    #[test]
    fn test_default_uses_fixed_file_names() {
        let paths = StoragePaths::default();
        assert_eq!(paths.plain().file_name().unwrap(), PLAIN_FILE_NAME);
        assert_eq!(paths.container().file_name().unwrap(), CONTAINER_FILE_NAME);
        assert_eq!(paths.plain().parent(), paths.container().parent());
        assert!(paths.creates_directory());
    }
}
