//! The filesystem calls the config loader and settings depend on.

use std::path::{Path, PathBuf};

pub trait FileSystem {
    /// # Errors
    /// Returns an error if the file is missing or not valid UTF-8.
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    /// Used to check configured runner and project paths.
    fn exists(&self, path: &Path) -> bool;

    /// Directory searched for `.ndepend-bridge.toml`.
    ///
    /// # Errors
    /// Returns an error if the working directory is gone.
    fn current_dir(&self) -> std::io::Result<PathBuf>;

    /// Platform-specific configuration directory for ndepend-bridge
    /// (`~/.config/ndepend-bridge` on Linux).
    fn config_dir(&self) -> Option<PathBuf>;
}

/// Backed by `std::fs` and `directories`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn current_dir(&self) -> std::io::Result<PathBuf> {
        std::env::current_dir()
    }

    fn config_dir(&self) -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "ndepend-bridge")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }
}
