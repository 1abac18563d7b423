use std::path::{Path, PathBuf};

use crate::error::{NdependError, Result};

use super::{
    FileSystem, LoadResult, PROJECT_PATH_PROPERTY_KEY, RULE_RUNNER_PATH_PROPERTY_KEY,
    RealFileSystem,
};

/// Validated view over a loaded configuration.
///
/// Paths to external programs must be absolute and must exist; relative
/// `rules_path` and `work_dir` values resolve against the config file's
/// directory.
#[derive(Debug)]
pub struct NdependSettings<F: FileSystem = RealFileSystem> {
    loaded: LoadResult,
    fs: F,
}

impl NdependSettings<RealFileSystem> {
    #[must_use]
    pub const fn new(loaded: LoadResult) -> Self {
        Self {
            loaded,
            fs: RealFileSystem,
        }
    }
}

impl<F: FileSystem> NdependSettings<F> {
    #[must_use]
    pub const fn with_fs(loaded: LoadResult, fs: F) -> Self {
        Self { loaded, fs }
    }

    #[must_use]
    pub const fn config(&self) -> &super::Config {
        &self.loaded.config
    }

    /// Rule catalog XML, or an empty string when none is configured.
    ///
    /// # Errors
    /// Returns an error if `rules_path` is set but cannot be read.
    pub fn rules(&self) -> Result<String> {
        let config = &self.loaded.config;
        if let Some(xml) = &config.rules {
            return Ok(xml.clone());
        }

        let Some(rules_path) = &config.rules_path else {
            return Ok(String::new());
        };

        let path = self.resolve(rules_path);
        self.fs
            .read_to_string(&path)
            .map_err(|source| NdependError::FileRead { path, source })
    }

    /// File the catalog was read from, for error messages. Inline rules have
    /// none since their line numbers do not match the config file's.
    #[must_use]
    pub fn rules_origin(&self) -> Option<PathBuf> {
        let config = &self.loaded.config;
        if config.rules.is_some() {
            return None;
        }
        config.rules_path.as_deref().map(|p| self.resolve(p))
    }

    /// # Errors
    /// Returns an error unless the property names an existing absolute path.
    pub fn rule_runner_path(&self) -> Result<PathBuf> {
        self.check_absolute_path(
            RULE_RUNNER_PATH_PROPERTY_KEY,
            self.loaded.config.rule_runner_path.as_deref(),
        )
    }

    /// # Errors
    /// Returns an error unless the property names an existing absolute path.
    pub fn project_path(&self) -> Result<PathBuf> {
        self.check_absolute_path(
            PROJECT_PATH_PROPERTY_KEY,
            self.loaded.config.project_path.as_deref(),
        )
    }

    #[must_use]
    pub const fn timeout_minutes(&self) -> u64 {
        self.loaded.config.timeout_minutes
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.loaded.config.language
    }

    #[must_use]
    pub fn work_dir(&self) -> PathBuf {
        self.resolve(&self.loaded.config.work_dir)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            return path.to_path_buf();
        }
        let base = self
            .loaded
            .base_dir()
            .map(Path::to_path_buf)
            .or_else(|| self.fs.current_dir().ok())
            .unwrap_or_default();
        base.join(path)
    }

    fn check_absolute_path(&self, property: &str, value: Option<&str>) -> Result<PathBuf> {
        let Some(value) = value else {
            return Err(NdependError::Config(format!(
                "The property \"{property}\" must be set (to an absolute path)."
            )));
        };

        let path = PathBuf::from(value);
        if !path.is_absolute() {
            return Err(NdependError::Config(format!(
                "The path provided in the property \"{property}\" must be an absolute path: {value}"
            )));
        }
        if !self.fs.exists(&path) {
            return Err(NdependError::Config(format!(
                "The absolute path provided in the property \"{property}\" does not exist: {value}"
            )));
        }

        Ok(path)
    }
}
