mod filesystem;
mod loader;
mod model;
mod settings;

pub use filesystem::{FileSystem, RealFileSystem};
pub use loader::{ConfigLoader, FileConfigLoader, LOCAL_CONFIG_NAME, LoadResult};
pub use model::{
    Config, DEFAULT_TIMEOUT_MINUTES, PROJECT_PATH_PROPERTY_KEY, RULE_RUNNER_PATH_PROPERTY_KEY,
    RULES_PATH_PROPERTY_KEY, RULES_PROPERTY_KEY, TIMEOUT_PROPERTY_KEY,
};
pub use settings::NdependSettings;

#[cfg(test)]
#[path = "mock_fs.rs"]
mod mock_fs;
