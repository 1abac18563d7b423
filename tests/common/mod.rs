#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the ndepend-bridge binary.
#[macro_export]
macro_rules! ndepend_bridge {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("ndepend-bridge"))
    };
}

/// Creates a temporary directory with test fixtures for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    /// Creates a new test fixture with an empty temp directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Returns the path to the temp directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Creates the local `.ndepend-bridge.toml`.
    pub fn create_config(&self, content: &str) -> PathBuf {
        self.create_file(".ndepend-bridge.toml", content)
    }

    /// Command running inside the fixture, isolated from the user's own
    /// configuration directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = ndepend_bridge!();
        cmd.current_dir(self.path())
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join(".user-config"))
            .env_remove("RUST_LOG");
        cmd
    }

    /// Reads a file from the temp directory.
    pub fn read(&self, relative_path: &str) -> String {
        fs::read_to_string(self.path().join(relative_path)).expect("Failed to read file")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Path of a file under `tests/fixtures`.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(relative_path)
}

/// Catalog with two rules that fire in `report/valid.xml`.
pub const REPORT_CATALOG: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Rules>
  <Rule Key="ClassWithNoDescendantShouldBeSealedIfPossible" Priority="MAJOR" Category="design">
    <Name>Class with no descendant should be sealed if possible</Name>
    <Description><![CDATA[<p>Seal classes nobody derives from.</p>]]></Description>
  </Rule>
  <Rule Key="AvoidNamespacesWithFewTypes" Priority="MINOR">
    <Name>Avoid namespaces with few types</Name>
    <Description>Merge small namespaces.</Description>
  </Rule>
</Rules>
"#;
