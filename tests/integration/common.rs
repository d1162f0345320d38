//! Common test utilities.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Locale fixtures shipped with the tests.
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

/// Root of the fixture locales (`en`, `ru`).
pub fn locales_dir() -> PathBuf {
    fixtures_dir().join("locales")
}

/// Isolated environment: empty user config home and working directory.
pub struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    /// Create a fresh environment.
    pub fn new() -> Self {
        Self { dir: TempDir::new().expect("Failed to create temp dir") }
    }

    /// Path inside the environment.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Write a config file and return its path.
    pub fn write_config(&self, contents: &str) -> PathBuf {
        let path = self.path("glossa.yaml");
        std::fs::write(&path, contents).expect("Failed to write config");
        path
    }

    /// A `glossa` command reading the fixture locales.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("glossa"));
        cmd.current_dir(self.dir.path())
            .env("XDG_CONFIG_HOME", self.path("config"))
            .env_remove("GLOSSA_CONFIG")
            .env_remove("GLOSSA_LOCALE")
            .env_remove("GLOSSA_DIRECTORY")
            .env_remove("RUST_LOG")
            .arg("--directory")
            .arg(locales_dir());
        cmd
    }
}
