// Copyright (c) 2025 Spawn
// This program and the accompanying materials are made available under the
// terms of the Eclipse Public License 2.0 which is available at
// https://www.eclipse.org/legal/epl-2.0/
// SPDX-License-Identifier: EPL-2.0

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ExportError, Result};

const RES_PREFIX: &str = "res://";

/// Entries of the base gradle project. Anything else in `android/build` was
/// produced by a previous export
pub const GRADLE_PROJECT_ENTRIES: [&str; 12] = [
    "res",
    "AndroidManifest.xml",
    "config.gradle",
    "libs",
    "gradle",
    "gradlew",
    ".gdignore",
    "build.gradle",
    "gradle.properties",
    "gradlew.bat",
    "settings.gradle",
    "src",
];

/// Locations inside the project tree. Everything the exporter touches lives
/// under `root`, the gradle project itself under `root/android/build`
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    pub root: PathBuf,
}

impl ProjectPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Maps `res://a/b` to `<root>/a/b`. Relative paths are taken from the
    /// root too, absolute ones are returned as they are
    pub fn resolve(&self, path: &str) -> PathBuf {
        match path.strip_prefix(RES_PREFIX) {
            Some(rest) => self.root.join(rest),
            None => {
                let p = Path::new(path);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    self.root.join(p)
                }
            }
        }
    }

    /// The gradle project, `android/build`
    pub fn build_dir(&self) -> PathBuf {
        self.root.join("android").join("build")
    }

    /// Where the engine export drops its files before asset packs are split out
    pub fn assets_dir(&self) -> PathBuf {
        self.build_dir().join("assets")
    }

    pub fn res_dir(&self) -> PathBuf {
        self.build_dir().join("res")
    }

    /// Gradle module of the asset pack `name`
    pub fn module_dir(&self, name: &str) -> PathBuf {
        self.build_dir().join(name)
    }

    pub fn module_assets_dir(&self, name: &str) -> PathBuf {
        self.module_dir(name).join("src").join("main").join("assets")
    }

    /// Manifest written for exports without a gradle project
    pub fn legacy_manifest_path(&self) -> PathBuf {
        self.root.join("android").join("AndroidManifest.xml")
    }

    /// Merge manifest of the debug or release variant
    pub fn manifest_path(&self, debug: bool) -> PathBuf {
        let variant = if debug { "debug" } else { "release" };
        self.build_dir().join("src").join(variant).join("AndroidManifest.xml")
    }
}

/// Creates the directory with all parents. Does nothing when it already exists
pub fn create_directory(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        return Ok(());
    }

    fs::create_dir_all(dir).map_err(|source| ExportError::Create {
        path: dir.to_path_buf(),
        source,
    })
}

/// Writes `data` to `path`, creating parent directories. An existing file is
/// overwritten
pub fn store_file_at_path(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(dir) = path.parent() {
        create_directory(dir)?;
    }

    fs::write(path, data).map_err(|source| ExportError::Create {
        path: path.to_path_buf(),
        source,
    })
}

pub fn store_string_at_path(path: &Path, data: &str) -> Result<()> {
    store_file_at_path(path, data.as_bytes())
}
