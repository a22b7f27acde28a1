// Copyright (c) 2025 Spawn
// This program and the accompanying materials are made available under the
// terms of the Eclipse Public License 2.0 which is available at
// https://www.eclipse.org/legal/epl-2.0/
// SPDX-License-Identifier: EPL-2.0

pub mod asset_pack;
pub mod settings;

pub use asset_pack::AssetPackInfo;
pub use settings::{ExportPreset, ProjectSettings, Settings};

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use toml::Value;

use crate::error::{ExportError, Result};
use crate::project::ProjectPaths;

/// Everything an export run needs: options from `[export]`, the preset from
/// `[preset]` and project settings from `[project]`
#[derive(Debug, Default)]
pub struct ExportConfig {
    pub options: ExportOptions,
    pub preset: ExportPreset,
    pub project: ProjectSettings,

    /// Directory of the first config file, relative paths start here
    pub base_path: PathBuf,
}

/// The `[export]` table
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ExportOptions {
    // Project directory, relative to the first config file
    #[serde(default = "default_project_root")]
    pub project_root: PathBuf,

    // Selects src/debug or src/release for the merge manifest
    #[serde(default)]
    pub debug: bool,

    // res:// or project relative path of the asset pack config
    pub asset_pack_config: Option<String>,

    // Enabled plugin names, joined for the `plugins` meta-data
    #[serde(default)]
    pub plugins: Vec<String>,

    // Without a gradle project only the legacy manifest is produced
    #[serde(default = "default_custom_build")]
    pub custom_build: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            project_root: default_project_root(),
            debug: false,
            asset_pack_config: None,
            plugins: Vec::new(),
            custom_build: default_custom_build(),
        }
    }
}

fn default_project_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_custom_build() -> bool {
    true
}

/// Merged config as it comes out of toml, before flattening
#[derive(Debug, Deserialize, Default)]
struct RawConfig {
    #[serde(default)]
    export: ExportOptions,

    #[serde(default)]
    preset: toml::Table,

    #[serde(default)]
    project: toml::Table,
}

impl ExportConfig {
    /// Project layout with `project-root` resolved against the config location
    pub fn paths(&self) -> ProjectPaths {
        ProjectPaths::new(self.base_path.join(&self.options.project_root))
    }

    /// Comma separated plugin names for the `plugins` meta-data
    pub fn plugin_names(&self) -> String {
        self.options.plugins.join(",")
    }
}

/// Loads and merges the export config files. Several files can be given, keys
/// from later files override earlier ones
pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<ExportConfig> {
    let Some(first) = paths.first() else {
        return Ok(ExportConfig::default());
    };

    let base_path = first
        .as_ref()
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    let mut merged_value = Value::Table(toml::map::Map::new());

    for path in paths {
        let path_ref = path.as_ref();
        let content = fs::read_to_string(path_ref).map_err(|source| ExportError::ConfigNotFound {
            path: path_ref.to_path_buf(),
            source,
        })?;

        let value: Value = toml::from_str(&content)?;
        merge_toml_values(&mut merged_value, value);
    }

    let raw: RawConfig = merged_value.try_into()?;

    Ok(ExportConfig {
        options: raw.export,
        preset: Settings::from_table(&raw.preset),
        project: Settings::from_table(&raw.project),
        base_path,
    })
}

/// Tables are merged key by key, any other value is replaced
fn merge_toml_values(base: &mut Value, append: Value) {
    match (base, append) {
        (Value::Table(base_map), Value::Table(append_map)) => {
            for (k, v) in append_map {
                match base_map.get_mut(&k) {
                    Some(base_entry) => merge_toml_values(base_entry, v),
                    None => {
                        base_map.insert(k, v);
                    }
                }
            }
        }
        (base_val, append_val) => *base_val = append_val,
    }
}
