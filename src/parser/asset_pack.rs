// Copyright (c) 2025 Spawn
// This program and the accompanying materials are made available under the
// terms of the Eclipse Public License 2.0 which is available at
// https://www.eclipse.org/legal/epl-2.0/
// SPDX-License-Identifier: EPL-2.0

use std::fmt;
use std::fs;
use std::path::{Component, Path};

use crate::error::{ExportError, Result};
use crate::project::GRADLE_PROJECT_ENTRIES;

/// Directories of the gradle project a pack module can't take the place of,
/// on top of the base project entries
const RESERVED_MODULE_NAMES: [&str; 3] = ["app", "assets", "build"];

/// When Play delivers an asset pack relative to the app install
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetPackDeliveryMode {
    InstallTime,
    FastFollow,
    OnDemand,
}

impl AssetPackDeliveryMode {
    pub fn from_digit(s: &str) -> Option<Self> {
        match s {
            "0" => Some(Self::InstallTime),
            "1" => Some(Self::FastFollow),
            "2" => Some(Self::OnDemand),
            _ => None,
        }
    }

    /// Value of `dynamicDelivery.deliveryType` in the pack's build.gradle
    pub fn delivery_type(&self) -> &'static str {
        match self {
            Self::InstallTime => "install-time",
            Self::FastFollow => "fast-follow",
            Self::OnDemand => "on-demand",
        }
    }
}

impl fmt::Display for AssetPackDeliveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.delivery_type())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPackInfo {
    /// Directory of the pack's assets, relative to the project root
    pub file_path: String,
    pub delivery_mode: AssetPackDeliveryMode,
    /// Gradle module name of the pack
    pub name: String,
}

/// Reads the asset pack config file. A file that can't be opened is
/// `ConfigNotFound`, anything off the three line grammar is `MalformedConfig`
pub fn read_asset_pack_config(path: &Path) -> Result<Vec<AssetPackInfo>> {
    let content = fs::read_to_string(path).map_err(|source| ExportError::ConfigNotFound {
        path: path.to_path_buf(),
        source,
    })?;

    parse_asset_pack_config(&content)
}

/// Each record is three lines: path, delivery mode digit, module name
pub fn parse_asset_pack_config(content: &str) -> Result<Vec<AssetPackInfo>> {
    let mut lines: Vec<&str> = content.lines().collect();

    // Blank lines at the very end are editor noise, not a record
    while lines.last().map_or(false, |l| l.trim().is_empty()) {
        lines.pop();
    }

    let mut packs = Vec::with_capacity(lines.len() / 3);

    for (index, record) in lines.chunks(3).enumerate() {
        let first_line = index * 3 + 1;

        if record.len() < 3 {
            return Err(ExportError::MalformedConfig {
                line: first_line + record.len(),
                reason: "incomplete record, expected path, delivery mode and name".to_string(),
            });
        }

        let file_path = record[0].trim();
        validate_pack_path(file_path).map_err(|reason| ExportError::MalformedConfig {
            line: first_line,
            reason,
        })?;

        let mode = record[1].trim();
        let delivery_mode =
            AssetPackDeliveryMode::from_digit(mode).ok_or_else(|| ExportError::MalformedConfig {
                line: first_line + 1,
                reason: format!("delivery mode must be 0, 1 or 2, got '{}'", mode),
            })?;

        let name = record[2].trim();
        validate_module_name(name).map_err(|reason| ExportError::MalformedConfig {
            line: first_line + 2,
            reason,
        })?;

        packs.push(AssetPackInfo {
            file_path: file_path.to_string(),
            delivery_mode,
            name: name.to_string(),
        });
    }

    Ok(packs)
}

/// The pack path is joined onto the project root and the gradle assets
/// directory, it has to stay below both
fn validate_pack_path(file_path: &str) -> std::result::Result<(), String> {
    if file_path.is_empty() {
        return Err("empty asset pack path".to_string());
    }

    for component in Path::new(file_path).components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => {
                return Err(format!("asset pack path '{}' can't contain '..'", file_path));
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(format!("asset pack path '{}' must be relative to the project", file_path));
            }
        }
    }

    Ok(())
}

/// The name ends up as a directory and in `include ':name'`, so only
/// characters gradle accepts in a project path are allowed
fn validate_module_name(name: &str) -> std::result::Result<(), String> {
    if name.is_empty() {
        return Err("empty asset pack name".to_string());
    }

    if GRADLE_PROJECT_ENTRIES.contains(&name) || RESERVED_MODULE_NAMES.contains(&name) {
        return Err(format!("asset pack name '{}' is taken by the gradle project", name));
    }

    if name.starts_with('.') {
        return Err(format!("asset pack name '{}' can't start with '.'", name));
    }

    if let Some(c) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')))
    {
        return Err(format!("asset pack name '{}' contains '{}'", name, c));
    }

    Ok(())
}
