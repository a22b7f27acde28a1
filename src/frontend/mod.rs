// Copyright (c) 2025 Spawn
// This program and the accompanying materials are made available under the
// terms of the Eclipse Public License 2.0 which is available at
// https://www.eclipse.org/legal/epl-2.0/
// SPDX-License-Identifier: EPL-2.0

pub mod asset_packs;
pub mod assets;
pub mod cleaner;
pub mod manifest;
pub mod manifest_template;
pub mod root_project;
pub mod strings;

use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::error::{ExportWarning, Result};
use crate::parser::ExportConfig;
use crate::project::store_string_at_path;

/// Writes the manifest of the export: the merge manifest for custom builds,
/// the filled legacy template otherwise
pub fn export_manifest(config: &ExportConfig) -> Result<PathBuf> {
    let paths = config.paths();
    let plugins = config.plugin_names();

    if config.options.custom_build {
        task!("Generate merge manifest");
        manifest::write_merge_manifest(&paths, &config.preset, &config.project, &plugins, config.options.debug)?;
        Ok(paths.manifest_path(config.options.debug))
    } else {
        task!("Generate manifest");
        let path = paths.legacy_manifest_path();
        let text = manifest_template::render_legacy_manifest(&config.preset, &config.project, &plugins);
        store_string_at_path(&path, &text)?;
        Ok(path)
    }
}

/// Writes `godot_project_name_string.xml` for the default and every localized
/// `values-*` directory
pub fn export_project_names(config: &ExportConfig) -> Result<()> {
    task!("Write project name strings");

    let name = strings::project_name(&config.preset, &config.project);
    let written = strings::create_project_name_strings_files(&config.paths(), &config.project, &name)?;
    info!(" {} string resource(s) for {}", written.len(), name.green());

    Ok(())
}

/// Builds the asset pack modules listed in `asset-pack-config`, if any
pub fn export_asset_packs(config: &ExportConfig) -> Result<Vec<ExportWarning>> {
    let Some(config_file) = &config.options.asset_pack_config else {
        note!("No asset-pack-config set, skipping asset packs");
        return Ok(Vec::new());
    };

    task!("Create asset pack modules");

    let paths = config.paths();
    let report = asset_packs::handle_asset_packs(&paths, &paths.resolve(config_file))?;
    info!(" {} asset pack(s) registered", report.packs.len());

    Ok(report.warnings)
}

/// Full custom build preparation. Non fatal problems of every step are
/// returned together
pub fn export(config: &ExportConfig) -> Result<Vec<ExportWarning>> {
    export_manifest(config)?;

    if !config.options.custom_build {
        note!("custom-build is off, gradle project left untouched");
        return Ok(Vec::new());
    }

    export_project_names(config)?;
    export_asset_packs(config)
}

/// Copies an engine export into `android/build/assets`
pub fn stage(config: &ExportConfig, source_dir: &Path) -> Result<usize> {
    task!("Stage exported files from {}", source_dir.display());

    let staged = assets::stage_directory(&config.paths(), source_dir)?;
    info!(" {} file(s) staged", staged);
    Ok(staged)
}

pub fn clean(config: &ExportConfig) -> Result<Vec<PathBuf>> {
    task!("Clean gradle build directory");

    let removed = cleaner::delete_asset_folders(&config.paths())?;
    for path in &removed {
        info!(" {} {}", "removed".red(), path.display());
    }

    Ok(removed)
}
