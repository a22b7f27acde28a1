// Copyright (c) 2025 Spawn
// This program and the accompanying materials are made available under the
// terms of the Eclipse Public License 2.0 which is available at
// https://www.eclipse.org/legal/epl-2.0/
// SPDX-License-Identifier: EPL-2.0

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{ExportError, ExportWarning, Result};
use crate::frontend::root_project::update_root_project_with_asset_pack_info;
use crate::parser::asset_pack::read_asset_pack_config;
use crate::parser::AssetPackInfo;
use crate::project::{create_directory, store_string_at_path, ProjectPaths};

const PACK_FILE_EXTENSIONS: [&str; 2] = ["pck", "zip"];

/// Outcome of `handle_asset_packs`
#[derive(Debug, Default)]
pub struct AssetPackReport {
    /// Packs registered in the root project, in config order
    pub packs: Vec<AssetPackInfo>,

    /// Every non fatal problem of all packs
    pub warnings: Vec<ExportWarning>,
}

/// build.gradle of a pack module. The android asset-pack plugin reads the
/// pack name and delivery type from it
pub fn asset_pack_build_gradle(info: &AssetPackInfo) -> String {
    let mut gradle = String::new();

    gradle.push_str("apply plugin: 'com.android.asset-pack'\n\n");
    gradle.push_str("assetPack {\n");
    gradle.push_str(&format!("    packName = \"{}\"\n", info.name));
    gradle.push_str("    dynamicDelivery {\n");
    gradle.push_str(&format!("        deliveryType = \"{}\"\n", info.delivery_mode.delivery_type()));
    gradle.push_str("    }\n");
    gradle.push_str("}\n");

    gradle
}

/// Wraps a failed move or copy into a warning
fn rename_warning(from: &Path, to: &Path, source: std::io::Error) -> ExportWarning {
    ExportWarning::Relocation(ExportError::CopyOrRename {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })
}

/// Moves the exported assets of the pack from `android/build/assets/<path>`
/// into the module. When the module already has an assets directory the
/// entries are moved one by one
fn relocate_exported_assets(paths: &ProjectPaths, info: &AssetPackInfo, warnings: &mut Vec<ExportWarning>) {
    let from = paths.assets_dir().join(&info.file_path);
    let to = paths.module_assets_dir(&info.name);

    if !from.is_dir() {
        warnings.push(ExportWarning::MissingDirectory(from));
        return;
    }

    if let Some(parent) = to.parent() {
        if let Err(e) = create_directory(parent) {
            warnings.push(ExportWarning::Relocation(e));
            return;
        }
    }

    if !to.exists() {
        if let Err(e) = fs::rename(&from, &to) {
            warnings.push(rename_warning(&from, &to, e));
        }
        return;
    }

    let entries = match fs::read_dir(&from) {
        Ok(entries) => entries,
        Err(e) => {
            warnings.push(rename_warning(&from, &to, e));
            return;
        }
    };

    for entry in entries {
        match entry {
            Ok(entry) => {
                let target = to.join(entry.file_name());
                if let Err(e) = fs::rename(entry.path(), &target) {
                    warnings.push(rename_warning(&entry.path(), &target, e));
                }
            }
            Err(e) => warnings.push(rename_warning(&from, &to, e)),
        }
    }
}

/// `.pck` and `.zip`, nothing else
fn is_pack_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| PACK_FILE_EXTENSIONS.contains(&ext))
}

/// Copies `.pck` / `.zip` files found under `<root>/<path>` into the module,
/// keeping their location relative to the pack directory. Returns the copies
/// made
fn copy_pack_files(paths: &ProjectPaths, info: &AssetPackInfo, warnings: &mut Vec<ExportWarning>) -> Vec<PathBuf> {
    let source = paths.root.join(&info.file_path);
    let dest_root = paths.module_assets_dir(&info.name);
    let build_dir = paths.build_dir();
    let mut copied = Vec::new();

    if !source.is_dir() {
        warnings.push(ExportWarning::MissingDirectory(source));
        return copied;
    }

    // The gradle project may sit below the pack directory, never walk into it
    let walker = WalkDir::new(&source)
        .into_iter()
        .filter_entry(|e| !e.path().starts_with(&build_dir));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let at = e.path().map(Path::to_path_buf).unwrap_or_else(|| source.clone());
                warnings.push(rename_warning(&at, &dest_root, e.into()));
                continue;
            }
        };

        if !entry.file_type().is_file() || !is_pack_file(entry.path()) {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(&source) else {
            continue;
        };
        let dest = dest_root.join(relative);

        if let Some(parent) = dest.parent() {
            if let Err(e) = create_directory(parent) {
                warnings.push(ExportWarning::Relocation(e));
                continue;
            }
        }

        match fs::copy(entry.path(), &dest) {
            Ok(_) => copied.push(dest),
            Err(e) => warnings.push(rename_warning(entry.path(), &dest, e)),
        }
    }

    copied
}

/// Creates the gradle module of one asset pack: its build.gradle, the moved
/// exported assets and copies of the pack's archive files. Only a failure to
/// write build.gradle is an error, everything else ends up in the warnings
pub fn create_asset_pack_folder(paths: &ProjectPaths, info: &AssetPackInfo) -> Result<Vec<ExportWarning>> {
    let build_gradle_path = paths.module_dir(&info.name).join("build.gradle");
    store_string_at_path(&build_gradle_path, &asset_pack_build_gradle(info))?;

    let mut warnings = Vec::new();
    relocate_exported_assets(paths, info, &mut warnings);

    let copied = copy_pack_files(paths, info, &mut warnings);
    if !copied.is_empty() {
        info!(" {}: {} pack file(s) copied", info.name, copied.len());
    }

    Ok(warnings)
}

/// Reads the asset pack config, builds every pack module and registers them
/// in the root gradle project
pub fn handle_asset_packs(paths: &ProjectPaths, config_path: &Path) -> Result<AssetPackReport> {
    let packs = read_asset_pack_config(config_path)?;
    let mut warnings = Vec::new();

    for pack in &packs {
        info!(" Asset pack {} ({})", pack.name, pack.delivery_mode);
        warnings.extend(create_asset_pack_folder(paths, pack)?);
    }

    update_root_project_with_asset_pack_info(paths, &packs)?;

    Ok(AssetPackReport { packs, warnings })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::root_project::{ASSET_PACK_INFO_END, ASSET_PACK_INFO_START};
    use crate::parser::asset_pack::AssetPackDeliveryMode;
    use tempfile::TempDir;

    fn write(path: &Path, data: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, data).unwrap();
    }

    fn gradle_project(paths: &ProjectPaths) {
        let build_dir = paths.build_dir();
        write(
            &build_dir.join("build.gradle"),
            &format!("ext {{\n{}\nassetPacks = []\n{}\n}}\n", ASSET_PACK_INFO_START, ASSET_PACK_INFO_END),
        );
        write(
            &build_dir.join("settings.gradle"),
            &format!("{}\ninclude ':app'\n{}\n", ASSET_PACK_INFO_START, ASSET_PACK_INFO_END),
        );
    }

    #[test]
    fn test_build_gradle_per_delivery_mode() {
        let mut info = AssetPackInfo {
            file_path: "assets/a".to_string(),
            delivery_mode: AssetPackDeliveryMode::FastFollow,
            name: "pack_a".to_string(),
        };

        assert_eq!(
            asset_pack_build_gradle(&info),
            "apply plugin: 'com.android.asset-pack'\n\n\
             assetPack {\n\
             \x20   packName = \"pack_a\"\n\
             \x20   dynamicDelivery {\n\
             \x20       deliveryType = \"fast-follow\"\n\
             \x20   }\n\
             }\n"
        );

        info.delivery_mode = AssetPackDeliveryMode::OnDemand;
        assert!(asset_pack_build_gradle(&info).contains("deliveryType = \"on-demand\""));
    }

    #[test]
    fn test_handle_asset_packs_end_to_end() {
        let tmp = TempDir::new().unwrap();
        let paths = ProjectPaths::new(tmp.path());
        gradle_project(&paths);

        // exported assets waiting in the gradle assets directory
        write(&paths.assets_dir().join("assets/a/textures/wall.png.import"), "imported");
        write(&paths.assets_dir().join("assets/a/level.scn"), "scene");
        // archives next to the sources
        write(&tmp.path().join("assets/a/data.pck"), "pck");
        write(&tmp.path().join("assets/a/dlc/extra.zip"), "zip");
        write(&tmp.path().join("assets/a/readme.txt"), "skip me");

        let config = tmp.path().join("asset_packs.cfg");
        write(&config, "assets/a\n0\npack_a\n");

        let report = handle_asset_packs(&paths, &config).unwrap();
        assert_eq!(report.packs.len(), 1);
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);

        let module = paths.module_dir("pack_a");
        let gradle = fs::read_to_string(module.join("build.gradle")).unwrap();
        assert!(gradle.contains("packName = \"pack_a\""));
        assert!(gradle.contains("deliveryType = \"install-time\""));

        let assets = paths.module_assets_dir("pack_a");
        assert_eq!(fs::read_to_string(assets.join("level.scn")).unwrap(), "scene");
        assert!(assets.join("textures/wall.png.import").is_file());
        assert_eq!(fs::read_to_string(assets.join("data.pck")).unwrap(), "pck");
        assert_eq!(fs::read_to_string(assets.join("dlc/extra.zip")).unwrap(), "zip");
        assert!(!assets.join("readme.txt").exists());

        // moved, not copied
        assert!(!paths.assets_dir().join("assets/a").exists());
        // copied, not moved
        assert!(tmp.path().join("assets/a/data.pck").is_file());

        let settings = fs::read_to_string(paths.build_dir().join("settings.gradle")).unwrap();
        assert!(settings.contains("include ':app'\ninclude ':pack_a'\n"));
        let build = fs::read_to_string(paths.build_dir().join("build.gradle")).unwrap();
        assert!(build.contains("assetPacks = [\":pack_a\"]\n"));
    }

    #[test]
    fn test_missing_directories_become_warnings() {
        let tmp = TempDir::new().unwrap();
        let paths = ProjectPaths::new(tmp.path());
        gradle_project(&paths);

        let config = tmp.path().join("asset_packs.cfg");
        write(&config, "assets/missing\n2\nlate_pack\n");

        let report = handle_asset_packs(&paths, &config).unwrap();
        assert_eq!(report.warnings.len(), 2);
        assert!(report
            .warnings
            .iter()
            .all(|w| matches!(w, ExportWarning::MissingDirectory(_))));
        assert!(paths.module_dir("late_pack").join("build.gradle").is_file());
    }

    #[test]
    fn test_failed_moves_and_copies_become_warnings() {
        let tmp = TempDir::new().unwrap();
        let paths = ProjectPaths::new(tmp.path());
        gradle_project(&paths);

        // a non empty directory already sits where textures/ has to go
        let assets = paths.module_assets_dir("pack_a");
        write(&assets.join("textures/old.png"), "old");
        write(&paths.assets_dir().join("assets/a/textures/wall.png"), "wall");
        write(&paths.assets_dir().join("assets/a/level.scn"), "scene");
        // and a directory where data.pck has to be copied
        fs::create_dir_all(assets.join("data.pck/inner")).unwrap();
        write(&tmp.path().join("assets/a/data.pck"), "pck");

        let config = tmp.path().join("asset_packs.cfg");
        write(&config, "assets/a\n1\npack_a\n");

        let report = handle_asset_packs(&paths, &config).unwrap();
        assert_eq!(report.warnings.len(), 2, "{:?}", report.warnings);
        assert!(report.warnings.iter().all(|w| matches!(
            w,
            ExportWarning::Relocation(ExportError::CopyOrRename { .. })
        )));
        assert!(report.warnings.iter().any(|w| matches!(
            w,
            ExportWarning::Relocation(ExportError::CopyOrRename { to, .. }) if to.ends_with("textures")
        )));
        assert!(report.warnings.iter().any(|w| matches!(
            w,
            ExportWarning::Relocation(ExportError::CopyOrRename { to, .. }) if to.ends_with("data.pck")
        )));

        // the other entries still made it and the module is registered
        assert!(paths.module_dir("pack_a").join("build.gradle").is_file());
        assert_eq!(fs::read_to_string(assets.join("level.scn")).unwrap(), "scene");
        assert!(assets.join("textures/old.png").is_file());
        let settings = fs::read_to_string(paths.build_dir().join("settings.gradle")).unwrap();
        assert!(settings.contains("include ':pack_a'\n"));
        let build = fs::read_to_string(paths.build_dir().join("build.gradle")).unwrap();
        assert!(build.contains("assetPacks = [\":pack_a\"]\n"));
    }

    #[test]
    fn test_relocation_merges_into_existing_assets() {
        let tmp = TempDir::new().unwrap();
        let paths = ProjectPaths::new(tmp.path());
        let info = AssetPackInfo {
            file_path: "assets/a".to_string(),
            delivery_mode: AssetPackDeliveryMode::InstallTime,
            name: "pack_a".to_string(),
        };

        write(&paths.module_assets_dir("pack_a").join("old.pck"), "old");
        write(&paths.assets_dir().join("assets/a/new.scn"), "new");
        fs::create_dir_all(tmp.path().join("assets/a")).unwrap();

        let warnings = create_asset_pack_folder(&paths, &info).unwrap();
        assert!(warnings.is_empty(), "{:?}", warnings);

        let assets = paths.module_assets_dir("pack_a");
        assert!(assets.join("old.pck").is_file());
        assert!(assets.join("new.scn").is_file());
    }

    #[test]
    fn test_bad_config_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let paths = ProjectPaths::new(tmp.path());
        gradle_project(&paths);

        let config = tmp.path().join("asset_packs.cfg");
        write(&config, "assets/a\n7\npack_a\n");

        let err = handle_asset_packs(&paths, &config).unwrap_err();
        assert!(matches!(err, ExportError::MalformedConfig { line: 2, .. }));
        assert!(!paths.module_dir("pack_a").exists());

        let err = handle_asset_packs(&paths, &tmp.path().join("nope.cfg")).unwrap_err();
        assert!(matches!(err, ExportError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_is_pack_file() {
        assert!(is_pack_file(Path::new("a/b.pck")));
        assert!(is_pack_file(Path::new("b.zip")));
        assert!(!is_pack_file(Path::new("b.pck.import")));
        assert!(!is_pack_file(Path::new("zip")));
    }
}
