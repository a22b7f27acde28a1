// Copyright (c) 2025 Spawn
// This program and the accompanying materials are made available under the
// terms of the Eclipse Public License 2.0 which is available at
// https://www.eclipse.org/legal/epl-2.0/
// SPDX-License-Identifier: EPL-2.0

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{ExportError, Result};
use crate::project::{store_file_at_path, ProjectPaths};

/// Target of an exported `res://` file inside the gradle project's assets
pub fn exported_file_destination(paths: &ProjectPaths, res_path: &str) -> PathBuf {
    let relative = res_path.strip_prefix("res://").unwrap_or(res_path);
    paths.assets_dir().join(relative.trim_start_matches('/'))
}

/// Stores one file produced by the engine export under `android/build/assets`
pub fn store_exported_file(paths: &ProjectPaths, res_path: &str, data: &[u8]) -> Result<()> {
    store_file_at_path(&exported_file_destination(paths, res_path), data)
}

/// Stages every regular file of `source_dir` into the gradle assets, keeping
/// the relative layout. Returns how many files were staged
pub fn stage_directory(paths: &ProjectPaths, source_dir: &Path) -> Result<usize> {
    let mut staged = 0;

    for entry in WalkDir::new(source_dir) {
        let entry = entry.map_err(|e| ExportError::Io(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(source_dir) else {
            continue;
        };

        let res_path = format!("res://{}", relative.to_string_lossy().replace('\\', "/"));
        let data = fs::read(entry.path())?;
        store_exported_file(paths, &res_path, &data)?;
        staged += 1;
    }

    Ok(staged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_destination_of_res_path() {
        let paths = ProjectPaths::new("/game");
        assert_eq!(
            exported_file_destination(&paths, "res://assets/a/level.scn"),
            PathBuf::from("/game/android/build/assets/assets/a/level.scn")
        );
        assert_eq!(
            exported_file_destination(&paths, "project.binary"),
            PathBuf::from("/game/android/build/assets/project.binary")
        );
    }

    #[test]
    fn test_stage_directory_keeps_layout() {
        let tmp = TempDir::new().unwrap();
        let export_dir = tmp.path().join("export");
        fs::create_dir_all(export_dir.join("assets").join("a")).unwrap();
        fs::write(export_dir.join("project.binary"), b"bin").unwrap();
        fs::write(export_dir.join("assets").join("a").join("tex.png"), b"png").unwrap();

        let paths = ProjectPaths::new(tmp.path().join("game"));
        assert_eq!(stage_directory(&paths, &export_dir).unwrap(), 2);

        assert_eq!(fs::read(paths.assets_dir().join("project.binary")).unwrap(), b"bin");
        assert_eq!(
            fs::read(paths.assets_dir().join("assets").join("a").join("tex.png")).unwrap(),
            b"png"
        );
    }
}
