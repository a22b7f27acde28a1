// Copyright (c) 2025 Spawn
// This program and the accompanying materials are made available under the
// terms of the Eclipse Public License 2.0 which is available at
// https://www.eclipse.org/legal/epl-2.0/
// SPDX-License-Identifier: EPL-2.0

use std::fs;
use std::path::PathBuf;

use crate::error::{ExportError, Result};
use crate::project::{ProjectPaths, GRADLE_PROJECT_ENTRIES};

/// Deletes everything in `android/build` that is not part of the base gradle
/// project. Irreversible. Returns the removed paths
pub fn delete_asset_folders(paths: &ProjectPaths) -> Result<Vec<PathBuf>> {
    let build_dir = paths.build_dir();
    let entries = fs::read_dir(&build_dir).map_err(|source| ExportError::Create {
        path: build_dir.clone(),
        source,
    })?;

    let mut removed = Vec::new();

    for entry in entries {
        let entry = entry?;
        let name = entry.file_name();
        if name.to_str().map_or(false, |n| GRADLE_PROJECT_ENTRIES.contains(&n)) {
            continue;
        }

        let path = entry.path();
        // file_type does not follow symlinks, a linked directory is only unlinked
        if entry.file_type()?.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }

        removed.push(path);
    }

    Ok(removed)
}
