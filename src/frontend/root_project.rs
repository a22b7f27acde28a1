// Copyright (c) 2025 Spawn
// This program and the accompanying materials are made available under the
// terms of the Eclipse Public License 2.0 which is available at
// https://www.eclipse.org/legal/epl-2.0/
// SPDX-License-Identifier: EPL-2.0

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ExportError, Result};
use crate::parser::AssetPackInfo;
use crate::project::{store_string_at_path, ProjectPaths};

pub const ASSET_PACK_INFO_START: &str = "//ASSET_PACK_INFO_START !!!DO NOT EDIT THIS LINE!!!";
pub const ASSET_PACK_INFO_END: &str = "//ASSET_PACK_INFO_END !!!DO NOT EDIT THIS LINE!!!";

/// Replaces whatever sits between the two sentinel comments with `body`. The
/// start sentinel itself, everything before it and everything from the end
/// sentinel on are kept byte for byte
pub fn splice_between_sentinels(path: &Path, text: &str, body: &str) -> Result<String> {
    let malformed = |sentinel: &str, reason| ExportError::MalformedTemplate {
        path: path.to_path_buf(),
        sentinel: sentinel.to_string(),
        reason,
    };

    let start = text
        .find(ASSET_PACK_INFO_START)
        .ok_or_else(|| malformed(ASSET_PACK_INFO_START, "not found"))?;
    let head_end = start + ASSET_PACK_INFO_START.len();

    let end = text[head_end..]
        .find(ASSET_PACK_INFO_END)
        .map(|offset| head_end + offset)
        .ok_or_else(|| {
            if text.contains(ASSET_PACK_INFO_END) {
                malformed(ASSET_PACK_INFO_END, "found before the start sentinel")
            } else {
                malformed(ASSET_PACK_INFO_END, "not found")
            }
        })?;

    let mut spliced = String::with_capacity(text.len() + body.len());
    spliced.push_str(&text[..head_end]);
    spliced.push('\n');
    spliced.push_str(body);
    spliced.push_str(&text[end..]);
    Ok(spliced)
}

/// `include` lines for the app module and every pack
pub fn settings_gradle_body(packs: &[AssetPackInfo]) -> String {
    let mut body = String::from("include ':app'\n");
    for pack in packs {
        body.push_str(&format!("include ':{}'\n", pack.name));
    }
    body
}

/// The `assetPacks` list the app module hands to the bundle
pub fn build_gradle_body(packs: &[AssetPackInfo]) -> String {
    let names = packs
        .iter()
        .map(|pack| format!("\":{}\"", pack.name))
        .collect::<Vec<_>>()
        .join(", ");

    format!("assetPacks = [{}]\n", names)
}

fn read_gradle_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| ExportError::ConfigNotFound {
        path: path.to_path_buf(),
        source,
    })
}

/// Registers the asset pack modules in the root `settings.gradle` and
/// `build.gradle`. Both files are checked before either is written, so a
/// broken template leaves the project untouched
pub fn update_root_project_with_asset_pack_info(
    paths: &ProjectPaths,
    packs: &[AssetPackInfo],
) -> Result<Vec<PathBuf>> {
    let build_gradle = paths.build_dir().join("build.gradle");
    let settings_gradle = paths.build_dir().join("settings.gradle");

    let build_text = splice_between_sentinels(
        &build_gradle,
        &read_gradle_file(&build_gradle)?,
        &build_gradle_body(packs),
    )?;
    let settings_text = splice_between_sentinels(
        &settings_gradle,
        &read_gradle_file(&settings_gradle)?,
        &settings_gradle_body(packs),
    )?;

    store_string_at_path(&build_gradle, &build_text)?;
    store_string_at_path(&settings_gradle, &settings_text)?;

    Ok(vec![build_gradle, settings_gradle])
}
