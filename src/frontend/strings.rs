// Copyright (c) 2025 Spawn
// This program and the accompanying materials are made available under the
// terms of the Eclipse Public License 2.0 which is available at
// https://www.eclipse.org/legal/epl-2.0/
// SPDX-License-Identifier: EPL-2.0

use std::fs;
use std::path::PathBuf;

use quick_xml::escape::escape;

use crate::error::{ExportError, Result};
use crate::parser::{ExportPreset, ProjectSettings};
use crate::project::{store_string_at_path, ProjectPaths};

pub const PROJECT_NAME_FILE: &str = "godot_project_name_string.xml";

const LOCALE_DIR_PREFIX: &str = "values-";

/// Resource file holding `godot_project_name_string`, name escaped
fn project_name_xml(name: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
         <!--WARNING: THIS FILE WILL BE OVERWRITTEN AT BUILD TIME-->\n\
         <resources>\n\
         \t<string name=\"godot_project_name_string\">{}</string>\n\
         </resources>\n",
        escape(name)
    )
}

/// Name shown under the launcher icon: the preset's `package/name` wins over
/// the project's `application/config/name`
pub fn project_name(preset: &ExportPreset, project: &ProjectSettings) -> String {
    let from_preset = preset.get_str("package/name").trim();
    if !from_preset.is_empty() {
        return from_preset.to_string();
    }

    match project.get_str("application/config/name").trim() {
        "" => "Unnamed".to_string(),
        name => name.to_string(),
    }
}

/// `values-pt-rBR` -> `pt_BR`
fn locale_of(dir_name: &str) -> Option<String> {
    dir_name
        .strip_prefix(LOCALE_DIR_PREFIX)
        .map(|locale| locale.replace("-r", "_"))
}

/// Writes the project name string resource into `res/values` and into every
/// `res/values-<locale>` directory of the gradle project. A locale gets its
/// `application/config/name_<locale>` setting when there is one, the default
/// name otherwise. Returns the files written
pub fn create_project_name_strings_files(
    paths: &ProjectPaths,
    project: &ProjectSettings,
    project_name: &str,
) -> Result<Vec<PathBuf>> {
    let res_dir = paths.res_dir();
    let default_xml = project_name_xml(project_name);
    let default_path = res_dir.join("values").join(PROJECT_NAME_FILE);

    store_string_at_path(&default_path, &default_xml)?;

    let mut written = vec![default_path];

    let entries = fs::read_dir(&res_dir).map_err(|source| ExportError::Create {
        path: res_dir.clone(),
        source,
    })?;

    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }

        let dir_name = entry.file_name().to_string_lossy().into_owned();
        let Some(locale) = locale_of(&dir_name) else {
            continue;
        };

        let property_name = format!("application/config/name_{}", locale);
        let locale_path = entry.path().join(PROJECT_NAME_FILE);

        if project.contains(&property_name) {
            store_string_at_path(&locale_path, &project_name_xml(project.get_str(&property_name)))?;
        } else {
            store_string_at_path(&locale_path, &default_xml)?;
        }

        written.push(locale_path);
    }

    Ok(written)
}
