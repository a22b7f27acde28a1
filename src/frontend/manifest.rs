// Copyright (c) 2025 Spawn
// This program and the accompanying materials are made available under the
// terms of the Eclipse Public License 2.0 which is available at
// https://www.eclipse.org/legal/epl-2.0/
// SPDX-License-Identifier: EPL-2.0

//! Manifest fragments for custom gradle builds. Every tag carries a
//! `tools:node` / `tools:replace` directive: the gradle manifest merger folds
//! these into the template manifest of the gradle project, nothing is merged
//! here.

use quick_xml::escape::escape;

use crate::error::Result;
use crate::parser::{ExportPreset, ProjectSettings};
use crate::project::{store_string_at_path, ProjectPaths};

const SCREEN_SIZES: [&str; 4] = ["small", "normal", "large", "xlarge"];

const CUSTOM_PERMISSIONS_KEY: &str = "permissions/custom_permissions";

fn bool_to_string(v: bool) -> &'static str {
    if v {
        "true"
    } else {
        "false"
    }
}

fn uses_xr(preset: &ExportPreset) -> bool {
    preset.get_int("xr_features/xr_mode") == 1
}

/// `<supports-screens>` with one attribute per `screen/support_*` flag
pub fn screen_sizes_tag(preset: &ExportPreset) -> String {
    let mut tag = String::from("    <supports-screens \n        tools:node=\"replace\"");

    for size in SCREEN_SIZES {
        let supported = preset.get_bool(&format!("screen/support_{}", size));
        tag.push_str(&format!(
            "\n        android:{}Screens=\"{}\"",
            size,
            bool_to_string(supported)
        ));
    }

    tag.push_str(" />\n");
    tag
}

/// GLES 3 is only required when it is the driver and there is no GLES 2
/// fallback
pub fn requires_gles3(project: &ProjectSettings) -> bool {
    project.get_str("rendering/quality/driver/driver_name") == "GLES3"
        && !project.get_bool("rendering/quality/driver/fallback_to_gles2")
}

pub fn gles_tag(project: &ProjectSettings) -> String {
    if requires_gles3(project) {
        "    <uses-feature android:glEsVersion=\"0x00030000\" android:required=\"true\" />\n".to_string()
    } else {
        String::new()
    }
}

/// Head and hand tracking features, only when `xr_features/xr_mode` is 1
pub fn xr_features_tag(preset: &ExportPreset) -> String {
    let mut tags = String::new();
    if !uses_xr(preset) {
        return tags;
    }

    // 0: none, 1: 3dof and 6dof, 2: 6dof only
    match preset.get_int("xr_features/degrees_of_freedom") {
        1 => tags.push_str("    <uses-feature tools:node=\"replace\" android:name=\"android.hardware.vr.headtracking\" android:required=\"false\" android:version=\"1\" />\n"),
        2 => tags.push_str("    <uses-feature tools:node=\"replace\" android:name=\"android.hardware.vr.headtracking\" android:required=\"true\" android:version=\"1\" />\n"),
        _ => {}
    }

    // 0: none, 1: optional, 2: required
    match preset.get_int("xr_features/hand_tracking") {
        1 => tags.push_str("    <uses-feature tools:node=\"replace\" android:name=\"oculus.software.handtracking\" android:required=\"false\" />\n"),
        2 => tags.push_str("    <uses-feature tools:node=\"replace\" android:name=\"oculus.software.handtracking\" android:required=\"true\" />\n"),
        _ => {}
    }

    tags
}

/// Points the instrumentation at the preset's package
pub fn instrumentation_tag(preset: &ExportPreset) -> String {
    format!(
        "    <instrumentation\n\
         \x20       tools:node=\"replace\"\n\
         \x20       android:name=\".GodotInstrumentation\"\n\
         \x20       android:icon=\"@mipmap/icon\"\n\
         \x20       android:label=\"@string/godot_project_name_string\"\n\
         \x20       android:targetPackage=\"{}\" />\n",
        escape(preset.get_str("package/unique_name"))
    )
}

/// `plugins_names` is the comma separated list of enabled plugins
pub fn plugins_tag(plugins_names: &str) -> String {
    if plugins_names.is_empty() {
        "    <meta-data tools:node=\"remove\" android:name=\"plugins\" />\n".to_string()
    } else {
        format!(
            "    <meta-data tools:node=\"replace\" android:name=\"plugins\" android:value=\"{}\" />\n",
            escape(plugins_names)
        )
    }
}

/// Main activity with orientation and the focus awareness meta-data
pub fn activity_tag(preset: &ExportPreset) -> String {
    let orientation = if preset.get_int("screen/orientation") == 1 {
        "portrait"
    } else {
        "landscape"
    };

    let mut tag = format!(
        "        <activity android:name=\"com.godot.game.GodotApp\" \
         tools:replace=\"android:screenOrientation\" \
         android:screenOrientation=\"{}\">\n",
        orientation
    );

    if uses_xr(preset) {
        let focus_awareness = bool_to_string(preset.get_bool("xr_features/focus_awareness"));
        tag.push_str(&format!(
            "            <meta-data tools:node=\"replace\" android:name=\"com.oculus.vr.focusaware\" android:value=\"{}\" />\n",
            focus_awareness
        ));
    } else {
        tag.push_str("            <meta-data tools:node=\"remove\" android:name=\"com.oculus.vr.focusaware\" />\n");
    }

    tag.push_str("        </activity>\n");
    tag
}

pub fn application_tag(preset: &ExportPreset, plugins_names: &str) -> String {
    let mut tag = String::from(
        "    <application android:label=\"@string/godot_project_name_string\"\n\
         \x20       android:allowBackup=\"false\" tools:ignore=\"GoogleAppIndexingWarning\"\n\
         \x20       android:icon=\"@mipmap/icon\">\n\n\
         \x20       <meta-data tools:node=\"remove\" android:name=\"xr_mode_metadata_name\" />\n",
    );

    tag.push_str(&plugins_tag(plugins_names));

    if uses_xr(preset) {
        tag.push_str("        <meta-data tools:node=\"replace\" android:name=\"com.samsung.android.vr.application.mode\" android:value=\"vr_only\" />\n");
    }

    tag.push_str(&activity_tag(preset));
    tag.push_str("    </application>\n");
    tag
}

/// `permissions/<name> = true` becomes `android.permission.<NAME>`, entries of
/// `permissions/custom_permissions` are taken verbatim
pub fn permissions_tag(preset: &ExportPreset) -> String {
    let mut tags = String::new();

    for key in preset.keys_with_prefix("permissions") {
        if key == CUSTOM_PERMISSIONS_KEY || !preset.get_bool(key) {
            continue;
        }

        let name = &key["permissions/".len()..];
        tags.push_str(&format!(
            "    <uses-permission android:name=\"android.permission.{}\" />\n",
            escape(&name.to_uppercase())
        ));
    }

    for custom in preset.get_list(CUSTOM_PERMISSIONS_KEY) {
        let custom = custom.trim();
        if !custom.is_empty() {
            tags.push_str(&format!("    <uses-permission android:name=\"{}\" />\n", escape(custom)));
        }
    }

    tags
}

/// The manifest a custom build hands to the gradle manifest merger
pub fn merge_manifest(preset: &ExportPreset, project: &ProjectSettings, plugins_names: &str) -> String {
    let mut manifest = String::from(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
         <manifest xmlns:android=\"http://schemas.android.com/apk/res/android\"\n\
         \x20   xmlns:tools=\"http://schemas.android.com/tools\">\n",
    );

    manifest.push_str(&screen_sizes_tag(preset));
    manifest.push_str(&gles_tag(project));
    manifest.push_str(&permissions_tag(preset));
    manifest.push_str(&xr_features_tag(preset));
    manifest.push_str(&instrumentation_tag(preset));
    manifest.push_str(&application_tag(preset, plugins_names));
    manifest.push_str("</manifest>\n");
    manifest
}

/// Writes the merge manifest to `src/debug` or `src/release` of the gradle project
pub fn write_merge_manifest(
    paths: &ProjectPaths,
    preset: &ExportPreset,
    project: &ProjectSettings,
    plugins_names: &str,
    debug: bool,
) -> Result<()> {
    let manifest = merge_manifest(preset, project, plugins_names);
    store_string_at_path(&paths.manifest_path(debug), &manifest)
}
