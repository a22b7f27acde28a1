// Copyright (c) 2025 Spawn
// This program and the accompanying materials are made available under the
// terms of the Eclipse Public License 2.0 which is available at
// https://www.eclipse.org/legal/epl-2.0/
// SPDX-License-Identifier: EPL-2.0

use quick_xml::escape::escape;

use crate::frontend::manifest::requires_gles3;
use crate::parser::{ExportPreset, ProjectSettings};

/// Full manifest for builds without a gradle project. Every `*_HERE` style
/// token is substituted by `render_legacy_manifest`, the rest is kept as is
pub const LEGACY_MANIFEST_TEMPLATE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<manifest xmlns:android="http://schemas.android.com/apk/res/android"
    xmlns:tools="http://schemas.android.com/tools"
    package="PACKAGE_NAME_HERE"
    android:versionCode="VERSION_CODE_HERE"
    android:versionName="VERSION_NAME_HERE"
    android:installLocation="auto" >

    <supports-screens
        android:smallScreens="SMALL_SCREENS_HERE"
        android:normalScreens="NORMAL_SCREENS_HERE"
        android:largeScreens="LARGE_SCREENS_HERE"
        android:xlargeScreens="X_LARGE_SCREENS_HERE" />

    <uses-feature
        android:glEsVersion="GLES_VERSION_HERE"
        android:required="true" />

<!--CHUNK_USER_PERMISSIONS_BEGIN-->
<!--CHUNK_USER_PERMISSIONS_END-->

    <application android:label="@string/godot_project_name_string" android:allowBackup="false" tools:ignore="GoogleAppIndexingWarning" android:icon="@mipmap/icon" >

        <meta-data
            android:name="XR_MODE_METADATA_NAME"
            android:value="XR_MODE_METADATA_VALUE" />

        <meta-data
            android:name="PLUGINS_HERE"
            android:value="PLUGINS_VALUES_HERE"/>

        <activity
            android:name=".GodotApp"
            android:label="@string/godot_project_name_string"
            android:theme="@android:style/Theme.Black.NoTitleBar.Fullscreen"
            android:launchMode="singleTask"
            android:screenOrientation="SCREEN_ORIENTATION_HERE"
            android:configChanges="orientation|keyboardHidden|screenSize|smallestScreenSize|density|keyboard|navigation|screenLayout|uiMode"
            android:resizeableActivity="false"
            tools:ignore="UnusedAttribute" >

            <meta-data
                android:name="com.oculus.vr.focusaware"
                android:value="oculus_focus_aware_value"/>

            <intent-filter>
                <action android:name="android.intent.action.MAIN" />
                <category android:name="android.intent.category.LAUNCHER" />
            </intent-filter>
        </activity>

<!--CHUNK_APPLICATION_BEGIN-->
<!--CHUNK_APPLICATION_END-->

    </application>

</manifest>
"#;

const GLES3_VERSION: &str = "0x00030000";
const GLES2_VERSION: &str = "0x00020000";

/// Token/value pairs in substitution order. `X_LARGE_SCREENS_HERE` has to go
/// before `LARGE_SCREENS_HERE`, which is a suffix of it
fn substitutions(preset: &ExportPreset, project: &ProjectSettings, plugins_names: &str) -> Vec<(&'static str, String)> {
    let uses_xr = preset.get_int("xr_features/xr_mode") == 1;

    let version_code = match preset.get_int("version/code") {
        0 => 1,
        code => code,
    };

    let version_name = match preset.get_str("version/name") {
        "" => "1.0",
        name => name,
    };

    let orientation = if preset.get_int("screen/orientation") == 1 {
        "portrait"
    } else {
        "landscape"
    };

    let (xr_name, xr_value) = if uses_xr {
        ("com.samsung.android.vr.application.mode", "vr_only")
    } else {
        ("xr_mode_metadata_name", "")
    };

    vec![
        ("PACKAGE_NAME_HERE", escape(preset.get_str("package/unique_name")).into_owned()),
        ("VERSION_CODE_HERE", version_code.to_string()),
        ("VERSION_NAME_HERE", escape(version_name).into_owned()),
        ("X_LARGE_SCREENS_HERE", preset.get_bool("screen/support_xlarge").to_string()),
        ("SMALL_SCREENS_HERE", preset.get_bool("screen/support_small").to_string()),
        ("NORMAL_SCREENS_HERE", preset.get_bool("screen/support_normal").to_string()),
        ("LARGE_SCREENS_HERE", preset.get_bool("screen/support_large").to_string()),
        (
            "GLES_VERSION_HERE",
            (if requires_gles3(project) { GLES3_VERSION } else { GLES2_VERSION }).to_string(),
        ),
        ("SCREEN_ORIENTATION_HERE", orientation.to_string()),
        ("XR_MODE_METADATA_NAME", xr_name.to_string()),
        ("XR_MODE_METADATA_VALUE", xr_value.to_string()),
        ("PLUGINS_VALUES_HERE", escape(plugins_names).into_owned()),
        ("PLUGINS_HERE", "plugins".to_string()),
        (
            "oculus_focus_aware_value",
            (uses_xr && preset.get_bool("xr_features/focus_awareness")).to_string(),
        ),
    ]
}

/// Fills the placeholders of `LEGACY_MANIFEST_TEMPLATE` from the preset. This
/// path is independent from the custom build fragments in `manifest`
pub fn render_legacy_manifest(preset: &ExportPreset, project: &ProjectSettings, plugins_names: &str) -> String {
    substitutions(preset, project, plugins_names)
        .into_iter()
        .fold(LEGACY_MANIFEST_TEMPLATE.to_string(), |text, (token, value)| {
            text.replace(token, &value)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Settings;

    #[test]
    fn test_all_placeholders_are_replaced() {
        let preset = Settings::new().with("package/unique_name", "org.example.game");
        let manifest = render_legacy_manifest(&preset, &Settings::new(), "");

        assert!(!manifest.contains("_HERE"), "{}", manifest);
        assert!(!manifest.contains("XR_MODE_METADATA"));
        assert!(!manifest.contains("oculus_focus_aware_value"));
        assert!(manifest.contains("package=\"org.example.game\""));
        assert!(manifest.contains("android:versionCode=\"1\""));
        assert!(manifest.contains("android:versionName=\"1.0\""));
        assert!(manifest.contains("android:glEsVersion=\"0x00020000\""));
        assert!(manifest.contains("android:screenOrientation=\"landscape\""));
    }

    #[test]
    fn test_screen_flags_map_to_their_own_attribute() {
        let preset = Settings::new()
            .with("screen/support_small", true)
            .with("screen/support_normal", false)
            .with("screen/support_large", true)
            .with("screen/support_xlarge", false);
        let manifest = render_legacy_manifest(&preset, &Settings::new(), "");

        assert!(manifest.contains("android:smallScreens=\"true\""));
        assert!(manifest.contains("android:normalScreens=\"false\""));
        assert!(manifest.contains("android:largeScreens=\"true\""));
        assert!(manifest.contains("android:xlargeScreens=\"false\""));
    }

    #[test]
    fn test_xr_and_plugins() {
        let preset = Settings::new()
            .with("xr_features/xr_mode", 1i64)
            .with("xr_features/focus_awareness", true)
            .with("version/code", 7i64)
            .with("version/name", "2.1");
        let project = Settings::new().with("rendering/quality/driver/driver_name", "GLES3");
        let manifest = render_legacy_manifest(&preset, &project, "GodotPayment");

        assert!(manifest.contains("android:name=\"com.samsung.android.vr.application.mode\""));
        assert!(manifest.contains("android:value=\"vr_only\""));
        assert!(manifest.contains("android:name=\"plugins\""));
        assert!(manifest.contains("android:value=\"GodotPayment\""));
        assert!(manifest.contains("android:name=\"com.oculus.vr.focusaware\"\n                android:value=\"true\""));
        assert!(manifest.contains("android:versionCode=\"7\""));
        assert!(manifest.contains("android:versionName=\"2.1\""));
        assert!(manifest.contains("android:glEsVersion=\"0x00030000\""));
    }

    #[test]
    fn test_values_are_escaped() {
        let preset = Settings::new()
            .with("package/unique_name", "org.a&b")
            .with("version/name", "1.0 \"beta\"");
        let manifest = render_legacy_manifest(&preset, &Settings::new(), "Ads&More");

        assert!(manifest.contains("package=\"org.a&amp;b\""));
        assert!(manifest.contains("android:versionName=\"1.0 &quot;beta&quot;\""));
        assert!(manifest.contains("android:value=\"Ads&amp;More\""));
    }
}
