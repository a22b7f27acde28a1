// Copyright (c) 2025 Spawn
// This program and the accompanying materials are made available under the
// terms of the Eclipse Public License 2.0 which is available at
// https://www.eclipse.org/legal/epl-2.0/
// SPDX-License-Identifier: EPL-2.0

use std::collections::BTreeMap;

use toml::Value;

/// One setting. Arrays of non strings keep their toml text
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<String>),
}

/// Read-only key-value store addressed by slash separated keys such as
/// `screen/support_small`. Missing keys read as the zero value of the
/// requested type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    values: BTreeMap<String, SettingValue>,
}

/// Settings of a single export preset (screen, xr, package, permissions)
pub type ExportPreset = Settings;

/// Engine wide project settings (application name, renderer)
pub type ProjectSettings = Settings;

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flattens nested toml tables into slash separated keys, so
    /// `[screen] support_small = true` becomes `screen/support_small`
    pub fn from_table(table: &toml::Table) -> Self {
        let mut settings = Self::new();
        flatten_into(&mut settings.values, "", table);
        settings
    }

    /// Builder used by tests to assemble presets without a toml file
    #[cfg(test)]
    pub fn with(mut self, key: &str, value: impl Into<SettingValue>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn get_bool(&self, key: &str) -> bool {
        match self.values.get(key) {
            Some(SettingValue::Bool(b)) => *b,
            Some(SettingValue::Int(i)) => *i != 0,
            Some(SettingValue::Str(s)) => s == "true",
            _ => false,
        }
    }

    pub fn get_int(&self, key: &str) -> i64 {
        match self.values.get(key) {
            Some(SettingValue::Int(i)) => *i,
            Some(SettingValue::Bool(b)) => *b as i64,
            Some(SettingValue::Str(s)) => s.trim().parse().unwrap_or(0),
            _ => 0,
        }
    }

    pub fn get_str(&self, key: &str) -> &str {
        match self.values.get(key) {
            Some(SettingValue::Str(s)) => s,
            _ => "",
        }
    }

    pub fn get_list(&self, key: &str) -> &[String] {
        match self.values.get(key) {
            Some(SettingValue::List(l)) => l,
            _ => &[],
        }
    }

    /// Keys under `prefix/`, in sorted order
    pub fn keys_with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.values
            .keys()
            .filter(move |k| {
                k.strip_prefix(prefix)
                    .map_or(false, |rest| rest.starts_with('/'))
            })
            .map(|k| k.as_str())
    }
}

/// Walks nested tables, joining keys with `/`
fn flatten_into(values: &mut BTreeMap<String, SettingValue>, prefix: &str, table: &toml::Table) {
    for (k, v) in table {
        let key = if prefix.is_empty() {
            k.clone()
        } else {
            format!("{}/{}", prefix, k)
        };

        match v {
            Value::Table(inner) => flatten_into(values, &key, inner),
            Value::Boolean(b) => {
                values.insert(key, SettingValue::Bool(*b));
            }
            Value::Integer(i) => {
                values.insert(key, SettingValue::Int(*i));
            }
            Value::String(s) => {
                values.insert(key, SettingValue::Str(s.clone()));
            }
            Value::Array(items) => {
                let list = items
                    .iter()
                    .map(|item| match item {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect();
                values.insert(key, SettingValue::List(list));
            }
            // Floats and dates have no use in presets, keep their text form
            other => {
                values.insert(key, SettingValue::Str(other.to_string()));
            }
        }
    }
}

impl From<bool> for SettingValue {
    fn from(v: bool) -> Self {
        SettingValue::Bool(v)
    }
}

impl From<i64> for SettingValue {
    fn from(v: i64) -> Self {
        SettingValue::Int(v)
    }
}

impl From<&str> for SettingValue {
    fn from(v: &str) -> Self {
        SettingValue::Str(v.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(v: String) -> Self {
        SettingValue::Str(v)
    }
}

impl From<Vec<String>> for SettingValue {
    fn from(v: Vec<String>) -> Self {
        SettingValue::List(v)
    }
}
