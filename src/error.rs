// Copyright (c) 2025 Spawn
// This program and the accompanying materials are made available under the
// terms of the Eclipse Public License 2.0 which is available at
// https://www.eclipse.org/legal/epl-2.0/
// SPDX-License-Identifier: EPL-2.0

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop an export step
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Cannot create '{}': {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config not found {}: {source}", path.display())]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed asset pack config at line {line}: {reason}")]
    MalformedConfig { line: usize, reason: String },

    #[error("Malformed template {}: sentinel '{sentinel}' {reason}", path.display())]
    MalformedTemplate {
        path: PathBuf,
        sentinel: String,
        reason: &'static str,
    },

    #[error("Cannot move '{}' to '{}': {source}", from.display(), to.display())]
    CopyOrRename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Toml error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExportError>;

/// Problems that do not abort an export step. They are collected and handed
/// back to the caller as a batch
#[derive(Debug)]
pub enum ExportWarning {
    /// A move or copy into an asset pack module failed
    Relocation(ExportError),

    /// A pack directory listed in the config does not exist
    MissingDirectory(PathBuf),
}

impl fmt::Display for ExportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportWarning::Relocation(e) => write!(f, "{}", e),
            ExportWarning::MissingDirectory(p) => {
                write!(f, "Directory not found, skipped: {}", p.display())
            }
        }
    }
}
