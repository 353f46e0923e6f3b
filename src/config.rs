// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "ClassConnect", "classconnect"));

/// Overrides the data file location when `--data` is not given.
pub const DATA_ENV: &str = "CLASSCONNECT_DATA";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_path: PathBuf,
}

impl Config {
    /// `--data` wins over the environment, which wins over the platform default.
    pub fn resolve(flag: Option<&Path>) -> Result<Self> {
        let env = std::env::var_os(DATA_ENV).map(PathBuf::from);
        Self::from_sources(flag, env)
    }

    pub fn from_sources(flag: Option<&Path>, env: Option<PathBuf>) -> Result<Self> {
        let data_path = match (flag, env) {
            (Some(p), _) => p.to_path_buf(),
            (None, Some(p)) if !p.as_os_str().is_empty() => p,
            _ => default_data_path()?,
        };
        Ok(Config { data_path })
    }
}

pub fn default_data_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    Ok(proj.data_dir().join("classconnect.json"))
}
