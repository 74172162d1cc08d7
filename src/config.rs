use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use serde::Deserialize;

use crate::constants::{TIME_SETTINGS, URLS};

/// Runtime configuration. Every field has a compiled default so a partial
/// `jadwal.json` only overrides what it names.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sheet_url: String,
    pub proxy_url: String,
    pub form_url: String,
    pub fetch_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sheet_url: URLS.sheet.to_string(),
            proxy_url: URLS.proxy.to_string(),
            form_url: URLS.form.to_string(),
            fetch_timeout_secs: TIME_SETTINGS.fetch_timeout_secs,
        }
    }
}

impl Config {
    /// A `jadwal.json` in the working directory wins over the platform
    /// config dir; with neither present the defaults apply.
    pub fn load() -> Self {
        for path in candidate_paths() {
            if !path.exists() {
                continue;
            }
            match read_config(&path) {
                Ok(config) => return config,
                Err(e) => {
                    eprintln!("Warning: Could not read {}: {}", path.display(), e);
                }
            }
        }
        Self::default()
    }
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("./jadwal.json")];
    if let Some(proj_dirs) = ProjectDirs::from("com", "jadwal", "jadwal") {
        paths.push(proj_dirs.config_dir().join("jadwal.json"));
    }
    paths
}

fn read_config(path: &Path) -> Result<Config, String> {
    let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_json::from_str(&content).map_err(|e| e.to_string())
}
