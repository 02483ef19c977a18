use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::errors::CaisseError;
use crate::storage::{app_data_dir, ensure_dir, tmp_path, write_atomic};

const CONFIG_FILE: &str = "config.json";

/// Earliest year the balance resolver will walk back to. Mandatory: without
/// a floor the backward recursion is unbounded.
pub const DEFAULT_ANNEE_PLANCHER: i32 = 2023;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub annee_plancher: i32,
    pub cache_ttl_secs: u64,
    pub locale: String,
    pub devise: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            annee_plancher: DEFAULT_ANNEE_PLANCHER,
            cache_ttl_secs: 300,
            locale: "fr-FR".into(),
            devise: "FCFA".into(),
        }
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, CaisseError> {
        Self::from_base(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, CaisseError> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self, CaisseError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    pub fn load(&self) -> Result<Config, CaisseError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), CaisseError> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
