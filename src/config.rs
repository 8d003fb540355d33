use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::ArmdeckError;

const CONFIG_FILE_NAME: &str = "config.json";

/// Milliseconds between frame ticks, roughly one display refresh.
pub const FRAME_INTERVAL_MS: u64 = 16;

#[derive(Serialize, Deserialize, Debug)]
#[serde(default)]
pub struct AppConfig {
    pub frame_interval_ms: u64,
    /// Backend endpoint for state sync; absent means emulator mode.
    pub sync_url: Option<String>,
    /// Override for the program store location.
    pub programs_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: FRAME_INTERVAL_MS,
            sync_url: None,
            programs_path: None,
        }
    }
}

impl AppConfig {
    pub fn from_local_file() -> Option<Self> {
        let config_path = dirs::config_dir()?.join("armdeck").join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let file = std::fs::File::open(config_path).expect("Could not open config file");
            Some(serde_json::from_reader(file).expect("Could not parse config file"))
        } else {
            None
        }
    }

    /// Write the config to its default location, creating it on first run.
    pub fn save(&self) -> Result<(), ArmdeckError> {
        let config_path = dirs::config_dir()
            .ok_or(ArmdeckError::NoConfigDir)?
            .join("armdeck")
            .join(CONFIG_FILE_NAME);
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), ArmdeckError> {
        if let Some(parent) = config_path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| ArmdeckError::ConfigIoError { source: e })?;
            }
        }

        let file = std::fs::File::create(config_path)
            .map_err(|e| ArmdeckError::ConfigIoError { source: e })?;
        serde_json::to_writer(file, self)
            .map_err(|e| ArmdeckError::ConfigSerializeError { source: e })
    }
}
