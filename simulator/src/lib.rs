//! Local front end for the kazik engine.
//!
//! Loads a YAML configuration, opens the user's ledger from a snapshot directory, and runs the
//! Monte-Carlo house-edge report.

use anyhow::{Context as _, Result};
use kazik_execution::{FileStore, Layer};
use kazik_types::{EngineConfig, UserId};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub mod edge;

pub use edge::{run_report, ResultRow, Stats};

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SimulatorConfig {
    /// Directory holding one snapshot file per user.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_user")]
    pub user: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub engine: EngineConfig,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            user: default_user(),
            log_level: default_log_level(),
            engine: EngineConfig::default(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".kazik")
}

fn default_user() -> String {
    "player".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl SimulatorConfig {
    /// Read the configuration at `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(contents).context("Could not parse config file")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.user_id()?;
        self.engine
            .validate()
            .context("invalid engine configuration")?;
        Ok(())
    }

    pub fn user_id(&self) -> Result<UserId> {
        UserId::new(self.user.clone())
            .with_context(|| format!("invalid user id {:?} (1-64 bytes)", self.user))
    }

    /// Open the engine over the configured snapshot directory.
    pub fn open_layer(&self) -> Result<Layer<FileStore>> {
        let store = FileStore::open(&self.data_dir)?;
        Layer::open(store, self.user_id()?, self.engine.clone())
    }
}
