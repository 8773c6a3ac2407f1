// ABOUTME: Configuration types and parsing for the project file.
// ABOUTME: Handles YAML parsing, file discovery, and rsync entry selection.

mod deploy;
mod deserialize;
mod init;
mod options;

pub use deploy::{DeployConfig, HELP, MissingFields, Target};
pub use init::init_config;
pub use options::{
    DEFAULT_CREATE_BEFORE_UPDATE, DEFAULT_DELETE, DEFAULT_IGNORE_ERRORS, DEFAULT_PROGRESS,
    DEFAULT_VERBOSE, SyncOptions,
};

use crate::error::{Error, Result};
use deserialize::deserialize_deploy_entries;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "deploy.yml";
pub const CONFIG_FILENAME_ALT: &str = "deploy.yaml";
pub const CONFIG_FILENAME_SITE: &str = "_config.yml";

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    /// Local directory whose contents are published.
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,

    #[serde(default, deserialize_with = "deserialize_deploy_entries")]
    pub deploy: Vec<DeployConfig>,
}

fn default_public_dir() -> PathBuf {
    PathBuf::from("public")
}

impl ProjectConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_SITE),
        ];

        for path in &candidates {
            if path.exists() {
                tracing::debug!("Loading configuration from {}", path.display());
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    /// Entries handled by the rsync deployer, in declaration order.
    ///
    /// A project without a `deploy` section yields one empty entry so that the
    /// deploy flow prints its configuration help.
    pub fn rsync_entries(&self) -> Result<Vec<DeployConfig>> {
        if self.deploy.is_empty() {
            return Ok(vec![DeployConfig::default()]);
        }

        let entries: Vec<DeployConfig> = self
            .deploy
            .iter()
            .filter(|entry| {
                let keep = entry.is_rsync();
                if !keep {
                    tracing::debug!(
                        "Skipping deploy entry of type {:?}",
                        entry.kind.as_deref().unwrap_or_default()
                    );
                }
                keep
            })
            .cloned()
            .collect();

        if entries.is_empty() {
            return Err(Error::InvalidConfig(
                "deploy section has no rsync entries".to_string(),
            ));
        }

        Ok(entries)
    }

    /// Public directory resolved against the project directory.
    pub fn public_dir_in(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.public_dir)
    }

    pub fn template() -> Self {
        ProjectConfig {
            public_dir: default_public_dir(),
            deploy: vec![DeployConfig {
                kind: Some("rsync".to_string()),
                port: Some(22),
                ..DeployConfig::new("server.example.com", "deploy", "/var/www/site")
            }],
        }
    }
}
