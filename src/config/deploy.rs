// ABOUTME: A single rsync deploy entry and its required-field validation.
// ABOUTME: Produces a validated Target or the list of missing settings.

use serde::Deserialize;
use std::fmt;
use thiserror::Error;

use super::deserialize::deserialize_port;
use super::options::SyncOptions;

/// Instructional text shown when host, user or root is missing.
pub const HELP: &str = r#"You should configure deployment settings first!

Example:
  deploy:
    type: rsync
    host: <host>
    user: <user>
    root: <root>
    port: [port] # Default is 22
    delete: [true|false] # Default is true
    progress: [true|false] # Default is true
    args: <rsync args>
    rsh: <remote shell>
    key: <key>
    verbose: [true|false] # Default is true
    ignore_errors: [true|false] # Default is false
    create_before_update: [true|false] # Default is false
"#;

/// Raw deploy settings as written by the user. Every field is optional here;
/// `validate` decides whether the entry is usable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DeployConfig {
    /// Deployer type. Entries without one are treated as rsync entries.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    #[serde(default)]
    pub host: Option<String>,

    #[serde(default)]
    pub user: Option<String>,

    /// Remote path, or `:module/` to address an rsync daemon module.
    #[serde(default)]
    pub root: Option<String>,

    /// Only ports in 1..=65535 are used; anything else is ignored.
    #[serde(default, deserialize_with = "deserialize_port")]
    pub port: Option<i64>,

    #[serde(default)]
    pub key: Option<String>,

    #[serde(default)]
    pub rsh: Option<String>,

    #[serde(default)]
    pub delete: Option<bool>,

    #[serde(default)]
    pub verbose: Option<bool>,

    #[serde(default)]
    pub progress: Option<bool>,

    #[serde(default)]
    pub ignore_errors: Option<bool>,

    #[serde(default)]
    pub create_before_update: Option<bool>,

    /// Extra arguments passed through to rsync, split with shell-word rules.
    #[serde(default)]
    pub args: Option<String>,
}

/// Required settings that were absent or empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required deployment settings: {}", .0.join(", "))]
pub struct MissingFields(pub Vec<&'static str>);

/// Validated connection target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub host: String,
    pub user: String,
    pub root: String,
}

impl Target {
    /// The rsync destination operand, `user@host:root`.
    pub fn destination(&self) -> String {
        format!("{}@{}:{}", self.user, self.host, self.root)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.destination())
    }
}

impl DeployConfig {
    pub fn new(host: &str, user: &str, root: &str) -> Self {
        Self {
            host: Some(host.to_string()),
            user: Some(user.to_string()),
            root: Some(root.to_string()),
            ..Default::default()
        }
    }

    /// Whether this entry belongs to the rsync deployer.
    pub fn is_rsync(&self) -> bool {
        self.kind.as_deref().is_none_or(|kind| kind == "rsync")
    }

    pub fn validate(&self) -> Result<Target, MissingFields> {
        fn present(value: &Option<String>) -> Option<&str> {
            value.as_deref().filter(|s| !s.is_empty())
        }

        let host = present(&self.host);
        let user = present(&self.user);
        let root = present(&self.root);

        match (host, user, root) {
            (Some(host), Some(user), Some(root)) => Ok(Target {
                host: host.to_string(),
                user: user.to_string(),
                root: root.to_string(),
            }),
            _ => {
                let missing = [("host", host), ("user", user), ("root", root)]
                    .into_iter()
                    .filter(|(_, value)| value.is_none())
                    .map(|(name, _)| name)
                    .collect();
                Err(MissingFields(missing))
            }
        }
    }

    /// Effective flag values with defaults applied.
    pub fn options(&self) -> SyncOptions {
        SyncOptions::from_config(self)
    }

    /// A copy of this entry with every defaulted flag written in.
    pub fn normalized(&self) -> DeployConfig {
        let options = self.options();
        DeployConfig {
            delete: Some(options.delete),
            verbose: Some(options.verbose),
            progress: Some(options.progress),
            ignore_errors: Some(options.ignore_errors),
            create_before_update: Some(options.create_before_update),
            ..self.clone()
        }
    }
}
