// ABOUTME: Config scaffolding for new projects.
// ABOUTME: Creates deploy.yml template files.

use std::path::Path;

use crate::error::{Error, Result};

use super::{
    CONFIG_FILENAME, DEFAULT_CREATE_BEFORE_UPDATE, DEFAULT_DELETE, DEFAULT_IGNORE_ERRORS,
    DEFAULT_PROGRESS, DEFAULT_VERBOSE, ProjectConfig,
};

pub fn init_config(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let yaml = generate_template_yaml(&ProjectConfig::template());
    std::fs::write(&config_path, yaml)?;

    Ok(())
}

fn generate_template_yaml(config: &ProjectConfig) -> String {
    let entry = config.deploy.first().cloned().unwrap_or_default();
    format!(
        r#"public_dir: {}
deploy:
  type: rsync
  host: {}
  user: {}
  root: {}
  port: {}
  # key: ~/.ssh/id_ed25519
  # rsh: ssh
  # args: --exclude=.DS_Store
  delete: {}
  verbose: {}
  progress: {}
  ignore_errors: {}
  create_before_update: {}
"#,
        config.public_dir.display(),
        entry.host.as_deref().unwrap_or_default(),
        entry.user.as_deref().unwrap_or_default(),
        entry.root.as_deref().unwrap_or_default(),
        entry.port.unwrap_or(22),
        DEFAULT_DELETE,
        DEFAULT_VERBOSE,
        DEFAULT_PROGRESS,
        DEFAULT_IGNORE_ERRORS,
        DEFAULT_CREATE_BEFORE_UPDATE,
    )
}
