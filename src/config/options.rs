// ABOUTME: Optional rsync flags with their defaults applied.
// ABOUTME: Explicit values always win over defaults, including false.

use super::DeployConfig;

pub const DEFAULT_DELETE: bool = true;
pub const DEFAULT_VERBOSE: bool = true;
pub const DEFAULT_PROGRESS: bool = true;
pub const DEFAULT_IGNORE_ERRORS: bool = false;
pub const DEFAULT_CREATE_BEFORE_UPDATE: bool = false;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOptions {
    pub delete: bool,
    pub verbose: bool,
    pub progress: bool,
    pub ignore_errors: bool,
    pub create_before_update: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        SyncOptions {
            delete: DEFAULT_DELETE,
            verbose: DEFAULT_VERBOSE,
            progress: DEFAULT_PROGRESS,
            ignore_errors: DEFAULT_IGNORE_ERRORS,
            create_before_update: DEFAULT_CREATE_BEFORE_UPDATE,
        }
    }
}

impl SyncOptions {
    pub fn from_config(config: &DeployConfig) -> Self {
        let defaults = SyncOptions::default();
        SyncOptions {
            delete: config.delete.unwrap_or(defaults.delete),
            verbose: config.verbose.unwrap_or(defaults.verbose),
            progress: config.progress.unwrap_or(defaults.progress),
            ignore_errors: config.ignore_errors.unwrap_or(defaults.ignore_errors),
            create_before_update: config
                .create_before_update
                .unwrap_or(defaults.create_before_update),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_for_unset_flags() {
        let options = SyncOptions::from_config(&DeployConfig::default());
        assert!(options.delete);
        assert!(options.verbose);
        assert!(options.progress);
        assert!(!options.ignore_errors);
        assert!(!options.create_before_update);
    }

    #[test]
    fn explicit_false_is_preserved() {
        let config = DeployConfig {
            delete: Some(false),
            verbose: Some(false),
            progress: Some(false),
            ..Default::default()
        };
        let options = SyncOptions::from_config(&config);
        assert!(!options.delete);
        assert!(!options.verbose);
        assert!(!options.progress);
    }

    #[test]
    fn explicit_true_is_preserved() {
        let config = DeployConfig {
            ignore_errors: Some(true),
            create_before_update: Some(true),
            ..Default::default()
        };
        let options = SyncOptions::from_config(&config);
        assert!(options.ignore_errors);
        assert!(options.create_before_update);
    }
}
