//! Runtime configuration

use std::path::PathBuf;

/// Environment variable naming the data directory
pub const DATA_DIR_ENV: &str = "TASKBOARD_DATA_DIR";

/// Data directory used when [`DATA_DIR_ENV`] is not set
pub const DEFAULT_DATA_DIR: &str = ".taskboard-data";

/// Board configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding one JSON file per collection
    pub data_dir: PathBuf,
}

impl Config {
    /// Create a configuration rooted at `data_dir`
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Read the configuration from the environment
    pub fn from_env() -> Self {
        let data_dir = std::env::var(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR));
        Self { data_dir }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_data_dir() {
        assert_eq!(Config::default().data_dir, PathBuf::from(".taskboard-data"));
    }

    #[test]
    fn test_new_config() {
        let config = Config::new("/tmp/board");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/board"));
    }
}
