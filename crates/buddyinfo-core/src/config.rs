//! Plugin configuration.

use std::path::PathBuf;

/// Kernel file with per-zone free block counts.
pub const DEFAULT_BUDDYINFO_PATH: &str = "/proc/buddyinfo";

/// Prefix prepended to every metric key and graph name by the host agent.
pub const DEFAULT_KEY_PREFIX: &str = "buddyinfo";

/// How much the plugin reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunMode {
    /// Summary percentages and average sizes only.
    #[default]
    Compact,
    /// Additionally defines the raw per-column page counts graph.
    Verbose,
}

impl RunMode {
    pub fn from_verbose(verbose: bool) -> Self {
        if verbose {
            RunMode::Verbose
        } else {
            RunMode::Compact
        }
    }

    pub fn is_verbose(self) -> bool {
        self == RunMode::Verbose
    }
}

/// Configuration for a plugin run.
#[derive(Debug, Clone)]
pub struct PluginConfig {
    /// Path to the buddyinfo file. Default: `/proc/buddyinfo`.
    pub path: PathBuf,
    /// Metric key prefix. Default: `buddyinfo`.
    pub prefix: String,
    pub mode: RunMode,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_BUDDYINFO_PATH),
            prefix: DEFAULT_KEY_PREFIX.to_string(),
            mode: RunMode::Compact,
        }
    }
}

impl PluginConfig {
    /// Creates a new PluginConfig with custom values.
    ///
    /// An empty path falls back to [`DEFAULT_BUDDYINFO_PATH`].
    pub fn new(path: impl Into<PathBuf>, prefix: impl Into<String>, mode: RunMode) -> Self {
        let path = path.into();
        let path = if path.as_os_str().is_empty() {
            PathBuf::from(DEFAULT_BUDDYINFO_PATH)
        } else {
            path
        };

        Self {
            path,
            prefix: prefix.into(),
            mode,
        }
    }

    /// Joins the prefix and a key the way the host agent names metrics.
    pub fn prefixed(&self, key: &str) -> String {
        match (self.prefix.is_empty(), key.is_empty()) {
            (true, _) => key.to_string(),
            (false, true) => self.prefix.clone(),
            (false, false) => format!("{}.{}", self.prefix, key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PluginConfig::default();
        assert_eq!(config.path, PathBuf::from("/proc/buddyinfo"));
        assert_eq!(config.prefix, "buddyinfo");
        assert_eq!(config.mode, RunMode::Compact);
    }

    #[test]
    fn test_empty_path_falls_back_to_default() {
        let config = PluginConfig::new("", "custom", RunMode::Verbose);
        assert_eq!(config.path, PathBuf::from(DEFAULT_BUDDYINFO_PATH));
        assert_eq!(config.prefix, "custom");
        assert!(config.mode.is_verbose());
    }

    #[test]
    fn test_prefixed() {
        let config = PluginConfig::default();
        assert_eq!(config.prefixed("average_size"), "buddyinfo.average_size");
        assert_eq!(config.prefixed(""), "buddyinfo");

        let bare = PluginConfig::new("/tmp/buddyinfo", "", RunMode::Compact);
        assert_eq!(bare.prefixed("average_size"), "average_size");
    }

    #[test]
    fn test_run_mode_from_verbose() {
        assert_eq!(RunMode::from_verbose(true), RunMode::Verbose);
        assert_eq!(RunMode::from_verbose(false), RunMode::Compact);
        assert!(!RunMode::default().is_verbose());
    }
}
