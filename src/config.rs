//! Configuration file support.
//!
//! This module provides functionality for loading and parsing configuration
//! files (`.smarten.toml`) that control which normalizations run and which
//! files the CLI picks up when none are given on the command line.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::Options;

/// The default configuration file name.
pub const CONFIG_FILE_NAME: &str = ".smarten.toml";

/// Configuration for the normalizer.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Glob patterns for files to include (default: empty, meaning all files
    /// must be specified on the command line).
    pub include: Vec<String>,

    /// Glob patterns for files to exclude (default: empty).
    pub exclude: Vec<String>,

    /// Which transformations run.
    pub transforms: TransformsConfig,
}

/// Transformation toggles.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct TransformsConfig {
    /// Rewrite straight quotes into typographic quotes and primes
    /// (default: true).
    pub smart_quotes: bool,

    /// Re-capitalize input as proper-noun text (default: false; only
    /// meaningful for name-like input).
    pub capitalize_names: bool,
}

impl Default for TransformsConfig {
    fn default() -> Self {
        Self {
            smart_quotes: true,
            capitalize_names: false,
        }
    }
}

impl Config {
    /// Parse a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load configuration from a file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml(&content).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
    }

    /// Discover and load configuration by searching up the directory tree.
    ///
    /// Starting from `start_dir`, searches for `.smarten.toml` in each parent
    /// directory until the filesystem root is reached. Returns `None` if no
    /// configuration file is found.
    pub fn discover(start_dir: &Path) -> Result<Option<(PathBuf, Self)>, ConfigError> {
        let mut current = start_dir.to_path_buf();
        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                let config = Self::from_file(&config_path)?;
                return Ok(Some((config_path, config)));
            }
            if !current.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// The normalization options this configuration selects.
    pub fn options(&self) -> Options {
        Options {
            smart_quotes: self.transforms.smart_quotes,
            capitalize_names: self.transforms.capitalize_names,
        }
    }

    /// Collect files matching the include patterns, excluding those matching
    /// exclude patterns.
    ///
    /// The `base_dir` is used as the starting point for glob pattern matching.
    /// Returns an empty list if no include patterns are configured.
    pub fn collect_files(&self, base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
        use glob::{MatchOptions, glob_with};

        if self.include.is_empty() {
            return Ok(Vec::new());
        }

        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: false,
            require_literal_leading_dot: false,
        };

        let mut files = Vec::new();

        for pattern in &self.include {
            let full_pattern = base_dir.join(pattern);
            let pattern_str = full_pattern.to_string_lossy();
            let matches = glob_with(&pattern_str, options)
                .map_err(|e| ConfigError::Glob(pattern.clone(), e))?;

            for entry in matches {
                let path = entry.map_err(ConfigError::GlobIo)?;
                if path.is_file() {
                    files.push(path);
                }
            }
        }

        files.sort();
        files.dedup();

        if !self.exclude.is_empty() {
            let exclude_patterns: Vec<glob::Pattern> = self
                .exclude
                .iter()
                .filter_map(|p| {
                    let full_pattern = base_dir.join(p);
                    glob::Pattern::new(&full_pattern.to_string_lossy()).ok()
                })
                .collect();

            files.retain(|path| {
                let path_str = path.to_string_lossy();
                !exclude_patterns
                    .iter()
                    .any(|pattern| pattern.matches(&path_str))
            });
        }

        Ok(files)
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading the configuration file.
    Io(PathBuf, std::io::Error),
    /// Error parsing the TOML configuration.
    Parse(PathBuf, toml::de::Error),
    /// Error parsing a glob pattern.
    Glob(String, glob::PatternError),
    /// I/O error during glob iteration.
    GlobIo(glob::GlobError),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, err) => {
                write!(f, "failed to read {}: {}", path.display(), err)
            }
            ConfigError::Parse(path, err) => {
                write!(f, "failed to parse {}: {}", path.display(), err)
            }
            ConfigError::Glob(pattern, err) => {
                write!(f, "invalid glob pattern '{}': {}", pattern, err)
            }
            ConfigError::GlobIo(err) => {
                write!(f, "error reading file: {}", err)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(_, err) => Some(err),
            ConfigError::Parse(_, err) => Some(err),
            ConfigError::Glob(_, err) => Some(err),
            ConfigError::GlobIo(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.include.is_empty());
        assert!(config.exclude.is_empty());
        assert!(config.transforms.smart_quotes);
        assert!(!config.transforms.capitalize_names);
    }

    #[test]
    fn test_parse_empty_toml() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_transforms() {
        let config = Config::from_toml(
            r#"
[transforms]
smart_quotes = false
capitalize_names = true
"#,
        )
        .unwrap();
        assert!(!config.transforms.smart_quotes);
        assert!(config.transforms.capitalize_names);
    }

    #[test]
    fn test_options_reflect_transforms() {
        let config = Config::from_toml("[transforms]\ncapitalize_names = true").unwrap();
        let options = config.options();
        assert!(options.smart_quotes);
        assert!(options.capitalize_names);
    }

    #[test]
    fn test_parse_include_and_exclude() {
        let config = Config::from_toml(
            r#"
include = ["**/*.txt"]
exclude = ["vendor/**"]
"#,
        )
        .unwrap();
        assert_eq!(config.include, vec!["**/*.txt"]);
        assert_eq!(config.exclude, vec!["vendor/**"]);
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = Config::from_toml("include = 5");
        assert!(result.is_err());
    }

    #[test]
    fn test_discover_no_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = Config::discover(temp_dir.path()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_discover_config_in_current_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&config_path, "[transforms]\ncapitalize_names = true").unwrap();

        let (path, config) = Config::discover(temp_dir.path()).unwrap().unwrap();
        assert_eq!(path, config_path);
        assert!(config.transforms.capitalize_names);
    }

    #[test]
    fn test_discover_config_in_parent_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let sub_dir = temp_dir.path().join("subdir").join("nested");
        std::fs::create_dir_all(&sub_dir).unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&config_path, "include = [\"*.txt\"]").unwrap();

        let (path, config) = Config::discover(&sub_dir).unwrap().unwrap();
        assert_eq!(path, config_path);
        assert_eq!(config.include, vec!["*.txt"]);
    }

    #[test]
    fn test_collect_files_with_include() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("a.txt"), "one").unwrap();
        std::fs::write(temp_dir.path().join("b.txt"), "two").unwrap();
        std::fs::write(temp_dir.path().join("c.rs"), "fn main() {}").unwrap();

        let config = Config::from_toml(r#"include = ["*.txt"]"#).unwrap();
        let files = config.collect_files(temp_dir.path()).unwrap();

        assert_eq!(files.len(), 2);
        assert!(files.iter().any(|p| p.ends_with("a.txt")));
        assert!(files.iter().any(|p| p.ends_with("b.txt")));
    }

    #[test]
    fn test_collect_files_with_exclude() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(temp_dir.path().join("vendor")).unwrap();
        std::fs::write(temp_dir.path().join("a.txt"), "one").unwrap();
        std::fs::write(temp_dir.path().join("vendor").join("b.txt"), "two").unwrap();

        let config = Config::from_toml(
            r#"
include = ["**/*.txt"]
exclude = ["vendor/**"]
"#,
        )
        .unwrap();
        let files = config.collect_files(temp_dir.path()).unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("a.txt"));
    }

    #[test]
    fn test_collect_files_empty_include() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("a.txt"), "one").unwrap();

        let config = Config::default();
        let files = config.collect_files(temp_dir.path()).unwrap();

        assert!(files.is_empty());
    }
}
