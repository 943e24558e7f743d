//! Configuration management for Asymptote
//!
//! Handles loading, validating, and saving the analyzer settings: the
//! result name, the input-size ladder, the keyword tables the line
//! classifier matches against, and the ignore globs used when walking
//! directories.

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{AsymptoteError, Result};

const CONFIG_FILE_NAMES: [&str; 2] = [".asymptote.json", "asymptote.json"];

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
  /// Name stamped on every result
  #[serde(default = "default_name")]
  pub name: String,
  /// Input sizes the growth curves are sampled at
  #[serde(default = "default_input_sizes")]
  pub input_sizes: Vec<u64>,
  /// Line prefixes and markers used by the classifier
  #[serde(default)]
  pub keywords: KeywordSet,
  /// Record call sites in the structural tree so self-calls can be seen
  #[serde(default)]
  pub track_self_calls: bool,
  /// Paths to skip while walking directories (glob patterns)
  #[serde(default = "default_ignore")]
  pub ignore: Vec<String>,
}

/// Keyword tables for line classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordSet {
  #[serde(default = "default_loop_prefixes")]
  pub loop_prefixes: Vec<String>,
  #[serde(default = "default_function_prefixes")]
  pub function_prefixes: Vec<String>,
  #[serde(default = "default_allocation_markers")]
  pub allocation_markers: Vec<String>,
}

// Default value functions
fn default_name() -> String {
  "User Code".to_string()
}
fn default_input_sizes() -> Vec<u64> {
  crate::curves::INPUT_SIZES.to_vec()
}
fn default_loop_prefixes() -> Vec<String> {
  vec!["for".to_string()]
}
fn default_function_prefixes() -> Vec<String> {
  vec!["function".to_string()]
}
fn default_allocation_markers() -> Vec<String> {
  vec!["Array.from".to_string(), "Array(".to_string(), "new".to_string()]
}
fn default_ignore() -> Vec<String> {
  vec![
    "**/node_modules/**".to_string(),
    "**/target/**".to_string(),
    "**/build/**".to_string(),
    "**/dist/**".to_string(),
    "**/.git/**".to_string(),
  ]
}

impl Default for KeywordSet {
  fn default() -> Self {
    Self {
      loop_prefixes: default_loop_prefixes(),
      function_prefixes: default_function_prefixes(),
      allocation_markers: default_allocation_markers(),
    }
  }
}

impl Default for AnalyzerConfig {
  fn default() -> Self {
    Self {
      name: default_name(),
      input_sizes: default_input_sizes(),
      keywords: KeywordSet::default(),
      track_self_calls: false,
      ignore: default_ignore(),
    }
  }
}

impl AnalyzerConfig {
  /// Load configuration from a file
  pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let config: AnalyzerConfig = serde_json::from_str(&content)?;
    config.validate()?;
    tracing::debug!(path = %path.as_ref().display(), "loaded configuration");
    Ok(config)
  }

  /// Load configuration from the current directory, then the user config
  /// directory, or fall back to defaults
  pub fn load() -> Result<Self> {
    for path in Self::search_paths() {
      if path.exists() {
        return Self::load_from_file(path);
      }
    }

    tracing::debug!("no configuration file found, using defaults");
    Ok(AnalyzerConfig::default())
  }

  fn search_paths() -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = CONFIG_FILE_NAMES.iter().map(PathBuf::from).collect();
    if let Some(config_dir) = dirs::config_dir() {
      paths.push(config_dir.join("asymptote").join("config.json"));
    }
    paths
  }

  /// Save configuration to a file
  pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
    let content = serde_json::to_string_pretty(self)?;
    std::fs::write(path, content)?;
    Ok(())
  }

  /// Reject settings the pipeline cannot work with
  pub fn validate(&self) -> Result<()> {
    if self.input_sizes.is_empty() {
      return Err(AsymptoteError::invalid_config("input_sizes must not be empty"));
    }
    if self.input_sizes.contains(&0) {
      return Err(AsymptoteError::invalid_config("input_sizes must be positive"));
    }
    if self.keywords.loop_prefixes.iter().any(String::is_empty)
      || self.keywords.function_prefixes.iter().any(String::is_empty)
      || self.keywords.allocation_markers.iter().any(String::is_empty)
    {
      return Err(AsymptoteError::invalid_config("keywords must not contain empty strings"));
    }
    Ok(())
  }

  /// Compile the ignore patterns into a matcher
  pub fn ignore_matcher(&self) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in &self.ignore {
      let glob = Glob::new(pattern).map_err(|e| AsymptoteError::glob(pattern, e.to_string()))?;
      builder.add(glob);
    }
    builder.build().map_err(|e| AsymptoteError::glob(self.ignore.join(", "), e.to_string()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;
  use tempfile::TempDir;

  #[test]
  fn test_config_default() {
    let config = AnalyzerConfig::default();
    assert_eq!(config.name, "User Code");
    assert_eq!(config.input_sizes, vec![10, 20, 50, 100, 200, 500, 1000]);
    assert!(!config.track_self_calls);
    assert_eq!(config.keywords.loop_prefixes, vec!["for"]);
    assert_eq!(config.keywords.function_prefixes, vec!["function"]);
    assert!(config.keywords.allocation_markers.contains(&"Array.from".to_string()));
  }

  #[test]
  fn test_config_load_nonexistent_file() {
    let result = AnalyzerConfig::load_from_file(Path::new("nonexistent.json"));
    assert!(matches!(result, Err(AsymptoteError::Io(_))));
  }

  #[test]
  fn test_config_load_invalid_json() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("invalid.json");
    fs::write(&config_path, "{ invalid json }").unwrap();

    let result = AnalyzerConfig::load_from_file(&config_path);
    assert!(matches!(result, Err(AsymptoteError::Json(_))));
  }

  #[test]
  fn test_config_load_partial_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("partial.json");

    let config_content = r#"{
            "name": "bubble sort",
            "keywords": { "loop_prefixes": ["for", "loop"] }
        }"#;
    fs::write(&config_path, config_content).unwrap();

    let config = AnalyzerConfig::load_from_file(&config_path).unwrap();
    assert_eq!(config.name, "bubble sort");
    assert_eq!(config.keywords.loop_prefixes, vec!["for", "loop"]);
    // Other fields should have defaults
    assert_eq!(config.keywords.function_prefixes, vec!["function"]);
    assert_eq!(config.input_sizes.len(), 7);
    assert!(!config.ignore.is_empty());
  }

  #[test]
  fn test_config_rejects_empty_ladder() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("empty.json");
    fs::write(&config_path, r#"{ "input_sizes": [] }"#).unwrap();

    let result = AnalyzerConfig::load_from_file(&config_path);
    assert!(matches!(result, Err(AsymptoteError::InvalidConfig { .. })));
  }

  #[test]
  fn test_validate_rejects_zero_size_and_empty_keyword() {
    let config = AnalyzerConfig { input_sizes: vec![0, 10], ..AnalyzerConfig::default() };
    assert!(config.validate().is_err());

    let mut config = AnalyzerConfig::default();
    config.keywords.loop_prefixes.push(String::new());
    assert!(config.validate().is_err());

    assert!(AnalyzerConfig::default().validate().is_ok());
  }

  #[test]
  fn test_config_load_and_save() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("test_config.json");

    let original = AnalyzerConfig {
      name: "matrix".to_string(),
      input_sizes: vec![1, 2, 4, 8],
      track_self_calls: true,
      ignore: vec!["vendor/**".to_string()],
      ..AnalyzerConfig::default()
    };

    original.save_to_file(&config_path).unwrap();
    let loaded = AnalyzerConfig::load_from_file(&config_path).unwrap();

    assert_eq!(original, loaded);
  }

  #[test]
  fn test_ignore_matcher() {
    let matcher = AnalyzerConfig::default().ignore_matcher().unwrap();

    assert!(matcher.is_match("node_modules/lodash/index.js"));
    assert!(matcher.is_match("web/node_modules/lodash/index.js"));
    assert!(matcher.is_match("target/debug/build.rs"));

    assert!(!matcher.is_match("src/sort.js"));
    assert!(!matcher.is_match("lib/utils.ts"));
  }

  #[test]
  fn test_ignore_matcher_invalid_pattern() {
    let config = AnalyzerConfig { ignore: vec!["src/[".to_string()], ..AnalyzerConfig::default() };
    assert!(matches!(config.ignore_matcher(), Err(AsymptoteError::Glob { .. })));
  }
}
