//! Error types for the fallible edges of the crate
//!
//! The analysis pipeline itself is total. Only configuration handling and
//! file access can fail.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AsymptoteError {
  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),

  #[error("Invalid JSON: {0}")]
  Json(#[from] serde_json::Error),

  #[error("Invalid ignore pattern '{pattern}': {message}")]
  Glob { pattern: String, message: String },

  #[error("Invalid configuration: {message}")]
  InvalidConfig { message: String },

  #[error("Failed to read {}: {source}", .path.display())]
  SourceRead { path: PathBuf, source: std::io::Error },
}

impl AsymptoteError {
  pub fn glob(pattern: impl Into<String>, message: impl Into<String>) -> Self {
    Self::Glob { pattern: pattern.into(), message: message.into() }
  }

  pub fn invalid_config(message: impl Into<String>) -> Self {
    Self::InvalidConfig { message: message.into() }
  }

  pub fn source_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    Self::SourceRead { path: path.into(), source }
  }
}

pub type Result<T> = std::result::Result<T, AsymptoteError>;
