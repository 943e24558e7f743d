//! Big-O labels
//!
//! A label is an opaque classification token. Consumers compare and display
//! it but never parse it back into a growth model.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const CONSTANT: &str = "O(1)";
pub const LOGARITHMIC: &str = "O(log n)";
pub const LINEAR: &str = "O(n)";
pub const LINEARITHMIC: &str = "O(n log n)";
pub const QUADRATIC: &str = "O(n²)";
pub const CUBIC: &str = "O(n³)";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComplexityLabel(String);

impl ComplexityLabel {
  pub fn constant() -> Self {
    Self(CONSTANT.to_string())
  }

  pub fn logarithmic() -> Self {
    Self(LOGARITHMIC.to_string())
  }

  pub fn linear() -> Self {
    Self(LINEAR.to_string())
  }

  /// Label for a loop nest of the given depth
  pub fn from_loop_depth(depth: usize) -> Self {
    match depth {
      0 => Self::constant(),
      1 => Self::linear(),
      2 => Self(QUADRATIC.to_string()),
      3 => Self(CUBIC.to_string()),
      d => Self::power(d),
    }
  }

  /// `O(n^k)` written out literally, even for k = 1
  pub fn power(exponent: usize) -> Self {
    Self(format!("O(n^{exponent})"))
  }

  /// Wraps the whole label in a log factor without simplifying,
  /// so `O(n)` becomes `O(O(n) log n)`.
  pub fn with_log_factor(&self) -> Self {
    Self(format!("O({} log n)", self.0))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for ComplexityLabel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for ComplexityLabel {
  fn from(label: &str) -> Self {
    Self(label.to_string())
  }
}

impl From<String> for ComplexityLabel {
  fn from(label: String) -> Self {
    Self(label)
  }
}

impl PartialEq<&str> for ComplexityLabel {
  fn eq(&self, other: &&str) -> bool {
    self.0 == *other
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_from_loop_depth() {
    assert_eq!(ComplexityLabel::from_loop_depth(0), "O(1)");
    assert_eq!(ComplexityLabel::from_loop_depth(1), "O(n)");
    assert_eq!(ComplexityLabel::from_loop_depth(2), "O(n²)");
    assert_eq!(ComplexityLabel::from_loop_depth(3), "O(n³)");
    assert_eq!(ComplexityLabel::from_loop_depth(4), "O(n^4)");
    assert_eq!(ComplexityLabel::from_loop_depth(7), "O(n^7)");
  }

  #[test]
  fn test_log_factor_is_textual() {
    assert_eq!(ComplexityLabel::linear().with_log_factor(), "O(O(n) log n)");
    assert_eq!(ComplexityLabel::from_loop_depth(2).with_log_factor(), "O(O(n²) log n)");
  }

  #[test]
  fn test_power_keeps_exponent_one() {
    assert_eq!(ComplexityLabel::power(1), "O(n^1)");
  }

  #[test]
  fn test_serializes_as_plain_string() {
    let json = serde_json::to_string(&ComplexityLabel::linear()).unwrap();
    assert_eq!(json, "\"O(n)\"");
  }
}
