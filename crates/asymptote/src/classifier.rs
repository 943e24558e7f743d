//! Line classification
//!
//! Decides which structural tags apply to a single trimmed source line.
//! Tags are evaluated independently, so one line can carry several.

use regex::Regex;
use std::sync::LazyLock;

use crate::config::KeywordSet;

static CALL_PATTERN: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\b([A-Za-z_][A-Za-z0-9_]*)\s*\(").expect("call pattern compiles"));

/// Words that look like calls when followed by `(` but never are
const NON_CALL_WORDS: &[&str] = &[
  "if", "for", "while", "switch", "catch", "function", "return", "typeof", "await", "do", "else",
];

/// Tags found on one line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineTags {
  pub loop_start: bool,
  pub function_start: bool,
  /// Declared name, when the line starts a named function
  pub function_name: Option<String>,
  pub allocation: bool,
  pub block_end: bool,
  /// Potential call names, only collected when call tracking is on
  pub calls: Vec<String>,
}

impl LineTags {
  pub fn is_empty(&self) -> bool {
    !self.loop_start && !self.function_start && !self.allocation && !self.block_end && self.calls.is_empty()
  }
}

/// Pure per-line classifier over a keyword table
#[derive(Debug, Clone, Default)]
pub struct LineClassifier {
  keywords: KeywordSet,
  track_calls: bool,
}

impl LineClassifier {
  pub fn new(keywords: KeywordSet, track_calls: bool) -> Self {
    Self { keywords, track_calls }
  }

  /// Classify one line. The line is trimmed here as well, so callers may
  /// pass raw text.
  pub fn classify(&self, line: &str) -> LineTags {
    let line = line.trim();

    let loop_start = starts_with_any(line, &self.keywords.loop_prefixes);
    let function_prefix = self.keywords.function_prefixes.iter().find(|p| line.starts_with(p.as_str()));
    let function_name = function_prefix.and_then(|prefix| declared_name(&line[prefix.len()..]));
    let allocation = self.keywords.allocation_markers.iter().any(|marker| line.contains(marker.as_str()));
    let block_end = line == "}";

    let calls = if self.track_calls {
      call_names(line, function_name.as_deref())
    } else {
      Vec::new()
    };

    LineTags {
      loop_start,
      function_start: function_prefix.is_some(),
      function_name,
      allocation,
      block_end,
      calls,
    }
  }
}

fn starts_with_any(line: &str, prefixes: &[String]) -> bool {
  prefixes.iter().any(|prefix| line.starts_with(prefix.as_str()))
}

/// Name between the function keyword and the parameter list, if it is a
/// plain identifier
fn declared_name(rest: &str) -> Option<String> {
  let head = rest.split('(').next()?;
  let name = head.trim().trim_start_matches('*').trim();

  let is_identifier = !name.is_empty()
    && name.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '$')
    && !name.starts_with(|c: char| c.is_ascii_digit());

  is_identifier.then(|| name.to_string())
}

fn call_names(line: &str, declared: Option<&str>) -> Vec<String> {
  CALL_PATTERN
    .captures_iter(line)
    .filter_map(|caps| caps.get(1))
    .map(|m| m.as_str())
    .filter(|name| !NON_CALL_WORDS.contains(name))
    .filter(|name| Some(*name) != declared)
    .map(str::to_string)
    .collect()
}
