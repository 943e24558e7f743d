//! Raw-text pattern scanning
//!
//! Works on the source text directly, independent of the structural tree.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static ARRAY_CREATION: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"new Array|Array\(|=\s*\[").expect("array pattern compiles"));
static HASH_MAP: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"new Map|new Set|\{\s*\}").expect("map pattern compiles"));

const FUNCTION_KEYWORD: &str = "function";

/// Idioms found in the raw text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternFlags {
  pub has_array_creation: bool,
  pub has_hash_map: bool,
  pub has_recursion: bool,
}

pub fn scan(source: &str) -> PatternFlags {
  let flags = PatternFlags {
    has_array_creation: ARRAY_CREATION.is_match(source),
    has_hash_map: HASH_MAP.is_match(source),
    has_recursion: mentions_first_function_again(source),
  };
  tracing::trace!(?flags, "scanned source patterns");
  flags
}

/// Presumed name of the first declared function: whatever sits between the
/// first `function` keyword and the next `(`
fn first_function_name(source: &str) -> Option<&str> {
  let (_, rest) = source.split_once(FUNCTION_KEYWORD)?;
  let name = rest.split('(').next().unwrap_or(rest).trim();
  (!name.is_empty()).then_some(name)
}

fn mentions_first_function_again(source: &str) -> bool {
  first_function_name(source).is_some_and(|name| source.matches(name).count() > 1)
}
