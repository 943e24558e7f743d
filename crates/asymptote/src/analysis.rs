//! Result assembly
//!
//! Runs the structural parser, the inferencer and the pattern scanner over
//! one piece of source text and packs everything the presentation layer
//! needs into a single [`AnalysisResult`].

use serde::{Deserialize, Serialize};

use crate::classifier::LineClassifier;
use crate::config::AnalyzerConfig;
use crate::curves;
use crate::inference::{infer, TimeComplexity};
use crate::label::{self, ComplexityLabel};
use crate::parser::parse_with;
use crate::patterns::{scan, PatternFlags};

/// Sampled growth curves, aligned positionally with the input sizes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeData {
  pub best: Vec<f64>,
  pub average: Vec<f64>,
  pub worst: Vec<f64>,
}

/// Everything known about one analysed snippet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
  pub name: String,
  pub time_complexity: TimeComplexity,
  pub space_complexity: ComplexityLabel,
  pub source_code: String,
  pub description: String,
  pub input_sizes: Vec<u64>,
  pub time_data: TimeData,
}

/// Analyse with the default configuration
pub fn assemble(source: &str) -> AnalysisResult {
  assemble_with(source, &AnalyzerConfig::default())
}

pub fn assemble_with(source: &str, config: &AnalyzerConfig) -> AnalysisResult {
  let classifier = LineClassifier::new(config.keywords.clone(), config.track_self_calls);
  let tree = parse_with(source, &classifier);
  let inference = infer(&tree);
  let patterns = scan(source);

  let space_complexity = reconcile_space(inference.space, &patterns);
  let description = describe(&inference.time, &space_complexity, &patterns);

  let input_sizes = config.input_sizes.clone();
  let time_data = TimeData {
    best: curves::generate(&inference.time.best, &input_sizes),
    average: curves::generate(&inference.time.average, &input_sizes),
    worst: curves::generate(&inference.time.worst, &input_sizes),
  };

  AnalysisResult {
    name: config.name.clone(),
    time_complexity: inference.time,
    space_complexity,
    source_code: source.to_string(),
    description,
    input_sizes,
    time_data,
  }
}

/// Array creation, then map/set construction, each overwriting the label
fn reconcile_space(inferred: ComplexityLabel, patterns: &PatternFlags) -> ComplexityLabel {
  let mut space = inferred;
  if patterns.has_array_creation {
    space = ComplexityLabel::linear();
  }
  if patterns.has_hash_map {
    space = ComplexityLabel::linear();
  }
  space
}

fn explain(complexity: &ComplexityLabel) -> &'static str {
  match complexity.as_str() {
    label::CONSTANT => "Constant time, independent of input size",
    label::LOGARITHMIC => "Logarithmic growth, typically seen in divide-and-conquer algorithms",
    label::LINEAR => "Linear growth with input size",
    label::LINEARITHMIC => "Linearithmic growth, common in efficient sorting algorithms",
    label::QUADRATIC => "Quadratic growth, typically seen in nested iterations",
    _ => "Complexity grows with input size",
  }
}

fn describe(time: &TimeComplexity, space: &ComplexityLabel, patterns: &PatternFlags) -> String {
  let mut description = String::from("Analysis Results:\n\nTime Complexity:\n");

  let cases = [("Best Case", &time.best), ("Average Case", &time.average), ("Worst Case", &time.worst)];
  let case_lines: Vec<String> =
    cases.iter().map(|(case, label)| format!("• {case}: {label} - {}", explain(label))).collect();
  description.push_str(&case_lines.join("\n"));

  description.push_str(&format!("\n\nSpace Complexity: {space} - {}", explain(space)));

  if patterns.has_array_creation {
    description.push_str("\n\nNote: Additional space is used for array creation.");
  }
  if patterns.has_hash_map {
    description.push_str("\n\nNote: Hash map/set structures require additional memory.");
  }
  if patterns.has_recursion {
    description.push_str("\n\nNote: Recursive calls add to the space complexity through the call stack.");
  }

  description
}
