//! Heuristic Big-O estimation from source text
//!
//! A line-oriented structural parser builds a shallow loop/function tree,
//! an inferencer turns nesting depth and allocation counts into Big-O
//! labels, and a sampler produces growth curves for charting.

pub mod analysis;
pub mod classifier;
pub mod config;
pub mod curves;
pub mod error;
pub mod inference;
pub mod label;
pub mod parser;
pub mod patterns;

pub use analysis::{assemble, assemble_with, AnalysisResult, TimeData};
pub use config::AnalyzerConfig;
pub use error::{AsymptoteError, Result};
pub use inference::{infer, TimeComplexity};
pub use label::ComplexityLabel;
pub use parser::{parse, StructuralNode};
pub use patterns::{scan, PatternFlags};
