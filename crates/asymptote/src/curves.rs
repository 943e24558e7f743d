//! Sample growth curves for plotting
//!
//! Only the five simple labels have their own curve. Everything else,
//! including cubic, higher powers and composed log factors, is drawn as a
//! straight line.

use crate::label::{self, ComplexityLabel};

/// Input sizes the curves are sampled at by default
pub const INPUT_SIZES: [u64; 7] = [10, 20, 50, 100, 200, 500, 1000];

/// One sample per input size, in the same order
pub fn generate(label: &ComplexityLabel, input_sizes: &[u64]) -> Vec<f64> {
  let growth = growth_fn(label.as_str());
  input_sizes.iter().map(|&n| growth(n as f64)).collect()
}

fn growth_fn(name: &str) -> fn(f64) -> f64 {
  match name {
    label::CONSTANT => |_: f64| 1.0,
    label::LOGARITHMIC => f64::log2,
    label::LINEAR => |n: f64| n,
    label::LINEARITHMIC => |n: f64| n * n.log2(),
    label::QUADRATIC => |n: f64| n * n,
    other => {
      tracing::trace!(label = other, "no dedicated curve, sampling linearly");
      |n: f64| n
    }
  }
}
