//! Complexity inference
//!
//! One depth-first walk over the structural tree collects loop nesting,
//! allocation counts, and a recursion flag, which are then mapped onto
//! Big-O labels.

use serde::{Deserialize, Serialize};

use crate::label::ComplexityLabel;
use crate::parser::StructuralNode;

/// Best, average and worst case time labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeComplexity {
  pub best: ComplexityLabel,
  pub average: ComplexityLabel,
  pub worst: ComplexityLabel,
}

impl TimeComplexity {
  pub fn uniform(label: ComplexityLabel) -> Self {
    Self { best: label.clone(), average: label.clone(), worst: label }
  }

  /// Call-stack adjustment applied when the tree shows recursion
  fn with_recursion(self) -> Self {
    Self {
      best: ComplexityLabel::logarithmic(),
      average: self.average.with_log_factor(),
      worst: self.worst.with_log_factor(),
    }
  }
}

/// Traversal state for a single inference call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Accumulators {
  pub max_nested_loop_depth: usize,
  pub current_depth: usize,
  pub has_recursion: bool,
  pub total_allocations: usize,
}

/// Work item for the traversal; loops get an exit frame so the depth
/// comes back down once their body is done
enum Step<'a> {
  Enter(&'a StructuralNode),
  LeaveLoop,
}

impl Accumulators {
  fn enter<'a>(&mut self, node: &'a StructuralNode, work: &mut Vec<Step<'a>>) {
    match node {
      StructuralNode::LoopStatement { .. } => {
        self.current_depth += 1;
        self.max_nested_loop_depth = self.max_nested_loop_depth.max(self.current_depth);
        work.push(Step::LeaveLoop);
      }
      StructuralNode::FunctionDeclaration { name, body } => {
        if calls_itself(name.as_deref(), body) {
          self.has_recursion = true;
        }
      }
      StructuralNode::AllocationMarker { count } => {
        self.total_allocations += count;
      }
      StructuralNode::Program { .. } | StructuralNode::CallSite { .. } => {}
    }
    // Reversed so children are visited in textual order
    work.extend(node.children().iter().rev().map(Step::Enter));
  }
}

/// Whether any immediate child is a call to the function's own name.
/// Without call tracking the tree holds no call sites, so this is false.
fn calls_itself(name: Option<&str>, body: &[StructuralNode]) -> bool {
  let Some(name) = name else {
    return false;
  };
  body.iter().any(|child| matches!(child, StructuralNode::CallSite { name: callee } if callee == name))
}

/// Outcome of one inference pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inference {
  pub time: TimeComplexity,
  pub space: ComplexityLabel,
  pub accumulators: Accumulators,
}

/// Walk the tree once and collect the raw counters
pub fn accumulate(root: &StructuralNode) -> Accumulators {
  let mut acc = Accumulators::default();
  let mut work = vec![Step::Enter(root)];
  while let Some(step) = work.pop() {
    match step {
      Step::Enter(node) => acc.enter(node, &mut work),
      Step::LeaveLoop => acc.current_depth -= 1,
    }
  }
  acc
}

pub fn infer(root: &StructuralNode) -> Inference {
  let accumulators = accumulate(root);

  let mut time = TimeComplexity::uniform(ComplexityLabel::from_loop_depth(accumulators.max_nested_loop_depth));
  if accumulators.has_recursion {
    time = time.with_recursion();
  }

  let space = if accumulators.has_recursion {
    ComplexityLabel::logarithmic()
  } else if accumulators.total_allocations == 0 {
    ComplexityLabel::constant()
  } else {
    ComplexityLabel::power(accumulators.total_allocations)
  };

  tracing::debug!(
    max_depth = accumulators.max_nested_loop_depth,
    allocations = accumulators.total_allocations,
    recursion = accumulators.has_recursion,
    worst = %time.worst,
    space = %space,
    "inferred complexity"
  );

  Inference { time, space, accumulators }
}
