//! Structural parsing
//!
//! Builds a shallow nesting tree from source text using line prefixes and
//! bare closing braces. No grammar is involved: a `}` closes whatever scope
//! is innermost, regardless of which keyword opened it.

use serde::Serialize;

use crate::classifier::{LineClassifier, LineTags};

/// Node of the structural tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum StructuralNode {
  Program { body: Vec<StructuralNode> },
  LoopStatement { body: Vec<StructuralNode> },
  FunctionDeclaration { name: Option<String>, body: Vec<StructuralNode> },
  AllocationMarker { count: usize },
  /// Only produced when call tracking is enabled
  CallSite { name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
  Program,
  LoopStatement,
  FunctionDeclaration,
  AllocationMarker,
  CallSite,
}

impl StructuralNode {
  pub fn program() -> Self {
    Self::Program { body: Vec::new() }
  }

  pub fn kind(&self) -> NodeKind {
    match self {
      Self::Program { .. } => NodeKind::Program,
      Self::LoopStatement { .. } => NodeKind::LoopStatement,
      Self::FunctionDeclaration { .. } => NodeKind::FunctionDeclaration,
      Self::AllocationMarker { .. } => NodeKind::AllocationMarker,
      Self::CallSite { .. } => NodeKind::CallSite,
    }
  }

  /// Children in textual order; leaves have none
  pub fn children(&self) -> &[StructuralNode] {
    match self {
      Self::Program { body } | Self::LoopStatement { body } | Self::FunctionDeclaration { body, .. } => body,
      Self::AllocationMarker { .. } | Self::CallSite { .. } => &[],
    }
  }

  fn body_mut(&mut self) -> Option<&mut Vec<StructuralNode>> {
    match self {
      Self::Program { body } | Self::LoopStatement { body } | Self::FunctionDeclaration { body, .. } => Some(body),
      Self::AllocationMarker { .. } | Self::CallSite { .. } => None,
    }
  }

  fn push_child(&mut self, child: StructuralNode) {
    // Leaves are never on the open-scope stack
    if let Some(body) = self.body_mut() {
      body.push(child);
    }
  }

  /// Total number of nodes of `kind` in this subtree, self included
  pub fn count(&self, kind: NodeKind) -> usize {
    let mut total = 0;
    let mut pending = vec![self];
    while let Some(node) = pending.pop() {
      total += usize::from(node.kind() == kind);
      pending.extend(node.children());
    }
    total
  }
}

/// Frees nested scopes from a flat worklist so deep trees do not exhaust
/// the stack on drop
impl Drop for StructuralNode {
  fn drop(&mut self) {
    let Some(body) = self.body_mut() else {
      return;
    };
    let mut pending = std::mem::take(body);
    while let Some(mut node) = pending.pop() {
      if let Some(children) = node.body_mut() {
        pending.append(children);
      }
    }
  }
}

/// Open scopes, innermost last. The root is always at the bottom.
struct ScopeStack {
  open: Vec<StructuralNode>,
}

impl ScopeStack {
  fn new() -> Self {
    Self { open: vec![StructuralNode::program()] }
  }

  fn open(&mut self, node: StructuralNode) {
    self.open.push(node);
  }

  fn append(&mut self, leaf: StructuralNode) {
    if let Some(top) = self.open.last_mut() {
      top.push_child(leaf);
    }
  }

  /// Close the innermost scope. Closing the root is a no-op.
  fn close(&mut self) -> bool {
    if self.open.len() <= 1 {
      return false;
    }
    if let Some(closed) = self.open.pop() {
      self.append(closed);
    }
    true
  }

  /// Fold every still-open scope into its parent and return the root
  fn finish(mut self) -> StructuralNode {
    while self.close() {}
    self.open.pop().unwrap_or_else(StructuralNode::program)
  }
}

/// Parse with the default keyword tables and no call tracking
pub fn parse(source: &str) -> StructuralNode {
  parse_with(source, &LineClassifier::default())
}

pub fn parse_with(source: &str, classifier: &LineClassifier) -> StructuralNode {
  let mut stack = ScopeStack::new();
  let mut ignored_closes = 0usize;
  let mut line_count = 0usize;

  for line in source.split('\n').map(str::trim) {
    line_count += 1;
    let tags = classifier.classify(line);
    if !apply(&mut stack, tags) {
      ignored_closes += 1;
    }
  }

  let unclosed = stack.open.len() - 1;
  let root = stack.finish();

  tracing::debug!(
    lines = line_count,
    loops = root.count(NodeKind::LoopStatement),
    functions = root.count(NodeKind::FunctionDeclaration),
    allocations = root.count(NodeKind::AllocationMarker),
    unclosed,
    ignored_closes,
    "parsed structural tree"
  );

  root
}

/// Apply one line's effects: scope pushes, then leaves, then the close.
/// Returns false when a closing brace had no open scope to close.
fn apply(stack: &mut ScopeStack, tags: LineTags) -> bool {
  if tags.loop_start {
    stack.open(StructuralNode::LoopStatement { body: Vec::new() });
  }
  if tags.function_start {
    stack.open(StructuralNode::FunctionDeclaration { name: tags.function_name, body: Vec::new() });
  }

  if tags.allocation {
    stack.append(StructuralNode::AllocationMarker { count: 1 });
  }
  for name in tags.calls {
    stack.append(StructuralNode::CallSite { name });
  }

  if tags.block_end {
    return stack.close();
  }
  true
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::KeywordSet;

  fn loop_node(body: Vec<StructuralNode>) -> StructuralNode {
    StructuralNode::LoopStatement { body }
  }

  #[test]
  fn test_single_loop() {
    let root = parse("for (let i = 0; i < n; i++) {\n}\n");
    assert_eq!(root, StructuralNode::Program { body: vec![loop_node(vec![])] });
  }

  #[test]
  fn test_nested_loops() {
    let source = "for (let i = 0; i < n; i++) {\n  for (let j = 0; j < n; j++) {\n    sum += i * j;\n  }\n}";
    let root = parse(source);
    assert_eq!(root, StructuralNode::Program { body: vec![loop_node(vec![loop_node(vec![])])] });
  }

  #[test]
  fn test_sequential_loops_are_siblings() {
    let source = "for (a of xs) {\n}\nfor (b of ys) {\n}";
    let root = parse(source);
    assert_eq!(root.children().len(), 2);
    assert!(root.children().iter().all(|c| c.kind() == NodeKind::LoopStatement && c.children().is_empty()));
  }

  #[test]
  fn test_function_with_allocation() {
    let source = "function build(n) {\n  const out = new Array(n);\n  return out;\n}";
    let root = parse(source);
    assert_eq!(
      root,
      StructuralNode::Program {
        body: vec![StructuralNode::FunctionDeclaration {
          name: Some("build".to_string()),
          body: vec![StructuralNode::AllocationMarker { count: 1 }],
        }]
      }
    );
  }

  #[test]
  fn test_allocation_on_loop_line_goes_into_loop() {
    let root = parse("for (const x of new Array(n)) {\n}");
    let loop_stmt = &root.children()[0];
    assert_eq!(loop_stmt.children(), &[StructuralNode::AllocationMarker { count: 1 }]);
  }

  #[test]
  fn test_insertion_order_is_textual() {
    let source = "const a = new Map();\nfor (k in a) {\n}\nconst b = new Set();";
    let kinds: Vec<NodeKind> = parse(source).children().iter().map(StructuralNode::kind).collect();
    assert_eq!(kinds, vec![NodeKind::AllocationMarker, NodeKind::LoopStatement, NodeKind::AllocationMarker]);
  }

  #[test]
  fn test_extra_closing_braces_are_ignored() {
    let root = parse("}\n}\nfor (;;) {\n}\n}");
    assert_eq!(root.kind(), NodeKind::Program);
    assert_eq!(root.children().len(), 1);
  }

  #[test]
  fn test_unclosed_scopes_still_attached() {
    let root = parse("for (;;) {\n  for (;;) {");
    assert_eq!(root.count(NodeKind::LoopStatement), 2);
    assert_eq!(root.children().len(), 1);
  }

  #[test]
  fn test_braces_close_regardless_of_opener() {
    // The `if` never opened a scope, so its brace closes the loop early
    let source = "for (;;) {\n  if (x) {\n  }\n  for (;;) {\n  }\n}";
    let root = parse(source);
    assert_eq!(root.children().len(), 2);
  }

  #[test]
  fn test_empty_source() {
    assert_eq!(parse(""), StructuralNode::program());
    assert_eq!(parse("just some prose\nwith no code"), StructuralNode::program());
  }

  #[test]
  fn test_call_sites_when_tracking() {
    let classifier = LineClassifier::new(KeywordSet::default(), true);
    let source = "function fact(n) {\n  return n * fact(n - 1);\n}";
    let root = parse_with(source, &classifier);

    let function = &root.children()[0];
    assert_eq!(function.children(), &[StructuralNode::CallSite { name: "fact".to_string() }]);
  }

  #[test]
  fn test_deep_nesting_counts_and_drops() {
    let depth = 50_000;
    let source = format!("{}{}", "for (;;) {\n".repeat(depth), "}\n".repeat(depth));
    let root = parse(&source);

    assert_eq!(root.count(NodeKind::LoopStatement), depth);
    assert_eq!(root.count(NodeKind::Program), 1);
    drop(root);
  }

  #[test]
  fn test_serializes_with_type_tag() {
    let json = serde_json::to_value(parse("for (;;) {\n}")).unwrap();
    assert_eq!(json["type"], "Program");
    assert_eq!(json["body"][0]["type"], "LoopStatement");
  }
}
