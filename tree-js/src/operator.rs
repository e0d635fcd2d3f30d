use serde::Serialize;

// The only binary forms this grammar carries: plain assignment, and the `||`
// used by idempotent namespace initializers and the external default-interop
// check.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum OperatorName {
  Assignment,
  LogicalOr,
}
