use std::error::Error;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;
use tree_js::ast::node::Node;
use tree_js::ast::stx::TopLevel;

mod emitter;
mod expr;
mod stmt;

pub use emitter::Emitter;
pub use expr::emit_expr;
pub use stmt::emit_stmt;
pub use stmt::emit_top_level;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PrintError {
  // Module declarations (and declarations still carrying export flags) have
  // no plain-script spelling; they must be rewritten away before printing.
  Unsupported(&'static str),
}

impl Display for PrintError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      PrintError::Unsupported(what) => write!(f, "cannot print {}", what),
    }
  }
}

impl Error for PrintError {}

pub type PrintResult = Result<(), PrintError>;

/// Renders the tree as canonical JavaScript text: one statement per line,
/// two-space indentation, double-quoted strings.
pub fn print(top_level: &Node<TopLevel>) -> Result<String, PrintError> {
  let mut em = Emitter::new();
  emit_top_level(&mut em, top_level)?;
  Ok(em.finish())
}
