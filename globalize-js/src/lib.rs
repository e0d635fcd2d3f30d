use crate::ctx::FileCtx;
use crate::rewrite::classify;
use crate::rewrite::rewrite_top_level;
use std::mem;
use std::path::Path;
use tracing::debug;
use tree_js::ast::expr::CallArg;
use tree_js::ast::expr::CallExpr;
use tree_js::ast::expr::Expr;
use tree_js::ast::expr::FuncExpr;
use tree_js::ast::expr::MemberExpr;
use tree_js::ast::expr::ThisExpr;
use tree_js::ast::func::Func;
use tree_js::ast::node::Node;
use tree_js::ast::stmt::ExprStmt;
use tree_js::ast::stmt::Stmt;
use tree_js::ast::stx::TopLevel;
use tree_js::loc::Loc;

mod ctx;
mod err;
mod ledger;
mod namespace;
mod options;
mod resolve;
mod rewrite;

pub use err::GlobalizeError;
pub use options::GlobalizeOptions;

/// Rewrites a module-shaped file into an equivalent plain script: imports
/// become local bindings read off a global namespace object, exports become
/// assignments into it, and the whole body is wrapped in a closure invoked
/// with the enclosing `this` so top-level declarations stay contained.
///
/// The tree is rewritten in place. On error the file must be considered
/// unusable; no partially-rewritten tree is a valid output.
///
/// # Examples
///
/// ```
/// use globalize_js::{globalize, GlobalizeOptions};
/// use std::path::Path;
/// use tree_js::ast::expr::{Expr, IdExpr};
/// use tree_js::ast::node::Node;
/// use tree_js::ast::stmt::{ExportDefaultExprStmt, Stmt};
/// use tree_js::ast::stx::TopLevel;
///
/// let options = GlobalizeOptions::new("myGlobal");
/// let export = Node::synthetic(IdExpr { name: "foo".to_string() })
///   .wrap(Expr::Id)
///   .wrap(|expression| ExportDefaultExprStmt { expression })
///   .wrap(Stmt::ExportDefaultExpr);
/// let mut top_level = Node::synthetic(TopLevel { body: vec![export] });
/// globalize(&options, Some(Path::new("foo/bar.js")), &mut top_level).unwrap();
/// // The whole body is now a single `(function() { ... }).call(this);`.
/// assert_eq!(top_level.stx.body.len(), 1);
/// ```
pub fn globalize(
  options: &GlobalizeOptions,
  filename: Option<&Path>,
  top_level: &mut Node<TopLevel>,
) -> Result<(), GlobalizeError> {
  let mut ctx = FileCtx::new(options, filename);
  let flags = classify(top_level);
  debug!(
    file = ?filename,
    imports = flags.has_import,
    named_exports = flags.has_named_export,
    default_exports = flags.has_default_export,
    wildcard_exports = flags.has_wildcard_export,
    "classified top level"
  );
  if flags.has_named_export && flags.has_default_export {
    return Err(GlobalizeError::MixedExports);
  }
  if options.transform_only_modules && !flags.uses_modules() {
    debug!(file = ?filename, "no module syntax; leaving file untouched");
    return Ok(());
  }
  rewrite_top_level(&mut ctx, top_level)?;
  wrap_in_closure(top_level);
  Ok(())
}

// `(function() { <body> }).call(this);` — `call(this)` rather than a bare
// IIFE so namespace writes inside the body land on the enclosing global
// object even in strict-mode hosts.
fn wrap_in_closure(top_level: &mut Node<TopLevel>) {
  let body = mem::take(&mut top_level.stx.body);
  let loc = body
    .iter()
    .fold(None::<Loc>, |acc, stmt| match acc {
      None => Some(stmt.loc),
      Some(mut loc) => {
        loc.extend(stmt.loc);
        Some(loc)
      }
    })
    .unwrap_or_else(Loc::synthetic);

  let func = Node::new(loc, FuncExpr {
    name: None,
    func: Node::new(loc, Func {
      async_: false,
      generator: false,
      parameters: Vec::new(),
      body,
    }),
  })
  .wrap(Expr::Func);
  let callee = Node::new(loc, MemberExpr {
    left: func,
    right: "call".to_string(),
  })
  .wrap(Expr::Member);
  let this_arg = Node::new(loc, CallArg {
    spread: false,
    value: Node::new(loc, ThisExpr {}).wrap(Expr::This),
  });
  let call = Node::new(loc, CallExpr {
    callee,
    arguments: vec![this_arg],
  })
  .wrap(Expr::Call);
  top_level.stx.body = vec![call.wrap(|expr| ExprStmt { expr }).wrap(Stmt::Expr)];
}
