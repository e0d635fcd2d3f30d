use crate::ctx::FileCtx;
use crate::err::GlobalizeError;
use itertools::Itertools;
use std::env;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use tracing::trace;
use tree_js::ast::expr::lit::LitObjExpr;
use tree_js::ast::expr::BinaryExpr;
use tree_js::ast::expr::Expr;
use tree_js::ast::expr::MemberExpr;
use tree_js::ast::expr::ThisExpr;
use tree_js::ast::node::Node;
use tree_js::ast::stmt::ExprStmt;
use tree_js::ast::stmt::Stmt;
use tree_js::loc::Loc;
use tree_js::operator::OperatorName;

/// Removes trailing extensions from the final path segment until none
/// remains: `foo/bar.soy.js` -> `foo/bar`. Directory segments are kept.
pub fn strip_extensions(path: &Path) -> PathBuf {
  let mut path = path.to_path_buf();
  while path.extension().is_some() {
    path.set_extension("");
  }
  path
}

/// Resolves `target` against the directory of the current file, then returns
/// it relative to the namespace root. Pure path arithmetic; no filesystem
/// access, so the target does not need to exist.
pub fn root_relative_path(ctx: &FileCtx, target: &Path) -> Result<PathBuf, GlobalizeError> {
  let filename = ctx.filename()?;
  let dir = filename.parent().unwrap_or_else(|| Path::new(""));
  let resolved = normalize(&absolute(dir.join(target)));
  let root = normalize(&absolute(ctx.namespace_root().to_path_buf()));
  Ok(relative_to(&root, &resolved))
}

/// Identifier segments of a root-relative path, one per level. The final
/// segment is the module's own binding.
pub fn namespace_segments(relative_path: &Path) -> Vec<String> {
  relative_path
    .components()
    .map(|component| component.as_os_str().to_string_lossy().into_owned())
    .collect()
}

/// Dotted ledger identity of a segment chain, e.g. `"this.myGlobal.foo"`.
pub fn dotted(segments: &[String]) -> String {
  segments.iter().join(".")
}

/// Member-expression chain for a segment list whose first segment is always
/// the enclosing `this`.
pub fn member_chain(segments: &[String], loc: Loc) -> Node<Expr> {
  let mut expr = Node::new(loc, ThisExpr {}).wrap(Expr::This);
  for segment in &segments[1..] {
    expr = Node::new(loc, MemberExpr {
      left: expr,
      right: segment.clone(),
    })
    .wrap(Expr::Member);
  }
  expr
}

/// One `X = X || {};` statement per namespace level of `target` below the
/// global root, excluding the module's own binding level, skipping levels the
/// file already initialized. Emitted levels are recorded in the ledger before
/// returning, so a later export sharing a prefix adds nothing.
pub fn namespace_initializers(
  ctx: &mut FileCtx,
  target: &Path,
  loc: Loc,
) -> Result<Vec<Node<Stmt>>, GlobalizeError> {
  let relative = root_relative_path(ctx, target)?;
  let mut segments = namespace_segments(&relative);
  segments.pop();

  let mut prefix = vec!["this".to_string(), ctx.options.global_name.clone()];
  let mut out = Vec::new();
  for segment in segments {
    prefix.push(segment);
    let key = dotted(&prefix);
    if ctx.created.has(&key) {
      continue;
    }
    trace!(path = %key, "initializing namespace level");
    ctx.created.record(key);
    out.push(initializer_stmt(&prefix, loc));
  }
  Ok(out)
}

// `<prefix> = <prefix> || {};`
fn initializer_stmt(prefix: &[String], loc: Loc) -> Node<Stmt> {
  let or = Node::new(loc, BinaryExpr {
    operator: OperatorName::LogicalOr,
    left: member_chain(prefix, loc),
    right: Node::new(loc, LitObjExpr::empty()).wrap(Expr::LitObj),
  })
  .wrap(Expr::Binary);
  Node::new(loc, BinaryExpr {
    operator: OperatorName::Assignment,
    left: member_chain(prefix, loc),
    right: or,
  })
  .wrap(Expr::Binary)
  .wrap(|expr| ExprStmt { expr })
  .wrap(Stmt::Expr)
}

fn absolute(path: PathBuf) -> PathBuf {
  if path.is_absolute() {
    path
  } else {
    env::current_dir()
      .unwrap_or_else(|_| PathBuf::from("."))
      .join(path)
  }
}

// Lexical normalization: folds `.` away and resolves `..` against the
// preceding segment without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
  let mut out = PathBuf::new();
  for component in path.components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => {
        out.pop();
      }
      other => out.push(other),
    }
  }
  out
}

fn relative_to(base: &Path, target: &Path) -> PathBuf {
  let base: Vec<Component> = base.components().collect();
  let target: Vec<Component> = target.components().collect();
  let common = base
    .iter()
    .zip(target.iter())
    .take_while(|(a, b)| a == b)
    .count();
  let mut out = PathBuf::new();
  for _ in common..base.len() {
    out.push("..");
  }
  for component in &target[common..] {
    out.push(component);
  }
  out
}

#[cfg(test)]
mod tests {
  use super::dotted;
  use super::namespace_initializers;
  use super::namespace_segments;
  use super::root_relative_path;
  use super::strip_extensions;
  use crate::ctx::FileCtx;
  use crate::err::GlobalizeError;
  use crate::options::GlobalizeOptions;
  use std::path::Path;
  use std::path::PathBuf;
  use tree_js::loc::Loc;

  fn ctx_for<'a>(options: &'a GlobalizeOptions, filename: &str) -> FileCtx<'a> {
    FileCtx::new(options, Some(Path::new(filename)))
  }

  #[test]
  fn strips_compound_extensions() {
    assert_eq!(strip_extensions(Path::new("bar.js")), PathBuf::from("bar"));
    assert_eq!(
      strip_extensions(Path::new("foo/bar.soy.js")),
      PathBuf::from("foo/bar")
    );
    assert_eq!(strip_extensions(Path::new("./foo")), PathBuf::from("./foo"));
  }

  #[test]
  fn resolves_relative_to_the_importing_file() {
    let options = GlobalizeOptions::new("g").with_namespace_root("/project");
    let ctx = ctx_for(&options, "/project/foo/bar.js");
    assert_eq!(
      root_relative_path(&ctx, Path::new("./baz")),
      Ok(PathBuf::from("foo/baz"))
    );
    assert_eq!(
      root_relative_path(&ctx, Path::new("../shared/util")),
      Ok(PathBuf::from("shared/util"))
    );
  }

  #[test]
  fn requires_a_filename() {
    let options = GlobalizeOptions::new("g").with_namespace_root("/project");
    let ctx = FileCtx::new(&options, None);
    assert_eq!(
      root_relative_path(&ctx, Path::new("./baz")),
      Err(GlobalizeError::MissingFilename)
    );
  }

  #[test]
  fn splits_segments_in_order() {
    assert_eq!(
      namespace_segments(Path::new("foo/bar/baz")),
      vec!["foo", "bar", "baz"]
    );
    assert_eq!(dotted(&["this".to_string(), "g".to_string()]), "this.g");
  }

  #[test]
  fn initializers_skip_recorded_levels() {
    let options = GlobalizeOptions::new("myGlobal").with_namespace_root("/project");
    let mut ctx = ctx_for(&options, "/project/foo/bar/baz.js");
    let first = namespace_initializers(&mut ctx, Path::new("baz"), Loc::synthetic()).unwrap();
    assert_eq!(first.len(), 2);
    assert!(ctx.created.has("this.myGlobal.foo"));
    assert!(ctx.created.has("this.myGlobal.foo.bar"));
    let again = namespace_initializers(&mut ctx, Path::new("baz"), Loc::synthetic()).unwrap();
    assert!(again.is_empty());
  }

  #[test]
  fn the_global_root_is_never_initialized() {
    let options = GlobalizeOptions::new("myGlobal").with_namespace_root("/project");
    let mut ctx = ctx_for(&options, "/project/bar.js");
    let init = namespace_initializers(&mut ctx, Path::new("bar"), Loc::synthetic()).unwrap();
    assert!(init.is_empty());
    assert!(!ctx.created.has("this.myGlobal"));
  }
}
