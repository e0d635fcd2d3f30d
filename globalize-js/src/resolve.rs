use crate::ctx::FileCtx;
use crate::err::GlobalizeError;
use crate::namespace::dotted;
use crate::namespace::member_chain;
use crate::namespace::namespace_segments;
use crate::namespace::root_relative_path;
use crate::namespace::strip_extensions;
use std::path::Path;
use tree_js::ast::expr::lit::LitStrExpr;
use tree_js::ast::expr::BinaryExpr;
use tree_js::ast::expr::ComputedMemberExpr;
use tree_js::ast::expr::Expr;
use tree_js::ast::node::Node;
use tree_js::loc::Loc;
use tree_js::operator::OperatorName;

/// Expression that reads the binding `name` (or the whole module namespace)
/// of the module at `module_path`, for use in value position.
///
/// Externally-mapped modules resolve straight to their configured global; a
/// default binding from an external additionally tolerates both
/// ES-module-shaped and plain-object globals by preferring an explicit
/// `default` property: `this.<Alias>["default"] || this.<Alias>`. Internal
/// modules resolve to `this.<globalName>.<segments>` — a default binding is
/// the module's namespace object itself, never a fabricated `default` member.
pub fn resolve_global(
  ctx: &FileCtx,
  module_path: &Path,
  name: Option<&str>,
  wildcard: bool,
  loc: Loc,
) -> Result<Node<Expr>, GlobalizeError> {
  let stripped = strip_extensions(module_path);
  if let Some(alias) = external_alias(ctx, &stripped) {
    return Ok(external_binding(&alias, name, wildcard, loc));
  }
  let segments = internal_segments(ctx, &stripped, if wildcard { None } else { name })?;
  Ok(member_chain(&segments, loc))
}

/// A global binding as an assignable member path plus the dotted identity the
/// ledger tracks it under. Used for export targets, which are always plain
/// member paths (no interop `||`).
pub struct GlobalTarget {
  pub key: String,
  pub expr: Node<Expr>,
}

pub fn global_target(
  ctx: &FileCtx,
  module_path: &Path,
  name: Option<&str>,
  loc: Loc,
) -> Result<GlobalTarget, GlobalizeError> {
  let stripped = strip_extensions(module_path);
  let segments = match external_alias(ctx, &stripped) {
    Some(alias) => {
      let mut segments = vec!["this".to_string(), alias];
      segments.extend(name.map(str::to_string));
      segments
    }
    None => internal_segments(ctx, &stripped, name)?,
  };
  Ok(GlobalTarget {
    key: dotted(&segments),
    expr: member_chain(&segments, loc),
  })
}

fn external_alias(ctx: &FileCtx, stripped: &Path) -> Option<String> {
  ctx
    .options
    .externals
    .get(stripped.to_string_lossy().as_ref())
    .cloned()
}

fn internal_segments(
  ctx: &FileCtx,
  stripped: &Path,
  name: Option<&str>,
) -> Result<Vec<String>, GlobalizeError> {
  let relative = root_relative_path(ctx, stripped)?;
  let mut segments = vec!["this".to_string(), ctx.options.global_name.clone()];
  segments.extend(namespace_segments(&relative));
  segments.extend(name.map(str::to_string));
  Ok(segments)
}

fn external_binding(alias: &str, name: Option<&str>, wildcard: bool, loc: Loc) -> Node<Expr> {
  let this_alias = |loc| member_chain(&["this".to_string(), alias.to_string()], loc);
  if wildcard {
    return this_alias(loc);
  }
  if let Some(name) = name {
    let mut segments = vec!["this".to_string(), alias.to_string()];
    segments.push(name.to_string());
    return member_chain(&segments, loc);
  }
  // Default binding: prefer an explicit `default` property, fall back to the
  // global itself.
  let default_prop = Node::new(loc, ComputedMemberExpr {
    object: this_alias(loc),
    member: Node::new(loc, LitStrExpr {
      value: "default".to_string(),
    })
    .wrap(Expr::LitStr),
  })
  .wrap(Expr::ComputedMember);
  Node::new(loc, BinaryExpr {
    operator: OperatorName::LogicalOr,
    left: default_prop,
    right: this_alias(loc),
  })
  .wrap(Expr::Binary)
}
