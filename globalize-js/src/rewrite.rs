use crate::ctx::FileCtx;
use crate::err::GlobalizeError;
use crate::namespace::namespace_initializers;
use crate::resolve::global_target;
use crate::resolve::resolve_global;
use crate::resolve::GlobalTarget;
use std::path::Path;
use tracing::trace;
use tree_js::ast::expr::lit::LitObjExpr;
use tree_js::ast::expr::pat::ClassOrFuncName;
use tree_js::ast::expr::BinaryExpr;
use tree_js::ast::expr::Expr;
use tree_js::ast::expr::IdExpr;
use tree_js::ast::import_export::ExportName;
use tree_js::ast::import_export::ExportNames;
use tree_js::ast::import_export::ImportName;
use tree_js::ast::import_export::ImportNames;
use tree_js::ast::node::Node;
use tree_js::ast::stmt::decl::ClassDecl;
use tree_js::ast::stmt::decl::FuncDecl;
use tree_js::ast::stmt::decl::PatDecl;
use tree_js::ast::stmt::decl::VarDecl;
use tree_js::ast::stmt::decl::VarDeclMode;
use tree_js::ast::stmt::decl::VarDeclarator;
use tree_js::ast::stmt::ExportDefaultExprStmt;
use tree_js::ast::stmt::ExportListStmt;
use tree_js::ast::stmt::ExprStmt;
use tree_js::ast::stmt::ImportStmt;
use tree_js::ast::stmt::Stmt;
use tree_js::ast::stx::TopLevel;
use tree_js::loc::Loc;
use tree_js::operator::OperatorName;
use tree_js::uid::UidGenerator;

/// What the pre-scan saw at the top level, before any rewriting.
#[derive(Clone, Copy, Debug, Default)]
pub struct ModuleFlags {
  pub has_import: bool,
  pub has_named_export: bool,
  pub has_default_export: bool,
  pub has_wildcard_export: bool,
}

impl ModuleFlags {
  pub fn uses_modules(&self) -> bool {
    self.has_import || self.has_named_export || self.has_default_export || self.has_wildcard_export
  }
}

pub fn classify(top_level: &Node<TopLevel>) -> ModuleFlags {
  let mut flags = ModuleFlags::default();
  for stmt in &top_level.stx.body {
    match stmt.stx.as_ref() {
      Stmt::Import(_) => flags.has_import = true,
      Stmt::ExportDefaultExpr(_) => flags.has_default_export = true,
      Stmt::ExportList(list) => match &list.stx.names {
        ExportNames::All(_) => flags.has_wildcard_export = true,
        ExportNames::Specific(_) => flags.has_named_export = true,
      },
      Stmt::VarDecl(decl) if decl.stx.export => flags.has_named_export = true,
      Stmt::FunctionDecl(decl) => {
        if decl.stx.export_default {
          flags.has_default_export = true;
        } else if decl.stx.export {
          flags.has_named_export = true;
        }
      }
      Stmt::ClassDecl(decl) => {
        if decl.stx.export_default {
          flags.has_default_export = true;
        } else if decl.stx.export {
          flags.has_named_export = true;
        }
      }
      _ => {}
    }
  }
  flags
}

/// Replaces every import/export declaration in source order, leaving all
/// other statements untouched.
pub fn rewrite_top_level(
  ctx: &mut FileCtx,
  top_level: &mut Node<TopLevel>,
) -> Result<(), GlobalizeError> {
  let mut uids = UidGenerator::for_top_level(top_level);
  let body = std::mem::take(&mut top_level.stx.body);
  let mut out = Vec::with_capacity(body.len());
  for stmt in body {
    let loc = stmt.loc;
    match *stmt.stx {
      Stmt::Import(import) => rewrite_import(ctx, import, &mut out)?,
      Stmt::ExportDefaultExpr(export) => rewrite_export_default_expr(ctx, export, &mut out)?,
      Stmt::ExportList(list) => rewrite_export_list(ctx, list, &mut out)?,
      Stmt::FunctionDecl(decl) if decl.stx.export_default => {
        rewrite_export_default_func(ctx, decl, &mut uids, &mut out)?
      }
      Stmt::FunctionDecl(decl) if decl.stx.export => {
        rewrite_export_func(ctx, decl, &mut uids, &mut out)?
      }
      Stmt::ClassDecl(decl) if decl.stx.export_default => {
        rewrite_export_default_class(ctx, decl, &mut uids, &mut out)?
      }
      Stmt::ClassDecl(decl) if decl.stx.export => {
        rewrite_export_class(ctx, decl, &mut uids, &mut out)?
      }
      Stmt::VarDecl(decl) if decl.stx.export => rewrite_export_var(ctx, decl, &mut out)?,
      other => out.push(Node::new(loc, other)),
    }
  }
  top_level.stx.body = out;
  Ok(())
}

/// One `var <local> = <global>;` per specifier. A side-effect-only import
/// produces nothing.
fn rewrite_import(
  ctx: &mut FileCtx,
  import: Node<ImportStmt>,
  out: &mut Vec<Node<Stmt>>,
) -> Result<(), GlobalizeError> {
  let loc = import.loc;
  let ImportStmt {
    default,
    names,
    module,
  } = *import.stx;
  let module = Path::new(&module);
  if let Some(binding) = default {
    let value = resolve_global(ctx, module, None, false, loc)?;
    out.push(var_binding(loc, binding, value));
  }
  match names {
    Some(ImportNames::All(binding)) => {
      let value = resolve_global(ctx, module, None, true, loc)?;
      out.push(var_binding(loc, binding, value));
    }
    Some(ImportNames::Specific(specifiers)) => {
      for specifier in specifiers {
        let ImportName { importable, alias } = *specifier.stx;
        let value = resolve_global(ctx, module, Some(importable.as_str()), false, loc)?;
        out.push(var_binding(loc, alias, value));
      }
    }
    None => {}
  }
  Ok(())
}

fn rewrite_export_default_expr(
  ctx: &mut FileCtx,
  export: Node<ExportDefaultExprStmt>,
  out: &mut Vec<Node<Stmt>>,
) -> Result<(), GlobalizeError> {
  let loc = export.loc;
  let ExportDefaultExprStmt { expression } = *export.stx;
  assign_own_namespace(ctx, loc, expression, out)
}

fn rewrite_export_default_func(
  ctx: &mut FileCtx,
  mut decl: Node<FuncDecl>,
  uids: &mut UidGenerator,
  out: &mut Vec<Node<Stmt>>,
) -> Result<(), GlobalizeError> {
  let loc = decl.loc;
  decl.stx.export_default = false;
  let name = ensure_func_name(&mut decl, uids);
  out.push(decl.wrap(Stmt::FunctionDecl));
  assign_own_namespace(ctx, loc, id_expr(&name, loc), out)
}

fn rewrite_export_default_class(
  ctx: &mut FileCtx,
  mut decl: Node<ClassDecl>,
  uids: &mut UidGenerator,
  out: &mut Vec<Node<Stmt>>,
) -> Result<(), GlobalizeError> {
  let loc = decl.loc;
  decl.stx.export_default = false;
  let name = ensure_class_name(&mut decl, uids);
  out.push(decl.wrap(Stmt::ClassDecl));
  assign_own_namespace(ctx, loc, id_expr(&name, loc), out)
}

fn rewrite_export_func(
  ctx: &mut FileCtx,
  mut decl: Node<FuncDecl>,
  uids: &mut UidGenerator,
  out: &mut Vec<Node<Stmt>>,
) -> Result<(), GlobalizeError> {
  let loc = decl.loc;
  decl.stx.export = false;
  let name = ensure_func_name(&mut decl, uids);
  out.push(decl.wrap(Stmt::FunctionDecl));
  export_declared_names(ctx, loc, &[name], out)
}

fn rewrite_export_class(
  ctx: &mut FileCtx,
  mut decl: Node<ClassDecl>,
  uids: &mut UidGenerator,
  out: &mut Vec<Node<Stmt>>,
) -> Result<(), GlobalizeError> {
  let loc = decl.loc;
  decl.stx.export = false;
  let name = ensure_class_name(&mut decl, uids);
  out.push(decl.wrap(Stmt::ClassDecl));
  export_declared_names(ctx, loc, &[name], out)
}

fn rewrite_export_var(
  ctx: &mut FileCtx,
  mut decl: Node<VarDecl>,
  out: &mut Vec<Node<Stmt>>,
) -> Result<(), GlobalizeError> {
  let loc = decl.loc;
  decl.stx.export = false;
  let names: Vec<String> = decl
    .stx
    .declarators
    .iter()
    .map(|declarator| declarator.pattern.stx.pat.stx.name.clone())
    .collect();
  out.push(decl.wrap(Stmt::VarDecl));
  export_declared_names(ctx, loc, &names, out)
}

fn rewrite_export_list(
  ctx: &mut FileCtx,
  list: Node<ExportListStmt>,
  out: &mut Vec<Node<Stmt>>,
) -> Result<(), GlobalizeError> {
  let loc = list.loc;
  let ExportListStmt { names, from } = *list.stx;
  let specifiers = match names {
    // `export * from "m"` is dropped: a foreign module's members cannot be
    // enumerated without loading it.
    ExportNames::All(_) => return Ok(()),
    ExportNames::Specific(specifiers) => specifiers,
  };
  let stem = ctx.file_stem()?;
  append_own_placeholder(ctx, &stem, loc, out)?;
  for specifier in specifiers {
    let ExportName { exportable, alias } = *specifier.stx;
    let value = match &from {
      Some(source) => resolve_global(
        ctx,
        Path::new(source),
        Some(exportable.as_str()),
        false,
        loc,
      )?,
      None => id_expr(exportable.as_str(), loc),
    };
    let target = global_target(ctx, &stem, Some(&alias.stx.name), loc)?;
    assign_to_global(ctx, target, value, out);
  }
  Ok(())
}

// Initializers for the file's namespace prefix, then the ledger-guarded
// assignment of the file's own binding.
fn assign_own_namespace(
  ctx: &mut FileCtx,
  loc: Loc,
  value: Node<Expr>,
  out: &mut Vec<Node<Stmt>>,
) -> Result<(), GlobalizeError> {
  let stem = ctx.file_stem()?;
  out.extend(namespace_initializers(ctx, &stem, loc)?);
  let own = global_target(ctx, &stem, None, loc)?;
  assign_to_global(ctx, own, value, out);
  Ok(())
}

// Shared tail of every named-export form: initializers, the `= {}`
// placeholder for the module object, then one leaf assignment per name.
fn export_declared_names(
  ctx: &mut FileCtx,
  loc: Loc,
  names: &[String],
  out: &mut Vec<Node<Stmt>>,
) -> Result<(), GlobalizeError> {
  let stem = ctx.file_stem()?;
  append_own_placeholder(ctx, &stem, loc, out)?;
  for name in names {
    let target = global_target(ctx, &stem, Some(name), loc)?;
    assign_to_global(ctx, target, id_expr(name, loc), out);
  }
  Ok(())
}

fn append_own_placeholder(
  ctx: &mut FileCtx,
  stem: &Path,
  loc: Loc,
  out: &mut Vec<Node<Stmt>>,
) -> Result<(), GlobalizeError> {
  out.extend(namespace_initializers(ctx, stem, loc)?);
  let own = global_target(ctx, stem, None, loc)?;
  let empty = Node::new(loc, LitObjExpr::empty()).wrap(Expr::LitObj);
  assign_to_global(ctx, own, empty, out);
  Ok(())
}

/// Ledger-guarded `<target> = <value>;` — a path already assigned in this
/// file emits nothing.
fn assign_to_global(
  ctx: &mut FileCtx,
  target: GlobalTarget,
  value: Node<Expr>,
  out: &mut Vec<Node<Stmt>>,
) {
  if ctx.created.has(&target.key) {
    trace!(path = %target.key, "global already assigned; skipping");
    return;
  }
  trace!(path = %target.key, "assigning global");
  ctx.created.record(target.key);
  let loc = target.expr.loc;
  let assign = Node::new(loc, BinaryExpr {
    operator: OperatorName::Assignment,
    left: target.expr,
    right: value,
  })
  .wrap(Expr::Binary);
  out.push(assign.wrap(|expr| ExprStmt { expr }).wrap(Stmt::Expr));
}

fn ensure_func_name(decl: &mut Node<FuncDecl>, uids: &mut UidGenerator) -> String {
  if let Some(name) = &decl.stx.name {
    return name.stx.name.clone();
  }
  let name = uids.uid("temp");
  decl.stx.name = Some(Node::new(decl.loc, ClassOrFuncName { name: name.clone() }));
  name
}

fn ensure_class_name(decl: &mut Node<ClassDecl>, uids: &mut UidGenerator) -> String {
  if let Some(name) = &decl.stx.name {
    return name.stx.name.clone();
  }
  let name = uids.uid("temp");
  decl.stx.name = Some(Node::new(decl.loc, ClassOrFuncName { name: name.clone() }));
  name
}

fn id_expr(name: &str, loc: Loc) -> Node<Expr> {
  Node::new(loc, IdExpr {
    name: name.to_string(),
  })
  .wrap(Expr::Id)
}

fn var_binding(loc: Loc, binding: Node<PatDecl>, value: Node<Expr>) -> Node<Stmt> {
  Node::new(loc, VarDecl {
    export: false,
    mode: VarDeclMode::Var,
    declarators: vec![VarDeclarator {
      pattern: binding,
      initializer: Some(value),
    }],
  })
  .wrap(Stmt::VarDecl)
}
