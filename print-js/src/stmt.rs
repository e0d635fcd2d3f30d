use crate::emitter::Emitter;
use crate::expr::emit_expr;
use crate::expr::needs_parens_in_stmt;
use crate::PrintError;
use crate::PrintResult;
use tree_js::ast::func::Func;
use tree_js::ast::node::Node;
use tree_js::ast::stmt::decl::ClassDecl;
use tree_js::ast::stmt::decl::ClassMemberVal;
use tree_js::ast::stmt::decl::FuncDecl;
use tree_js::ast::stmt::decl::ParamDecl;
use tree_js::ast::stmt::decl::VarDecl;
use tree_js::ast::stmt::decl::VarDeclMode;
use tree_js::ast::stmt::Stmt;
use tree_js::ast::stx::TopLevel;

pub fn emit_top_level(em: &mut Emitter, top_level: &Node<TopLevel>) -> PrintResult {
  for stmt in &top_level.stx.body {
    emit_stmt(em, stmt)?;
  }
  Ok(())
}

pub fn emit_stmt(em: &mut Emitter, stmt: &Node<Stmt>) -> PrintResult {
  match stmt.stx.as_ref() {
    Stmt::Block(block) => {
      em.start_line();
      em.write("{");
      em.end_line();
      em.indent();
      for inner in &block.stx.body {
        emit_stmt(em, inner)?;
      }
      em.dedent();
      em.start_line();
      em.write("}");
      em.end_line();
      Ok(())
    }
    Stmt::Empty(_) => Ok(()),
    Stmt::Expr(expr_stmt) => {
      em.start_line();
      let expr = &expr_stmt.stx.expr;
      if needs_parens_in_stmt(expr) {
        em.write("(");
        emit_expr(em, expr)?;
        em.write(")");
      } else {
        emit_expr(em, expr)?;
      }
      em.write(";");
      em.end_line();
      Ok(())
    }
    Stmt::Return(ret) => {
      em.start_line();
      em.write("return");
      if let Some(value) = &ret.stx.value {
        em.write(" ");
        emit_expr(em, value)?;
      }
      em.write(";");
      em.end_line();
      Ok(())
    }
    Stmt::VarDecl(decl) => {
      em.start_line();
      emit_var_decl(em, decl.stx.as_ref())?;
      em.end_line();
      Ok(())
    }
    Stmt::FunctionDecl(decl) => emit_func_decl(em, decl.stx.as_ref()),
    Stmt::ClassDecl(decl) => emit_class_decl(em, decl.stx.as_ref()),
    Stmt::Import(_) | Stmt::ExportDefaultExpr(_) | Stmt::ExportList(_) => {
      Err(PrintError::Unsupported("module declaration"))
    }
  }
}

fn emit_var_decl(em: &mut Emitter, decl: &VarDecl) -> PrintResult {
  if decl.export {
    return Err(PrintError::Unsupported("export declaration"));
  }
  em.write(match decl.mode {
    VarDeclMode::Const => "const ",
    VarDeclMode::Let => "let ",
    VarDeclMode::Var => "var ",
  });
  for (i, declarator) in decl.declarators.iter().enumerate() {
    if i > 0 {
      em.write(", ");
    }
    em.write(&declarator.pattern.stx.pat.stx.name);
    if let Some(init) = &declarator.initializer {
      em.write(" = ");
      emit_expr(em, init)?;
    }
  }
  em.write(";");
  Ok(())
}

fn emit_func_decl(em: &mut Emitter, decl: &FuncDecl) -> PrintResult {
  if decl.export || decl.export_default {
    return Err(PrintError::Unsupported("export declaration"));
  }
  let name = match &decl.name {
    Some(name) => &name.stx.name,
    None => return Err(PrintError::Unsupported("anonymous function declaration")),
  };
  em.start_line();
  emit_func(em, Some(name), &decl.function)?;
  em.end_line();
  Ok(())
}

fn emit_class_decl(em: &mut Emitter, decl: &ClassDecl) -> PrintResult {
  if decl.export || decl.export_default {
    return Err(PrintError::Unsupported("export declaration"));
  }
  let name = match &decl.name {
    Some(name) => &name.stx.name,
    None => return Err(PrintError::Unsupported("anonymous class declaration")),
  };
  em.start_line();
  em.write("class ");
  em.write(name);
  if let Some(extends) = &decl.extends {
    em.write(" extends ");
    emit_expr(em, extends)?;
  }
  em.write(" ");
  if decl.members.is_empty() {
    em.write("{}");
    em.end_line();
    return Ok(());
  }
  em.write("{");
  em.end_line();
  em.indent();
  for member in &decl.members {
    em.start_line();
    if member.stx.static_ {
      em.write("static ");
    }
    match &member.stx.value {
      ClassMemberVal::Method(func) => {
        if func.stx.async_ {
          em.write("async ");
        }
        if func.stx.generator {
          em.write("*");
        }
        em.write(&member.stx.key);
        emit_params(em, &func.stx.parameters)?;
        em.write(" ");
        emit_brace_body(em, &func.stx.body)?;
      }
      ClassMemberVal::Prop(value) => {
        em.write(&member.stx.key);
        if let Some(value) = value {
          em.write(" = ");
          emit_expr(em, value)?;
        }
        em.write(";");
      }
    }
    em.end_line();
  }
  em.dedent();
  em.start_line();
  em.write("}");
  em.end_line();
  Ok(())
}

/// Emits a function keyword, optional name, parameter list and body on the
/// current line; the closing brace is left unterminated so callers can
/// continue the line (e.g. an IIFE's `).call(this);`).
pub(crate) fn emit_func(em: &mut Emitter, name: Option<&str>, func: &Node<Func>) -> PrintResult {
  if func.stx.async_ {
    em.write("async ");
  }
  em.write("function");
  if func.stx.generator {
    em.write("*");
  }
  if let Some(name) = name {
    em.write(" ");
    em.write(name);
  }
  emit_params(em, &func.stx.parameters)?;
  em.write(" ");
  emit_brace_body(em, &func.stx.body)
}

fn emit_params(em: &mut Emitter, parameters: &[Node<ParamDecl>]) -> PrintResult {
  em.write("(");
  for (i, param) in parameters.iter().enumerate() {
    if i > 0 {
      em.write(", ");
    }
    if param.stx.rest {
      em.write("...");
    }
    em.write(&param.stx.pattern.stx.pat.stx.name);
    if let Some(default) = &param.stx.default_value {
      em.write(" = ");
      emit_expr(em, default)?;
    }
  }
  em.write(")");
  Ok(())
}

fn emit_brace_body(em: &mut Emitter, body: &[Node<Stmt>]) -> PrintResult {
  if body.is_empty() {
    em.write("{}");
    return Ok(());
  }
  em.write("{");
  em.end_line();
  em.indent();
  for stmt in body {
    emit_stmt(em, stmt)?;
  }
  em.dedent();
  em.write_indent();
  em.write("}");
  Ok(())
}
