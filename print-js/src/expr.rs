use crate::emitter::Emitter;
use crate::stmt::emit_func;
use crate::PrintResult;
use tree_js::ast::expr::lit::LitObjExpr;
use tree_js::ast::expr::Expr;
use tree_js::ast::node::Node;
use tree_js::operator::OperatorName;

pub fn emit_expr(em: &mut Emitter, expr: &Node<Expr>) -> PrintResult {
  match expr.stx.as_ref() {
    Expr::Binary(bin) => {
      emit_expr(em, &bin.stx.left)?;
      em.write(match bin.stx.operator {
        OperatorName::Assignment => " = ",
        OperatorName::LogicalOr => " || ",
      });
      emit_expr(em, &bin.stx.right)
    }
    Expr::Call(call) => {
      emit_operand(em, &call.stx.callee)?;
      em.write("(");
      for (i, arg) in call.stx.arguments.iter().enumerate() {
        if i > 0 {
          em.write(", ");
        }
        if arg.stx.spread {
          em.write("...");
        }
        emit_expr(em, &arg.stx.value)?;
      }
      em.write(")");
      Ok(())
    }
    Expr::ComputedMember(member) => {
      emit_operand(em, &member.stx.object)?;
      em.write("[");
      emit_expr(em, &member.stx.member)?;
      em.write("]");
      Ok(())
    }
    Expr::Func(func) => {
      let name = func.stx.name.as_ref().map(|n| n.stx.name.clone());
      emit_func(em, name.as_deref(), &func.stx.func)
    }
    Expr::Id(id) => {
      em.write(&id.stx.name);
      Ok(())
    }
    Expr::Member(member) => {
      emit_operand(em, &member.stx.left)?;
      em.write(".");
      em.write(&member.stx.right);
      Ok(())
    }
    Expr::This(_) => {
      em.write("this");
      Ok(())
    }
    Expr::LitBool(lit) => {
      em.write(if lit.stx.value { "true" } else { "false" });
      Ok(())
    }
    Expr::LitNull(_) => {
      em.write("null");
      Ok(())
    }
    Expr::LitNum(lit) => {
      em.write(&lit.stx.value);
      Ok(())
    }
    Expr::LitObj(obj) => emit_obj(em, obj.stx.as_ref()),
    Expr::LitStr(lit) => {
      emit_string_literal(em, &lit.stx.value);
      Ok(())
    }
  }
}

// Left operand of a call, member access or computed access; wraps forms that
// would not parse unparenthesized in that position.
fn emit_operand(em: &mut Emitter, expr: &Node<Expr>) -> PrintResult {
  if matches!(
    expr.stx.as_ref(),
    Expr::Binary(_) | Expr::Func(_) | Expr::LitObj(_)
  ) {
    em.write("(");
    emit_expr(em, expr)?;
    em.write(")");
    Ok(())
  } else {
    emit_expr(em, expr)
  }
}

// A statement must not begin with `function` or `{`.
pub(crate) fn needs_parens_in_stmt(expr: &Node<Expr>) -> bool {
  matches!(expr.stx.as_ref(), Expr::Func(_) | Expr::LitObj(_))
}

fn emit_obj(em: &mut Emitter, obj: &LitObjExpr) -> PrintResult {
  if obj.members.is_empty() {
    em.write("{}");
    return Ok(());
  }
  em.write("{ ");
  for (i, member) in obj.members.iter().enumerate() {
    if i > 0 {
      em.write(", ");
    }
    em.write(&member.stx.key);
    em.write(": ");
    emit_expr(em, &member.stx.value)?;
  }
  em.write(" }");
  Ok(())
}

pub(crate) fn emit_string_literal(em: &mut Emitter, value: &str) {
  em.write("\"");
  for c in value.chars() {
    match c {
      '\\' => em.write("\\\\"),
      '"' => em.write("\\\""),
      '\n' => em.write("\\n"),
      '\r' => em.write("\\r"),
      '\t' => em.write("\\t"),
      _ => {
        let mut buf = [0u8; 4];
        em.write(c.encode_utf8(&mut buf));
      }
    }
  }
  em.write("\"");
}
