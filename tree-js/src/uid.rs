use crate::ast::expr::pat::ClassOrFuncName;
use crate::ast::expr::pat::IdPat;
use crate::ast::expr::IdExpr;
use crate::ast::node::Node;
use crate::ast::stx::TopLevel;
use ahash::HashSet;
use derive_visitor::Drive;
use derive_visitor::Visitor;

type ClassOrFuncNameNode = Node<ClassOrFuncName>;
type IdExprNode = Node<IdExpr>;
type IdPatNode = Node<IdPat>;

#[derive(Default, Visitor)]
#[visitor(ClassOrFuncNameNode(enter), IdExprNode(enter), IdPatNode(enter))]
struct NameCollector {
  names: HashSet<String>,
}

impl NameCollector {
  fn enter_class_or_func_name_node(&mut self, node: &ClassOrFuncNameNode) {
    self.names.insert(node.stx.name.clone());
  }

  fn enter_id_expr_node(&mut self, node: &IdExprNode) {
    self.names.insert(node.stx.name.clone());
  }

  fn enter_id_pat_node(&mut self, node: &IdPatNode) {
    self.names.insert(node.stx.name.clone());
  }
}

/// Produces identifiers guaranteed not to appear anywhere in the program the
/// generator was built from. Generated names are reserved, so repeated calls
/// never collide with each other either.
pub struct UidGenerator {
  taken: HashSet<String>,
}

impl UidGenerator {
  pub fn for_top_level(top_level: &Node<TopLevel>) -> UidGenerator {
    let mut collector = NameCollector::default();
    top_level.drive(&mut collector);
    UidGenerator {
      taken: collector.names,
    }
  }

  pub fn uid(&mut self, base: &str) -> String {
    let mut candidate = format!("_{}", base);
    let mut n = 1;
    while self.taken.contains(&candidate) {
      n += 1;
      candidate = format!("_{}{}", base, n);
    }
    self.taken.insert(candidate.clone());
    candidate
  }
}

#[cfg(test)]
mod tests {
  use super::UidGenerator;
  use crate::ast::expr::Expr;
  use crate::ast::expr::IdExpr;
  use crate::ast::node::Node;
  use crate::ast::stmt::ExprStmt;
  use crate::ast::stmt::Stmt;
  use crate::ast::stx::TopLevel;

  fn program_using(names: &[&str]) -> Node<TopLevel> {
    let body = names
      .iter()
      .map(|name| {
        Node::synthetic(IdExpr {
          name: (*name).to_string(),
        })
        .wrap(Expr::Id)
        .wrap(|expr| ExprStmt { expr })
        .wrap(Stmt::Expr)
      })
      .collect();
    Node::synthetic(TopLevel { body })
  }

  #[test]
  fn skips_names_used_in_the_program() {
    let program = program_using(&["_temp", "_temp2"]);
    let mut uids = UidGenerator::for_top_level(&program);
    assert_eq!(uids.uid("temp"), "_temp3");
  }

  #[test]
  fn generated_names_are_reserved() {
    let program = program_using(&["a"]);
    let mut uids = UidGenerator::for_top_level(&program);
    assert_eq!(uids.uid("temp"), "_temp");
    assert_eq!(uids.uid("temp"), "_temp2");
  }
}
