use super::node::Node;
use super::stmt::decl::ParamDecl;
use super::stmt::Stmt;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

// One type for every function-shaped thing (declaration, expression, class
// method), so downstream code matches on a single shape.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct Func {
  #[drive(skip)]
  pub async_: bool,
  #[drive(skip)]
  pub generator: bool,
  pub parameters: Vec<Node<ParamDecl>>,
  pub body: Vec<Node<Stmt>>,
}
