use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

use super::Expr;
use crate::ast::node::Node;

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitBoolExpr {
  #[drive(skip)]
  pub value: bool,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitNullExpr {}

// Numeric literals keep their source text; nothing downstream does arithmetic
// on them.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitNumExpr {
  #[drive(skip)]
  pub value: String,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitObjExpr {
  pub members: Vec<Node<ObjMember>>,
}

impl LitObjExpr {
  pub fn empty() -> LitObjExpr {
    LitObjExpr {
      members: Vec::new(),
    }
  }
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ObjMember {
  #[drive(skip)]
  pub key: String,
  pub value: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitStrExpr {
  #[drive(skip)]
  pub value: String,
}
