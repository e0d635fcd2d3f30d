use super::expr::pat::IdPat;
use super::node::Node;
use super::stmt::decl::PatDecl;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub enum ModuleExportImportName {
  Ident(String),
  Str(String),
}

impl ModuleExportImportName {
  pub fn as_str(&self) -> &str {
    match self {
      ModuleExportImportName::Ident(name) | ModuleExportImportName::Str(name) => name,
    }
  }
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ExportName {
  // The local (or source-module) side of the specifier.
  #[drive(skip)]
  pub exportable: ModuleExportImportName,
  // The name the binding is exported under. Always set, even without an
  // explicit `as` alias.
  pub alias: Node<IdPat>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub enum ExportNames {
  // `export * from "module"`
  // `export * as name from "module"`
  All(Option<Node<IdPat>>),
  // `export {a as default, b as c, d}`
  // `export {default, a as b, c} from "module"`
  Specific(Vec<Node<ExportName>>),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ImportName {
  // The name inside the source module.
  #[drive(skip)]
  pub importable: ModuleExportImportName,
  // The local binding. Always set, even without an explicit `as` alias.
  pub alias: Node<PatDecl>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub enum ImportNames {
  // `import * as name`
  All(Node<PatDecl>),
  // `import {a as b, c, default as e}`
  Specific(Vec<Node<ImportName>>),
}
