use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

// Not really a pattern but functions similarly, so kept here. A separate node
// type makes the binding introduced by a function or class declaration easy
// to find and replace.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ClassOrFuncName {
  #[drive(skip)]
  pub name: String,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct IdPat {
  #[drive(skip)]
  pub name: String,
}
