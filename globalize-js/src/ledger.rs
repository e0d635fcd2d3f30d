use ahash::HashSet;

/// Per-file record of the dotted global paths already written, e.g.
/// `"this.myGlobal.foo"`. Namespace initializers and export assignments share
/// one ledger, so any given path is emitted at most once per file. Never
/// consulted across files: the ledger lives and dies with one transformation
/// pass.
#[derive(Default)]
pub struct CreatedGlobals {
  paths: HashSet<String>,
}

impl CreatedGlobals {
  pub fn has(&self, path: &str) -> bool {
    self.paths.contains(path)
  }

  pub fn record(&mut self, path: impl Into<String>) {
    self.paths.insert(path.into());
  }
}

#[cfg(test)]
mod tests {
  use super::CreatedGlobals;

  #[test]
  fn records_and_reports_paths() {
    let mut created = CreatedGlobals::default();
    assert!(!created.has("this.g.foo"));
    created.record("this.g.foo");
    assert!(created.has("this.g.foo"));
    assert!(!created.has("this.g.foo.bar"));
  }
}
