use ahash::HashMap;
use std::path::PathBuf;

/// Caller-supplied configuration for one transformation run. Immutable while
/// a file is being transformed.
#[derive(Clone, Debug)]
pub struct GlobalizeOptions {
  /// Root identifier of the namespace object every module lives under
  /// (`this.<global_name>.…`).
  pub global_name: String,
  /// Module paths (extensions stripped) mapped to pre-existing globals.
  /// Matching modules bypass namespace construction entirely.
  pub externals: HashMap<String, String>,
  /// Directory namespace paths are computed relative to. Defaults to the
  /// process working directory.
  pub namespace_root: Option<PathBuf>,
  /// Leave files without any import/export syntax untouched instead of
  /// wrapping them.
  pub transform_only_modules: bool,
}

impl GlobalizeOptions {
  pub fn new(global_name: impl Into<String>) -> GlobalizeOptions {
    GlobalizeOptions {
      global_name: global_name.into(),
      externals: HashMap::default(),
      namespace_root: None,
      transform_only_modules: false,
    }
  }

  pub fn with_external(mut self, module: impl Into<String>, global: impl Into<String>) -> Self {
    self.externals.insert(module.into(), global.into());
    self
  }

  pub fn with_namespace_root(mut self, root: impl Into<PathBuf>) -> Self {
    self.namespace_root = Some(root.into());
    self
  }

  pub fn with_transform_only_modules(mut self, transform_only_modules: bool) -> Self {
    self.transform_only_modules = transform_only_modules;
    self
  }
}
