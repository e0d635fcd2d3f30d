use crate::err::GlobalizeError;
use crate::ledger::CreatedGlobals;
use crate::namespace::strip_extensions;
use crate::options::GlobalizeOptions;
use std::env;
use std::path::Path;
use std::path::PathBuf;

/// Everything one file's transformation reads and mutates: the caller's
/// options, the file's identity, and the ledger of globals written so far.
/// Created at the start of a `globalize` call, discarded at the end; never
/// shared across files, so parallel host pipelines stay isolated.
pub struct FileCtx<'a> {
  pub options: &'a GlobalizeOptions,
  filename: Option<PathBuf>,
  namespace_root: PathBuf,
  file_stem: Option<PathBuf>,
  pub created: CreatedGlobals,
}

impl<'a> FileCtx<'a> {
  pub fn new(options: &'a GlobalizeOptions, filename: Option<&Path>) -> FileCtx<'a> {
    let namespace_root = options
      .namespace_root
      .clone()
      .unwrap_or_else(|| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
    FileCtx {
      options,
      filename: filename.map(Path::to_path_buf),
      namespace_root,
      file_stem: None,
      created: CreatedGlobals::default(),
    }
  }

  /// The current file's path. Absence only becomes an error once something
  /// path-dependent is actually computed.
  pub fn filename(&self) -> Result<&Path, GlobalizeError> {
    self
      .filename
      .as_deref()
      .ok_or(GlobalizeError::MissingFilename)
  }

  pub fn namespace_root(&self) -> &Path {
    &self.namespace_root
  }

  /// The current file's own module target: its basename with every extension
  /// stripped. Cached after the first computation.
  pub fn file_stem(&mut self) -> Result<PathBuf, GlobalizeError> {
    if self.file_stem.is_none() {
      let stem = {
        let filename = self.filename()?;
        let base = filename.file_name().map(Path::new).unwrap_or(filename);
        strip_extensions(base)
      };
      self.file_stem = Some(stem);
    }
    Ok(self.file_stem.clone().unwrap_or_default())
  }
}
