use std::error::Error;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlobalizeError {
  /// A namespace path had to be computed but the file's path is unknown.
  MissingFilename,
  /// The file contains both a default export and a named export.
  MixedExports,
}

impl Display for GlobalizeError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      GlobalizeError::MissingFilename => {
        write!(f, "the modules-to-globals transform requires the file's path to be known")
      }
      GlobalizeError::MixedExports => {
        write!(f, "mixing named and default exports in one module is not supported")
      }
    }
  }
}

impl Error for GlobalizeError {}
