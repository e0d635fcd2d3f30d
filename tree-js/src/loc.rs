use std::cmp::max;
use std::cmp::min;

/// A half-open byte range within the current source file.
///
/// Transforms create nodes that never existed in the source, so a location is
/// best-effort: synthetic nodes carry an empty range, and replacement nodes
/// usually reuse the range of the statement they replace.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Loc(pub usize, pub usize);

impl Loc {
  /// Location for a node that has no corresponding source text.
  pub fn synthetic() -> Loc {
    Loc(0, 0)
  }

  pub fn extend(&mut self, other: Loc) {
    self.0 = min(self.0, other.0);
    self.1 = max(self.1, other.1);
  }
}
