//! Source location tracking for diagnostics.
//!
//! Every IR instruction carries a [`Location`], and code generation copies it
//! onto each bytecode instruction it produces so runtime errors can be
//! attributed to source.

use std::fmt;

/// A position in a source file.
///
/// Lines and columns are 1-indexed. The default location (`0:0`) is reserved
/// for synthesized code that has no source counterpart.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Location {
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed, byte-based).
    pub column: u32,
}

impl Location {
    /// Create a new location from a line and column.
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Whether this location points at real source.
    #[inline]
    pub fn is_known(&self) -> bool {
        self.line != 0
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
