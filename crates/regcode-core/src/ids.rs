//! Identifier types resolved before code generation.
//!
//! Register ids and variable indices are assigned by the IR construction
//! phase. Code generation never allocates or renames them; it only copies
//! their integer values into instruction operands.

use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u32);

        impl $name {
            /// Create an identifier from its raw index.
            #[inline]
            pub const fn new(index: u32) -> Self {
                Self(index)
            }

            /// Get the underlying index.
            #[inline]
            pub const fn index(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }

        impl From<u32> for $name {
            fn from(index: u32) -> Self {
                Self::new(index)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(
    /// A virtual register in a code object's register file.
    RegisterId,
    "r"
);

define_id!(
    /// A slot in a local, parent-local, or global variable scope.
    VariableIndex,
    "v"
);

define_id!(
    /// Position of a basic block within its code object.
    ///
    /// Blocks are laid out in the order given by the IR, so a block's id is
    /// also its position in the linearized stream.
    BlockId,
    "b"
);

impl BlockId {
    /// The block laid out `distance` positions after this one.
    #[inline]
    pub const fn ahead(self, distance: u32) -> Self {
        Self(self.0 + distance)
    }

    /// The block's position as a `usize`, for indexing block lists.
    #[inline]
    pub const fn position(self) -> usize {
        self.0 as usize
    }
}
