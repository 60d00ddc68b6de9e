//! Error types for code generation.
//!
//! Code generation either lowers a whole compilation unit or fails with the
//! first [`CodegenError`] it meets. There is no partial output and no retry.

use thiserror::Error;

use crate::{BlockId, Location};

/// Result type for code generation.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that abort code generation of a compilation unit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodegenError {
    /// The IR instruction kind has no bytecode lowering.
    #[error("at {location}: unsupported instruction '{kind}'")]
    UnsupportedInstruction {
        /// Name of the instruction kind.
        kind: &'static str,
        /// Where the instruction came from.
        location: Location,
    },

    /// A jump or catch entry refers to a block the code object doesn't have.
    ///
    /// This indicates a bug in IR construction, for example "skip next block"
    /// in the second-to-last block of a code object.
    #[error("at {location}: reference to missing block {block}")]
    MissingBlock {
        /// The block that was referenced.
        block: BlockId,
        /// Where the reference came from.
        location: Location,
    },
}

impl CodegenError {
    /// Get the location where this error occurred.
    pub fn location(&self) -> Location {
        match self {
            CodegenError::UnsupportedInstruction { location, .. } => *location,
            CodegenError::MissingBlock { location, .. } => *location,
        }
    }
}
