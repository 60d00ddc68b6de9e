//! Basic blocks.

use crate::Instruction;

/// A straight-line run of IR instructions.
///
/// A block's successor is the block laid out directly after it in its code
/// object (see [`CodeObjectIr::successor`](crate::CodeObjectIr::successor)).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BasicBlock {
    /// Instructions in execution order.
    pub instructions: Vec<Instruction>,
}

impl BasicBlock {
    /// Create an empty block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a block from a list of instructions.
    pub fn with(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    /// Append an instruction.
    pub fn push(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    /// Number of instructions in the block.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Check if the block has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}
