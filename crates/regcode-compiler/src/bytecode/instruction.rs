//! Bytecode instructions.

use regcode_core::Location;

use super::OpCode;

/// A single bytecode instruction.
///
/// An instruction's position in its code object's stream is its offset;
/// jump operands refer to these offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// The operation.
    pub opcode: OpCode,
    /// Integer operands, laid out as documented on [`OpCode`].
    pub operands: Vec<u32>,
    /// Source location of the IR instruction this was lowered from.
    pub location: Location,
}

impl Instruction {
    /// Create an instruction.
    ///
    /// The operand count must satisfy the opcode's arity.
    pub fn new(opcode: OpCode, operands: Vec<u32>, location: Location) -> Self {
        debug_assert!(
            opcode.arity().accepts(operands.len()),
            "{} does not accept {} operands",
            opcode.name(),
            operands.len()
        );

        Self {
            opcode,
            operands,
            location,
        }
    }

    /// Get an operand by position.
    pub fn operand(&self, index: usize) -> Option<u32> {
        self.operands.get(index).copied()
    }

    /// The target offset of a jump instruction.
    pub fn jump_target(&self) -> Option<u32> {
        if self.opcode.is_jump() {
            self.operand(0)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operand_access() {
        let ins = Instruction::new(OpCode::SetLiteral, vec![3, 0], Location::new(1, 1));
        assert_eq!(ins.operand(0), Some(3));
        assert_eq!(ins.operand(1), Some(0));
        assert_eq!(ins.operand(2), None);
    }

    #[test]
    fn jump_target() {
        let goto = Instruction::new(OpCode::Goto, vec![7], Location::new(1, 1));
        let goto_if = Instruction::new(OpCode::GotoIfTrue, vec![4, 2], Location::new(1, 1));
        let ret = Instruction::new(OpCode::Return, vec![0, 2], Location::new(1, 1));

        assert_eq!(goto.jump_target(), Some(7));
        assert_eq!(goto_if.jump_target(), Some(4));
        assert_eq!(ret.jump_target(), None);
    }

    #[test]
    #[should_panic(expected = "does not accept")]
    #[cfg(debug_assertions)]
    fn wrong_operand_count() {
        Instruction::new(OpCode::Goto, vec![], Location::new(1, 1));
    }
}
