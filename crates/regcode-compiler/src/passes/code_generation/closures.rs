//! Closure compilation.
//!
//! A `SetBlock` instruction carries the IR of a nested callable. It is
//! compiled with a fresh [`CodeObjectCompiler`] of its own, so the child has
//! its own literal pool, catch table and nested code objects. The finished
//! child is moved into the parent's code object table.

use log::debug;
use regcode_core::{Location, RegisterId, Result};
use regcode_ir::CodeObjectIr;

use super::CodeObjectCompiler;
use crate::bytecode::OpCode;

impl CodeObjectCompiler<'_> {
    /// Compile `body`, register it, and load it into `register`.
    ///
    /// Emits `SetBlock [register, index]` where `index` is the position of
    /// the child in this code object's table.
    pub(super) fn lower_set_block(
        &mut self,
        register: RegisterId,
        body: &CodeObjectIr,
        location: Location,
    ) -> Result<()> {
        let child = CodeObjectCompiler::new(body).compile()?;
        let index = self.emitter.add_code_object(child);

        debug!(
            "registered closure '{}' as code object {} of '{}'",
            body.name, index, self.code.name
        );

        self.emitter
            .instruct(OpCode::SetBlock, vec![register.index(), index], location);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use regcode_core::Literal;
    use regcode_ir::{BasicBlock, Instruction, InstructionKind};

    use super::*;

    fn closure(name: &str, value: i64) -> CodeObjectIr {
        let mut body = CodeObjectIr::new(name, Location::new(2, 3));
        body.registers = 1;
        body.captures = true;
        body.add_block(BasicBlock::with(vec![
            Instruction::new(
                InstructionKind::SetLiteral {
                    register: RegisterId::new(0),
                    value: Literal::Integer(value),
                },
                Location::new(2, 5),
            ),
            Instruction::new(
                InstructionKind::Return {
                    block_return: false,
                    register: RegisterId::new(0),
                },
                Location::new(2, 9),
            ),
        ]));
        body
    }

    fn set_block(register: u32, body: CodeObjectIr) -> Instruction {
        Instruction::new(
            InstructionKind::SetBlock {
                register: RegisterId::new(register),
                code_object: Box::new(body),
            },
            Location::new(1, 1),
        )
    }

    #[test]
    fn closures_are_indexed_in_order() {
        let mut code = CodeObjectIr::new("main", Location::new(1, 1));
        code.add_block(BasicBlock::with(vec![
            set_block(0, closure("first", 1)),
            set_block(1, closure("second", 2)),
        ]));

        let compiled = CodeObjectCompiler::new(&code).compile().unwrap();

        assert_eq!(compiled.code_objects().len(), 2);
        assert_eq!(compiled.instructions()[0].operands, vec![0, 0]);
        assert_eq!(compiled.instructions()[1].operands, vec![1, 1]);
        assert_eq!(compiled.code_objects().get(0).map(|c| c.name()), Some("first"));
        assert_eq!(compiled.code_objects().get(1).map(|c| c.name()), Some("second"));
    }

    #[test]
    fn child_has_its_own_literal_pool() {
        let mut code = CodeObjectIr::new("main", Location::new(1, 1));
        code.add_block(BasicBlock::with(vec![
            Instruction::new(
                InstructionKind::SetLiteral {
                    register: RegisterId::new(0),
                    value: Literal::string("parent"),
                },
                Location::new(1, 1),
            ),
            set_block(1, closure("child", 7)),
        ]));

        let compiled = CodeObjectCompiler::new(&code).compile().unwrap();
        let child = compiled.code_objects().get(0).unwrap();

        assert_eq!(compiled.literals().literals(), &[Literal::string("parent")]);
        assert_eq!(child.literals().literals(), &[Literal::Integer(7)]);
        assert_eq!(child.instructions()[0].operands, vec![0, 0]);
        assert!(child.metadata().captures);
    }

    #[test]
    fn nested_closures_recurse() {
        let mut middle = CodeObjectIr::new("middle", Location::new(2, 1));
        middle.add_block(BasicBlock::with(vec![set_block(0, closure("inner", 3))]));

        let mut code = CodeObjectIr::new("outer", Location::new(1, 1));
        code.add_block(BasicBlock::with(vec![set_block(0, middle)]));

        let compiled = CodeObjectCompiler::new(&code).compile().unwrap();
        let middle = compiled.code_objects().get(0).unwrap();
        let inner = middle.code_objects().get(0).unwrap();

        middle.assert_opcodes(&[OpCode::SetBlock]);
        inner.assert_opcodes(&[OpCode::SetLiteral, OpCode::Return]);
    }
}
