//! Bytecode emitter for the regcode compiler.
//!
//! The [`BytecodeEmitter`] builds the instruction stream of a single code
//! object. It owns everything that stream refers to by index (the literal
//! pool and the nested code object table) and linearizes basic blocks as
//! they are emitted.
//!
//! # Example
//!
//! ```ignore
//! use regcode_compiler::emit::BytecodeEmitter;
//!
//! let mut emitter = BytecodeEmitter::new();
//!
//! let entry = emitter.begin_block();
//! emitter.emit_jump(OpCode::GotoIfTrue, entry.ahead(1), &[0], location);
//! emitter.end_block();
//!
//! emitter.begin_block();
//! let lit = emitter.intern(Literal::Integer(42));
//! emitter.instruct(OpCode::SetLiteral, vec![1, lit], location);
//! emitter.end_block();
//!
//! let emitted = emitter.finish()?;
//! ```

mod blocks;
mod catch;

use regcode_core::{BlockId, CodegenError, Literal, Location, Result};

use crate::bytecode::{CodeObjectTable, CompiledCode, Instruction, LiteralPool, OpCode};

pub use blocks::{BlockLayout, BlockLinearizer, BlockRange, PendingJump};
pub use catch::build_catch_table;

/// Operand written in place of a jump target until it is patched.
const JUMP_PLACEHOLDER: u32 = u32::MAX;

/// Emits the instructions of one code object.
///
/// Every code object gets its own emitter; nothing is shared between the
/// emitter of a closure and the emitter of its enclosing code object.
#[derive(Debug, Default)]
pub struct BytecodeEmitter {
    /// The instruction stream being built
    instructions: Vec<Instruction>,

    /// Literals referenced by this code object (deduplicated)
    literals: LiteralPool,

    /// Code objects of closures defined in this code object
    code_objects: CodeObjectTable,

    /// Block boundaries and unresolved jumps
    blocks: BlockLinearizer,
}

/// The parts produced by a finished emitter.
#[derive(Debug)]
pub struct EmittedCode {
    /// The instruction stream, with every jump resolved.
    pub instructions: Vec<Instruction>,
    /// The literal pool.
    pub literals: LiteralPool,
    /// Nested code objects.
    pub code_objects: CodeObjectTable,
    /// Where each block ended up.
    pub layout: BlockLayout,
}

impl BytecodeEmitter {
    /// Create a new bytecode emitter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get current instruction offset.
    pub fn current_offset(&self) -> u32 {
        self.instructions.len() as u32
    }

    // ==========================================================================
    // Blocks
    // ==========================================================================

    /// Start the next basic block at the current offset.
    pub fn begin_block(&mut self) -> BlockId {
        self.blocks.begin_block(self.current_offset())
    }

    /// End the current basic block at the current offset.
    pub fn end_block(&mut self) {
        self.blocks.end_block(self.current_offset());
    }

    /// The block currently being emitted.
    pub fn current_block(&self) -> Option<BlockId> {
        self.blocks.current_block()
    }

    // ==========================================================================
    // Basic Emission
    // ==========================================================================

    /// Append an instruction.
    pub fn instruct(&mut self, opcode: OpCode, operands: Vec<u32>, location: Location) {
        self.instructions
            .push(Instruction::new(opcode, operands, location));
    }

    /// Emit a jump to the start of `target`.
    ///
    /// The target offset becomes the first operand and is filled in by
    /// [`finish`](Self::finish); `operands` follow it.
    pub fn emit_jump(
        &mut self,
        opcode: OpCode,
        target: BlockId,
        operands: &[u32],
        location: Location,
    ) {
        debug_assert!(opcode.is_jump(), "{} is not a jump", opcode.name());

        let offset = self.current_offset();
        let mut all = Vec::with_capacity(operands.len() + 1);
        all.push(JUMP_PLACEHOLDER);
        all.extend_from_slice(operands);

        self.instruct(opcode, all, location);
        self.blocks.add_jump(offset, target, location);
    }

    // ==========================================================================
    // Literals and Code Objects
    // ==========================================================================

    /// Add a literal to the pool, returns its index.
    pub fn intern(&mut self, literal: Literal) -> u32 {
        self.literals.intern(literal)
    }

    /// Add a message or attribute name to the pool, returns its index.
    pub fn intern_name(&mut self, name: &str) -> u32 {
        self.literals.intern_string(name)
    }

    /// Register a nested code object, returns its index.
    pub fn add_code_object(&mut self, code: CompiledCode) -> u32 {
        self.code_objects.add(code)
    }

    // ==========================================================================
    // Finalization
    // ==========================================================================

    /// Resolve all jumps and return the emitted parts.
    ///
    /// Fails if a jump targets a block that was never laid out.
    pub fn finish(self) -> Result<EmittedCode> {
        let end = self.current_offset();
        let mut instructions = self.instructions;
        let (layout, pending) = self.blocks.finish(end);

        for jump in pending {
            let range = layout.get(jump.target).ok_or(CodegenError::MissingBlock {
                block: jump.target,
                location: jump.location,
            })?;

            instructions[jump.instruction as usize].operands[0] = range.start;
        }

        Ok(EmittedCode {
            instructions,
            literals: self.literals,
            code_objects: self.code_objects,
            layout,
        })
    }
}
