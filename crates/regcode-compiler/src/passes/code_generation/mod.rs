//! Code Generation Pass - Lower typed IR to register bytecode.
//!
//! This pass walks a code object's basic blocks in order and lowers every
//! IR instruction to its bytecode encoding. It handles:
//!
//! - Variable access (global, local, parent-local)
//! - Block-relative jumps
//! - Message sends, block invocation and tail calls
//! - Literals, arrays, objects and attributes
//! - Primitive operations
//! - Nested closures (see [`closures`])
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │ CodeGeneration                                                  │
//! │   - Stateless entry point                                       │
//! │   - One CodeObjectCompiler per module body                      │
//! └─────────────────────────────────────────────────────────────────┘
//!                             │
//!                             ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │ CodeObjectCompiler                                              │
//! │   - Owns a BytecodeEmitter (stream, literals, code objects)     │
//! │   - Lowers blocks in order, patches jumps                       │
//! │   - Builds the catch table from the block layout                │
//! │   - Recurses into a fresh compiler for each closure             │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

mod closures;

use log::{debug, trace};
use regcode_core::{BlockId, CodegenError, RegisterId, Result};
use regcode_ir::{CodeObjectIr, Instruction, InstructionKind, ModuleIr};

use crate::CompiledModule;
use crate::bytecode::{CodeMetadata, CompiledCode, OpCode};
use crate::emit::{BytecodeEmitter, build_catch_table};

/// Lowers IR modules and code objects to bytecode.
///
/// Holds no state; one value can compile any number of unrelated code
/// objects, from any number of threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeGeneration;

impl CodeGeneration {
    /// Create the pass.
    pub fn new() -> Self {
        Self
    }

    /// Compile a module's top-level body.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn run(&self, module: &ModuleIr) -> Result<CompiledModule> {
        debug!(
            "compiling module '{}' from {}",
            module.name,
            module.path.display()
        );

        let body = self.compile_code_object(&module.body)?;

        Ok(CompiledModule {
            name: module.name.clone(),
            path: module.path.clone(),
            body,
        })
    }

    /// Compile a single code object and everything nested in it.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn compile_code_object(&self, code: &CodeObjectIr) -> Result<CompiledCode> {
        CodeObjectCompiler::new(code).compile()
    }
}

/// The block an instruction is lowered in.
#[derive(Debug, Clone, Copy)]
struct BlockContext {
    block: BlockId,
}

/// Compiles one code object.
///
/// Every code object, including each closure, gets its own compiler and
/// therefore its own emitter.
struct CodeObjectCompiler<'ir> {
    code: &'ir CodeObjectIr,
    emitter: BytecodeEmitter,
}

impl<'ir> CodeObjectCompiler<'ir> {
    fn new(code: &'ir CodeObjectIr) -> Self {
        Self {
            code,
            emitter: BytecodeEmitter::new(),
        }
    }

    fn compile(mut self) -> Result<CompiledCode> {
        let code = self.code;

        debug!(
            "compiling code object '{}' at {} ({} blocks, {} instructions)",
            code.name,
            code.location,
            code.blocks.len(),
            code.instruction_count()
        );

        for (id, block) in code.iter_blocks() {
            let begun = self.emitter.begin_block();
            debug_assert_eq!(begun, id, "blocks must be emitted in order");

            let ctx = BlockContext { block: id };
            for instruction in &block.instructions {
                self.lower(instruction, ctx)?;
            }

            self.emitter.end_block();
        }

        let emitted = self.emitter.finish()?;
        let catch_table = build_catch_table(&code.catch_table, &emitted.layout, code.location)?;

        Ok(CompiledCode::new(
            code.name.clone(),
            code.location,
            metadata(code),
            emitted.instructions,
            emitted.literals,
            emitted.code_objects,
            catch_table,
        ))
    }

    /// Lower one IR instruction.
    fn lower(&mut self, instruction: &Instruction, ctx: BlockContext) -> Result<()> {
        let location = instruction.location;
        trace!(
            "{}: lowering {} in {}",
            location,
            instruction.kind.name(),
            ctx.block
        );

        let (opcode, operands) = match &instruction.kind {
            InstructionKind::GetGlobal { register, variable } => (
                OpCode::GetGlobal,
                vec![register.index(), variable.index()],
            ),
            InstructionKind::GetLocal { register, variable } => {
                (OpCode::GetLocal, vec![register.index(), variable.index()])
            }
            InstructionKind::GetParentLocal {
                register,
                depth,
                variable,
            } => (
                OpCode::GetParentLocal,
                vec![register.index(), *depth, variable.index()],
            ),
            InstructionKind::SetGlobal {
                register,
                variable,
                value,
            } => (
                OpCode::SetGlobal,
                vec![register.index(), variable.index(), value.index()],
            ),
            InstructionKind::SetLocal { variable, value } => {
                (OpCode::SetLocal, vec![variable.index(), value.index()])
            }
            InstructionKind::SetParentLocal {
                depth,
                variable,
                value,
            } => (
                OpCode::SetParentLocal,
                vec![variable.index(), *depth, value.index()],
            ),
            InstructionKind::GotoNextBlockIfTrue { register } => {
                self.emitter.emit_jump(
                    OpCode::GotoIfTrue,
                    ctx.block.ahead(1),
                    &[register.index()],
                    location,
                );
                return Ok(());
            }
            InstructionKind::SkipNextBlock => {
                self.emitter
                    .emit_jump(OpCode::Goto, ctx.block.ahead(2), &[], location);
                return Ok(());
            }
            InstructionKind::LocalExists { register, variable } => (
                OpCode::LocalExists,
                vec![register.index(), variable.index()],
            ),
            InstructionKind::Return {
                block_return,
                register,
            } => (
                OpCode::Return,
                vec![u32::from(*block_return), register.index()],
            ),
            InstructionKind::RunBlock {
                register,
                block,
                arguments,
            } => (
                OpCode::RunBlock,
                registers(&[register.index(), block.index()], arguments),
            ),
            InstructionKind::SendObjectMessage {
                register,
                receiver,
                name,
                arguments,
            } => {
                let name = self.emitter.intern_name(name);
                (
                    OpCode::SendMessage,
                    registers(&[register.index(), receiver.index(), name], arguments),
                )
            }
            InstructionKind::TailCall { arguments } => {
                (OpCode::TailCall, registers(&[], arguments))
            }
            InstructionKind::SetArray { register, values } => {
                (OpCode::SetArray, registers(&[register.index()], values))
            }
            InstructionKind::ArrayInsert {
                register,
                array,
                index,
                value,
            } => (
                OpCode::ArrayInsert,
                vec![
                    register.index(),
                    array.index(),
                    index.index(),
                    value.index(),
                ],
            ),
            InstructionKind::SetAttribute {
                register,
                receiver,
                name,
                value,
            } => {
                let name = self.emitter.intern_name(name);
                (
                    OpCode::SetAttribute,
                    vec![register.index(), receiver.index(), name, value.index()],
                )
            }
            InstructionKind::GetAttribute {
                register,
                receiver,
                name,
            } => {
                let name = self.emitter.intern_name(name);
                (
                    OpCode::GetAttribute,
                    vec![register.index(), receiver.index(), name],
                )
            }
            InstructionKind::SetBlock {
                register,
                code_object,
            } => return self.lower_set_block(*register, code_object, location),
            InstructionKind::SetHashMap { .. } => {
                return Err(CodegenError::UnsupportedInstruction {
                    kind: instruction.kind.name(),
                    location,
                });
            }
            InstructionKind::SetLiteral { register, value } => {
                let literal = self.emitter.intern(value.clone());
                (OpCode::SetLiteral, vec![register.index(), literal])
            }
            InstructionKind::SetObject {
                register,
                permanent,
                prototype,
            } => {
                let mut operands = vec![register.index(), u32::from(*permanent)];
                if let Some(prototype) = prototype {
                    operands.push(prototype.index());
                }
                (OpCode::SetObject, operands)
            }
            InstructionKind::SetPrototype { object, prototype } => (
                OpCode::SetPrototype,
                vec![object.index(), prototype.index()],
            ),
            InstructionKind::Nullary { op, register } => {
                (OpCode::from(*op), vec![register.index()])
            }
            InstructionKind::Unary {
                op,
                register,
                operand,
            } => (OpCode::from(*op), vec![register.index(), operand.index()]),
            InstructionKind::Binary {
                op,
                register,
                base,
                other,
            } => (
                OpCode::from(*op),
                vec![register.index(), base.index(), other.index()],
            ),
        };

        self.emitter.instruct(opcode, operands, location);
        Ok(())
    }
}

/// Fixed operands followed by a variadic register tail.
fn registers(head: &[u32], tail: &[RegisterId]) -> Vec<u32> {
    let mut operands = Vec::with_capacity(head.len() + tail.len());
    operands.extend_from_slice(head);
    operands.extend(tail.iter().map(|register| register.index()));
    operands
}

fn metadata(code: &CodeObjectIr) -> CodeMetadata {
    let metadata = CodeMetadata {
        arguments: code.arguments_count_without_rest(),
        required_arguments: code.required_arguments_count(),
        rest_argument: code.has_rest_argument(),
        locals: code.local_variables,
        registers: code.registers,
        captures: code.captures,
    };

    debug_assert!(metadata.required_arguments <= metadata.arguments);
    metadata
}
