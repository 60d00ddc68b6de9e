//! Bytecode types for the regcode compiler.
//!
//! This module contains the output types of code generation:
//!
//! - [`OpCode`] - The instruction set of the register VM
//! - [`Instruction`] - One opcode with its operands and source location
//! - [`LiteralPool`] - Per-code-object constant storage
//! - [`CatchTable`] and [`CatchEntry`] - Guarded ranges and their handlers
//! - [`CompiledCode`] and [`CodeObjectTable`] - Compiled code objects

mod catch_table;
mod compiled_code;
mod disasm;
mod instruction;
mod literals;
mod opcode;

pub use catch_table::{CatchEntry, CatchTable};
pub use compiled_code::{CodeMetadata, CodeObjectTable, CompiledCode};
pub use instruction::Instruction;
pub use literals::LiteralPool;
pub use opcode::{Arity, OpCode};
