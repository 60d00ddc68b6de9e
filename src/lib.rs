//! Register bytecode generation.
//!
//! This crate lowers a typed, basic-block IR into the bytecode of a
//! register VM. The IR types live in [`ir`], the output types in
//! [`bytecode`].
//!
//! ```ignore
//! use regcode::prelude::*;
//!
//! let compiled = regcode::compile_module(&module)?;
//! println!("{}", compiled.body);
//! ```

pub use regcode_compiler::{
    BytecodeEmitter, CodeGeneration, CodegenError, CompiledModule, Compiler, bytecode, emit,
};
pub use regcode_core::{Location, Result};

/// The typed IR consumed by code generation.
pub mod ir {
    pub use regcode_ir::*;
}

pub mod prelude {
    pub use crate::bytecode::{
        CatchEntry, CatchTable, CodeMetadata, CodeObjectTable, CompiledCode, Instruction,
        LiteralPool, OpCode,
    };
    pub use crate::ir::{
        ArgumentIr, BasicBlock, BinaryOp, BlockId, CatchEntryIr, CodeObjectIr, InstructionKind,
        Literal, ModuleIr, NullaryOp, RegisterId, UnaryOp, VariableIndex,
    };
    pub use crate::{CodegenError, CompiledModule, Compiler, Location, Result};
}

/// Compile a module's top-level body and every closure nested in it.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn compile_module(module: &ir::ModuleIr) -> Result<CompiledModule> {
    Compiler::compile_module(module)
}
