//! Regcode Compiler
//!
//! Code generation for a register VM: lowers typed, basic-block IR to flat
//! bytecode.
//!
//! ## Architecture
//!
//! Each code object is compiled independently. Its blocks are emitted in
//! order into one instruction stream, block-relative jumps are patched once
//! every block has an offset, and the catch table is derived from the final
//! block layout. Closures are compiled recursively into child code objects
//! referenced by index.
//!
//! ## Modules
//!
//! - [`bytecode`]: Bytecode types (OpCode, Instruction, LiteralPool, CompiledCode)
//! - [`emit`]: Bytecode emitter, block linearizer and catch table builder
//! - [`passes`]: The code generation pass

pub mod bytecode;
pub mod emit;
pub mod passes;

use std::path::PathBuf;

use regcode_core::Result;
use regcode_ir::{CodeObjectIr, ModuleIr};

pub use bytecode::{CompiledCode, OpCode};
pub use emit::BytecodeEmitter;
pub use passes::CodeGeneration;

// Re-export CodegenError from core for convenience
pub use regcode_core::CodegenError;

/// A compiled module.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledModule {
    /// Fully qualified module name.
    pub name: String,
    /// Source file of the module.
    pub path: PathBuf,
    /// The module's top-level code object.
    pub body: CompiledCode,
}

/// The main compiler entry point.
pub struct Compiler;

impl Compiler {
    /// Compile a module.
    ///
    /// Fails on the first instruction that can't be lowered; no partial
    /// output is produced.
    pub fn compile_module(module: &ModuleIr) -> Result<CompiledModule> {
        CodeGeneration::new().run(module)
    }

    /// Compile one code object.
    ///
    /// Unrelated code objects share no state and may be compiled on
    /// separate threads.
    pub fn compile_code_object(code: &CodeObjectIr) -> Result<CompiledCode> {
        CodeGeneration::new().compile_code_object(code)
    }
}

#[cfg(test)]
mod tests {
    use regcode_core::{Location, RegisterId};
    use regcode_ir::{BasicBlock, Instruction, InstructionKind, NullaryOp};

    use super::*;

    fn module() -> ModuleIr {
        let mut body = CodeObjectIr::new("<module>", Location::new(1, 1));
        body.add_block(BasicBlock::with(vec![Instruction::new(
            InstructionKind::Nullary {
                op: NullaryOp::GetNil,
                register: RegisterId::new(0),
            },
            Location::new(1, 1),
        )]));

        ModuleIr {
            name: "main".to_string(),
            path: PathBuf::from("main.rc"),
            body,
        }
    }

    #[test]
    fn compile_module() {
        let compiled = Compiler::compile_module(&module()).unwrap();

        assert_eq!(compiled.name, "main");
        assert_eq!(compiled.body.name(), "<module>");
        compiled.body.assert_opcodes(&[OpCode::GetNil]);
    }

    #[test]
    fn compiler_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CodeGeneration>();
        assert_send_sync::<CompiledCode>();
    }
}
