//! Compiler passes.
//!
//! - [`code_generation`]: lower typed IR code objects to register bytecode

pub mod code_generation;

pub use code_generation::CodeGeneration;
