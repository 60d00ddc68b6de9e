//! Typed intermediate representation consumed by code generation.
//!
//! The IR is produced upstream, after name resolution and type checking.
//! Registers and variable indices are already assigned; this crate only
//! describes their shape.
//!
//! ## Structure
//!
//! ```text
//! ModuleIr
//! └── CodeObjectIr (module body)
//!     ├── BasicBlock*  ── Instruction*
//!     ├── CatchEntryIr*
//!     └── nested CodeObjectIr (reachable from SetBlock instructions)
//! ```

mod block;
mod code_object;
mod instruction;
mod ops;

pub use block::BasicBlock;
pub use code_object::{ArgumentIr, CatchEntryIr, CodeObjectIr, ModuleIr};
pub use instruction::{Instruction, InstructionKind};
pub use ops::{BinaryOp, NullaryOp, UnaryOp};

pub use regcode_core::{BlockId, Literal, Location, RegisterId, VariableIndex};
