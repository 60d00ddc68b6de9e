//! IR instructions.

use regcode_core::{Literal, Location, RegisterId, VariableIndex};

use crate::{BinaryOp, CodeObjectIr, NullaryOp, UnaryOp};

/// A single IR instruction and the source location it was lowered from.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    /// What the instruction does.
    pub kind: InstructionKind,
    /// Where the instruction came from.
    pub location: Location,
}

impl Instruction {
    /// Create an instruction.
    pub fn new(kind: InstructionKind, location: Location) -> Self {
        Self { kind, location }
    }
}

/// The kinds of IR instruction.
///
/// Registers written by an instruction are named `register`. Registers read
/// are named after their role (`value`, `receiver`, `array`, ...).
#[derive(Debug, Clone, PartialEq)]
pub enum InstructionKind {
    /// Load a global variable.
    GetGlobal {
        register: RegisterId,
        variable: VariableIndex,
    },
    /// Load a local variable.
    GetLocal {
        register: RegisterId,
        variable: VariableIndex,
    },
    /// Load a local variable of an enclosing scope `depth` levels up.
    GetParentLocal {
        register: RegisterId,
        depth: u32,
        variable: VariableIndex,
    },
    /// Store a global variable, also writing the stored value to `register`.
    SetGlobal {
        register: RegisterId,
        variable: VariableIndex,
        value: RegisterId,
    },
    /// Store a local variable.
    SetLocal {
        variable: VariableIndex,
        value: RegisterId,
    },
    /// Store a local variable of an enclosing scope `depth` levels up.
    SetParentLocal {
        depth: u32,
        variable: VariableIndex,
        value: RegisterId,
    },
    /// Jump to the successor block if `register` holds true.
    GotoNextBlockIfTrue { register: RegisterId },
    /// Jump over the successor block to the block after it.
    SkipNextBlock,
    /// Test whether a local variable has been defined.
    LocalExists {
        register: RegisterId,
        variable: VariableIndex,
    },
    /// Return `register` from the current method, or from the enclosing
    /// method when `block_return` is set.
    Return {
        block_return: bool,
        register: RegisterId,
    },
    /// Invoke the block held in `block`.
    RunBlock {
        register: RegisterId,
        block: RegisterId,
        arguments: Vec<RegisterId>,
    },
    /// Send the message `name` to `receiver`.
    SendObjectMessage {
        register: RegisterId,
        receiver: RegisterId,
        name: String,
        arguments: Vec<RegisterId>,
    },
    /// Re-enter the current code object with new arguments.
    TailCall { arguments: Vec<RegisterId> },
    /// Build an array from `values`.
    SetArray {
        register: RegisterId,
        values: Vec<RegisterId>,
    },
    /// Insert `value` into `array` at `index`.
    ArrayInsert {
        register: RegisterId,
        array: RegisterId,
        index: RegisterId,
        value: RegisterId,
    },
    /// Set the attribute `name` of `receiver`.
    SetAttribute {
        register: RegisterId,
        receiver: RegisterId,
        name: String,
        value: RegisterId,
    },
    /// Read the attribute `name` of `receiver`.
    GetAttribute {
        register: RegisterId,
        receiver: RegisterId,
        name: String,
    },
    /// Materialize a closure from a nested code object.
    SetBlock {
        register: RegisterId,
        code_object: Box<CodeObjectIr>,
    },
    /// Build a hash map from key/value register pairs.
    ///
    /// Code generation has no lowering for this kind yet.
    SetHashMap {
        register: RegisterId,
        pairs: Vec<(RegisterId, RegisterId)>,
    },
    /// Load a constant.
    SetLiteral {
        register: RegisterId,
        value: Literal,
    },
    /// Create an object, optionally with a prototype.
    SetObject {
        register: RegisterId,
        permanent: bool,
        prototype: Option<RegisterId>,
    },
    /// Replace the prototype of `object`.
    SetPrototype {
        object: RegisterId,
        prototype: RegisterId,
    },
    /// A primitive operation with no operands.
    Nullary {
        op: NullaryOp,
        register: RegisterId,
    },
    /// A primitive operation with one operand.
    Unary {
        op: UnaryOp,
        register: RegisterId,
        operand: RegisterId,
    },
    /// A primitive operation with two operands.
    Binary {
        op: BinaryOp,
        register: RegisterId,
        base: RegisterId,
        other: RegisterId,
    },
}

impl InstructionKind {
    /// Name of the instruction kind, used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            InstructionKind::GetGlobal { .. } => "GetGlobal",
            InstructionKind::GetLocal { .. } => "GetLocal",
            InstructionKind::GetParentLocal { .. } => "GetParentLocal",
            InstructionKind::SetGlobal { .. } => "SetGlobal",
            InstructionKind::SetLocal { .. } => "SetLocal",
            InstructionKind::SetParentLocal { .. } => "SetParentLocal",
            InstructionKind::GotoNextBlockIfTrue { .. } => "GotoNextBlockIfTrue",
            InstructionKind::SkipNextBlock => "SkipNextBlock",
            InstructionKind::LocalExists { .. } => "LocalExists",
            InstructionKind::Return { .. } => "Return",
            InstructionKind::RunBlock { .. } => "RunBlock",
            InstructionKind::SendObjectMessage { .. } => "SendObjectMessage",
            InstructionKind::TailCall { .. } => "TailCall",
            InstructionKind::SetArray { .. } => "SetArray",
            InstructionKind::ArrayInsert { .. } => "ArrayInsert",
            InstructionKind::SetAttribute { .. } => "SetAttribute",
            InstructionKind::GetAttribute { .. } => "GetAttribute",
            InstructionKind::SetBlock { .. } => "SetBlock",
            InstructionKind::SetHashMap { .. } => "SetHashMap",
            InstructionKind::SetLiteral { .. } => "SetLiteral",
            InstructionKind::SetObject { .. } => "SetObject",
            InstructionKind::SetPrototype { .. } => "SetPrototype",
            InstructionKind::Nullary { .. } => "Nullary",
            InstructionKind::Unary { .. } => "Unary",
            InstructionKind::Binary { .. } => "Binary",
        }
    }
}
