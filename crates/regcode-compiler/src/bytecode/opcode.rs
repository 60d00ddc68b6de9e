//! Bytecode operation codes.
//!
//! This module defines the instruction set of the register VM. Every opcode
//! takes a list of integer operands whose meaning is fixed per opcode; the
//! layout of each is documented on its variant.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use regcode_ir::{BinaryOp, NullaryOp, UnaryOp};

/// Bytecode operation codes.
///
/// The VM is register-based. Unless noted otherwise the first operand is
/// the destination register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u16)]
pub enum OpCode {
    // =========================================================================
    // Variables
    // =========================================================================
    /// Load a global variable.
    /// Operands: register, variable
    GetGlobal = 0,
    /// Store a global variable.
    /// Operands: register, variable, value
    SetGlobal,
    /// Load a local variable.
    /// Operands: register, variable
    GetLocal,
    /// Store a local variable.
    /// Operands: variable, value
    SetLocal,
    /// Load a variable from an enclosing scope.
    /// Operands: register, depth, variable
    GetParentLocal,
    /// Store a variable in an enclosing scope.
    /// Operands: variable, depth, value
    SetParentLocal,
    /// Check if a local variable is defined.
    /// Operands: register, variable
    LocalExists,

    // =========================================================================
    // Control Flow
    // =========================================================================
    /// Unconditional jump.
    /// Operands: target offset
    Goto,
    /// Jump if the register holds true.
    /// Operands: target offset, register
    GotoIfTrue,
    /// Return a value.
    /// Operands: block return flag (0/1), register
    Return,
    /// Invoke a block.
    /// Operands: register, block, arguments...
    RunBlock,
    /// Send a message to a receiver.
    /// Operands: register, receiver, name literal, arguments...
    SendMessage,
    /// Re-enter the current code object.
    /// Operands: arguments...
    TailCall,

    // =========================================================================
    // Objects
    // =========================================================================
    /// Build an array.
    /// Operands: register, values...
    SetArray,
    /// Insert a value into an array.
    /// Operands: register, array, index, value
    ArrayInsert,
    /// Set an attribute.
    /// Operands: register, receiver, name literal, value
    SetAttribute,
    /// Read an attribute.
    /// Operands: register, receiver, name literal
    GetAttribute,
    /// Materialize a closure from a nested code object.
    /// Operands: register, code object index
    SetBlock,
    /// Load a literal.
    /// Operands: register, literal index
    SetLiteral,
    /// Create an object.
    /// Operands: register, permanent flag (0/1), [prototype]
    SetObject,
    /// Replace an object's prototype.
    /// Operands: object, prototype
    SetPrototype,

    // =========================================================================
    // Nullary Primitives (operands: register)
    // =========================================================================
    GetToplevel,
    GetNil,
    GetTrue,
    GetFalse,
    GetBooleanPrototype,
    GetIntegerPrototype,
    GetFloatPrototype,
    GetStringPrototype,
    GetArrayPrototype,
    GetBlockPrototype,

    // =========================================================================
    // Unary Primitives (operands: register, operand)
    // =========================================================================
    IntegerToFloat,
    IntegerToString,
    FloatToInteger,
    FloatToString,
    StringLength,
    StringSize,
    ArrayLength,
    ArrayClear,
    GetPrototype,
    CopyRegister,
    Throw,
    Panic,

    // =========================================================================
    // Binary Primitives (operands: register, base, other)
    // =========================================================================
    IntegerAdd,
    IntegerSub,
    IntegerMul,
    IntegerDiv,
    IntegerMod,
    IntegerBitwiseAnd,
    IntegerBitwiseOr,
    IntegerBitwiseXor,
    IntegerShiftLeft,
    IntegerShiftRight,
    IntegerSmaller,
    IntegerGreater,
    IntegerEquals,
    FloatAdd,
    FloatSub,
    FloatMul,
    FloatDiv,
    FloatMod,
    FloatSmaller,
    FloatGreater,
    FloatEquals,
    StringEquals,
    StringConcat,
    ArrayAt,
    ArrayRemove,
    ObjectEquals,
}

/// How many operands an opcode accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    /// Minimum operand count.
    pub min: usize,
    /// Maximum operand count, `None` for a variadic tail.
    pub max: Option<usize>,
}

impl Arity {
    /// Exactly `n` operands.
    pub const fn fixed(n: usize) -> Self {
        Self {
            min: n,
            max: Some(n),
        }
    }

    /// At least `min` operands.
    pub const fn variadic(min: usize) -> Self {
        Self { min, max: None }
    }

    /// Whether `count` operands satisfy this arity.
    pub fn accepts(&self, count: usize) -> bool {
        count >= self.min && self.max.is_none_or(|max| count <= max)
    }
}

impl OpCode {
    /// Convert from a raw tag.
    ///
    /// Returns `None` for tags that don't name an opcode.
    pub fn from_u16(tag: u16) -> Option<Self> {
        Self::try_from(tag).ok()
    }

    /// The raw tag of this opcode.
    pub fn tag(self) -> u16 {
        self.into()
    }

    /// Whether the first operand is a jump target offset.
    pub fn is_jump(&self) -> bool {
        matches!(self, OpCode::Goto | OpCode::GotoIfTrue)
    }

    /// Operand count accepted by this opcode.
    pub fn arity(&self) -> Arity {
        match self {
            OpCode::Goto => Arity::fixed(1),

            OpCode::GetGlobal
            | OpCode::GetLocal
            | OpCode::SetLocal
            | OpCode::LocalExists
            | OpCode::GotoIfTrue
            | OpCode::Return
            | OpCode::SetBlock
            | OpCode::SetLiteral
            | OpCode::SetPrototype => Arity::fixed(2),

            OpCode::SetGlobal
            | OpCode::GetParentLocal
            | OpCode::SetParentLocal
            | OpCode::GetAttribute => Arity::fixed(3),

            OpCode::ArrayInsert | OpCode::SetAttribute => Arity::fixed(4),

            OpCode::SetObject => Arity {
                min: 2,
                max: Some(3),
            },

            OpCode::TailCall => Arity::variadic(0),
            OpCode::SetArray => Arity::variadic(1),
            OpCode::RunBlock => Arity::variadic(2),
            OpCode::SendMessage => Arity::variadic(3),

            OpCode::GetToplevel
            | OpCode::GetNil
            | OpCode::GetTrue
            | OpCode::GetFalse
            | OpCode::GetBooleanPrototype
            | OpCode::GetIntegerPrototype
            | OpCode::GetFloatPrototype
            | OpCode::GetStringPrototype
            | OpCode::GetArrayPrototype
            | OpCode::GetBlockPrototype => Arity::fixed(1),

            OpCode::IntegerToFloat
            | OpCode::IntegerToString
            | OpCode::FloatToInteger
            | OpCode::FloatToString
            | OpCode::StringLength
            | OpCode::StringSize
            | OpCode::ArrayLength
            | OpCode::ArrayClear
            | OpCode::GetPrototype
            | OpCode::CopyRegister
            | OpCode::Throw
            | OpCode::Panic => Arity::fixed(2),

            OpCode::IntegerAdd
            | OpCode::IntegerSub
            | OpCode::IntegerMul
            | OpCode::IntegerDiv
            | OpCode::IntegerMod
            | OpCode::IntegerBitwiseAnd
            | OpCode::IntegerBitwiseOr
            | OpCode::IntegerBitwiseXor
            | OpCode::IntegerShiftLeft
            | OpCode::IntegerShiftRight
            | OpCode::IntegerSmaller
            | OpCode::IntegerGreater
            | OpCode::IntegerEquals
            | OpCode::FloatAdd
            | OpCode::FloatSub
            | OpCode::FloatMul
            | OpCode::FloatDiv
            | OpCode::FloatMod
            | OpCode::FloatSmaller
            | OpCode::FloatGreater
            | OpCode::FloatEquals
            | OpCode::StringEquals
            | OpCode::StringConcat
            | OpCode::ArrayAt
            | OpCode::ArrayRemove
            | OpCode::ObjectEquals => Arity::fixed(3),
        }
    }

    /// Get the name of this opcode for debugging.
    pub fn name(&self) -> &'static str {
        match self {
            OpCode::GetGlobal => "GET_GLOBAL",
            OpCode::SetGlobal => "SET_GLOBAL",
            OpCode::GetLocal => "GET_LOCAL",
            OpCode::SetLocal => "SET_LOCAL",
            OpCode::GetParentLocal => "GET_PARENT_LOCAL",
            OpCode::SetParentLocal => "SET_PARENT_LOCAL",
            OpCode::LocalExists => "LOCAL_EXISTS",
            OpCode::Goto => "GOTO",
            OpCode::GotoIfTrue => "GOTO_IF_TRUE",
            OpCode::Return => "RETURN",
            OpCode::RunBlock => "RUN_BLOCK",
            OpCode::SendMessage => "SEND_MESSAGE",
            OpCode::TailCall => "TAIL_CALL",
            OpCode::SetArray => "SET_ARRAY",
            OpCode::ArrayInsert => "ARRAY_INSERT",
            OpCode::SetAttribute => "SET_ATTRIBUTE",
            OpCode::GetAttribute => "GET_ATTRIBUTE",
            OpCode::SetBlock => "SET_BLOCK",
            OpCode::SetLiteral => "SET_LITERAL",
            OpCode::SetObject => "SET_OBJECT",
            OpCode::SetPrototype => "SET_PROTOTYPE",
            OpCode::GetToplevel => "GET_TOPLEVEL",
            OpCode::GetNil => "GET_NIL",
            OpCode::GetTrue => "GET_TRUE",
            OpCode::GetFalse => "GET_FALSE",
            OpCode::GetBooleanPrototype => "GET_BOOLEAN_PROTOTYPE",
            OpCode::GetIntegerPrototype => "GET_INTEGER_PROTOTYPE",
            OpCode::GetFloatPrototype => "GET_FLOAT_PROTOTYPE",
            OpCode::GetStringPrototype => "GET_STRING_PROTOTYPE",
            OpCode::GetArrayPrototype => "GET_ARRAY_PROTOTYPE",
            OpCode::GetBlockPrototype => "GET_BLOCK_PROTOTYPE",
            OpCode::IntegerToFloat => "INTEGER_TO_FLOAT",
            OpCode::IntegerToString => "INTEGER_TO_STRING",
            OpCode::FloatToInteger => "FLOAT_TO_INTEGER",
            OpCode::FloatToString => "FLOAT_TO_STRING",
            OpCode::StringLength => "STRING_LENGTH",
            OpCode::StringSize => "STRING_SIZE",
            OpCode::ArrayLength => "ARRAY_LENGTH",
            OpCode::ArrayClear => "ARRAY_CLEAR",
            OpCode::GetPrototype => "GET_PROTOTYPE",
            OpCode::CopyRegister => "COPY_REGISTER",
            OpCode::Throw => "THROW",
            OpCode::Panic => "PANIC",
            OpCode::IntegerAdd => "INTEGER_ADD",
            OpCode::IntegerSub => "INTEGER_SUB",
            OpCode::IntegerMul => "INTEGER_MUL",
            OpCode::IntegerDiv => "INTEGER_DIV",
            OpCode::IntegerMod => "INTEGER_MOD",
            OpCode::IntegerBitwiseAnd => "INTEGER_BITWISE_AND",
            OpCode::IntegerBitwiseOr => "INTEGER_BITWISE_OR",
            OpCode::IntegerBitwiseXor => "INTEGER_BITWISE_XOR",
            OpCode::IntegerShiftLeft => "INTEGER_SHIFT_LEFT",
            OpCode::IntegerShiftRight => "INTEGER_SHIFT_RIGHT",
            OpCode::IntegerSmaller => "INTEGER_SMALLER",
            OpCode::IntegerGreater => "INTEGER_GREATER",
            OpCode::IntegerEquals => "INTEGER_EQUALS",
            OpCode::FloatAdd => "FLOAT_ADD",
            OpCode::FloatSub => "FLOAT_SUB",
            OpCode::FloatMul => "FLOAT_MUL",
            OpCode::FloatDiv => "FLOAT_DIV",
            OpCode::FloatMod => "FLOAT_MOD",
            OpCode::FloatSmaller => "FLOAT_SMALLER",
            OpCode::FloatGreater => "FLOAT_GREATER",
            OpCode::FloatEquals => "FLOAT_EQUALS",
            OpCode::StringEquals => "STRING_EQUALS",
            OpCode::StringConcat => "STRING_CONCAT",
            OpCode::ArrayAt => "ARRAY_AT",
            OpCode::ArrayRemove => "ARRAY_REMOVE",
            OpCode::ObjectEquals => "OBJECT_EQUALS",
        }
    }
}

impl From<NullaryOp> for OpCode {
    fn from(op: NullaryOp) -> Self {
        match op {
            NullaryOp::GetToplevel => OpCode::GetToplevel,
            NullaryOp::GetNil => OpCode::GetNil,
            NullaryOp::GetTrue => OpCode::GetTrue,
            NullaryOp::GetFalse => OpCode::GetFalse,
            NullaryOp::GetBooleanPrototype => OpCode::GetBooleanPrototype,
            NullaryOp::GetIntegerPrototype => OpCode::GetIntegerPrototype,
            NullaryOp::GetFloatPrototype => OpCode::GetFloatPrototype,
            NullaryOp::GetStringPrototype => OpCode::GetStringPrototype,
            NullaryOp::GetArrayPrototype => OpCode::GetArrayPrototype,
            NullaryOp::GetBlockPrototype => OpCode::GetBlockPrototype,
        }
    }
}

impl From<UnaryOp> for OpCode {
    fn from(op: UnaryOp) -> Self {
        match op {
            UnaryOp::IntegerToFloat => OpCode::IntegerToFloat,
            UnaryOp::IntegerToString => OpCode::IntegerToString,
            UnaryOp::FloatToInteger => OpCode::FloatToInteger,
            UnaryOp::FloatToString => OpCode::FloatToString,
            UnaryOp::StringLength => OpCode::StringLength,
            UnaryOp::StringSize => OpCode::StringSize,
            UnaryOp::ArrayLength => OpCode::ArrayLength,
            UnaryOp::ArrayClear => OpCode::ArrayClear,
            UnaryOp::GetPrototype => OpCode::GetPrototype,
            UnaryOp::CopyRegister => OpCode::CopyRegister,
            UnaryOp::Throw => OpCode::Throw,
            UnaryOp::Panic => OpCode::Panic,
        }
    }
}

impl From<BinaryOp> for OpCode {
    fn from(op: BinaryOp) -> Self {
        match op {
            BinaryOp::IntegerAdd => OpCode::IntegerAdd,
            BinaryOp::IntegerSub => OpCode::IntegerSub,
            BinaryOp::IntegerMul => OpCode::IntegerMul,
            BinaryOp::IntegerDiv => OpCode::IntegerDiv,
            BinaryOp::IntegerMod => OpCode::IntegerMod,
            BinaryOp::IntegerBitwiseAnd => OpCode::IntegerBitwiseAnd,
            BinaryOp::IntegerBitwiseOr => OpCode::IntegerBitwiseOr,
            BinaryOp::IntegerBitwiseXor => OpCode::IntegerBitwiseXor,
            BinaryOp::IntegerShiftLeft => OpCode::IntegerShiftLeft,
            BinaryOp::IntegerShiftRight => OpCode::IntegerShiftRight,
            BinaryOp::IntegerSmaller => OpCode::IntegerSmaller,
            BinaryOp::IntegerGreater => OpCode::IntegerGreater,
            BinaryOp::IntegerEquals => OpCode::IntegerEquals,
            BinaryOp::FloatAdd => OpCode::FloatAdd,
            BinaryOp::FloatSub => OpCode::FloatSub,
            BinaryOp::FloatMul => OpCode::FloatMul,
            BinaryOp::FloatDiv => OpCode::FloatDiv,
            BinaryOp::FloatMod => OpCode::FloatMod,
            BinaryOp::FloatSmaller => OpCode::FloatSmaller,
            BinaryOp::FloatGreater => OpCode::FloatGreater,
            BinaryOp::FloatEquals => OpCode::FloatEquals,
            BinaryOp::StringEquals => OpCode::StringEquals,
            BinaryOp::StringConcat => OpCode::StringConcat,
            BinaryOp::ArrayAt => OpCode::ArrayAt,
            BinaryOp::ArrayRemove => OpCode::ArrayRemove,
            BinaryOp::ObjectEquals => OpCode::ObjectEquals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opcode_repr() {
        assert_eq!(OpCode::GetGlobal.tag(), 0);
        assert_eq!(OpCode::SetGlobal.tag(), 1);
    }

    #[test]
    fn opcode_from_u16() {
        assert_eq!(OpCode::from_u16(0), Some(OpCode::GetGlobal));
        assert_eq!(OpCode::from_u16(OpCode::ObjectEquals.tag()), Some(OpCode::ObjectEquals));
        assert_eq!(OpCode::from_u16(OpCode::ObjectEquals.tag() + 1), None);
    }

    #[test]
    fn opcode_name() {
        assert_eq!(OpCode::GotoIfTrue.name(), "GOTO_IF_TRUE");
        assert_eq!(OpCode::SendMessage.name(), "SEND_MESSAGE");
        assert_eq!(OpCode::IntegerAdd.name(), "INTEGER_ADD");
    }

    #[test]
    fn arities() {
        assert!(OpCode::Goto.arity().accepts(1));
        assert!(!OpCode::Goto.arity().accepts(2));

        assert!(OpCode::SetObject.arity().accepts(2));
        assert!(OpCode::SetObject.arity().accepts(3));
        assert!(!OpCode::SetObject.arity().accepts(4));

        assert!(OpCode::TailCall.arity().accepts(0));
        assert!(OpCode::SendMessage.arity().accepts(10));
        assert!(!OpCode::SendMessage.arity().accepts(2));
    }

    #[test]
    fn primitive_ops_keep_their_arity() {
        for op in NullaryOp::ALL {
            assert_eq!(OpCode::from(*op).arity(), Arity::fixed(1), "{}", op.name());
        }
        for op in UnaryOp::ALL {
            assert_eq!(OpCode::from(*op).arity(), Arity::fixed(2), "{}", op.name());
        }
        for op in BinaryOp::ALL {
            assert_eq!(OpCode::from(*op).arity(), Arity::fixed(3), "{}", op.name());
        }
    }

    #[test]
    fn jumps() {
        assert!(OpCode::Goto.is_jump());
        assert!(OpCode::GotoIfTrue.is_jump());
        assert!(!OpCode::Return.is_jump());
    }
}
