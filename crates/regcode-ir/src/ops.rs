//! Primitive operations carried by nullary, unary and binary instructions.
//!
//! Each operation maps onto exactly one bytecode opcode. Splitting them by
//! arity keeps the operand layout of every operation fixed by its type.

macro_rules! primitive_ops {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $(
                #[doc = concat!("`", $text, "`")]
                $variant,
            )*
        }

        impl $name {
            /// All operations of this arity.
            pub const ALL: &'static [$name] = &[$($name::$variant),*];

            /// Name of the operation as written in IR dumps.
            pub fn name(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)*
                }
            }
        }
    };
}

primitive_ops!(
    /// Operations producing a value from nothing but the destination register.
    NullaryOp {
        GetToplevel => "get_toplevel",
        GetNil => "get_nil",
        GetTrue => "get_true",
        GetFalse => "get_false",
        GetBooleanPrototype => "get_boolean_prototype",
        GetIntegerPrototype => "get_integer_prototype",
        GetFloatPrototype => "get_float_prototype",
        GetStringPrototype => "get_string_prototype",
        GetArrayPrototype => "get_array_prototype",
        GetBlockPrototype => "get_block_prototype",
    }
);

primitive_ops!(
    /// Operations with one operand register.
    UnaryOp {
        IntegerToFloat => "integer_to_float",
        IntegerToString => "integer_to_string",
        FloatToInteger => "float_to_integer",
        FloatToString => "float_to_string",
        StringLength => "string_length",
        StringSize => "string_size",
        ArrayLength => "array_length",
        ArrayClear => "array_clear",
        GetPrototype => "get_prototype",
        CopyRegister => "copy_register",
        Throw => "throw",
        Panic => "panic",
    }
);

primitive_ops!(
    /// Operations with two operand registers.
    BinaryOp {
        IntegerAdd => "integer_add",
        IntegerSub => "integer_sub",
        IntegerMul => "integer_mul",
        IntegerDiv => "integer_div",
        IntegerMod => "integer_mod",
        IntegerBitwiseAnd => "integer_bitwise_and",
        IntegerBitwiseOr => "integer_bitwise_or",
        IntegerBitwiseXor => "integer_bitwise_xor",
        IntegerShiftLeft => "integer_shift_left",
        IntegerShiftRight => "integer_shift_right",
        IntegerSmaller => "integer_smaller",
        IntegerGreater => "integer_greater",
        IntegerEquals => "integer_equals",
        FloatAdd => "float_add",
        FloatSub => "float_sub",
        FloatMul => "float_mul",
        FloatDiv => "float_div",
        FloatMod => "float_mod",
        FloatSmaller => "float_smaller",
        FloatGreater => "float_greater",
        FloatEquals => "float_equals",
        StringEquals => "string_equals",
        StringConcat => "string_concat",
        ArrayAt => "array_at",
        ArrayRemove => "array_remove",
        ObjectEquals => "object_equals",
    }
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        assert_eq!(NullaryOp::GetNil.name(), "get_nil");
        assert_eq!(UnaryOp::ArrayLength.name(), "array_length");
        assert_eq!(BinaryOp::IntegerAdd.name(), "integer_add");
    }

    #[test]
    fn all_lists_every_variant_once() {
        let mut names: Vec<_> = BinaryOp::ALL.iter().map(|op| op.name()).collect();
        let count = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), count);
        assert!(BinaryOp::ALL.contains(&BinaryOp::ObjectEquals));
    }
}
