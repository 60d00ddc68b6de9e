//! Constant values referenced by bytecode instructions.

use std::fmt;

use ordered_float::OrderedFloat;

/// A constant value stored in a literal pool.
///
/// Literals compare and hash by value. Floats are wrapped in [`OrderedFloat`]
/// to give them total equality, so `NaN` equals itself and `0.0` equals
/// `-0.0`. Literal pools deduplicate floats by bit pattern instead, keeping
/// the two zeros apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Literal {
    /// The nil value.
    Nil,
    /// A boolean.
    Boolean(bool),
    /// A signed 64-bit integer.
    Integer(i64),
    /// A 64-bit float.
    Float(OrderedFloat<f64>),
    /// A string.
    String(String),
    /// An interned symbol, distinct from a string with the same text.
    Symbol(String),
    /// An immutable array of literals.
    Array(Vec<Literal>),
}

impl Literal {
    /// Create a float literal.
    pub fn float(value: f64) -> Self {
        Literal::Float(OrderedFloat(value))
    }

    /// Create a string literal.
    pub fn string(value: impl Into<String>) -> Self {
        Literal::String(value.into())
    }

    /// Create a symbol literal.
    pub fn symbol(value: impl Into<String>) -> Self {
        Literal::Symbol(value.into())
    }

    /// Human-readable name of the literal's kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Literal::Nil => "nil",
            Literal::Boolean(_) => "boolean",
            Literal::Integer(_) => "integer",
            Literal::Float(_) => "float",
            Literal::String(_) => "string",
            Literal::Symbol(_) => "symbol",
            Literal::Array(_) => "array",
        }
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Integer(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::float(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Boolean(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::string(value)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Nil => write!(f, "nil"),
            Literal::Boolean(value) => write!(f, "{}", value),
            Literal::Integer(value) => write!(f, "{}", value),
            Literal::Float(value) => write!(f, "{:?}", value.0),
            Literal::String(value) => write!(f, "{:?}", value),
            Literal::Symbol(value) => write!(f, ":{}", value),
            Literal::Array(values) => {
                write!(f, "[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                write!(f, "]")
            }
        }
    }
}
