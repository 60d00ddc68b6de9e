//! Literal pool for compiled code objects.
//!
//! The literal pool stores the constant values referenced by `SET_LITERAL`
//! instructions, and the message and attribute names referenced by sends
//! and attribute accesses. Each code object owns its own pool.

use regcode_core::Literal;
use rustc_hash::FxHashMap;

/// Per-code-object literal pool with deduplication.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LiteralPool {
    /// The literals, in first-occurrence order.
    literals: Vec<Literal>,
    /// Deduplication index: maps literal to its index.
    index: FxHashMap<LiteralKey, u32>,
}

/// Key for literal deduplication.
///
/// Floats are keyed by bit pattern so `0.0` and `-0.0` get separate entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum LiteralKey {
    Nil,
    Boolean(bool),
    Integer(i64),
    Float(u64), // Bit pattern for hashing
    String(String),
    Symbol(String),
    Array(Vec<LiteralKey>),
}

impl LiteralPool {
    /// Create a new empty literal pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or get an existing literal, returns its index.
    ///
    /// Equal literals always get the same index. Indices are assigned in
    /// first-occurrence order and are never reused.
    pub fn intern(&mut self, literal: Literal) -> u32 {
        let key = Self::to_key(&literal);

        if let Some(&idx) = self.index.get(&key) {
            return idx;
        }

        let idx = self.literals.len() as u32;
        self.literals.push(literal);
        self.index.insert(key, idx);
        idx
    }

    /// Add a string literal.
    pub fn intern_string(&mut self, value: &str) -> u32 {
        self.intern(Literal::String(value.to_string()))
    }

    /// Get literal by index.
    pub fn get(&self, index: u32) -> Option<&Literal> {
        self.literals.get(index as usize)
    }

    /// Get all literals (for serialization).
    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    /// Number of literals.
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// Check if the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Convert a literal to its hashable key representation.
    fn to_key(literal: &Literal) -> LiteralKey {
        match literal {
            Literal::Nil => LiteralKey::Nil,
            Literal::Boolean(v) => LiteralKey::Boolean(*v),
            Literal::Integer(v) => LiteralKey::Integer(*v),
            Literal::Float(v) => LiteralKey::Float(v.0.to_bits()),
            Literal::String(s) => LiteralKey::String(s.clone()),
            Literal::Symbol(s) => LiteralKey::Symbol(s.clone()),
            Literal::Array(values) => LiteralKey::Array(values.iter().map(Self::to_key).collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_pool_is_empty() {
        let pool = LiteralPool::new();
        assert!(pool.is_empty());
        assert_eq!(pool.len(), 0);
    }

    #[test]
    fn first_occurrence_order() {
        let mut pool = LiteralPool::new();

        assert_eq!(pool.intern(Literal::string("a")), 0);
        assert_eq!(pool.intern(Literal::string("b")), 1);
        assert_eq!(pool.intern(Literal::string("a")), 0);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn deduplication_is_by_value() {
        let mut pool = LiteralPool::new();

        let idx1 = pool.intern(Literal::Integer(100));
        let idx2 = pool.intern(Literal::Integer(200));
        let idx3 = pool.intern(Literal::Integer(100));

        assert_eq!(idx1, 0);
        assert_eq!(idx2, 1);
        assert_eq!(idx3, 0);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn kinds_do_not_collide() {
        let mut pool = LiteralPool::new();

        let string = pool.intern(Literal::string("x"));
        let symbol = pool.intern(Literal::symbol("x"));
        let one = pool.intern(Literal::Integer(1));
        let one_float = pool.intern(Literal::float(1.0));
        let truth = pool.intern(Literal::Boolean(true));

        let indices = [string, symbol, one, one_float, truth];
        assert_eq!(indices, [0, 1, 2, 3, 4]);
    }

    #[test]
    fn float_deduplication_by_bits() {
        let mut pool = LiteralPool::new();

        let idx1 = pool.intern(Literal::float(1.0));
        let idx2 = pool.intern(Literal::float(1.0));
        let zero = pool.intern(Literal::float(0.0));
        let negative_zero = pool.intern(Literal::float(-0.0));

        assert_eq!(idx1, idx2);
        assert_ne!(zero, negative_zero);
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn array_deduplication() {
        let mut pool = LiteralPool::new();

        let a = Literal::Array(vec![Literal::Integer(1), Literal::string("two")]);
        let b = Literal::Array(vec![Literal::Integer(1), Literal::string("three")]);

        assert_eq!(pool.intern(a.clone()), 0);
        assert_eq!(pool.intern(b), 1);
        assert_eq!(pool.intern(a), 0);
    }

    #[test]
    fn intern_string_matches_string_literal() {
        let mut pool = LiteralPool::new();

        let name = pool.intern_string("length");
        assert_eq!(pool.intern(Literal::string("length")), name);
        assert_eq!(pool.get(name), Some(&Literal::string("length")));
    }

    #[test]
    fn get_out_of_bounds() {
        let pool = LiteralPool::new();
        assert_eq!(pool.get(0), None);
        assert_eq!(pool.get(100), None);
    }
}
