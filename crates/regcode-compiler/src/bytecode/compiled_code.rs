//! Compiled code objects.
//!
//! A [`CompiledCode`] is the output of code generation for one method,
//! block or closure. It owns its instruction stream, literal pool, catch
//! table and the code objects of any closures defined in its body.

use regcode_core::Location;

use super::{CatchTable, Instruction, LiteralPool, OpCode};

/// Argument, local and register counts of a code object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodeMetadata {
    /// Number of arguments, excluding a trailing rest argument.
    pub arguments: u32,
    /// Number of arguments without a default value.
    pub required_arguments: u32,
    /// Whether the last argument is a rest argument.
    pub rest_argument: bool,
    /// Number of local variable slots.
    pub locals: u32,
    /// Number of registers.
    pub registers: u32,
    /// Whether the code object captures its enclosing scope.
    pub captures: bool,
}

impl CodeMetadata {
    /// The rest argument flag as written to a bytecode image.
    pub fn rest_argument_flag(&self) -> u8 {
        self.rest_argument as u8
    }

    /// The captures flag as written to a bytecode image.
    pub fn captures_flag(&self) -> u8 {
        self.captures as u8
    }
}

/// The compiled form of one method, block or closure.
///
/// Immutable once produced by code generation.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledCode {
    name: String,
    location: Location,
    metadata: CodeMetadata,
    instructions: Vec<Instruction>,
    literals: LiteralPool,
    code_objects: CodeObjectTable,
    catch_table: CatchTable,
}

impl CompiledCode {
    pub(crate) fn new(
        name: String,
        location: Location,
        metadata: CodeMetadata,
        instructions: Vec<Instruction>,
        literals: LiteralPool,
        code_objects: CodeObjectTable,
        catch_table: CatchTable,
    ) -> Self {
        Self {
            name,
            location,
            metadata,
            instructions,
            literals,
            code_objects,
            catch_table,
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Where the code object was defined.
    pub fn location(&self) -> Location {
        self.location
    }

    /// Argument, local and register counts.
    pub fn metadata(&self) -> &CodeMetadata {
        &self.metadata
    }

    /// The instruction stream.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Get the instruction at `offset`.
    pub fn instruction(&self, offset: u32) -> Option<&Instruction> {
        self.instructions.get(offset as usize)
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Check if the instruction stream is empty.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// The literal pool.
    pub fn literals(&self) -> &LiteralPool {
        &self.literals
    }

    /// Code objects of closures defined in this one.
    pub fn code_objects(&self) -> &CodeObjectTable {
        &self.code_objects
    }

    /// The catch table.
    pub fn catch_table(&self) -> &CatchTable {
        &self.catch_table
    }

    /// Extract all opcodes from the stream.
    ///
    /// This is useful for testing instruction sequences without worrying
    /// about operand values.
    pub fn opcodes(&self) -> Vec<OpCode> {
        self.instructions.iter().map(|ins| ins.opcode).collect()
    }

    /// Check if this code object contains exactly the given opcode sequence.
    ///
    /// Panics with a descriptive message if the sequences don't match.
    #[track_caller]
    pub fn assert_opcodes(&self, expected: &[OpCode]) {
        let actual = self.opcodes();
        assert_eq!(
            actual,
            expected,
            "Bytecode mismatch.\nExpected: {:?}\nActual:   {:?}",
            expected.iter().map(|op| op.name()).collect::<Vec<_>>(),
            actual.iter().map(|op| op.name()).collect::<Vec<_>>(),
        );
    }

    /// Check if this code object contains the given opcodes (in order, but
    /// not necessarily contiguous).
    #[track_caller]
    pub fn assert_contains_opcodes(&self, expected: &[OpCode]) {
        let actual = self.opcodes();
        let mut expected_iter = expected.iter().peekable();

        for op in &actual {
            if expected_iter.peek() == Some(&op) {
                expected_iter.next();
            }
        }

        if expected_iter.peek().is_some() {
            let remaining: Vec<_> = expected_iter.map(|op| op.name()).collect();
            panic!(
                "Missing opcodes in sequence.\nExpected to find: {:?}\nActual bytecode:  {:?}",
                remaining,
                actual.iter().map(|op| op.name()).collect::<Vec<_>>(),
            );
        }
    }
}

/// Nested code objects, indexed in the order they were added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodeObjectTable {
    code_objects: Vec<CompiledCode>,
}

impl CodeObjectTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a code object and return its index.
    pub fn add(&mut self, code: CompiledCode) -> u32 {
        let index = self.code_objects.len() as u32;
        self.code_objects.push(code);
        index
    }

    /// Get a code object by index.
    pub fn get(&self, index: u32) -> Option<&CompiledCode> {
        self.code_objects.get(index as usize)
    }

    /// Number of code objects.
    pub fn len(&self) -> usize {
        self.code_objects.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.code_objects.is_empty()
    }

    /// Iterate over code objects in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, CompiledCode> {
        self.code_objects.iter()
    }
}

impl<'a> IntoIterator for &'a CodeObjectTable {
    type Item = &'a CompiledCode;
    type IntoIter = std::slice::Iter<'a, CompiledCode>;

    fn into_iter(self) -> Self::IntoIter {
        self.code_objects.iter()
    }
}
