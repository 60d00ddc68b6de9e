//! Code objects and modules.

use std::path::PathBuf;

use regcode_core::{BlockId, Location, RegisterId};

use crate::BasicBlock;

/// A declared argument of a method, block or closure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentIr {
    /// Argument name.
    pub name: String,
    /// Whether the argument has a default value.
    pub default: bool,
    /// Whether the argument collects all remaining arguments.
    pub rest: bool,
}

impl ArgumentIr {
    /// A required argument.
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: false,
            rest: false,
        }
    }

    /// An argument with a default value.
    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: true,
            rest: false,
        }
    }

    /// A rest argument.
    pub fn rest(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: false,
            rest: true,
        }
    }
}

/// A guarded region: exceptions raised while running `try_block` transfer
/// control to the start of `else_block`, depositing the thrown value in
/// `register`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatchEntryIr {
    pub try_block: BlockId,
    pub else_block: BlockId,
    pub register: RegisterId,
}

/// The IR of one method, block or closure body.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeObjectIr {
    /// Display name.
    pub name: String,
    /// Where the body was defined.
    pub location: Location,
    /// Declared arguments, in order.
    pub arguments: Vec<ArgumentIr>,
    /// Number of local variable slots.
    pub local_variables: u32,
    /// Number of registers used.
    pub registers: u32,
    /// Whether the body captures its enclosing scope.
    pub captures: bool,
    /// Basic blocks in layout order.
    pub blocks: Vec<BasicBlock>,
    /// Guarded regions, in declaration order.
    pub catch_table: Vec<CatchEntryIr>,
}

impl CodeObjectIr {
    /// Create an empty code object.
    pub fn new(name: impl Into<String>, location: Location) -> Self {
        Self {
            name: name.into(),
            location,
            arguments: Vec::new(),
            local_variables: 0,
            registers: 0,
            captures: false,
            blocks: Vec::new(),
            catch_table: Vec::new(),
        }
    }

    /// Append a block and return its id.
    pub fn add_block(&mut self, block: BasicBlock) -> BlockId {
        let id = BlockId::new(self.blocks.len() as u32);
        self.blocks.push(block);
        id
    }

    /// Get a block by id.
    pub fn block(&self, id: BlockId) -> Option<&BasicBlock> {
        self.blocks.get(id.position())
    }

    /// The block laid out directly after `id`, if any.
    pub fn successor(&self, id: BlockId) -> Option<BlockId> {
        let next = id.ahead(1);
        self.block(next).map(|_| next)
    }

    /// Iterate over blocks with their ids.
    pub fn iter_blocks(&self) -> impl Iterator<Item = (BlockId, &BasicBlock)> {
        self.blocks
            .iter()
            .enumerate()
            .map(|(i, block)| (BlockId::new(i as u32), block))
    }

    /// Total number of IR instructions across all blocks.
    pub fn instruction_count(&self) -> usize {
        self.blocks.iter().map(BasicBlock::len).sum()
    }

    /// Whether the last declared argument is a rest argument.
    pub fn has_rest_argument(&self) -> bool {
        self.arguments.last().is_some_and(|arg| arg.rest)
    }

    /// Number of declared arguments, not counting a trailing rest argument.
    pub fn arguments_count_without_rest(&self) -> u32 {
        let count = self.arguments.len() as u32;
        if self.has_rest_argument() {
            count - 1
        } else {
            count
        }
    }

    /// Number of arguments that must be passed explicitly.
    pub fn required_arguments_count(&self) -> u32 {
        self.arguments
            .iter()
            .filter(|arg| !arg.default && !arg.rest)
            .count() as u32
    }
}

/// A source module: its name, file, and top-level body.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleIr {
    /// Fully qualified module name.
    pub name: String,
    /// Source file the module was parsed from.
    pub path: PathBuf,
    /// The module's top-level code.
    pub body: CodeObjectIr,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_counts_exclude_rest() {
        let mut code = CodeObjectIr::new("foo", Location::new(1, 1));
        code.arguments = vec![
            ArgumentIr::required("a"),
            ArgumentIr::optional("b"),
            ArgumentIr::rest("rest"),
        ];

        assert!(code.has_rest_argument());
        assert_eq!(code.arguments_count_without_rest(), 2);
        assert_eq!(code.required_arguments_count(), 1);
    }

    #[test]
    fn no_arguments() {
        let code = CodeObjectIr::new("foo", Location::new(1, 1));

        assert!(!code.has_rest_argument());
        assert_eq!(code.arguments_count_without_rest(), 0);
        assert_eq!(code.required_arguments_count(), 0);
    }

    #[test]
    fn successor_of_last_block_is_none() {
        let mut code = CodeObjectIr::new("foo", Location::new(1, 1));
        let first = code.add_block(BasicBlock::new());
        let second = code.add_block(BasicBlock::new());

        assert_eq!(code.successor(first), Some(second));
        assert_eq!(code.successor(second), None);
    }

    #[test]
    fn blocks_iterate_with_ids() {
        let mut code = CodeObjectIr::new("foo", Location::new(1, 1));
        code.add_block(BasicBlock::new());
        code.add_block(BasicBlock::new());

        let ids: Vec<_> = code.iter_blocks().map(|(id, _)| id.index()).collect();
        assert_eq!(ids, vec![0, 1]);
    }
}
