//! Block linearization.
//!
//! Basic blocks are emitted in IR order into one stream. This module
//! records where each block starts and ends, and tracks jumps whose target
//! block hasn't been laid out yet so they can be patched once every block
//! has an offset.

use regcode_core::{BlockId, Location};

/// The instruction range a block occupies in the final stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRange {
    /// Offset of the block's first instruction.
    pub start: u32,
    /// One past the offset of the block's last instruction.
    pub end: u32,
}

impl BlockRange {
    /// Number of instructions in the block.
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Check if the block emitted no instructions.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Offsets of every block of a linearized code object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockLayout {
    ranges: Vec<BlockRange>,
}

impl BlockLayout {
    /// Get a block's range.
    pub fn get(&self, block: BlockId) -> Option<BlockRange> {
        self.ranges.get(block.position()).copied()
    }

    /// Number of blocks laid out.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Check if no blocks were laid out.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// All ranges, in block order.
    pub fn ranges(&self) -> &[BlockRange] {
        &self.ranges
    }
}

/// A jump emitted before its target block had an offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingJump {
    /// Offset of the jump instruction.
    pub instruction: u32,
    /// Block whose start offset becomes the jump target.
    pub target: BlockId,
    /// Location of the jump, for error reporting.
    pub location: Location,
}

/// Tracks block boundaries and unresolved jumps during emission.
#[derive(Debug, Default)]
pub struct BlockLinearizer {
    /// Ranges of completed blocks, in order.
    ranges: Vec<BlockRange>,
    /// Start offset of the block being emitted.
    open: Option<u32>,
    /// Jumps to patch once all blocks are laid out.
    pending: Vec<PendingJump>,
}

impl BlockLinearizer {
    /// Create a new linearizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// The block currently being emitted.
    pub fn current_block(&self) -> Option<BlockId> {
        self.open.map(|_| BlockId::new(self.ranges.len() as u32))
    }

    /// Start the next block at `offset`.
    ///
    /// Blocks must be opened in order and closed before the next one opens.
    pub fn begin_block(&mut self, offset: u32) -> BlockId {
        debug_assert!(self.open.is_none(), "previous block was not closed");
        self.open = Some(offset);
        BlockId::new(self.ranges.len() as u32)
    }

    /// Close the current block at `offset`.
    pub fn end_block(&mut self, offset: u32) {
        let start = self.open.take().unwrap_or(offset);
        self.ranges.push(BlockRange { start, end: offset });
    }

    /// Record a jump whose first operand must become `target`'s start offset.
    pub fn add_jump(&mut self, instruction: u32, target: BlockId, location: Location) {
        self.pending.push(PendingJump {
            instruction,
            target,
            location,
        });
    }

    /// Number of unresolved jumps.
    pub fn pending_jumps(&self) -> usize {
        self.pending.len()
    }

    /// Finish linearization, returning the layout and the jumps to patch.
    pub fn finish(mut self, offset: u32) -> (BlockLayout, Vec<PendingJump>) {
        if self.open.is_some() {
            self.end_block(offset);
        }

        (
            BlockLayout {
                ranges: self.ranges,
            },
            self.pending,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_linearizer_has_no_block() {
        let linearizer = BlockLinearizer::new();
        assert_eq!(linearizer.current_block(), None);
        assert_eq!(linearizer.pending_jumps(), 0);
    }

    #[test]
    fn ranges_are_contiguous() {
        let mut linearizer = BlockLinearizer::new();

        assert_eq!(linearizer.begin_block(0), BlockId::new(0));
        linearizer.end_block(3);
        assert_eq!(linearizer.begin_block(3), BlockId::new(1));
        linearizer.end_block(3);
        assert_eq!(linearizer.begin_block(3), BlockId::new(2));
        linearizer.end_block(5);

        let (layout, pending) = linearizer.finish(5);
        assert!(pending.is_empty());
        assert_eq!(
            layout.ranges(),
            &[
                BlockRange { start: 0, end: 3 },
                BlockRange { start: 3, end: 3 },
                BlockRange { start: 3, end: 5 },
            ]
        );
        assert!(layout.get(BlockId::new(1)).is_some_and(|r| r.is_empty()));
        assert_eq!(layout.get(BlockId::new(2)).map(|r| r.len()), Some(2));
    }

    #[test]
    fn current_block_tracks_open_block() {
        let mut linearizer = BlockLinearizer::new();
        linearizer.begin_block(0);
        linearizer.end_block(1);
        linearizer.begin_block(1);

        assert_eq!(linearizer.current_block(), Some(BlockId::new(1)));
    }

    #[test]
    fn finish_closes_open_block() {
        let mut linearizer = BlockLinearizer::new();
        linearizer.begin_block(0);

        let (layout, _) = linearizer.finish(2);
        assert_eq!(layout.get(BlockId::new(0)), Some(BlockRange { start: 0, end: 2 }));
    }

    #[test]
    fn jumps_are_kept_in_emission_order() {
        let mut linearizer = BlockLinearizer::new();
        linearizer.begin_block(0);
        linearizer.add_jump(0, BlockId::new(2), Location::new(1, 1));
        linearizer.add_jump(1, BlockId::new(1), Location::new(2, 1));
        linearizer.end_block(2);

        let (_, pending) = linearizer.finish(2);
        let targets: Vec<_> = pending.iter().map(|j| j.target.index()).collect();
        assert_eq!(targets, vec![2, 1]);
    }
}
