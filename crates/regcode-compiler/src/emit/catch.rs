//! Catch table construction.
//!
//! Guarded regions are declared in the IR in terms of blocks. Their
//! instruction offsets only exist after linearization, so the table is
//! built from the finished [`BlockLayout`].

use regcode_core::{CodegenError, Location, Result};
use regcode_ir::CatchEntryIr;

use super::BlockLayout;
use crate::bytecode::{CatchEntry, CatchTable};

/// Build the catch table of a linearized code object.
///
/// Produces one entry per descriptor, in descriptor order. `location` is
/// reported if a descriptor names a block the layout doesn't have.
pub fn build_catch_table(
    descriptors: &[CatchEntryIr],
    layout: &BlockLayout,
    location: Location,
) -> Result<CatchTable> {
    let mut table = CatchTable::new();

    for descriptor in descriptors {
        let try_range = layout
            .get(descriptor.try_block)
            .ok_or(CodegenError::MissingBlock {
                block: descriptor.try_block,
                location,
            })?;
        let else_range = layout
            .get(descriptor.else_block)
            .ok_or(CodegenError::MissingBlock {
                block: descriptor.else_block,
                location,
            })?;

        let entry = CatchEntry {
            start: try_range.start,
            stop: try_range.end,
            jump_to: else_range.start,
            register: descriptor.register.index(),
        };

        debug_assert!(
            !entry.covers(entry.jump_to),
            "handler {} lies inside its own guarded range",
            entry.jump_to
        );

        table.push(entry);
    }

    Ok(table)
}
