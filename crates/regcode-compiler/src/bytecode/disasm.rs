//! Human-readable disassembly of compiled code.
//!
//! ```text
//! == main (1:1) args=0 required=0 rest=0 locals=1 registers=3 captures=0
//! 0000    SET_LITERAL        0 0        ; 2:5
//! 0001    GOTO_IF_TRUE       3 0        ; 3:5
//! 0002    GOTO               4          ; 4:5
//! 0003  > RETURN             0 1        ; 5:5
//! literals:
//!   0: 10
//! catch table:
//!   [0, 2) -> 3 r1
//! ```

use std::fmt;

use rustc_hash::FxHashSet;

use super::CompiledCode;

impl fmt::Display for CompiledCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_code(f, self, 0)
    }
}

fn write_code(f: &mut fmt::Formatter<'_>, code: &CompiledCode, indent: usize) -> fmt::Result {
    let prefix = "  ".repeat(indent);
    let meta = code.metadata();

    writeln!(
        f,
        "{}== {} ({}) args={} required={} rest={} locals={} registers={} captures={}",
        prefix,
        code.name(),
        code.location(),
        meta.arguments,
        meta.required_arguments,
        meta.rest_argument_flag(),
        meta.locals,
        meta.registers,
        meta.captures_flag(),
    )?;

    let targets: FxHashSet<u32> = code
        .instructions()
        .iter()
        .filter_map(|ins| ins.jump_target())
        .collect();

    for (offset, ins) in code.instructions().iter().enumerate() {
        let marker = if targets.contains(&(offset as u32)) {
            ">"
        } else {
            " "
        };
        let operands = ins
            .operands
            .iter()
            .map(|op| op.to_string())
            .collect::<Vec<_>>()
            .join(" ");

        writeln!(
            f,
            "{}{:04}  {} {:<18} {:<10} ; {}",
            prefix,
            offset,
            marker,
            ins.opcode.name(),
            operands,
            ins.location
        )?;
    }

    if !code.literals().is_empty() {
        writeln!(f, "{}literals:", prefix)?;
        for (index, literal) in code.literals().literals().iter().enumerate() {
            writeln!(f, "{}  {}: {}", prefix, index, literal)?;
        }
    }

    if !code.catch_table().is_empty() {
        writeln!(f, "{}catch table:", prefix)?;
        for entry in code.catch_table() {
            writeln!(
                f,
                "{}  [{}, {}) -> {} r{}",
                prefix, entry.start, entry.stop, entry.jump_to, entry.register
            )?;
        }
    }

    for nested in code.code_objects() {
        write_code(f, nested, indent + 1)?;
    }

    Ok(())
}
