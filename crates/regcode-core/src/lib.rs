//! Core types shared by the regcode IR and code generator.
//!
//! This crate holds the leaf types every other crate depends on:
//!
//! - [`Location`] - source positions carried by IR and bytecode instructions
//! - [`RegisterId`], [`VariableIndex`], [`BlockId`] - pre-resolved identifiers
//! - [`Literal`] - constant values stored in a code object's literal pool
//! - [`CodegenError`] - the failures code generation can report

mod error;
mod ids;
mod literal;
mod location;

pub use error::{CodegenError, Result};
pub use ids::{BlockId, RegisterId, VariableIndex};
pub use literal::Literal;
pub use location::Location;
