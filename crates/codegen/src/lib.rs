//! Configuration-driven source generator.
//!
//! The binary is a thin wrapper: it parses arguments and hands them to
//! [`generate::execute`], which does the I/O around
//! [`codegen_template`] rendering.

pub mod generate;

pub use generate::{GenerateArgs, GenerateOutcome, execute};
