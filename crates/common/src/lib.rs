//! IBVM common types.
//!
//! This crate provides the data structures shared by the machine and its
//! drivers:
//!
//! - [`Word`] — the machine's signed 64-bit value type
//! - [`Opcode`] — the closed set of seven operations
//! - [`Instruction`] — opcode tag plus operand
//! - [`Program`] — an ordered sequence of instructions
//! - [`DecodeError`] — raised when an opcode byte is not recognized

pub mod error;
pub mod instruction;
pub mod opcode;
pub mod program;

// Re-export commonly used types at the crate root.
pub use error::DecodeError;
pub use instruction::Instruction;
pub use opcode::Opcode;
pub use program::Program;

/// The value type held on the machine stack.
pub type Word = i64;
