//! Traps raised by the IBVM machine.
//!
//! A trap is a value, never a panic. Every variant carries the index of the
//! instruction that faulted (`at`), and the machine is left exactly as it
//! was before that instruction ran.

use std::collections::TryReserveError;

use ibvm_common::Word;
use thiserror::Error;

/// Diagnostic name for a step that completed without a fault.
pub const TRAP_OK_NAME: &str = "TRAP_OK";

/// Faults that stop execution.
///
/// The set is closed. Successful steps are `Ok(())` and have the name
/// [`TRAP_OK_NAME`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Trap {
    /// PUSH with the stack already at capacity.
    #[error("stack overflow at instruction {at}")]
    StackOverflow { at: usize },

    /// Binary operation with fewer than two values on the stack.
    #[error("stack underflow at instruction {at}")]
    StackUnderflow { at: usize },

    /// Opcode byte outside the instruction set.
    #[error("illegal instruction {opcode:#04x} at instruction {at}")]
    IllegalInst { at: usize, opcode: u8 },

    /// DIV with a zero divisor on top of the stack.
    #[error("division by zero at instruction {at}")]
    DivisionByZero { at: usize },

    /// JMP target outside `[0, len)`.
    #[error("jump target {target} out of bounds (program length {len}) at instruction {at}")]
    OutOfBoundsJump { at: usize, target: Word, len: usize },
}

/// Errors from constructing a machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The stack buffer could not be allocated up front.
    #[error("cannot reserve a stack of {capacity} words")]
    StackReservation {
        capacity: usize,
        #[source]
        source: TryReserveError,
    },
}

impl Trap {
    /// Stable name for diagnostics, e.g. `TRAP_STACK_OVERFLOW`.
    pub fn name(&self) -> &'static str {
        match self {
            Trap::StackOverflow { .. } => "TRAP_STACK_OVERFLOW",
            Trap::StackUnderflow { .. } => "TRAP_STACK_UNDERFLOW",
            Trap::IllegalInst { .. } => "TRAP_ILLEGAL_INST",
            Trap::DivisionByZero { .. } => "TRAP_DIVISION_BY_ZERO",
            Trap::OutOfBoundsJump { .. } => "TRAP_OUT_OF_BOUNDS_JUMP",
        }
    }

    /// Index of the faulting instruction.
    pub fn at(&self) -> usize {
        match *self {
            Trap::StackOverflow { at }
            | Trap::StackUnderflow { at }
            | Trap::IllegalInst { at, .. }
            | Trap::DivisionByZero { at }
            | Trap::OutOfBoundsJump { at, .. } => at,
        }
    }
}
