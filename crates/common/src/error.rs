//! Decode errors for IBVM instructions.

use thiserror::Error;

/// Errors that occur while interpreting a raw opcode byte.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Byte is not one of the defined opcodes.
    #[error("illegal opcode: {0:#04x}")]
    IllegalOpcode(u8),
}
