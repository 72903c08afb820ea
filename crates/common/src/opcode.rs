//! Opcode definitions for the IBVM instruction set.

use std::fmt;

use crate::error::DecodeError;

/// Identifies the operation to perform.
///
/// The set is closed: the machine dispatches on it with an exhaustive
/// `match`. `#[repr(u8)]` gives each variant a stable byte value so raw
/// instructions from a loader can be decoded with [`Opcode::try_from`].
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// Push the operand onto the stack.
    Push = 0x01,
    /// Pop b, pop a, push a + b.
    Plus = 0x02,
    /// Pop b, pop a, push a - b.
    Minus = 0x03,
    /// Pop b, pop a, push a * b.
    Mult = 0x04,
    /// Pop b, pop a, push a / b (truncating). Zero divisor traps.
    Div = 0x05,
    /// Set the instruction pointer to the operand.
    Jmp = 0x06,
    /// Stop the machine.
    Halt = 0x07,
}

/// All valid opcodes, in definition order. Useful for exhaustive testing.
pub const ALL_OPCODES: [Opcode; 7] = [
    Opcode::Push,
    Opcode::Plus,
    Opcode::Minus,
    Opcode::Mult,
    Opcode::Div,
    Opcode::Jmp,
    Opcode::Halt,
];

impl Opcode {
    /// Upper-case assembly mnemonic, e.g. `"PUSH"`.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Push => "PUSH",
            Opcode::Plus => "PLUS",
            Opcode::Minus => "MINUS",
            Opcode::Mult => "MULT",
            Opcode::Div => "DIV",
            Opcode::Jmp => "JMP",
            Opcode::Halt => "HALT",
        }
    }

    /// Whether the instruction's operand field carries meaning.
    pub fn has_operand(self) -> bool {
        matches!(self, Opcode::Push | Opcode::Jmp)
    }
}

impl TryFrom<u8> for Opcode {
    type Error = DecodeError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            0x01 => Ok(Opcode::Push),
            0x02 => Ok(Opcode::Plus),
            0x03 => Ok(Opcode::Minus),
            0x04 => Ok(Opcode::Mult),
            0x05 => Ok(Opcode::Div),
            0x06 => Ok(Opcode::Jmp),
            0x07 => Ok(Opcode::Halt),
            other => Err(DecodeError::IllegalOpcode(other)),
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
