//! A single IBVM instruction: opcode tag plus one operand word.
//!
//! The opcode is stored as its raw byte so that instructions produced by a
//! loader can carry values outside the known set. Such an instruction is
//! representable but traps when executed.

use std::fmt;

use crate::error::DecodeError;
use crate::opcode::Opcode;
use crate::Word;

/// A single IBVM instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instruction {
    opcode: u8,
    operand: Word,
}

impl Instruction {
    /// Create an instruction from a known opcode.
    ///
    /// The operand is ignored by opcodes that do not declare one.
    pub fn new(opcode: Opcode, operand: Word) -> Self {
        Self {
            opcode: opcode as u8,
            operand,
        }
    }

    /// Create an instruction from a raw opcode byte, which may be illegal.
    pub fn from_raw(opcode: u8, operand: Word) -> Self {
        Self { opcode, operand }
    }

    pub fn push(value: Word) -> Self {
        Self::new(Opcode::Push, value)
    }

    pub fn plus() -> Self {
        Self::new(Opcode::Plus, 0)
    }

    pub fn minus() -> Self {
        Self::new(Opcode::Minus, 0)
    }

    pub fn mult() -> Self {
        Self::new(Opcode::Mult, 0)
    }

    pub fn div() -> Self {
        Self::new(Opcode::Div, 0)
    }

    /// Unconditional jump to an absolute program index.
    pub fn jmp(target: Word) -> Self {
        Self::new(Opcode::Jmp, target)
    }

    pub fn halt() -> Self {
        Self::new(Opcode::Halt, 0)
    }

    /// Decode the opcode tag.
    pub fn opcode(&self) -> Result<Opcode, DecodeError> {
        Opcode::try_from(self.opcode)
    }

    /// The raw opcode byte, as stored.
    pub fn raw_opcode(&self) -> u8 {
        self.opcode
    }

    /// The operand word. Meaningful only for PUSH and JMP.
    pub fn operand(&self) -> Word {
        self.operand
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.opcode() {
            Ok(op) if op.has_operand() => write!(f, "{op} {}", self.operand),
            Ok(op) => write!(f, "{op}"),
            Err(_) => write!(f, "<illegal {:#04x}>", self.opcode),
        }
    }
}
