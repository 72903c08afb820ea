//! Machine state: bounded stack, instruction pointer, halted flag.

use std::fmt;
use std::io;

use ibvm_common::{Instruction, Program, Word};

use crate::error::ConfigError;

/// Stack capacity used when none is configured.
pub const DEFAULT_STACK_CAPACITY: usize = 1028;

/// Construction-time settings for a [`Machine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MachineConfig {
    /// Maximum number of words the stack may hold.
    pub stack_capacity: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            stack_capacity: DEFAULT_STACK_CAPACITY,
        }
    }
}

/// The IBVM machine.
///
/// Borrows its program read-only, so any number of machines can run the
/// same program independently. The stack buffer is allocated once, at
/// construction, with room for `capacity` words; stepping never allocates.
#[derive(Debug)]
pub struct Machine<'a> {
    /// The program being executed.
    pub(crate) program: &'a Program,
    /// Operand stack. Top is the last element; `stack.len()` is the size.
    pub(crate) stack: Vec<Word>,
    /// Maximum stack size.
    pub(crate) capacity: usize,
    /// Index of the next instruction to execute.
    pub(crate) ip: usize,
    pub(crate) halted: bool,
}

impl<'a> Machine<'a> {
    /// Create an empty machine with the default stack capacity.
    pub fn new(program: &'a Program) -> Self {
        Self::from_stack(
            program,
            Vec::with_capacity(DEFAULT_STACK_CAPACITY),
            DEFAULT_STACK_CAPACITY,
        )
    }

    /// Create an empty machine with explicit settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::StackReservation`] if a stack of
    /// `stack_capacity` words cannot be allocated.
    pub fn with_config(program: &'a Program, config: MachineConfig) -> Result<Self, ConfigError> {
        let capacity = config.stack_capacity;
        let mut stack = Vec::new();
        stack
            .try_reserve_exact(capacity)
            .map_err(|source| ConfigError::StackReservation { capacity, source })?;
        Ok(Self::from_stack(program, stack, capacity))
    }

    fn from_stack(program: &'a Program, stack: Vec<Word>, capacity: usize) -> Self {
        Self {
            program,
            stack,
            capacity,
            ip: 0,
            halted: false,
        }
    }

    /// Return to the freshly constructed state, keeping program and capacity.
    pub fn reset(&mut self) {
        self.stack.clear();
        self.ip = 0;
        self.halted = false;
    }

    /// Stack contents, bottom first.
    pub fn stack(&self) -> &[Word] {
        &self.stack
    }

    pub fn size(&self) -> usize {
        self.stack.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ip(&self) -> usize {
        self.ip
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// The instruction `step` would execute next, if any.
    pub fn current_instruction(&self) -> Option<&'a Instruction> {
        if self.halted {
            return None;
        }
        self.program.get(self.ip)
    }

    /// Write a listing of the stack, bottom first.
    ///
    /// ```text
    /// Stack:
    ///   69
    ///   420
    /// ```
    pub fn dump<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{self}")
    }
}

impl fmt::Display for Machine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Stack:")?;
        if self.stack.is_empty() {
            writeln!(f, "  [empty]")?;
        }
        for word in &self.stack {
            writeln!(f, "  {word}")?;
        }
        Ok(())
    }
}
