//! Fetch-decode-execute: single stepping, the run loop and opcode dispatch.

use crate::error::Trap;
use crate::machine::Machine;
use ibvm_common::{Opcode, Word};

/// How a bounded run ended without a trap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// The machine halted after `steps` steps.
    Halted { steps: u64 },
    /// The step budget ran out; the machine can be resumed.
    BudgetExhausted { steps: u64 },
}

impl<'a> Machine<'a> {
    /// Execute the instruction at the instruction pointer.
    ///
    /// A halted machine does nothing and returns `Ok`. Reaching the end of
    /// the program halts the machine. On a trap no state is modified, the
    /// instruction pointer included.
    pub fn step(&mut self) -> Result<(), Trap> {
        if self.halted {
            return Ok(());
        }
        let Some(&instr) = self.program.get(self.ip) else {
            self.halted = true;
            return Ok(());
        };
        let opcode = instr.opcode().map_err(|_| Trap::IllegalInst {
            at: self.ip,
            opcode: instr.raw_opcode(),
        })?;

        match opcode {
            Opcode::Push => self.exec_push(instr.operand())?,
            Opcode::Plus => self.exec_binary_arith(Word::wrapping_add)?,
            Opcode::Minus => self.exec_binary_arith(Word::wrapping_sub)?,
            Opcode::Mult => self.exec_binary_arith(Word::wrapping_mul)?,
            Opcode::Div => self.exec_div()?,
            Opcode::Jmp => {
                self.ip = self.jump_target(instr.operand())?;
                return Ok(());
            }
            Opcode::Halt => self.halted = true,
        }

        self.ip += 1;
        if self.ip == self.program.len() {
            self.halted = true;
        }
        Ok(())
    }

    /// Step until halted or trapped. Never returns if the program loops.
    pub fn run(&mut self) -> Result<(), Trap> {
        while !self.halted {
            self.step()?;
        }
        Ok(())
    }

    /// Step until halted, trapped, or `max_steps` instructions have executed.
    pub fn run_bounded(&mut self, max_steps: u64) -> Result<RunStatus, Trap> {
        self.run_bounded_with(max_steps, |_| Ok(()))
    }

    /// Like [`run_bounded`](Self::run_bounded), calling `before_step` with
    /// the machine ahead of every step.
    ///
    /// Only steps that execute an instruction count against the budget; the
    /// implicit halt at the end of the program is free.
    pub fn run_bounded_with<E, F>(
        &mut self,
        max_steps: u64,
        mut before_step: F,
    ) -> Result<RunStatus, E>
    where
        E: From<Trap>,
        F: FnMut(&Self) -> Result<(), E>,
    {
        let mut steps = 0;
        while !self.halted {
            if steps == max_steps {
                return Ok(RunStatus::BudgetExhausted { steps });
            }
            before_step(self)?;
            let executes = self.current_instruction().is_some();
            self.step()?;
            if executes {
                steps += 1;
            }
        }
        Ok(RunStatus::Halted { steps })
    }

    fn exec_push(&mut self, value: Word) -> Result<(), Trap> {
        if self.stack.len() >= self.capacity {
            return Err(Trap::StackOverflow { at: self.ip });
        }
        self.stack.push(value);
        Ok(())
    }

    /// The two topmost values as `(a, b)`, `b` being the top.
    fn operands(&self) -> Result<(Word, Word), Trap> {
        match self.stack[..] {
            [.., a, b] => Ok((a, b)),
            _ => Err(Trap::StackUnderflow { at: self.ip }),
        }
    }

    fn replace_operands(&mut self, result: Word) {
        self.stack.pop();
        if let Some(top) = self.stack.last_mut() {
            *top = result;
        }
    }

    fn exec_binary_arith(&mut self, op: fn(Word, Word) -> Word) -> Result<(), Trap> {
        let (a, b) = self.operands()?;
        self.replace_operands(op(a, b));
        Ok(())
    }

    fn exec_div(&mut self) -> Result<(), Trap> {
        let (a, b) = self.operands()?;
        if b == 0 {
            return Err(Trap::DivisionByZero { at: self.ip });
        }
        self.replace_operands(a.wrapping_div(b));
        Ok(())
    }

    fn jump_target(&self, target: Word) -> Result<usize, Trap> {
        usize::try_from(target)
            .ok()
            .filter(|&t| t < self.program.len())
            .ok_or(Trap::OutOfBoundsJump {
                at: self.ip,
                target,
                len: self.program.len(),
            })
    }
}
