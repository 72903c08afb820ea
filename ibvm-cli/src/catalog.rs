//! Built-in demo programs.
//!
//! There is no textual assembler or bytecode file format, so the driver
//! ships its programs as literal instruction sequences.

use std::fmt;

use ibvm_common::{Instruction, Program, Word};

/// A named program with its expected outcome under the default capacity.
#[derive(Debug, Clone)]
pub struct ProgramSpec {
    /// Name used on the command line, e.g. `"sum"`.
    pub id: &'static str,
    /// One-line description.
    pub intent: &'static str,
    pub program: Program,
    pub expected: Outcome,
}

/// What running a catalog program produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Finishes without a trap, leaving this stack.
    Halts(&'static [Word]),
    /// Stops with the named trap.
    Traps(&'static str),
    /// Never halts; needs `--max-steps`.
    Diverges,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Halts(stack) => write!(f, "halts with stack {stack:?}"),
            Outcome::Traps(name) => write!(f, "traps with {name}"),
            Outcome::Diverges => write!(f, "loops forever"),
        }
    }
}

/// Every built-in program, in listing order.
pub fn all_programs() -> Vec<ProgramSpec> {
    vec![
        ProgramSpec {
            id: "sum",
            intent: "Add 69 and 420, then subtract 42",
            program: Program::new(vec![
                Instruction::push(69),
                Instruction::push(420),
                Instruction::plus(),
                Instruction::push(42),
                Instruction::minus(),
            ]),
            expected: Outcome::Halts(&[447]),
        },
        ProgramSpec {
            id: "arith",
            intent: "Compute (69 + 420 - 42) * 2 / 4",
            program: Program::new(vec![
                Instruction::push(69),
                Instruction::push(420),
                Instruction::plus(),
                Instruction::push(42),
                Instruction::minus(),
                Instruction::push(2),
                Instruction::mult(),
                Instruction::push(4),
                Instruction::div(),
            ]),
            expected: Outcome::Halts(&[223]),
        },
        ProgramSpec {
            id: "div-zero",
            intent: "Divide 1 by 0",
            program: Program::new(vec![
                Instruction::push(1),
                Instruction::push(0),
                Instruction::div(),
            ]),
            expected: Outcome::Traps("TRAP_DIVISION_BY_ZERO"),
        },
        ProgramSpec {
            id: "underflow",
            intent: "Add with an empty stack",
            program: Program::new(vec![Instruction::plus()]),
            expected: Outcome::Traps("TRAP_STACK_UNDERFLOW"),
        },
        ProgramSpec {
            id: "overflow",
            intent: "Push in a loop until the stack is full",
            program: Program::new(vec![Instruction::push(1), Instruction::jmp(0)]),
            expected: Outcome::Traps("TRAP_STACK_OVERFLOW"),
        },
        ProgramSpec {
            id: "spin",
            intent: "Jump to itself forever",
            program: Program::new(vec![Instruction::jmp(0)]),
            expected: Outcome::Diverges,
        },
        ProgramSpec {
            id: "halt",
            intent: "Push 7 and halt before the unreachable tail",
            program: Program::new(vec![
                Instruction::push(7),
                Instruction::halt(),
                Instruction::push(8),
                Instruction::plus(),
            ]),
            expected: Outcome::Halts(&[7]),
        },
    ]
}

/// Look up a program by its command-line name.
pub fn find(id: &str) -> Option<ProgramSpec> {
    all_programs().into_iter().find(|spec| spec.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ibvm_vm::{Machine, RunStatus};

    #[test]
    fn ids_are_unique() {
        let programs = all_programs();
        for (i, spec) in programs.iter().enumerate() {
            assert!(
                programs[i + 1..].iter().all(|other| other.id != spec.id),
                "duplicate id {}",
                spec.id
            );
        }
    }

    #[test]
    fn find_known_and_unknown() {
        assert_eq!(find("sum").map(|spec| spec.id), Some("sum"));
        assert!(find("nope").is_none());
    }

    #[test]
    fn every_program_matches_its_expected_outcome() {
        for spec in all_programs() {
            let mut vm = Machine::new(&spec.program);
            let result = vm.run_bounded(100_000);
            match spec.expected {
                Outcome::Halts(stack) => {
                    assert!(
                        matches!(result, Ok(RunStatus::Halted { .. })),
                        "{}: {result:?}",
                        spec.id
                    );
                    assert_eq!(vm.stack(), stack, "{}", spec.id);
                }
                Outcome::Traps(name) => {
                    let trap = result.expect_err(spec.id);
                    assert_eq!(trap.name(), name, "{}", spec.id);
                }
                Outcome::Diverges => {
                    assert_eq!(
                        result,
                        Ok(RunStatus::BudgetExhausted { steps: 100_000 }),
                        "{}",
                        spec.id
                    );
                }
            }
        }
    }

    #[test]
    fn outcome_display() {
        assert_eq!(Outcome::Halts(&[447]).to_string(), "halts with stack [447]");
        assert_eq!(
            Outcome::Traps("TRAP_STACK_UNDERFLOW").to_string(),
            "traps with TRAP_STACK_UNDERFLOW"
        );
        assert_eq!(Outcome::Diverges.to_string(), "loops forever");
    }
}
