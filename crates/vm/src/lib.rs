//! IBVM virtual machine — executes instruction sequences over a bounded
//! stack of 64-bit integers.
//!
//! The machine holds:
//! - A stack with a fixed capacity, checked on every push
//! - An instruction pointer into a borrowed [`Program`]
//! - A halted flag
//!
//! Every fault is reported as a [`Trap`] value and leaves the machine
//! inspectable.
//!
//! # Usage
//!
//! ```
//! use ibvm_common::{Instruction, Program};
//! use ibvm_vm::run;
//!
//! let program = Program::new(vec![
//!     Instruction::push(69),
//!     Instruction::push(420),
//!     Instruction::plus(),
//!     Instruction::push(42),
//!     Instruction::minus(),
//! ]);
//!
//! assert_eq!(run(&program), Ok(vec![447]));
//! ```

pub mod error;
pub mod execute;
pub mod machine;

pub use error::{ConfigError, Trap, TRAP_OK_NAME};
pub use execute::RunStatus;
pub use machine::{Machine, MachineConfig, DEFAULT_STACK_CAPACITY};

use ibvm_common::{Program, Word};

/// Execute a program with the default configuration and return the final
/// stack.
///
/// # Errors
///
/// Returns the [`Trap`] that stopped execution. Use [`Machine`] directly to
/// inspect the state at the fault.
pub fn run(program: &Program) -> Result<Vec<Word>, Trap> {
    let mut vm = Machine::new(program);
    vm.run()?;
    Ok(vm.stack)
}
