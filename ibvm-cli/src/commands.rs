//! CLI command implementations.

use std::io::{self, Write};

use ibvm_vm::{Machine, MachineConfig, RunStatus, Trap, TRAP_OK_NAME};
use thiserror::Error;

use crate::catalog::{self, ProgramSpec};
use crate::RunArgs;

/// Print every built-in program with its description.
pub fn list() -> Result<(), i32> {
    let programs = catalog::all_programs();
    let width = programs.iter().map(|spec| spec.id.len()).max().unwrap_or(0);
    for spec in &programs {
        println!("{:<width$}  {}", spec.id, spec.intent);
    }
    Ok(())
}

/// Print a program's listing and expected outcome.
pub fn show(name: &str) -> Result<(), i32> {
    let spec = lookup(name)?;
    println!("; {}: {}", spec.id, spec.intent);
    println!("; {}", spec.expected);
    print!("{}", spec.program);
    Ok(())
}

/// Why a run stopped early.
#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Trap(#[from] Trap),
    #[error("cannot write output: {0}")]
    Io(#[from] io::Error),
}

/// Execute a program and report the final stack, the trap, or the
/// exhausted budget.
pub fn run(args: &RunArgs) -> Result<(), i32> {
    let spec = lookup(&args.name)?;
    let config = MachineConfig {
        stack_capacity: args.stack_capacity,
    };
    let mut vm = Machine::with_config(&spec.program, config).map_err(|e| {
        eprintln!("error: {e}");
        1
    })?;
    let max_steps = args.max_steps.unwrap_or(u64::MAX);

    let result = if args.trace {
        trace(&mut vm, max_steps)
    } else {
        vm.run_bounded(max_steps).map_err(RunError::from)
    };

    match result {
        Ok(RunStatus::Halted { .. }) => {
            if !args.trace {
                vm.dump(&mut io::stdout().lock()).map_err(write_error)?;
            }
            Ok(())
        }
        Ok(RunStatus::BudgetExhausted { steps }) => {
            eprintln!(
                "error: step budget of {steps} exhausted at instruction {}",
                vm.ip()
            );
            report_stack(&vm);
            Err(4)
        }
        Err(RunError::Trap(trap)) => {
            report_trap(&vm, &trap);
            Err(3)
        }
        Err(RunError::Io(e)) => Err(write_error(e)),
    }
}

/// Step one instruction at a time, dumping the stack before the first step
/// and after each one, then printing the trap name.
fn trace(vm: &mut Machine<'_>, max_steps: u64) -> Result<RunStatus, RunError> {
    let mut out = io::stdout().lock();
    let result = vm.run_bounded_with(max_steps, |vm| -> Result<(), RunError> {
        vm.dump(&mut out)?;
        if let Some(instr) = vm.current_instruction() {
            writeln!(out, "{}: {instr}", vm.ip())?;
        }
        Ok(())
    });
    let name = match &result {
        Ok(_) => Some(TRAP_OK_NAME),
        Err(RunError::Trap(trap)) => Some(trap.name()),
        Err(RunError::Io(_)) => None,
    };
    let Some(name) = name else {
        return result;
    };
    vm.dump(&mut out)?;
    writeln!(out, "=> {name}")?;
    out.flush()?;
    result
}

fn report_trap(vm: &Machine<'_>, trap: &Trap) {
    eprintln!("Trap activated: {}", trap.name());
    eprintln!("  {trap}");
    report_stack(vm);
}

fn report_stack(vm: &Machine<'_>) {
    eprint!("{vm}");
}

fn lookup(name: &str) -> Result<ProgramSpec, i32> {
    catalog::find(name).ok_or_else(|| {
        eprintln!("error: unknown program '{name}'");
        eprintln!("Run `ibvm list` to see the built-in programs.");
        1
    })
}

fn write_error(e: io::Error) -> i32 {
    eprintln!("error: cannot write output: {e}");
    1
}
