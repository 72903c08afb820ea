//! IBVM CLI — list, show and run the built-in programs.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Usage error or unknown program
//! - 3: Execution stopped on a trap
//! - 4: Step budget exhausted

mod catalog;
mod commands;

use std::process;

use clap::{Args, Parser, Subcommand};
use ibvm_vm::DEFAULT_STACK_CAPACITY;

/// Upper bound for `--stack-capacity`; the stack is allocated up front.
const MAX_STACK_CAPACITY: u64 = 1 << 20;

#[derive(Parser)]
#[command(name = "ibvm", version, about = "Run programs on the IBVM stack machine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the built-in programs
    List,
    /// Print a built-in program's instructions
    Show {
        /// Program name (see `ibvm list`)
        name: String,
    },
    /// Execute a built-in program and print the final stack
    Run(RunArgs),
}

#[derive(Args)]
pub struct RunArgs {
    /// Program name (see `ibvm list`)
    pub name: String,

    /// Maximum number of words on the stack
    #[arg(
        long,
        default_value_t = DEFAULT_STACK_CAPACITY,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..=MAX_STACK_CAPACITY)
    )]
    pub stack_capacity: usize,

    /// Stop after this many steps
    #[arg(long)]
    pub max_steps: Option<u64>,

    /// Print each instruction and the stack after every step
    #[arg(long)]
    pub trace: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            process::exit(code);
        }
    };

    let result = match cli.command {
        Command::List => commands::list(),
        Command::Show { name } => commands::show(&name),
        Command::Run(args) => commands::run(&args),
    };

    if let Err(code) = result {
        process::exit(code);
    }
}
