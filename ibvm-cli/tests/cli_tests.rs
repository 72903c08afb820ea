//! Integration tests for the IBVM CLI.
//!
//! These tests invoke the `ibvm` binary as a subprocess and check
//! exit codes, stdout, and stderr.

use assert_cmd::Command;
use predicates::prelude::*;

#[allow(deprecated)]
fn ibvm() -> Command {
    Command::cargo_bin("ibvm").unwrap()
}

// ---- No-args / help ----

#[test]
fn no_args_prints_usage_and_exits_1() {
    ibvm()
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Usage: ibvm"));
}

#[test]
fn help_flag_exits_0() {
    ibvm()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Commands:"));
}

#[test]
fn unknown_command_exits_1() {
    ibvm()
        .arg("frobnicate")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("frobnicate"));
}

// ---- List / show ----

#[test]
fn list_names_every_program() {
    let output = ibvm().arg("list").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    for name in ["sum", "arith", "div-zero", "underflow", "overflow", "spin", "halt"] {
        assert!(
            stdout.lines().any(|line| line.starts_with(name)),
            "missing {name}"
        );
    }
}

#[test]
fn show_prints_listing() {
    ibvm()
        .args(["show", "sum"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0: PUSH 69"))
        .stdout(predicate::str::contains("4: MINUS"))
        .stdout(predicate::str::contains("halts with stack [447]"));
}

#[test]
fn show_unknown_program_exits_1() {
    ibvm()
        .args(["show", "nope"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown program 'nope'"));
}

// ---- Run ----

#[test]
fn run_sum_prints_final_stack() {
    ibvm()
        .args(["run", "sum"])
        .assert()
        .success()
        .stdout("Stack:\n  447\n");
}

#[test]
fn run_arith() {
    ibvm()
        .args(["run", "arith"])
        .assert()
        .success()
        .stdout("Stack:\n  223\n");
}

#[test]
fn run_div_zero_reports_trap_and_stack() {
    ibvm()
        .args(["run", "div-zero"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains(
            "Trap activated: TRAP_DIVISION_BY_ZERO",
        ))
        .stderr(predicate::str::contains("division by zero at instruction 2"))
        .stderr(predicate::str::contains("Stack:\n  1\n  0\n"));
}

#[test]
fn run_underflow_reports_empty_stack() {
    ibvm()
        .args(["run", "underflow"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("TRAP_STACK_UNDERFLOW"))
        .stderr(predicate::str::contains("[empty]"));
}

#[test]
fn run_overflow_respects_capacity() {
    ibvm()
        .args(["run", "overflow", "--stack-capacity", "3"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("TRAP_STACK_OVERFLOW"))
        .stderr(predicate::str::contains("Stack:\n  1\n  1\n  1\n"));
}

#[test]
fn zero_capacity_is_a_usage_error() {
    ibvm()
        .args(["run", "sum", "--stack-capacity", "0"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn run_spin_with_budget_exits_4() {
    ibvm()
        .args(["run", "spin", "--max-steps", "50"])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("step budget of 50 exhausted"));
}

#[test]
fn run_halt_skips_unreachable_tail() {
    ibvm()
        .args(["run", "halt"])
        .assert()
        .success()
        .stdout("Stack:\n  7\n");
}

#[test]
fn run_unknown_program_exits_1() {
    ibvm()
        .args(["run", "nope"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("ibvm list"));
}

#[test]
fn trace_dumps_after_each_step() {
    ibvm()
        .args(["run", "div-zero", "--trace"])
        .assert()
        .failure()
        .code(3)
        .stdout(predicate::str::starts_with("Stack:\n  [empty]\n0: PUSH 1\n"))
        .stdout(predicate::str::contains("1: PUSH 0\nStack:\n  1\n  0\n"))
        .stdout(predicate::str::ends_with(
            "2: DIV\nStack:\n  1\n  0\n=> TRAP_DIVISION_BY_ZERO\n",
        ));
}

#[test]
fn trace_sum_ends_with_result() {
    ibvm()
        .args(["run", "sum", "--trace"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with(
            "4: MINUS\nStack:\n  447\n=> TRAP_OK\n",
        ));
}

#[test]
fn trace_with_budget_exits_4() {
    ibvm()
        .args(["run", "spin", "--trace", "--max-steps", "2"])
        .assert()
        .failure()
        .code(4)
        .stdout(predicate::str::contains("0: JMP 0\n").count(2))
        .stdout(predicate::str::ends_with("=> TRAP_OK\n"));
}

// ---- Output failures ----

#[cfg(target_os = "linux")]
fn run_into_full_device(args: &[&str]) -> assert_cmd::assert::Assert {
    use assert_cmd::assert::OutputAssertExt;
    use std::fs::OpenOptions;

    let full = OpenOptions::new().write(true).open("/dev/full").unwrap();
    #[allow(deprecated)]
    let bin = assert_cmd::cargo::cargo_bin("ibvm");
    std::process::Command::new(bin)
        .args(args)
        .stdout(full)
        .assert()
}

#[cfg(target_os = "linux")]
#[test]
fn plain_run_reports_write_failure() {
    run_into_full_device(&["run", "sum"])
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error: cannot write output"));
}

#[cfg(target_os = "linux")]
#[test]
fn trace_reports_write_failure() {
    run_into_full_device(&["run", "sum", "--trace"])
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error: cannot write output"));
}
