#![allow(dead_code)]

use basic::lang::Error;
use basic::mach::{run, Config, Program};
use std::collections::VecDeque;

pub const SEED: u64 = 1977;

fn config() -> Config {
    Config {
        seed: Some(SEED),
        ..Config::default()
    }
}

/// Output of a program, with a failure appended as its own line.
pub fn exec(source: &str) -> String {
    exec_with_input(source, &[])
}

pub fn exec_with_input(source: &str, input: &[&str]) -> String {
    let (output, result) = capture(source, input);
    match result {
        Ok(()) => output,
        Err(error) => format!("{}{}\n", output, error),
    }
}

/// The error a program fails with. Panics if it succeeds.
pub fn exec_err(source: &str) -> Error {
    match capture(source, &[]).1 {
        Ok(()) => panic!("program ran without error: {:?}", source),
        Err(error) => error,
    }
}

fn capture(source: &str, input: &[&str]) -> (String, Result<(), Error>) {
    let program = match Program::load(source) {
        Ok(program) => program,
        Err(error) => return (String::new(), Err(error)),
    };
    let mut input: VecDeque<String> = input.iter().map(|s| s.to_string()).collect();
    let mut output: Vec<u8> = vec![];
    let result = run(&program, &mut input, &mut output, &config());
    (String::from_utf8(output).unwrap(), result)
}
