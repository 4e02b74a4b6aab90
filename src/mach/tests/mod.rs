use super::*;
use std::collections::VecDeque;


fn exec_with_input(source: &str, input: &[&str]) -> String {
    let program = match Program::load(source) {
        Ok(program) => program,
        Err(error) => return format!("{}\n", error),
    };
    let mut input: VecDeque<String> = input.iter().map(|s| s.to_string()).collect();
    let mut output: Vec<u8> = vec![];
    let config = Config {
        seed: Some(1),
        ..Config::default()
    };
    let result = run(&program, &mut input, &mut output, &config);
    let mut s = String::from_utf8(output).unwrap();
    if let Err(error) = result {
        s.push_str(&format!("{}\n", error));
    }
    s
}

fn exec(source: &str) -> String {
    exec_with_input(source, &[])
}

fn exec_limited(source: &str, stack_limit: usize) -> String {
    let program = Program::load(source).unwrap();
    let mut input: VecDeque<String> = VecDeque::new();
    let mut output: Vec<u8> = vec![];
    let config = Config {
        seed: Some(1),
        stack_limit,
    };
    match run(&program, &mut input, &mut output, &config) {
        Ok(()) => String::from_utf8(output).unwrap(),
        Err(error) => error.to_string(),
    }
}
