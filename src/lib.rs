//! # Classic BASIC
//!
//! An interpreter for line-numbered BASIC programs in the style of
//! the 8-bit era: line labels, `GOTO`/`GOSUB`, `FOR`/`NEXT`,
//! `DATA`/`READ`/`RESTORE` and single precision numbers.
//!
//! ```
//! use basic::mach::{run, Config, Program};
//! use std::collections::VecDeque;
//!
//! let program = Program::load("10 PRINT \"HELLO\"").unwrap();
//! let mut input: VecDeque<String> = VecDeque::new();
//! let mut output: Vec<u8> = vec![];
//! run(&program, &mut input, &mut output, &Config::default()).unwrap();
//! assert_eq!(output, b"HELLO\n");
//! ```
//!
//! The `basic` binary runs a source file on the console:
//! ```text
//! basic game.bas --seed 42
//! ```

pub mod lang;
pub mod mach;
pub mod term;
