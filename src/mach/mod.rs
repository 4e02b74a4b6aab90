/*!
## Rust Machine Module

This Rust module loads a parsed BASIC program into a jump table
and runs it against an input source and an output sink.

*/

mod array;
mod config;
mod def;
mod function;
mod io;
mod operation;
mod program;
mod rnd;
mod runtime;
mod stack;
mod val;
mod var;

pub use array::Array;
pub use config::Config;
pub use def::Defs;
pub use function::Function;
pub use io::{Input, Io, LineInput, Output};
pub use operation::Operation;
pub use program::Program;
pub use rnd::Rnd;
pub use runtime::Runtime;
pub use stack::Stack;
pub use val::Val;
pub use var::Var;

use crate::lang::Error;

/// Runs `program` to completion on a fresh machine.
pub fn run<'a>(
    program: &'a Program,
    input: &'a mut dyn Input,
    output: &'a mut dyn Output,
    config: &Config,
) -> Result<(), Error> {
    Runtime::new(program, input, output, config).run()
}

#[cfg(test)]
mod tests;
