/*!
## Rust Terminal Module

Runs a BASIC source file against the process console. Program
output goes to stdout; diagnostics and errors go to stderr.

*/

use crate::lang::Error;
use crate::mach::{self, Config, Input, LineInput, Program};
use ansi_term::Style;
use clap::Parser;
use std::io::{BufReader, ErrorKind, Stdin, Stdout, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Interpreter for line-numbered classic BASIC programs
#[derive(Parser, Debug)]
#[command(name = "basic")]
#[command(version, about, long_about = None)]
struct Args {
    /// BASIC source file
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Fixed seed for RND instead of the clock
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log: String,
}

pub fn main() {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log)),
        )
        .init();

    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    if let Err(error) = ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    }) {
        debug!(%error, "no Ctrl-C handler");
    }

    let source = match std::fs::read_to_string(&args.file) {
        Ok(source) => source,
        Err(error) => {
            eprintln!(
                "{}",
                Style::new()
                    .bold()
                    .paint(format!("?CAN'T READ {}: {}", args.file.display(), error))
            );
            std::process::exit(2);
        }
    };
    debug!(file = %args.file.display(), bytes = source.len(), "loaded");

    let config = Config {
        seed: args.seed,
        ..Config::default()
    };
    if let Err(error) = run_source(&source, &config, interrupted) {
        eprintln!("{}", Style::new().bold().paint(format!("?{}", error)));
        std::process::exit(1);
    }
}

fn run_source(source: &str, config: &Config, interrupted: Arc<AtomicBool>) -> Result<(), Error> {
    let program = Program::load(source)?;
    let mut input = ConsoleInput {
        input: LineInput::new(BufReader::new(std::io::stdin())),
        interrupted: interrupted.clone(),
    };
    let mut output = ConsoleOutput {
        stdout: std::io::stdout(),
        interrupted,
    };
    mach::run(&program, &mut input, &mut output, config)
}

fn break_error() -> std::io::Error {
    std::io::Error::new(ErrorKind::Interrupted, "break")
}

/// Fails once Ctrl-C has been pressed.
struct ConsoleOutput {
    stdout: Stdout,
    interrupted: Arc<AtomicBool>,
}

impl Write for ConsoleOutput {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if self.interrupted.load(Ordering::SeqCst) {
            return Err(break_error());
        }
        self.stdout.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.stdout.flush()
    }
}

struct ConsoleInput {
    input: LineInput<BufReader<Stdin>>,
    interrupted: Arc<AtomicBool>,
}

impl Input for ConsoleInput {
    fn read_line(&mut self) -> std::io::Result<Option<String>> {
        let line = self.input.read_line()?;
        if self.interrupted.load(Ordering::SeqCst) {
            return Err(break_error());
        }
        Ok(line)
    }

    fn is_at_end(&mut self) -> bool {
        self.input.is_at_end()
    }
}
